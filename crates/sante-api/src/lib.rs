//! REST implementation of the backend gateway.
//!
//! [`ApiClient`] is the thin reqwest wrapper; [`AuthRetryGateway`] decorates
//! any gateway with the single-shot token-refresh policy.

mod client;
mod gateway_impl;
mod retry;
mod wire;

pub use client::ApiClient;
pub use retry::AuthRetryGateway;
