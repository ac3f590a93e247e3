//! File-backed implementations of the storage ports.
//!
//! Everything lives under the platform config directory
//! (`~/.config/sante/` on Linux): credentials, persistent flags, and the
//! cache of daily reports that could not be submitted yet.

mod atomic_file;
pub mod credential_store;
pub mod flags_repository;
pub mod paths;
pub mod report_cache;

pub use credential_store::FileCredentialStore;
pub use flags_repository::TomlFlagsRepository;
pub use paths::SantePaths;
pub use report_cache::DirReportCache;
