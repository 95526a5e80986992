//! Local snapshot persistence.

pub mod error;
pub mod file;

pub use error::StoreError;
pub use file::JsonFileStore;
