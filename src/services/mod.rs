// Service exports
pub mod directory;

pub use directory::{parse_results, DirectoryClient, DirectoryError};
