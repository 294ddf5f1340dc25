pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::ArchiverConfig};
pub use crate::core::{
    archiver::Archiver,
    category::CategoryLookup,
    class_name::ClassNameNormalizer,
    leetcode::{Credentials, LeetCodeClient},
    source_file::SourceFileBuilder,
};
pub use utils::error::{ArchiveError, Result};
