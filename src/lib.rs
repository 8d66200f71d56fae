pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{
    memory_document::{InMemoryDocument, ModelFile},
    report_sink::TracingReportSink,
};
pub use crate::config::{toml_config::TomlConfig, CommandConfig};
pub use crate::core::{
    command::ListMarksCommand, mark_index::MarkIndex, mutation_batch::MutationBatch,
};
pub use crate::utils::error::{MarkError, Result};
