pub mod command;
pub mod mark_index;
pub mod mutation_batch;
pub mod transaction;

pub use crate::domain::model::{Element, MarkReport, MutationResult};
pub use crate::domain::ports::{ConfigProvider, HostDocument, ReportSink};
pub use crate::utils::error::Result;
