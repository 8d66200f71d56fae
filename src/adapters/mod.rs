// Adapters layer: concrete host-side implementations of the domain ports.

pub mod memory_document;
pub mod report_sink;
