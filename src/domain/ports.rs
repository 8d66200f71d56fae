use crate::domain::model::{
    CategoryFilter, Element, ElementId, ElementKind, MarkReport, Selection,
};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Enumerates candidate elements already narrowed to one category and kind.
pub trait ElementSource {
    fn collect_elements(&self, filter: &CategoryFilter) -> Result<Vec<Element>>;
}

pub trait SelectionProvider {
    fn selected_ids(&self) -> Result<Selection>;
}

/// Host-owned atomic boundary. Use it through `core::transaction::Transaction`
/// rather than calling these directly.
pub trait TransactionHost {
    fn start_transaction(&mut self, name: &str) -> Result<()>;
    fn commit_transaction(&mut self) -> Result<()>;
    fn rollback_transaction(&mut self) -> Result<()>;
}

pub trait HostDocument: ElementSource + SelectionProvider + TransactionHost {
    /// Resolve an id to the live element, if it still exists.
    fn element(&self, id: ElementId) -> Option<Element>;

    /// Overwrite the Mark of one element. Only valid inside a started transaction.
    fn set_mark(&mut self, id: ElementId, value: &str) -> Result<()>;
}

pub trait ReportSink {
    fn emit(&mut self, report: &MarkReport) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum UnsetMarkPolicy {
    /// Group elements with an unassigned Mark under the empty-string key.
    Empty,
    /// Fail the report with `MissingMarkValue`.
    #[default]
    Reject,
}

pub trait ConfigProvider {
    fn category(&self) -> &str;
    fn element_kind(&self) -> ElementKind;
    fn target_value(&self) -> &str;
    fn modify_existing_marks(&self) -> bool;
    fn unset_mark_policy(&self) -> UnsetMarkPolicy;
    /// Singular noun used in diagnostic lines, e.g. "door".
    fn element_noun(&self) -> &str;
    fn transaction_name(&self) -> &str;

    fn category_filter(&self) -> CategoryFilter {
        CategoryFilter::new(self.category(), self.element_kind())
    }
}
