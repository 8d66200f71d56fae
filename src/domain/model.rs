use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What sort of object an element is, independent of its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ElementKind {
    FamilyInstance,
    FamilySymbol,
    System,
}

/// State of the Mark attribute on one element.
///
/// `Absent` means the element kind has no such attribute at all, `Unset`
/// means the attribute exists but was never assigned. An empty string is a
/// regular value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkParameter {
    #[default]
    Absent,
    Unset,
    Value(String),
}

impl MarkParameter {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v.as_str()),
            Self::Absent | Self::Unset => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub category: Option<String>,
    pub kind: ElementKind,
    #[serde(default)]
    pub mark: MarkParameter,
    /// Host-side lock; writes to a read-only element are rejected.
    #[serde(default)]
    pub read_only: bool,
}

impl Element {
    pub fn new(id: i64, category: &str, kind: ElementKind, mark: MarkParameter) -> Self {
        Self {
            id: ElementId(id),
            category: Some(category.to_string()),
            kind,
            mark,
            read_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub category: String,
    pub kind: ElementKind,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            category: category.into(),
            kind,
        }
    }

    /// An element without a category never matches.
    pub fn matches(&self, element: &Element) -> bool {
        element.kind == self.kind && element.category.as_deref() == Some(self.category.as_str())
    }
}

/// Currently selected element ids. Ordered so that every walk over the
/// selection visits ids the same way.
pub type Selection = BTreeSet<ElementId>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub mark: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkReport {
    pub total_elements: usize,
    pub lines: Vec<ReportLine>,
}

impl MarkReport {
    pub fn group_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPartition {
    pub eligible: Vec<ElementId>,
    pub unresolved: Vec<ElementId>,
    pub ineligible: Vec<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    NotStarted,
    Started,
    Committed,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    pub changed_count: usize,
    pub changed: Vec<ElementId>,
    pub unresolved: Vec<ElementId>,
    pub ineligible: Vec<ElementId>,
    pub transaction: TransactionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub result: CommandResult,
    pub message: Option<String>,
    pub report: Option<MarkReport>,
    pub mutation: Option<MutationResult>,
}

impl CommandOutcome {
    /// `NotStarted` when the write path did not run.
    pub fn transaction_state(&self) -> TransactionState {
        self.mutation
            .as_ref()
            .map_or(TransactionState::NotStarted, |m| m.transaction)
    }

    pub fn changed_count(&self) -> usize {
        self.mutation.as_ref().map_or(0, |m| m.changed_count)
    }
}
