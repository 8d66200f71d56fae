use crate::domain::model::{
    CategoryFilter, Element, ElementId, MarkParameter, Selection,
};
use crate::domain::ports::{ElementSource, HostDocument, SelectionProvider, TransactionHost};
use crate::utils::error::{MarkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// On-disk shape of a model: every element plus the ids the user has selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub selection: Vec<ElementId>,
}

#[derive(Debug, Clone)]
struct PendingTransaction {
    name: String,
    // Original mark of each element touched so far, in write order.
    originals: Vec<(usize, MarkParameter)>,
}

/// A host document held entirely in memory.
///
/// Writes are only accepted inside a transaction. Rolling back restores every
/// mark touched since the transaction started.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
    selection: Selection,
    pending: Option<PendingTransaction>,
    committed: Vec<String>,
    cancel_next_commit: bool,
}

impl InMemoryDocument {
    pub fn new(elements: Vec<Element>) -> Result<Self> {
        let mut index = HashMap::with_capacity(elements.len());
        for (position, element) in elements.iter().enumerate() {
            if index.insert(element.id, position).is_some() {
                return Err(MarkError::config(format!(
                    "duplicate element id {} in model",
                    element.id
                )));
            }
        }

        Ok(Self {
            elements,
            index,
            selection: Selection::new(),
            pending: None,
            committed: Vec::new(),
            cancel_next_commit: false,
        })
    }

    pub fn from_model(model: ModelFile) -> Result<Self> {
        let mut doc = Self::new(model.elements)?;
        doc.select(model.selection);
        Ok(doc)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let model: ModelFile = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} elements from {}",
            model.elements.len(),
            path.as_ref().display()
        );
        Self::from_model(model)
    }

    pub fn to_model(&self) -> ModelFile {
        ModelFile {
            elements: self.elements.clone(),
            selection: self.selection.iter().copied().collect(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.to_model())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Replace the current selection. Ids need not exist in the document.
    pub fn select<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        self.selection = ids.into_iter().collect();
    }

    pub fn mark_of(&self, id: ElementId) -> Option<&MarkParameter> {
        self.index.get(&id).map(|&i| &self.elements[i].mark)
    }

    pub fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }

    /// Names of committed transactions, oldest first.
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    /// Simulate the user cancelling the next commit.
    pub fn cancel_next_commit(&mut self) {
        self.cancel_next_commit = true;
    }
}

impl ElementSource for InMemoryDocument {
    fn collect_elements(&self, filter: &CategoryFilter) -> Result<Vec<Element>> {
        Ok(self
            .elements
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

impl SelectionProvider for InMemoryDocument {
    fn selected_ids(&self) -> Result<Selection> {
        Ok(self.selection.clone())
    }
}

impl TransactionHost for InMemoryDocument {
    fn start_transaction(&mut self, name: &str) -> Result<()> {
        if let Some(pending) = &self.pending {
            return Err(MarkError::TransactionStartFailure {
                name: name.to_string(),
                reason: format!("transaction '{}' is still open", pending.name),
            });
        }

        self.pending = Some(PendingTransaction {
            name: name.to_string(),
            originals: Vec::new(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        let name = match &self.pending {
            Some(pending) => pending.name.clone(),
            None => {
                return Err(MarkError::TransactionCommitFailure {
                    name: String::new(),
                    reason: "no open transaction".to_string(),
                })
            }
        };

        if self.cancel_next_commit {
            self.cancel_next_commit = false;
            return Err(MarkError::cancelled(format!("'{}' cancelled by user", name)));
        }

        self.pending = None;
        self.committed.push(name);
        Ok(())
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            for (position, original) in pending.originals.into_iter().rev() {
                self.elements[position].mark = original;
            }
        }
        Ok(())
    }
}

impl HostDocument for InMemoryDocument {
    fn element(&self, id: ElementId) -> Option<Element> {
        self.index.get(&id).map(|&i| self.elements[i].clone())
    }

    fn set_mark(&mut self, id: ElementId, value: &str) -> Result<()> {
        let position = *self
            .index
            .get(&id)
            .ok_or(MarkError::ElementNotFound { id })?;
        let pending = self
            .pending
            .as_mut()
            .ok_or_else(|| MarkError::attribute_write(id, "no open transaction"))?;

        let element = &mut self.elements[position];
        if element.read_only {
            return Err(MarkError::attribute_write(id, "element is read-only"));
        }
        if element.mark == MarkParameter::Absent {
            return Err(MarkError::MarkAttributeMissing { id });
        }

        let previous = std::mem::replace(&mut element.mark, MarkParameter::Value(value.to_string()));
        pending.originals.push((position, previous));
        Ok(())
    }
}
