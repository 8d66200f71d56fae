use crate::core::transaction::Transaction;
use crate::domain::model::{
    CategoryFilter, Element, ElementId, MutationResult, Selection, SelectionPartition,
};
use crate::domain::ports::{ConfigProvider, HostDocument};
use crate::utils::error::Result;

/// Split a selection into ids to write, ids that no longer resolve, and ids
/// whose element fails the eligibility predicate. Each output keeps the
/// selection's ascending id order.
pub fn partition_selection<R, P>(
    selection: &Selection,
    mut resolve: R,
    mut is_eligible: P,
) -> SelectionPartition
where
    R: FnMut(ElementId) -> Option<Element>,
    P: FnMut(&Element) -> bool,
{
    let mut partition = SelectionPartition::default();

    for &id in selection {
        match resolve(id) {
            Some(element) if is_eligible(&element) => partition.eligible.push(id),
            Some(_) => partition.ineligible.push(id),
            None => partition.unresolved.push(id),
        }
    }

    partition
}

/// Overwrites the Mark of every eligible selected element inside a single
/// named transaction.
#[derive(Debug, Clone)]
pub struct MutationBatch {
    filter: CategoryFilter,
    target_value: String,
    transaction_name: String,
}

impl MutationBatch {
    pub fn new(
        filter: CategoryFilter,
        target_value: impl Into<String>,
        transaction_name: impl Into<String>,
    ) -> Self {
        Self {
            filter,
            target_value: target_value.into(),
            transaction_name: transaction_name.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(
            config.category_filter(),
            config.target_value(),
            config.transaction_name(),
        )
    }

    pub fn target_value(&self) -> &str {
        &self.target_value
    }

    /// Commits even when nothing was eligible. Any write failure returns early;
    /// the transaction guard then rolls the host back and nothing is committed.
    pub fn apply<D: HostDocument + ?Sized>(
        &self,
        doc: &mut D,
        selection: &Selection,
    ) -> Result<MutationResult> {
        let mut tx = Transaction::start(doc, &self.transaction_name)?;

        let partition = {
            let host = tx.host();
            partition_selection(selection, |id| host.element(id), |e| self.filter.matches(e))
        };

        for &id in &partition.eligible {
            tx.host_mut().set_mark(id, &self.target_value)?;
        }

        let transaction = tx.commit()?;

        tracing::debug!(
            "Skipped {} unresolved and {} ineligible selected elements",
            partition.unresolved.len(),
            partition.ineligible.len()
        );

        Ok(MutationResult {
            changed_count: partition.eligible.len(),
            changed: partition.eligible,
            unresolved: partition.unresolved,
            ineligible: partition.ineligible,
            transaction,
        })
    }
}
