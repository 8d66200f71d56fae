use crate::domain::model::TransactionState;
use crate::domain::ports::TransactionHost;
use crate::utils::error::{MarkError, Result};

/// One open atomic boundary on a host document.
///
/// `commit` consumes the guard, so nothing can be written after it. A guard
/// dropped while still started is aborted and the host is asked to discard
/// whatever was staged.
pub struct Transaction<'h, H: TransactionHost + ?Sized> {
    host: &'h mut H,
    name: String,
    state: TransactionState,
}

impl<'h, H: TransactionHost + ?Sized> Transaction<'h, H> {
    pub fn start(host: &'h mut H, name: &str) -> Result<Self> {
        host.start_transaction(name).map_err(|e| match e {
            MarkError::TransactionStartFailure { .. } | MarkError::Cancelled { .. } => e,
            other => MarkError::TransactionStartFailure {
                name: name.to_string(),
                reason: other.to_string(),
            },
        })?;

        tracing::debug!("Transaction '{}' started", name);

        Ok(Self {
            host,
            name: name.to_string(),
            state: TransactionState::Started,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn host(&self) -> &H {
        &*self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut *self.host
    }

    pub fn commit(mut self) -> Result<TransactionState> {
        // On failure the guard stays started and the drop below rolls back.
        self.host.commit_transaction().map_err(|e| match e {
            MarkError::TransactionCommitFailure { .. } | MarkError::Cancelled { .. } => e,
            other => MarkError::TransactionCommitFailure {
                name: self.name.clone(),
                reason: other.to_string(),
            },
        })?;

        self.state = TransactionState::Committed;
        tracing::debug!("Transaction '{}' committed", self.name);
        Ok(self.state)
    }
}

impl<H: TransactionHost + ?Sized> Drop for Transaction<'_, H> {
    fn drop(&mut self) {
        if self.state != TransactionState::Started {
            return;
        }

        self.state = TransactionState::Aborted;
        tracing::warn!("Transaction '{}' aborted, rolling back", self.name);
        if let Err(e) = self.host.rollback_transaction() {
            tracing::error!("Rollback of '{}' failed: {}", self.name, e);
        }
    }
}
