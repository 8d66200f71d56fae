use crate::core::mark_index::MarkIndex;
use crate::core::mutation_batch::MutationBatch;
use crate::domain::model::{CommandOutcome, CommandResult};
use crate::domain::ports::{ConfigProvider, HostDocument, ReportSink};
use crate::utils::error::{MarkError, Result};
use crate::utils::text::plural_suffix;

/// The entry point a host calls once per user action.
///
/// Runs the read path (collect, group, report) and then, when enabled, the
/// write path (selection, filtered overwrite, commit). The two share no state.
pub struct ListMarksCommand<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> ListMarksCommand<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn execute<D, S>(&self, doc: &mut D, sink: &mut S) -> Result<CommandOutcome>
    where
        D: HostDocument + ?Sized,
        S: ReportSink + ?Sized,
    {
        let noun = self.config.element_noun();
        let elements = doc.collect_elements(&self.config.category_filter())?;
        let n = elements.len();
        tracing::debug!("{} {}{} found.", n, noun, plural_suffix(n));

        let report = MarkIndex::build(&elements, self.config.unset_mark_policy())?.report();
        if let Some(report) = &report {
            sink.emit(report)?;
        }

        let mutation = if self.config.modify_existing_marks() {
            let selection = doc.selected_ids()?;
            let batch = MutationBatch::from_config(&self.config);
            let result = batch.apply(doc, &selection)?;
            tracing::info!(
                "Set mark '{}' on {} selected {}{}",
                batch.target_value(),
                result.changed_count,
                noun,
                plural_suffix(result.changed_count)
            );
            Some(result)
        } else {
            tracing::debug!("Mark modification disabled");
            None
        };

        // Success does not depend on how many elements changed.
        Ok(CommandOutcome {
            result: CommandResult::Succeeded,
            message: None,
            report,
            mutation,
        })
    }

    /// Like `execute`, but folds every error into the outcome the host sees.
    pub fn invoke<D, S>(&self, doc: &mut D, sink: &mut S) -> CommandOutcome
    where
        D: HostDocument + ?Sized,
        S: ReportSink + ?Sized,
    {
        match self.execute(doc, sink) {
            Ok(outcome) => outcome,
            Err(MarkError::Cancelled { reason }) => {
                tracing::info!("Command cancelled: {}", reason);
                CommandOutcome {
                    result: CommandResult::Cancelled,
                    message: Some(reason),
                    report: None,
                    mutation: None,
                }
            }
            Err(e) => {
                tracing::error!("Command failed: {} (Category: {:?})", e, e.category());
                CommandOutcome {
                    result: CommandResult::Failed,
                    message: Some(e.user_friendly_message()),
                    report: None,
                    mutation: None,
                }
            }
        }
    }
}
