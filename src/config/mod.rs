#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::ElementKind;
use crate::domain::ports::{ConfigProvider, UnsetMarkPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};

/// Settings for one invocation, passed in explicitly rather than read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub category: String,
    pub element_kind: ElementKind,
    pub target_value: String,
    pub modify_existing_marks: bool,
    pub unset_mark_policy: UnsetMarkPolicy,
    pub element_noun: String,
    pub transaction_name: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            category: "Doors".to_string(),
            element_kind: ElementKind::FamilyInstance,
            target_value: "42".to_string(),
            modify_existing_marks: true,
            unset_mark_policy: UnsetMarkPolicy::Reject,
            element_noun: "door".to_string(),
            transaction_name: "Modify Existing Door Marks".to_string(),
        }
    }
}

impl ConfigProvider for CommandConfig {
    fn category(&self) -> &str {
        &self.category
    }

    fn element_kind(&self) -> ElementKind {
        self.element_kind
    }

    fn target_value(&self) -> &str {
        &self.target_value
    }

    fn modify_existing_marks(&self) -> bool {
        self.modify_existing_marks
    }

    fn unset_mark_policy(&self) -> UnsetMarkPolicy {
        self.unset_mark_policy
    }

    fn element_noun(&self) -> &str {
        &self.element_noun
    }

    fn transaction_name(&self) -> &str {
        &self.transaction_name
    }
}

impl Validate for CommandConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("category", &self.category)?;
        validate_non_empty_string("element_noun", &self.element_noun)?;
        validate_non_empty_string("transaction_name", &self.transaction_name)?;
        // target_value may legitimately be empty: it clears the mark
        Ok(())
    }
}
