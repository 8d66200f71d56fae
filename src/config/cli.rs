use crate::config::CommandConfig;
use crate::domain::model::ElementKind;
use crate::domain::ports::UnsetMarkPolicy;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "door-marks")]
#[command(about = "List element marks by value and overwrite the marks of selected elements")]
pub struct CliConfig {
    /// Path to the JSON model file
    #[arg(long)]
    pub model: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub kind: Option<ElementKind>,

    /// Value written to the Mark of each selected element
    #[arg(long)]
    pub target_value: Option<String>,

    /// Only list marks, never modify the model
    #[arg(long)]
    pub no_modify: bool,

    /// How to treat elements whose Mark was never assigned
    #[arg(long, value_enum)]
    pub unset_marks: Option<UnsetMarkPolicy>,

    /// Write the modified model to this path
    #[arg(long)]
    pub save: Option<String>,

    /// Write the mark report as JSON to this path
    #[arg(long)]
    pub report_json: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Flags given on the command line win over the configuration file.
    pub fn apply_overrides(&self, config: &mut CommandConfig) {
        if let Some(category) = &self.category {
            config.category = category.clone();
        }
        if let Some(kind) = self.kind {
            config.element_kind = kind;
        }
        if let Some(target) = &self.target_value {
            config.target_value = target.clone();
        }
        if self.no_modify {
            config.modify_existing_marks = false;
        }
        if let Some(policy) = self.unset_marks {
            config.unset_mark_policy = policy;
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let paths = [
            ("model", &self.model),
            ("config", &self.config),
            ("save", &self.save),
            ("report_json", &self.report_json),
        ];
        for (field, path) in paths {
            if let Some(path) = path {
                validate_path(field, path)?;
            }
        }
        Ok(())
    }
}
