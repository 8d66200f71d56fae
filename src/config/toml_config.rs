use crate::config::CommandConfig;
use crate::domain::model::ElementKind;
use crate::domain::ports::UnsetMarkPolicy;
use crate::utils::error::{MarkError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub model: Option<ModelConfig>,
    pub filter: Option<FilterConfig>,
    pub report: Option<ReportConfig>,
    pub mutation: Option<MutationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: String,
    pub save_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub category: Option<String>,
    pub kind: Option<ElementKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub noun: Option<String>,
    pub unset_marks: Option<UnsetMarkPolicy>,
    pub json_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    pub enabled: Option<bool>,
    pub target_value: Option<String>,
    pub transaction_name: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MarkError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MarkError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn model_path(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.path.as_str())
    }

    pub fn save_path(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| m.save_path.as_deref())
    }

    pub fn report_json_path(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.json_path.as_deref())
    }

    /// Overlay the values present in this file onto the built-in defaults.
    pub fn to_command_config(&self) -> CommandConfig {
        let mut config = CommandConfig::default();

        if let Some(filter) = &self.filter {
            if let Some(category) = &filter.category {
                config.category = category.clone();
            }
            if let Some(kind) = filter.kind {
                config.element_kind = kind;
            }
        }

        if let Some(report) = &self.report {
            if let Some(noun) = &report.noun {
                config.element_noun = noun.clone();
            }
            if let Some(policy) = report.unset_marks {
                config.unset_mark_policy = policy;
            }
        }

        if let Some(mutation) = &self.mutation {
            if let Some(enabled) = mutation.enabled {
                config.modify_existing_marks = enabled;
            }
            if let Some(target) = &mutation.target_value {
                config.target_value = target.clone();
            }
            if let Some(name) = &mutation.transaction_name {
                config.transaction_name = name.clone();
            }
        }

        config
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(model) = &self.model {
            validate_path("model.path", &model.path)?;
            if let Some(save_path) = &model.save_path {
                validate_path("model.save_path", save_path)?;
            }
        }
        if let Some(json_path) = self.report_json_path() {
            validate_path("report.json_path", json_path)?;
        }
        self.to_command_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[model]
path = "./model.json"
save_path = "./out/model.json"

[filter]
category = "Windows"
kind = "family_instance"

[report]
noun = "window"
unset_marks = "empty"

[mutation]
enabled = false
target_value = "W-00"
transaction_name = "Renumber Windows"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model_path(), Some("./model.json"));
        assert_eq!(config.save_path(), Some("./out/model.json"));

        let command = config.to_command_config();
        assert_eq!(command.category(), "Windows");
        assert_eq!(command.element_noun(), "window");
        assert_eq!(command.unset_mark_policy(), UnsetMarkPolicy::Empty);
        assert!(!command.modify_existing_marks());
        assert_eq!(command.target_value(), "W-00");
        assert_eq!(command.transaction_name(), "Renumber Windows");
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let config = TomlConfig::from_toml_str("[mutation]\ntarget_value = \"7\"\n").unwrap();
        let command = config.to_command_config();
        assert_eq!(command.category, "Doors");
        assert_eq!(command.target_value, "7");
        assert!(command.modify_existing_marks);
        assert!(config.model_path().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOOR_MARKS_TEST_TARGET", "99");

        let toml_content = r#"
[mutation]
target_value = "${DOOR_MARKS_TEST_TARGET}"
transaction_name = "${DOOR_MARKS_UNDEFINED_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let command = config.to_command_config();
        assert_eq!(command.target_value, "99");
        assert_eq!(command.transaction_name, "${DOOR_MARKS_UNDEFINED_VAR}");

        std::env::remove_var("DOOR_MARKS_TEST_TARGET");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[filter]\ncategory = \"\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[model]\npath = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[filter\ncategory = 1").unwrap_err();
        assert!(matches!(err, MarkError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[model]\npath = \"doors.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.model_path(), Some("doors.json"));
    }
}
