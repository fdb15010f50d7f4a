use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Pattern printed for a `switch` default branch unless configured.
pub const DEFAULT_CASE: &str = "'*'";

/// Printer settings.
///
/// ```toml
/// indent = "    "
/// default_case = "'*'"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Added to the line prefix for every nested block.
    pub indent: String,
    /// Pattern printed for the default branch of a `switch`.
    pub default_case: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            default_case: DEFAULT_CASE.to_string(),
        }
    }
}

impl PrintConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PrintConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Indent(self.indent.clone()));
        }
        Ok(())
    }
}
