use serde::{Deserialize, Serialize};

/// Configuration from tasksel.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classify: ClassifyConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// How rows without an explicit `kind` are handled
    #[serde(default)]
    pub legacy: LegacyPolicy,
}

/// Handling of untagged (legacy) rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyPolicy {
    /// Infer the kind, log at debug level
    Allow,
    /// Infer the kind, log a warning per row
    #[default]
    Warn,
    /// Refuse untagged rows
    Reject,
}
