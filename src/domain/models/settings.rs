use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Settings of the `ccms-config` tool itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Namespace that marks a value as an indirection tag
    #[serde(default = "default_tag_name")]
    pub tag_name: String,

    /// Deployment tier whose file is loaded by `ccms-config tier`
    #[serde(default = "default_tier")]
    pub tier: String,

    /// Directory holding one `<tier>.yaml` file per tier
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Tiers whose files are bound as-is, without any lookup
    #[serde(default = "default_local_tiers")]
    pub local_tiers: Vec<String>,

    /// Key store used to resolve tags
    #[serde(default)]
    pub lookup: LookupSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_tag_name() -> String {
    "ccms".to_string()
}

fn default_tier() -> String {
    "development".to_string()
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config/tier")
}

fn default_local_tiers() -> Vec<String> {
    ["development", "sit", "docker", "testing"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tag_name: default_tag_name(),
            tier: default_tier(),
            config_dir: default_config_dir(),
            local_tiers: default_local_tiers(),
            lookup: LookupSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Whether `tier` is bound without resolving indirection tags
    pub fn is_local_tier(&self, tier: &str) -> bool {
        self.local_tiers
            .iter()
            .any(|local| local.eq_ignore_ascii_case(tier))
    }
}

/// Where looked-up keys come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// Process environment
    #[default]
    Env,
    /// Flat YAML or JSON key file
    File,
    /// Keys listed inline under `lookup.keys`
    Map,
}

impl FromStr for LookupSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "file" => Ok(Self::File),
            "map" => Ok(Self::Map),
            other => Err(format!(
                "unknown lookup source '{other}', expected one of: env, file, map"
            )),
        }
    }
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Env => "env",
            Self::File => "file",
            Self::Map => "map",
        })
    }
}

/// Key store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LookupSettings {
    #[serde(default)]
    pub source: LookupSource,

    /// Prefix prepended to keys when reading the environment
    #[serde(default)]
    pub env_prefix: String,

    /// Key file read when `source` is `file`
    #[serde(default)]
    pub keys_file: Option<PathBuf>,

    /// Inline keys used when `source` is `map`
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; console only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
