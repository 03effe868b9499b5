use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_SENSOR_COLUMN: &str = "Cosit";
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "Sdate";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Describes where the engine finds its two required fields and how the
/// timestamp text is laid out.
///
/// Stored as a plain JSON object on disk; any missing key falls back to the
/// default:
/// ```json
/// {
///   "sensor_column": "Cosit",
///   "timestamp_column": "Sdate",
///   "timestamp_format": "%d/%m/%Y %H:%M"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sensor_column: String,
    pub timestamp_column: String,
    pub timestamp_format: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensor_column: DEFAULT_SENSOR_COLUMN.to_string(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads from `path` when given, otherwise uses the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
