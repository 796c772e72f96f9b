//! Job submission payload.

use serde::{Deserialize, Serialize};

/// Execution configuration attached to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QobjConfig {
    /// Number of shots.
    pub shots: u32,
    /// Backend-specific options, passed through to the service untouched.
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl QobjConfig {
    /// Configuration with the given shot count and no options.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            options: serde_json::Map::new(),
        }
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// A quantum object: one circuit plus its execution configuration.
///
/// The circuit is carried as OpenQASM 2.0 source; it is not parsed or
/// validated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qobj {
    /// Client-side identifier of the payload.
    pub qobj_id: String,
    /// Optional human-readable job name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// OpenQASM 2.0 program.
    pub program: String,
    /// Execution configuration.
    pub config: QobjConfig,
}

impl Qobj {
    /// Create a payload for `program` with `shots` shots.
    pub fn new(program: impl Into<String>, shots: u32) -> Self {
        Self {
            qobj_id: uuid::Uuid::new_v4().to_string(),
            name: None,
            program: program.into(),
            config: QobjConfig::new(shots),
        }
    }

    /// Set the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the execution configuration.
    pub fn with_config(mut self, config: QobjConfig) -> Self {
        self.config = config;
        self
    }
}
