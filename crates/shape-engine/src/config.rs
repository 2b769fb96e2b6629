use modeling_ops::OpOptions;
use serde::{Deserialize, Serialize};

/// Engine settings. Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on scheduler turns per `flush`.
    pub max_settle_turns: usize,
    /// Refuse child attachments and references that would form a dependency cycle.
    pub reject_cycles: bool,
    /// Offset tolerance used when a declaration leaves it unset.
    pub default_offset_tolerance: f64,
    /// Treat a kernel builder that reports "not done" as a failed rebuild.
    pub verify_kernel_results: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_settle_turns: 64,
            reject_cycles: true,
            default_offset_tolerance: 1e-7,
            verify_kernel_results: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub(crate) fn op_options(&self) -> OpOptions {
        OpOptions {
            verify_kernel_results: self.verify_kernel_results,
            default_tolerance: self.default_offset_tolerance,
        }
    }
}
