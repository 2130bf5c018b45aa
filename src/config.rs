// Mon Feb 09 2026 - Alex

use crate::symbol::Machine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Architecture assumed for type expressions that resolve without a
    /// module scope.
    pub default_machine: Machine,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_machine: Machine::Amd64,
            log_level: "info".to_string(),
        }
    }
}
