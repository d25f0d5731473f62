//! Enumeration types for command-line and output parameters.

use serde::{Deserialize, Serialize};

/// Format of the on-screen roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered human-readable table.
    #[default]
    Table,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}
