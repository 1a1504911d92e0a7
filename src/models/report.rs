// Structured injury report returned to clients
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Typed view of a model reply.
///
/// The default pipeline only checks that the three keys exist and returns the
/// model's object untouched; this type is used when strict validation is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryReport {
    pub injury_name: String,
    pub first_aid_steps: Vec<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}
