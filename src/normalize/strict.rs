// Opt-in typed validation of normalized replies
// Author: kelexine (https://github.com/kelexine)

use super::NormalizedReply;
use crate::error::{RelayError, Result};
use crate::models::InjuryReport;

impl NormalizedReply {
    /// Convert into a typed [`InjuryReport`].
    ///
    /// Fails with `SchemaMismatch` when a field has the wrong type or `severity`
    /// is not exactly `minor`, `moderate` or `severe`. Extra keys are ignored.
    pub fn to_report(&self) -> Result<InjuryReport> {
        serde_json::from_value(self.clone().into_value())
            .map_err(|e| RelayError::SchemaMismatch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RelayError;
    use crate::models::Severity;
    use crate::normalize::normalize_reply;

    #[test]
    fn test_well_typed_reply_converts() {
        let reply = normalize_reply(
            r#"{"injury_name":"Burn","first_aid_steps":["Call emergency services","Cool with water"],"severity":"severe"}"#,
        )
        .unwrap();

        let report = reply.to_report().unwrap();
        assert_eq!(report.severity, Severity::Severe);
        assert_eq!(report.first_aid_steps.len(), 2);
    }

    #[test]
    fn test_bad_severity_is_rejected() {
        let reply = normalize_reply(
            r#"{"injury_name":"Burn","first_aid_steps":[],"severity":"Moderate"}"#,
        )
        .unwrap();
        assert!(matches!(reply.to_report(), Err(RelayError::SchemaMismatch(_))));
    }

    #[test]
    fn test_steps_must_be_strings() {
        let reply = normalize_reply(
            r#"{"injury_name":"Burn","first_aid_steps":"cool it","severity":"minor"}"#,
        )
        .unwrap();
        assert!(matches!(reply.to_report(), Err(RelayError::SchemaMismatch(_))));
    }
}
