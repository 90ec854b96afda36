//! Engine configuration: role-code vocabularies.
//!
//! The rightholder code is fixed (see [`crate::inheritance::RIGHTHOLDER_ROLE_CODE`]);
//! the vocabularies here only refine *why* a relation is inherited.

use ahash::AHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::inheritance::is_rightholder;

const DEFAULT_KEY_ROLE_CODES: &[&str] = &[
    "daglig-leder",
    "styreleder",
    "innehaver",
    "komplementar",
    "deltaker-delt-ansvar",
    "deltaker-fullt-ansvar",
    "bestyrende-reder",
    "kontaktperson-nuf",
];

const DEFAULT_AGENT_ROLE_CODES: &[&str] = &["agent", "regnskapsforer", "revisor", "forretningsforer"];

/// Role-code vocabularies used by the inheritance-origin classifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Statutory roles that give their holder authority over the organization.
    pub key_role_codes: Vec<String>,
    /// Roles through which a client organization is served by an agent.
    pub agent_role_codes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            key_role_codes: DEFAULT_KEY_ROLE_CODES.iter().map(|s| s.to_string()).collect(),
            agent_role_codes: DEFAULT_AGENT_ROLE_CODES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn is_key_role(&self, code: &str) -> bool {
        self.key_role_codes.iter().any(|c| c == code)
    }

    pub fn is_agent_role(&self, code: &str) -> bool {
        self.agent_role_codes.iter().any(|c| c == code)
    }

    /// Reject empty codes, the rightholder code, and codes listed in both vocabularies.
    pub fn validate(&self) -> Result<()> {
        let mut key_roles = AHashSet::new();
        for code in &self.key_role_codes {
            check_code(code, "keyRoleCodes")?;
            key_roles.insert(code.as_str());
        }
        for code in &self.agent_role_codes {
            check_code(code, "agentRoleCodes")?;
            if key_roles.contains(code.as_str()) {
                return Err(EngineError::Config {
                    reason: format!("role code '{code}' is both a key role and an agent role"),
                });
            }
        }
        Ok(())
    }
}

fn check_code(code: &str, field: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(EngineError::Config {
            reason: format!("{field} contains an empty role code"),
        });
    }
    if is_rightholder(code) {
        return Err(EngineError::Config {
            reason: format!("{field} must not contain the rightholder role code"),
        });
    }
    Ok(())
}

/// Parse and validate an engine config from a JSON string.
pub fn parse_engine_config(json: &str) -> Result<EngineConfig> {
    let config: EngineConfig = serde_json::from_str(json)?;
    config.validate()?;
    debug!(
        key_roles = config.key_role_codes.len(),
        agent_roles = config.agent_role_codes.len(),
        "parsed engine config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = parse_engine_config("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.is_key_role("daglig-leder"));
        assert!(config.is_agent_role("regnskapsforer"));
        assert!(!config.is_key_role("rettighetshaver"));
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = parse_engine_config(r#"{"keyRoleCodes":["styreleder"]}"#).unwrap();
        assert_eq!(config.key_role_codes, vec!["styreleder"]);
        assert!(!config.is_key_role("daglig-leder"));
        assert!(config.is_agent_role("agent"));
    }

    #[test]
    fn overlapping_vocabularies_rejected() {
        let err = parse_engine_config(r#"{"keyRoleCodes":["revisor"]}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
        assert!(err.to_string().contains("revisor"));
    }

    #[test]
    fn rightholder_code_rejected() {
        let err = parse_engine_config(r#"{"agentRoleCodes":["rettighetshaver"]}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn blank_code_rejected() {
        let err = parse_engine_config(r#"{"keyRoleCodes":["  "]}"#).unwrap_err();
        assert!(err.to_string().contains("keyRoleCodes"));
    }

    #[test]
    fn malformed_json_is_payload_error() {
        let err = parse_engine_config(r#"{"keyRoleCodes":"#).unwrap_err();
        assert!(matches!(err, EngineError::Payload(_)));
    }
}
