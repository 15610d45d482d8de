//! Duplicate-handling policy for the prompt registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PromptError;

/// What the registry does when a prompt is added under a key that is
/// already bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateBehavior {
    /// Log a warning, then replace the existing prompt.
    #[default]
    Warn,
    /// Reject the new prompt with [`PromptError::AlreadyExists`].
    Error,
    /// Replace the existing prompt silently.
    Replace,
    /// Keep the existing prompt and drop the new one.
    Ignore,
}

impl DuplicateBehavior {
    /// Every recognized policy, in the order they are reported to users.
    pub const ALL: [DuplicateBehavior; 4] = [Self::Warn, Self::Error, Self::Replace, Self::Ignore];

    /// The configuration spelling of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Replace => "replace",
            Self::Ignore => "ignore",
        }
    }

    /// Resolve an optional configuration value.
    ///
    /// `None` and the empty string both select the default (`warn`).
    /// Anything else must be a policy name spelled exactly.
    pub fn resolve(value: Option<&str>) -> Result<Self, PromptError> {
        match value {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for DuplicateBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateBehavior {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(DuplicateBehavior::as_str).collect();
                PromptError::configuration(format!(
                    "Invalid duplicate_behavior: {}. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_policies() {
        for policy in DuplicateBehavior::ALL {
            assert_eq!(policy.as_str().parse::<DuplicateBehavior>().unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_names_are_exact() {
        for value in ["WARN", "Replace", " ignore ", "error\n", "   "] {
            let err = DuplicateBehavior::resolve(Some(value)).unwrap_err();
            assert!(
                matches!(err, PromptError::Configuration(_)),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_policy_lists_valid_values() {
        let err = "overwrite".parse::<DuplicateBehavior>().unwrap_err();
        assert!(matches!(err, PromptError::Configuration(_)));
        let msg = err.to_string();
        assert!(msg.contains("overwrite"));
        for policy in DuplicateBehavior::ALL {
            assert!(msg.contains(policy.as_str()));
        }
    }

    #[test]
    fn test_resolve_defaults_to_warn() {
        assert_eq!(DuplicateBehavior::resolve(None).unwrap(), DuplicateBehavior::Warn);
        assert_eq!(DuplicateBehavior::resolve(Some("")).unwrap(), DuplicateBehavior::Warn);
        assert_eq!(
            DuplicateBehavior::resolve(Some("ignore")).unwrap(),
            DuplicateBehavior::Ignore
        );
        assert!(DuplicateBehavior::resolve(Some("bogus")).is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DuplicateBehavior::Ignore).unwrap();
        assert_eq!(json, "\"ignore\"");
        let parsed: DuplicateBehavior = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, DuplicateBehavior::Error);
    }
}
