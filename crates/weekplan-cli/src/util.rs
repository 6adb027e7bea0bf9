use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use weekplan_core::error::CoreError;

use crate::config::Config;

/// Picks the explicit `--member`, else the configured default member.
pub fn resolve_member(member: Option<String>, config: &Config) -> Result<String> {
    member
        .or_else(|| config.default_member.clone())
        .ok_or_else(|| {
            anyhow!(CoreError::InvalidInput(
                "No team member given. Pass --member or set default_member in weekplan.toml."
                    .to_string()
            ))
        })
}

/// Asks for confirmation unless `force` is set. A prompt that cannot be shown
/// counts as a refusal.
pub fn confirm(prompt: String, force: bool) -> bool {
    if force {
        return true;
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_member_prefers_flag() {
        let config = Config {
            default_member: Some("Alice".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_member(Some("Bob".to_string()), &config).unwrap(), "Bob");
        assert_eq!(resolve_member(None, &config).unwrap(), "Alice");
    }

    #[test]
    fn test_resolve_member_without_default_fails() {
        let err = resolve_member(None, &Config::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<CoreError>(), Some(CoreError::InvalidInput(_))));
    }
}
