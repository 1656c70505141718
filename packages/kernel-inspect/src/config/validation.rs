//! Configuration validation

use super::error::{ConfigError, ConfigResult};
use super::inspection_config::InspectionConfig;
use crate::features::rule_checks::RuleKind;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Inclusive bounds for `max_inline_depth`
pub const INLINE_DEPTH_RANGE: (usize, usize) = (1, 64);

impl Validatable for InspectionConfig {
    fn validate(&self) -> ConfigResult<()> {
        let (min, max) = INLINE_DEPTH_RANGE;
        if !(min..=max).contains(&self.max_inline_depth) {
            return Err(ConfigError::range_with_hint(
                "max_inline_depth",
                self.max_inline_depth,
                min,
                max,
                "Helpers are inlined at least one level deep; deeper chains are truncated",
            ));
        }

        if self.kernel_annotation_suffixes.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Custom(
                "kernel_annotation_suffixes must not contain empty entries".to_string(),
            ));
        }
        if self.kernel_context_type.is_empty() {
            return Err(ConfigError::Custom(
                "kernel_context_type must not be empty".to_string(),
            ));
        }
        if self.trusted_namespace.is_empty() {
            return Err(ConfigError::Custom(
                "trusted_namespace must not be empty".to_string(),
            ));
        }

        let valid: Vec<&str> = RuleKind::ALL.iter().map(|k| k.id()).collect();
        for rule in &self.disabled_rules {
            if rule.parse::<RuleKind>().is_err() {
                return Err(ConfigError::unknown_rule_with_suggestion(rule.as_str(), &valid));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "InspectionConfig"
    }
}
