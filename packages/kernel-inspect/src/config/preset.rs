//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ConfigError;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Editor-as-you-type: shallow helper inlining (depth 4)
    Fast,

    /// Default: helper inlining up to depth 10
    #[default]
    Balanced,

    /// Pre-commit audit: deep helper inlining (depth 32)
    Thorough,
}

impl Preset {
    /// Helper inlining depth bound for this preset
    pub fn max_inline_depth(&self) -> usize {
        match self {
            Self::Fast => 4,
            Self::Balanced => 10,
            Self::Thorough => 32,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("fast".parse::<Preset>().unwrap(), Preset::Fast);
        assert_eq!("FAST".parse::<Preset>().unwrap(), Preset::Fast);
        assert_eq!("balanced".parse::<Preset>().unwrap(), Preset::Balanced);
        assert_eq!("thorough".parse::<Preset>().unwrap(), Preset::Thorough);
        assert!(matches!(
            "strict".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_preset_display() {
        assert_eq!(Preset::Fast.to_string(), "fast");
        assert_eq!(Preset::default().to_string(), "balanced");
    }

    #[test]
    fn test_preset_depths_increase() {
        assert!(Preset::Fast.max_inline_depth() < Preset::Balanced.max_inline_depth());
        assert!(Preset::Balanced.max_inline_depth() < Preset::Thorough.max_inline_depth());
        assert_eq!(Preset::Balanced.max_inline_depth(), 10);
    }
}
