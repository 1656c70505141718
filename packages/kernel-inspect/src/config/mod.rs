//! Inspection configuration
//!
//! Two tiers:
//! - Level 1: Preset (`fast`, `balanced`, `thorough`)
//! - Level 2: YAML v1 file with a base preset plus overrides
//!
//! ```rust,ignore
//! use kernel_inspect::config::{InspectionConfig, Preset};
//!
//! let config = InspectionConfig::preset(Preset::Fast);
//! let config = InspectionConfig::from_yaml("kernel-inspect.yaml")?;
//! ```

pub mod error;
pub mod inspection_config;
pub mod preset;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use inspection_config::{
    ConfigExportV1, ConfigOverrides, InspectionConfig, DEFAULT_KERNEL_ANNOTATION_SUFFIXES,
    DEFAULT_KERNEL_CONTEXT_TYPE, DEFAULT_TASK_GRAPH_TYPE, DEFAULT_TRUSTED_NAMESPACE,
};
pub use preset::Preset;
pub use validation::Validatable;
