//! Inspection configuration and its YAML v1 schema

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use crate::features::rule_checks::RuleKind;

/// Default kernel-marker annotation suffixes (`@Parallel`, `@Reduce`)
pub const DEFAULT_KERNEL_ANNOTATION_SUFFIXES: [&str; 2] = ["Parallel", "Reduce"];
/// Simple name of the kernel-context parameter type
pub const DEFAULT_KERNEL_CONTEXT_TYPE: &str = "KernelContext";
/// Trusted runtime API namespace (intrinsics, never inlined)
pub const DEFAULT_TRUSTED_NAMESPACE: &str = "uk.ac.manchester.tornado.api.";
/// Task graph type whose static usage is forbidden in kernels
pub const DEFAULT_TASK_GRAPH_TYPE: &str = "uk.ac.manchester.tornado.api.TaskGraph";

/// Supported YAML schema versions
const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// Complete inspection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionConfig {
    /// Preset this configuration was derived from
    pub preset: Preset,

    /// Helper inlining depth bound (kernel is depth 0)
    pub max_inline_depth: usize,

    /// Annotation qualified-name suffixes that mark a kernel
    pub kernel_annotation_suffixes: Vec<String>,

    /// Simple name of the kernel-context type
    pub kernel_context_type: String,

    /// Qualified-name prefix of the trusted runtime API
    pub trusted_namespace: String,

    /// Vector/tuple types accepted by the data-type check (simple names)
    pub vector_type_allowlist: Vec<String>,

    /// Qualified name of the task graph type
    pub task_graph_type: String,

    /// Name of the task-registration method on the task graph type
    pub task_method_name: String,

    /// Rule ids that are not run
    pub disabled_rules: Vec<String>,

    /// Inspect kernels of a file on the rayon pool
    pub parallel: bool,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl InspectionConfig {
    /// Build a configuration from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            max_inline_depth: preset.max_inline_depth(),
            kernel_annotation_suffixes: DEFAULT_KERNEL_ANNOTATION_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            kernel_context_type: DEFAULT_KERNEL_CONTEXT_TYPE.to_string(),
            trusted_namespace: DEFAULT_TRUSTED_NAMESPACE.to_string(),
            vector_type_allowlist: vec!["Int3".to_string()],
            task_graph_type: DEFAULT_TASK_GRAPH_TYPE.to_string(),
            task_method_name: "task".to_string(),
            disabled_rules: Vec::new(),
            parallel: !matches!(preset, Preset::Fast),
        }
    }

    /// Override the inlining depth bound
    pub fn with_max_inline_depth(mut self, depth: usize) -> Self {
        self.max_inline_depth = depth;
        self
    }

    /// Disable a rule by kind
    pub fn disable_rule(mut self, rule: RuleKind) -> Self {
        let id = rule.id().to_string();
        if !self.disabled_rules.contains(&id) {
            self.disabled_rules.push(id);
        }
        self
    }

    /// Toggle parallel kernel inspection
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether a rule should run
    pub fn is_rule_enabled(&self, rule: RuleKind) -> bool {
        !self.disabled_rules.iter().any(|id| id == rule.id())
    }

    /// Whether a fully-qualified name belongs to the trusted runtime API
    pub fn is_trusted(&self, qualified_name: &str) -> bool {
        qualified_name.starts_with(&self.trusted_namespace)
    }

    /// Whether an annotation qualified name marks a kernel
    pub fn is_kernel_annotation(&self, qualified_name: &str) -> bool {
        self.kernel_annotation_suffixes
            .iter()
            .any(|suffix| qualified_name.ends_with(suffix.as_str()))
    }

    /// Load and validate a YAML v1 configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML v1 text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match export.preset.as_deref() {
            Some(name) => name.parse::<Preset>()?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            overrides.apply(&mut config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as YAML v1 (every field written as an override)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: Some(self.preset.as_str().to_string()),
            overrides: Some(ConfigOverrides {
                max_inline_depth: Some(self.max_inline_depth),
                kernel_annotation_suffixes: Some(self.kernel_annotation_suffixes.clone()),
                kernel_context_type: Some(self.kernel_context_type.clone()),
                trusted_namespace: Some(self.trusted_namespace.clone()),
                vector_type_allowlist: Some(self.vector_type_allowlist.clone()),
                task_graph_type: Some(self.task_graph_type.clone()),
                task_method_name: Some(self.task_method_name.clone()),
                disabled_rules: Some(self.disabled_rules.clone()),
                parallel: Some(self.parallel),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides applied on top of a preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inline_depth: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_annotation_suffixes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_context_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_type_allowlist: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_graph_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_method_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_rules: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl ConfigOverrides {
    fn apply(self, config: &mut InspectionConfig) {
        if let Some(v) = self.max_inline_depth {
            config.max_inline_depth = v;
        }
        if let Some(v) = self.kernel_annotation_suffixes {
            config.kernel_annotation_suffixes = v;
        }
        if let Some(v) = self.kernel_context_type {
            config.kernel_context_type = v;
        }
        if let Some(v) = self.trusted_namespace {
            config.trusted_namespace = v;
        }
        if let Some(v) = self.vector_type_allowlist {
            config.vector_type_allowlist = v;
        }
        if let Some(v) = self.task_graph_type {
            config.task_graph_type = v;
        }
        if let Some(v) = self.task_method_name {
            config.task_method_name = v;
        }
        if let Some(v) = self.disabled_rules {
            config.disabled_rules = v;
        }
        if let Some(v) = self.parallel {
            config.parallel = v;
        }
    }
}
