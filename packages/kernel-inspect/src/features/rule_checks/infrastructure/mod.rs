//! Rule implementations

mod assert;
mod calls;
mod data_type;
mod recursion;
mod return_type;
mod static_task_graph;
mod traps;
mod unresolvable;

pub use assert::AssertRule;
pub use calls::{ExternalLibraryRule, SystemCallRule};
pub use data_type::{is_supported_type, DataTypeRule};
pub use recursion::RecursionRule;
pub use return_type::NonVoidReturnRule;
pub use static_task_graph::StaticTaskGraphRule;
pub use traps::ThrowRule;
pub use unresolvable::UnresolvableHelperRule;

use crate::config::InspectionConfig;
use crate::features::rule_checks::ports::KernelRule;

/// Every rule the configuration leaves enabled, in `RuleKind::ALL` order
pub fn default_rules(config: &InspectionConfig) -> Vec<Box<dyn KernelRule>> {
    let all: Vec<Box<dyn KernelRule>> = vec![
        Box::new(DataTypeRule),
        Box::new(RecursionRule),
        Box::new(ThrowRule),
        Box::new(SystemCallRule),
        Box::new(NonVoidReturnRule),
        Box::new(StaticTaskGraphRule),
        Box::new(AssertRule),
        Box::new(ExternalLibraryRule),
        Box::new(UnresolvableHelperRule),
    ];
    all.into_iter()
        .filter(|rule| config.is_rule_enabled(rule.kind()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::rule_checks::RuleKind;

    #[test]
    fn test_default_rules_cover_every_kind() {
        let kinds: Vec<RuleKind> = default_rules(&InspectionConfig::default())
            .iter()
            .map(|r| r.kind())
            .collect();
        assert_eq!(kinds, RuleKind::ALL.to_vec());
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let config = InspectionConfig::default().disable_rule(RuleKind::ExternalLibrary);
        assert!(default_rules(&config)
            .iter()
            .all(|r| r.kind() != RuleKind::ExternalLibrary));
    }
}
