//! Restricted-API Registry
//!
//! Fully-qualified namespace prefixes whose members cannot run inside a
//! kernel. Membership is a plain prefix test on the qualified class name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Forbidden namespace family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestrictedNamespace {
    System,
    Runtime,
    Process,
    ProcessBuilder,
    Thread,
    Io,
    Concurrency,
    Reflection,
    Net,
    Nio,
    Security,
    Sql,
}

/// Prefix table, checked in order
const RESTRICTED_PREFIXES: [(&str, RestrictedNamespace); 12] = [
    ("java.lang.System", RestrictedNamespace::System),
    ("java.lang.Runtime", RestrictedNamespace::Runtime),
    ("java.lang.ProcessBuilder", RestrictedNamespace::ProcessBuilder),
    ("java.lang.Process", RestrictedNamespace::Process),
    ("java.lang.Thread", RestrictedNamespace::Thread),
    ("java.io", RestrictedNamespace::Io),
    ("java.util.concurrent", RestrictedNamespace::Concurrency),
    ("java.lang.reflect", RestrictedNamespace::Reflection),
    ("java.net", RestrictedNamespace::Net),
    ("java.nio", RestrictedNamespace::Nio),
    ("java.security", RestrictedNamespace::Security),
    ("java.sql", RestrictedNamespace::Sql),
];

impl RestrictedNamespace {
    pub fn prefix(&self) -> &'static str {
        RESTRICTED_PREFIXES
            .iter()
            .find(|(_, ns)| ns == self)
            .map(|(prefix, _)| *prefix)
            .unwrap_or("")
    }

    pub fn all() -> impl Iterator<Item = RestrictedNamespace> {
        RESTRICTED_PREFIXES.iter().map(|(_, ns)| *ns)
    }
}

impl fmt::Display for RestrictedNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Namespace family `qualified_class_name` falls under, if restricted
pub fn restricted_namespace(qualified_class_name: &str) -> Option<RestrictedNamespace> {
    RESTRICTED_PREFIXES
        .iter()
        .find(|(prefix, _)| qualified_class_name.starts_with(prefix))
        .map(|(_, ns)| *ns)
}

pub fn is_restricted_namespace(qualified_class_name: &str) -> bool {
    restricted_namespace(qualified_class_name).is_some()
}
