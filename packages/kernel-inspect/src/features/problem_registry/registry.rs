use dashmap::DashSet;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::features::program_model::{Method, ProgramModel};
use crate::shared::models::FileId;

/// File that owns a flagged method; the payload of change notifications
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerContext {
    pub file: FileId,
    pub path: PathBuf,
}

impl OwnerContext {
    pub fn new(file: FileId, path: impl Into<PathBuf>) -> Self {
        Self {
            file,
            path: path.into(),
        }
    }

    pub fn of_method(model: &dyn ProgramModel, method: &Method) -> Option<Self> {
        let file = model.file(method.file)?;
        Some(Self::new(file.id, file.path.clone()))
    }
}

/// Receives a notification the first time a method is flagged
pub trait RefreshListener: Send + Sync {
    fn problem_methods_changed(&self, owner: &OwnerContext);
}

impl<F> RefreshListener for F
where
    F: Fn(&OwnerContext) + Send + Sync,
{
    fn problem_methods_changed(&self, owner: &OwnerContext) {
        self(owner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct ProblemMethodRegistry {
    methods: DashSet<String>,
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn RefreshListener>)>>,
    next_subscription: AtomicU64,
    /// Modification count the contents belong to
    revision: AtomicU64,
}

impl Default for ProblemMethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemMethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: DashSet::new(),
            listeners: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            revision: AtomicU64::new(0),
        }
    }

    /// Record `method` as problematic
    ///
    /// Returns `true` and notifies listeners only on the first insertion of
    /// this declaration text.
    pub fn add_method(&self, owner: &OwnerContext, method: &Method) -> bool {
        let inserted = self.methods.insert(method.text.clone());
        if inserted {
            debug!(method = %method.name, file = %owner.path.display(), "problem method registered");
            self.notify(owner);
        }
        inserted
    }

    pub fn contains(&self, method_text: &str) -> bool {
        self.methods.contains(method_text)
    }

    pub fn contains_method(&self, method: &Method) -> bool {
        self.contains(&method.text)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registered declaration texts, sorted
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.methods.iter().map(|m| m.key().clone()).collect();
        methods.sort();
        methods
    }

    pub fn clear(&self) {
        self.methods.clear();
    }

    /// Clear the registry if the program moved past the revision it was
    /// filled at; returns whether it was cleared
    pub fn sync_revision(&self, revision: u64) -> bool {
        let previous = self.revision.swap(revision, Ordering::AcqRel);
        if previous == revision {
            return false;
        }
        if !self.methods.is_empty() {
            debug!(previous, revision, "program changed, clearing problem methods");
        }
        self.clear();
        true
    }

    pub fn subscribe(&self, listener: Arc<dyn RefreshListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    fn notify(&self, owner: &OwnerContext) {
        // Listeners may call back into the registry
        let listeners: Vec<Arc<dyn RefreshListener>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener.problem_methods_changed(owner);
        }
    }
}
