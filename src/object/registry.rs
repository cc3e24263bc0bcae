use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use super::{ObjectId, ObjectKind, PluginObject};

/// Tracks every addressable object and hands out their identifiers.
///
/// One registry lives for the lifetime of a plugin instance and is injected
/// into everything that registers objects, so the hierarchy stays testable
/// against a freshly constructed registry. Queries may run concurrently with
/// each other; add/remove serialize against them through the interior lock.
#[derive(Debug)]
pub struct ObjectRegistry {
    next_id: AtomicU32,
    entries: RwLock<HashMap<ObjectId, ObjectKind>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            // 0 is the unassigned sentinel, never allocated
            next_id: AtomicU32::new(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register an object, assigning it a fresh identifier and binding it
    /// onto the object. Re-registering an already-bound object is a no-op
    /// beyond re-recording its kind.
    pub fn add(&self, object: &dyn PluginObject) -> ObjectId {
        let mut entries = self.entries.write().unwrap();
        let id = match object.object_id() {
            Some(existing) => existing,
            None => {
                let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
                let id = ObjectId::allocated(raw);
                object.bind_object_id(id);
                id
            }
        };
        entries.insert(id, object.kind());
        log::trace!("registry: added {:?} as {}", object.kind(), id);
        id
    }

    /// Drop an identifier from the registry. The object keeps its bound ID
    /// (identifiers are assigned once), it just stops being resolvable.
    pub fn remove(&self, id: ObjectId) {
        let removed = self.entries.write().unwrap().remove(&id);
        if removed.is_some() {
            log::trace!("registry: removed {}", id);
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.read().unwrap().contains_key(&id)
    }

    /// All identifiers of a given kind, in ascending order.
    pub fn ids_for(&self, kind: ObjectKind) -> Vec<ObjectId> {
        let entries = self.entries.read().unwrap();
        let mut ids: Vec<ObjectId> = entries
            .iter()
            .filter(|(_, entry_kind)| **entry_kind == kind)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
