use crate::bridge::PersistenceBridge;
use crate::model::{Filter, Task};
use crate::store::{Snapshot, TaskStore};
use tokio::task::JoinHandle;

/// Mediates every mutation: applies the intent to the store, then schedules
/// a save from within the intent path. The rendering boundary only ever
/// sees snapshots and these methods, never the store's fields.
///
/// Saves are gated on hydration so the startup load settles before the
/// first user-triggered write can overwrite the store.
pub struct Controller {
    store: TaskStore,
    bridge: PersistenceBridge,
    hydrated: bool,
    dirty: bool,
    pending: Vec<JoinHandle<()>>,
}

impl Controller {
    pub fn new(bridge: PersistenceBridge) -> Self {
        Self {
            store: TaskStore::new(),
            bridge,
            hydrated: false,
            dirty: false,
            pending: Vec::new(),
        }
    }

    /// Adopt the stored collection, unless intents already raced ahead of a
    /// late load; then the stale load is discarded and the newer in-memory
    /// state is flushed to the store instead.
    pub async fn hydrate(&mut self) {
        let loaded = self.bridge.load().await;
        if !self.dirty {
            self.store.replace_tasks(loaded);
        }
        self.hydrated = true;
        if self.dirty {
            self.persist();
        }
    }

    pub fn create(&mut self, text: &str) -> Option<Task> {
        let created = self.store.create(text)?;
        self.mark_changed();
        Some(created)
    }

    pub fn edit_text(&mut self, id: &str, new_text: &str) -> Option<Task> {
        let updated = self.store.edit_text(id, new_text)?;
        self.mark_changed();
        Some(updated)
    }

    pub fn toggle_done(&mut self, id: &str, explicit: Option<bool>) -> Option<Task> {
        let updated = self.store.toggle_done(id, explicit)?;
        self.mark_changed();
        Some(updated)
    }

    pub fn toggle_removed(&mut self, id: &str) -> Option<Task> {
        let updated = self.store.toggle_removed(id)?;
        self.mark_changed();
        Some(updated)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Await every outstanding save. Callers that tear down without this
    /// may lose the writes still in flight.
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            let _ = handle.await;
        }
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        if self.hydrated {
            self.persist();
        }
    }

    fn persist(&mut self) {
        self.pending.retain(|handle| !handle.is_finished());
        let handle = self.bridge.spawn_save(self.store.tasks().to_vec());
        self.pending.push(handle);
    }
}
