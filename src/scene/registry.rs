//! Per-frame callback registry
//!
//! The ticker only ever runs what is live here. Scenes register their
//! callbacks on entry and the machine clears them all on exit.

/// Handle for a registered callback. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

/// Work a scene asks to run once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCallback {
    /// Step the Playing scene's physics and refresh its HUD
    PlayingUpdate,
}

/// Live callbacks in registration order
#[derive(Debug, Default)]
pub struct FrameCallbackRegistry {
    live: Vec<(CallbackId, FrameCallback)>,
    next_id: u64,
}

impl FrameCallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback; it runs from the next dispatched frame on
    pub fn register(&mut self, callback: FrameCallback) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.live.push((id, callback));
        id
    }

    /// Drop every live callback. No-op when already empty.
    pub fn clear_all(&mut self) {
        if !self.live.is_empty() {
            log::trace!("Clearing {} frame callback(s)", self.live.len());
        }
        self.live.clear();
    }

    pub fn is_live(&self, id: CallbackId) -> bool {
        self.live.iter().any(|(live_id, _)| *live_id == id)
    }

    /// Copy of the live set for dispatching a frame.
    ///
    /// Callbacks may clear the registry mid-frame, so dispatchers must
    /// re-check `is_live` before running each entry.
    pub fn snapshot(&self) -> Vec<(CallbackId, FrameCallback)> {
        self.live.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(CallbackId, FrameCallback)> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_order() {
        let mut registry = FrameCallbackRegistry::new();
        let a = registry.register(FrameCallback::PlayingUpdate);
        let b = registry.register(FrameCallback::PlayingUpdate);

        let ids: Vec<_> = registry.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(a < b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_all() {
        let mut registry = FrameCallbackRegistry::new();
        let a = registry.register(FrameCallback::PlayingUpdate);
        registry.clear_all();

        assert!(registry.is_empty());
        assert!(!registry.is_live(a));

        // Clearing an empty registry is harmless
        registry.clear_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut registry = FrameCallbackRegistry::new();
        let old = registry.register(FrameCallback::PlayingUpdate);
        registry.clear_all();
        let new = registry.register(FrameCallback::PlayingUpdate);

        assert_ne!(old, new);
        assert!(!registry.is_live(old));
        assert!(registry.is_live(new));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = FrameCallbackRegistry::new();
        let a = registry.register(FrameCallback::PlayingUpdate);
        let snapshot = registry.snapshot();
        registry.clear_all();

        assert_eq!(snapshot, vec![(a, FrameCallback::PlayingUpdate)]);
        assert!(!registry.is_live(snapshot[0].0));
    }
}
