use std::sync::{Arc, PoisonError, RwLock};

use crate::loader::decode::DecodedFrame;

/// Lifecycle of one frame slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// Not asked for yet.
    Unrequested,
    /// Fetch in flight.
    Requested,
    /// Decoded bitmap available.
    Loaded,
    /// Fetch or decode failed; the slot stays empty.
    Failed,
}

#[derive(Clone, Debug)]
enum Slot {
    Unrequested,
    Requested,
    Loaded(Arc<DecodedFrame>),
    Failed,
}

impl Slot {
    fn state(&self) -> SlotState {
        match self {
            Self::Unrequested => SlotState::Unrequested,
            Self::Requested => SlotState::Requested,
            Self::Loaded(_) => SlotState::Loaded,
            Self::Failed => SlotState::Failed,
        }
    }
}

/// Tally of slot states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SlotCounts {
    /// Slots never requested.
    pub unrequested: usize,
    /// Slots with a fetch in flight.
    pub requested: usize,
    /// Slots holding a bitmap.
    pub loaded: usize,
    /// Slots whose fetch failed.
    pub failed: usize,
}

/// Frame collection shared between the loader (sole writer) and renderers (readers).
///
/// Readers only ever receive `Arc`s of immutable bitmaps, so a frame handed out stays valid no
/// matter what the loader does afterwards.
#[derive(Debug)]
pub struct FrameStore {
    slots: RwLock<Vec<Slot>>,
}

impl FrameStore {
    /// Create `len` unrequested slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: RwLock::new(vec![Slot::Unrequested; len]),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Return `true` for an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bitmap at `index` if it has loaded. Pending, failed and out-of-range all yield `None`.
    pub fn get(&self, index: usize) -> Option<Arc<DecodedFrame>> {
        match self.read().get(index)? {
            Slot::Loaded(frame) => Some(Arc::clone(frame)),
            _ => None,
        }
    }

    /// Lifecycle state of `index`, `None` when out of range.
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.read().get(index).map(Slot::state)
    }

    /// Count slots per state.
    pub fn counts(&self) -> SlotCounts {
        let mut c = SlotCounts::default();
        for slot in self.read().iter() {
            match slot.state() {
                SlotState::Unrequested => c.unrequested += 1,
                SlotState::Requested => c.requested += 1,
                SlotState::Loaded => c.loaded += 1,
                SlotState::Failed => c.failed += 1,
            }
        }
        c
    }

    pub(crate) fn mark_requested(&self, index: usize) {
        self.set(index, Slot::Requested);
    }

    pub(crate) fn insert_loaded(&self, index: usize, frame: DecodedFrame) {
        self.set(index, Slot::Loaded(Arc::new(frame)));
    }

    pub(crate) fn mark_failed(&self, index: usize) {
        self.set(index, Slot::Failed);
    }

    fn set(&self, index: usize, slot: Slot) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(s) = slots.get_mut(index) {
            *s = slot;
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }
}
