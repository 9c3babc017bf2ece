//! Linked selection state shared across views

use std::sync::Arc;

use ahash::AHashSet;
use uuid::Uuid;

use crate::model::CountyId;

/// Identifier of an interactive control (the view that owns a brush)
pub type ControlId = Uuid;

/// Set of selected county identifiers
pub type IdSet = AHashSet<CountyId>;

/// Selection set handed to views without copying it
pub type SharedIdSet = Arc<IdSet>;

/// Zero-or-one active filter and the control that produced it.
///
/// A filter is present exactly when an owner is present. Only the
/// [`SelectionCoordinator`](crate::SelectionCoordinator) mutates this.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    active_filter: Option<SharedIdSet>,
    owner: Option<ControlId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filter; `None` means every county is visible
    pub fn filter(&self) -> Option<&SharedIdSet> {
        self.active_filter.as_ref()
    }

    pub fn owner(&self) -> Option<ControlId> {
        self.owner
    }

    pub fn is_filtered(&self) -> bool {
        self.active_filter.is_some()
    }

    /// Whether a county passes the current filter
    pub fn contains(&self, id: &CountyId) -> bool {
        self.active_filter.as_ref().map_or(true, |ids| ids.contains(id))
    }

    pub(crate) fn set(&mut self, owner: ControlId, ids: IdSet) {
        self.owner = Some(owner);
        self.active_filter = Some(Arc::new(ids));
    }

    pub(crate) fn clear(&mut self) {
        self.owner = None;
        self.active_filter = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_contains_everything() {
        let state = SelectionState::new();
        assert!(!state.is_filtered());
        assert!(state.owner().is_none());
        assert!(state.contains(&CountyId::new("01001")));
    }

    #[test]
    fn test_empty_filter_contains_nothing() {
        let mut state = SelectionState::new();
        state.set(Uuid::new_v4(), IdSet::default());
        assert!(state.is_filtered());
        assert!(!state.contains(&CountyId::new("01001")));

        state.clear();
        assert!(state.owner().is_none());
        assert!(state.filter().is_none());
    }
}
