//! Collapsed/expanded state for concept visuals.
//!
//! Clips are always expanded; concepts start collapsed. The state is a set of
//! [`DisclosureKey`]s: membership means "collapsed". It lives only in memory
//! and is rebuilt whenever a new storyboard is loaded.

use std::collections::HashSet;
use std::fmt;

use crate::model::{SegmentId, Storyboard, VisualId};

/// Identity of one visual for disclosure purposes.
///
/// Displays as the composite `"{segment}-{visual}"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisclosureKey(VisualId);

impl DisclosureKey {
    pub fn segment(self) -> SegmentId {
        self.0.segment
    }

    pub fn visual(self) -> VisualId {
        self.0
    }
}

impl From<VisualId> for DisclosureKey {
    fn from(id: VisualId) -> Self {
        Self(id)
    }
}

impl fmt::Display for DisclosureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0.segment, self.0.index())
    }
}

/// The set of collapsed concept visuals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptDisclosureState {
    collapsed: HashSet<DisclosureKey>,
}

impl ConceptDisclosureState {
    /// Default disclosure for a freshly loaded storyboard: every concept
    /// visual collapsed, nothing else.
    pub fn seed_defaults(storyboard: &Storyboard) -> Self {
        let collapsed = storyboard
            .visuals()
            .filter(|v| v.is_concept())
            .map(|v| DisclosureKey::from(v.id()))
            .collect();
        Self { collapsed }
    }

    /// Collapses an expanded key or expands a collapsed one.
    pub fn toggle(&mut self, key: DisclosureKey) {
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
    }

    pub fn is_collapsed(&self, key: DisclosureKey) -> bool {
        self.collapsed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.collapsed.clear();
    }

    /// Number of collapsed visuals.
    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }
}
