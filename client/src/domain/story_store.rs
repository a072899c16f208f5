//! Entity store keeping the feed, own-stories and favorites views consistent.
//!
//! Every story is held once, keyed by id. The three views are ordered id
//! lists over that map, so replacing an entity is a single-point mutation and
//! no view can keep a stale copy. Entities that no view references are
//! dropped as soon as their last reference goes.

use std::collections::HashMap;

use crate::domain::{Story, StoryId};

/// One of the ordered story collections a session exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryView {
    /// The global feed, newest additions first.
    Feed,
    /// Stories posted by the active user.
    Own,
    /// Stories the active user has favorited.
    Favorites,
}

impl StoryView {
    /// All views, in rendering order.
    pub const ALL: [Self; 3] = [Self::Feed, Self::Own, Self::Favorites];
}

/// Stories keyed by id with three ordered views over them.
///
/// ## Invariants
/// - Each view lists a story id at most once.
/// - Every id listed by a view resolves to exactly one entity.
/// - Every entity is referenced by at least one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryStore {
    entries: HashMap<StoryId, Story>,
    feed: Vec<StoryId>,
    own: Vec<StoryId>,
    favorites: Vec<StoryId>,
}

impl StoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn ids(&self, view: StoryView) -> &Vec<StoryId> {
        match view {
            StoryView::Feed => &self.feed,
            StoryView::Own => &self.own,
            StoryView::Favorites => &self.favorites,
        }
    }

    fn ids_mut(&mut self, view: StoryView) -> &mut Vec<StoryId> {
        match view {
            StoryView::Feed => &mut self.feed,
            StoryView::Own => &mut self.own,
            StoryView::Favorites => &mut self.favorites,
        }
    }

    fn is_referenced(&self, id: &StoryId) -> bool {
        StoryView::ALL
            .into_iter()
            .any(|view| self.ids(view).contains(id))
    }

    fn forget_if_orphaned(&mut self, id: &StoryId) {
        if !self.is_referenced(id) {
            self.entries.remove(id);
        }
    }

    /// Replace the whole contents of `view` in the given order.
    ///
    /// Incoming stories are the freshest copies the API gave us, so they
    /// overwrite any entity already held under the same id. Repeated ids keep
    /// their first position.
    pub fn replace_view(&mut self, view: StoryView, stories: impl IntoIterator<Item = Story>) {
        let previous = std::mem::take(self.ids_mut(view));
        let mut ids: Vec<StoryId> = Vec::new();
        for story in stories {
            let id = story.id().clone();
            if ids.contains(&id) {
                continue;
            }
            self.entries.insert(id.clone(), story);
            ids.push(id);
        }
        *self.ids_mut(view) = ids;
        for id in previous {
            self.forget_if_orphaned(&id);
        }
    }

    /// Empty `view`, dropping entities nothing else references.
    pub fn clear_view(&mut self, view: StoryView) {
        self.replace_view(view, std::iter::empty());
    }

    /// Put `story` at index 0 of `view`, moving it there if already listed.
    pub fn prepend(&mut self, view: StoryView, story: Story) {
        let id = story.id().clone();
        self.entries.insert(id.clone(), story);
        let ids = self.ids_mut(view);
        ids.retain(|existing| existing != &id);
        ids.insert(0, id);
    }

    /// Add `story` at the end of `view` unless it is already listed there.
    ///
    /// An entity already held under the same id wins over the supplied copy,
    /// which may predate an edit. Returns `false` when the view already held
    /// the id.
    pub fn append(&mut self, view: StoryView, story: Story) -> bool {
        let id = story.id().clone();
        self.entries.entry(id.clone()).or_insert(story);
        let ids = self.ids_mut(view);
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    /// Swap in a new version of a known story; every view sees the change.
    ///
    /// Returns `false` (and stores nothing) when the id is unknown.
    pub fn replace(&mut self, story: Story) -> bool {
        match self.entries.get_mut(story.id()) {
            Some(slot) => {
                *slot = story;
                true
            }
            None => false,
        }
    }

    /// Drop `id` from one view. Returns whether the view listed it.
    pub fn remove_from(&mut self, view: StoryView, id: &StoryId) -> bool {
        let ids = self.ids_mut(view);
        let before = ids.len();
        ids.retain(|existing| existing != id);
        let removed = ids.len() != before;
        self.forget_if_orphaned(id);
        removed
    }

    /// Drop `id` from every view and forget the entity.
    ///
    /// Returns whether anything was removed; calling it again for the same id
    /// is a no-op.
    pub fn remove_everywhere(&mut self, id: &StoryId) -> bool {
        let mut removed = false;
        for view in StoryView::ALL {
            let ids = self.ids_mut(view);
            let before = ids.len();
            ids.retain(|existing| existing != id);
            removed |= ids.len() != before;
        }
        self.entries.remove(id);
        removed
    }

    /// Whether `view` lists `id`.
    pub fn contains(&self, view: StoryView, id: &StoryId) -> bool {
        self.ids(view).contains(id)
    }

    /// Look a story up by id regardless of view.
    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.entries.get(id)
    }

    /// Stories of `view` in order.
    pub fn view(&self, view: StoryView) -> impl Iterator<Item = &Story> + '_ {
        self.ids(view).iter().filter_map(|id| self.entries.get(id))
    }

    /// Position of `id` within `view`.
    pub fn position(&self, view: StoryView, id: &StoryId) -> Option<usize> {
        self.ids(view).iter().position(|existing| existing == id)
    }

    /// Number of stories in `view`.
    pub fn len(&self, view: StoryView) -> usize {
        self.ids(view).len()
    }

    /// Whether `view` is empty.
    pub fn is_empty(&self, view: StoryView) -> bool {
        self.ids(view).is_empty()
    }
}
