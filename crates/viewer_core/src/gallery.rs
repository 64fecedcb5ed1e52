use std::collections::HashMap;

use catalog::aggregate::{photo_inventory, InventoryPhoto, Scope};
use shared::domain::PhotoCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryFilter {
    #[default]
    All,
    Category(PhotoCategory),
}

impl GalleryFilter {
    fn admits(self, photo: &InventoryPhoto) -> bool {
        match self {
            GalleryFilter::All => true,
            GalleryFilter::Category(category) => photo.category == category,
        }
    }
}

/// The photo viewer's two states: closed, or open over one entity's eagerly
/// computed photo inventory. All working state (index, filter, caption
/// visibility) lives only while open and is discarded on close; nothing
/// persists across reopenings.
///
/// Invariant: while open, the current photo is either a valid entry of the
/// visible (filtered) list or explicitly absent when that list is empty. It
/// is never a stale reference into a list from a previous filter.
#[derive(Debug, Default)]
pub struct Gallery {
    open: Option<OpenGallery>,
}

#[derive(Debug)]
struct OpenGallery {
    inventory: Vec<InventoryPhoto>,
    filter: GalleryFilter,
    index: usize,
    captions_shown: HashMap<usize, bool>,
}

impl OpenGallery {
    fn visible(&self) -> impl Iterator<Item = &InventoryPhoto> {
        self.inventory
            .iter()
            .filter(move |photo| self.filter.admits(photo))
    }

    fn visible_len(&self) -> usize {
        self.visible().count()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed → Open. The inventory is computed once, up front, and serves
    /// for the whole lifetime of the open state.
    pub fn open(&mut self, scope: Scope<'_>) {
        self.open = Some(OpenGallery {
            inventory: photo_inventory(scope),
            filter: GalleryFilter::All,
            index: 0,
            captions_shown: HashMap::new(),
        });
    }

    /// Open → Closed. Index, filter and caption map are all dropped.
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn filter(&self) -> Option<GalleryFilter> {
        self.open.as_ref().map(|state| state.filter)
    }

    /// Switches the category filter. If the current index no longer fits
    /// the new visible list (including an empty one), it resets to 0 here,
    /// before any caller can read the current photo again.
    pub fn set_filter(&mut self, filter: GalleryFilter) {
        let Some(state) = self.open.as_mut() else {
            return;
        };
        state.filter = filter;
        if state.index >= state.visible_len() {
            state.index = 0;
        }
    }

    /// Cyclic advance. No-op when the visible list has fewer than two
    /// entries.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Cyclic retreat, the exact inverse of [`Gallery::next`].
    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, direction: isize) {
        let Some(state) = self.open.as_mut() else {
            return;
        };
        let len = state.visible_len();
        if len <= 1 {
            return;
        }
        let len = len as isize;
        state.index = ((state.index as isize + direction).rem_euclid(len)) as usize;
    }

    /// Direct jump from the thumbnail strip. The strip renders the visible
    /// list itself, so its indices are in range by construction; anything
    /// else is ignored.
    pub fn select_index(&mut self, index: usize) {
        let Some(state) = self.open.as_mut() else {
            return;
        };
        if index < state.visible_len() {
            state.index = index;
        }
    }

    /// Flips caption visibility for one visible-list position. Independent
    /// of navigation; the map is cleared when the gallery closes.
    pub fn toggle_caption(&mut self, index: usize) {
        if let Some(state) = self.open.as_mut() {
            let shown = state.captions_shown.entry(index).or_insert(false);
            *shown = !*shown;
        }
    }

    pub fn caption_shown(&self, index: usize) -> bool {
        self.open
            .as_ref()
            .and_then(|state| state.captions_shown.get(&index).copied())
            .unwrap_or(false)
    }

    /// The filtered view of the inventory the viewer is paging through.
    pub fn visible(&self) -> Vec<&InventoryPhoto> {
        self.open
            .as_ref()
            .map(|state| state.visible().collect())
            .unwrap_or_default()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.open.as_ref().map(|state| state.index)
    }

    /// The photo under the cursor, or None when closed or when the current
    /// filter leaves nothing visible.
    pub fn current_photo(&self) -> Option<&InventoryPhoto> {
        let state = self.open.as_ref()?;
        state.visible().nth(state.index)
    }
}
