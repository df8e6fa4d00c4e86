//! Content filters applied to fetched pages
//!
//! Filters run on the background load path, after a page resolves and before
//! anything reaches the player, so playback start is never blocked on them.

use chord_core::traits::PreferenceStore;
use chord_core::types::MediaMetadata;

/// Snapshot of the user's content filter preferences.
///
/// Read once per queue start; a preference change takes effect on the next
/// queue, not retroactively.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFilters {
    pub hide_explicit: bool,
    pub hide_videos: bool,
}

impl ContentFilters {
    /// Read the current flags from the preference store.
    pub fn from_prefs(prefs: &dyn PreferenceStore) -> Self {
        Self {
            hide_explicit: prefs.hide_explicit(),
            hide_videos: prefs.hide_videos(),
        }
    }

    /// Whether an item survives the filters.
    pub fn allows(&self, item: &MediaMetadata) -> bool {
        !(self.hide_explicit && item.explicit) && !(self.hide_videos && item.video)
    }

    /// Filter a page of items.
    pub fn apply(&self, items: Vec<MediaMetadata>) -> Vec<MediaMetadata> {
        items.into_iter().filter(|item| self.allows(item)).collect()
    }

    /// Filter a page while keeping the current-item cursor meaningful.
    ///
    /// The cursor follows the item it pointed at. If that item itself is
    /// filtered out, the cursor lands on the nearest surviving item at or
    /// after the original position.
    pub fn apply_with_index(
        &self,
        items: Vec<MediaMetadata>,
        index: Option<usize>,
    ) -> (Vec<MediaMetadata>, Option<usize>) {
        let target = index.filter(|i| *i < items.len());

        let mut filtered = Vec::with_capacity(items.len());
        let mut survivors_before = 0usize;
        let mut new_index = None;

        for (i, item) in items.into_iter().enumerate() {
            let keep = self.allows(&item);
            if let Some(t) = target {
                if keep && i < t {
                    survivors_before += 1;
                }
                if keep && i == t {
                    new_index = Some(filtered.len());
                }
            }
            if keep {
                filtered.push(item);
            }
        }

        let new_index = match (target, new_index) {
            (Some(_), Some(i)) => Some(i),
            (Some(_), None) if !filtered.is_empty() => {
                Some(survivors_before.min(filtered.len() - 1))
            }
            _ => None,
        };

        (filtered, new_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<MediaMetadata> {
        let plain_a = MediaMetadata::new("plain-a", "Plain A");
        let plain_b = MediaMetadata::new("plain-b", "Plain B");
        let mut explicit = MediaMetadata::new("explicit", "Explicit");
        explicit.explicit = true;
        let mut video = MediaMetadata::new("video", "Video");
        video.video = true;
        vec![plain_a, explicit, video, plain_b]
    }

    #[test]
    fn both_filters_leave_only_plain_items() {
        let filters = ContentFilters {
            hide_explicit: true,
            hide_videos: true,
        };

        let survivors = filters.apply(fixture());
        let ids: Vec<_> = survivors.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["plain-a", "plain-b"]);
    }

    #[test]
    fn disabled_filters_pass_everything() {
        let filters = ContentFilters::default();
        assert_eq!(filters.apply(fixture()).len(), 4);
    }

    #[test]
    fn explicit_only_keeps_videos() {
        let filters = ContentFilters {
            hide_explicit: true,
            hide_videos: false,
        };
        let ids: Vec<_> = filters
            .apply(fixture())
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, ["plain-a", "video", "plain-b"]);
    }

    #[test]
    fn cursor_follows_its_item() {
        let filters = ContentFilters {
            hide_explicit: true,
            hide_videos: true,
        };

        // Cursor on "plain-b" (index 3); two predecessors are filtered out.
        let (items, index) = filters.apply_with_index(fixture(), Some(3));
        assert_eq!(items.len(), 2);
        assert_eq!(index, Some(1));
        assert_eq!(items[1].id, "plain-b");
    }

    #[test]
    fn cursor_on_filtered_item_lands_on_nearest_survivor() {
        let filters = ContentFilters {
            hide_explicit: true,
            hide_videos: true,
        };

        // Cursor on "explicit" (index 1), which does not survive.
        let (items, index) = filters.apply_with_index(fixture(), Some(1));
        assert_eq!(index, Some(1));
        assert_eq!(items[1].id, "plain-b");
    }

    #[test]
    fn empty_result_has_no_cursor() {
        let filters = ContentFilters {
            hide_explicit: true,
            hide_videos: true,
        };
        let mut explicit = MediaMetadata::new("e", "E");
        explicit.explicit = true;

        let (items, index) = filters.apply_with_index(vec![explicit], Some(0));
        assert!(items.is_empty());
        assert!(index.is_none());
    }
}
