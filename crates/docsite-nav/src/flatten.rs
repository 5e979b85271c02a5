//! Depth-first leaf traversal over the sidebar tree.

use crate::entry::NavEntry;

/// Iterator over all `(link, label)` leaf pairs of a sidebar tree.
///
/// Yields leaves in depth-first declaration order. The iterator is cheap to
/// clone, so traversals can be restarted without rebuilding the tree.
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    /// Pending entries, stored in reverse so `pop` yields declaration order.
    stack: Vec<&'a NavEntry>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                NavEntry::Leaf { label, link } => return Some((link, label)),
                NavEntry::Group { items, .. } => {
                    self.stack.extend(items.iter().rev());
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Leaves<'_> {}

/// Traverse all leaves of a sidebar tree in depth-first declaration order.
///
/// Used for sitemap generation and link validation reports.
#[must_use]
pub fn flatten(entries: &[NavEntry]) -> Leaves<'_> {
    Leaves {
        stack: entries.iter().rev().collect(),
    }
}
