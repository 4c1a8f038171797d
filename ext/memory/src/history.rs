//! History providers.
//!
//! A `History` is a shared handle: clones observe the same entries, so the
//! router and the test driving it agree on the current location.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Which provider a [`History`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    /// `hashHistory`: the location lives in the URL fragment.
    Hash,
    /// `createMemoryHistory`: the location lives only in memory.
    Memory,
}

/// A location the router can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path part of the location, always starting with `/`.
    pub pathname: String,
}

impl Location {
    /// A location for `path`, prefixed with `/` when needed.
    pub fn new(path: &str) -> Self {
        let pathname = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };
        Self { pathname }
    }
}

/// A history provider handle.
#[derive(Clone)]
pub struct History {
    kind: HistoryKind,
    entries: Rc<RefCell<Vec<Location>>>,
}

impl History {
    /// A hash history starting at `/`.
    #[must_use]
    pub fn hash() -> Self {
        Self::starting_at(HistoryKind::Hash, "/")
    }

    /// A memory history starting at `path`.
    pub fn memory(path: &str) -> Self {
        Self::starting_at(HistoryKind::Memory, path)
    }

    fn starting_at(kind: HistoryKind, path: &str) -> Self {
        Self {
            kind,
            entries: Rc::new(RefCell::new(vec![Location::new(path)])),
        }
    }

    /// Which provider this is.
    #[must_use]
    pub fn kind(&self) -> HistoryKind {
        self.kind
    }

    /// The current location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.entries
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| Location::new("/"))
    }

    /// Navigate to `path`.
    pub fn push(&self, path: &str) {
        self.entries.borrow_mut().push(Location::new(path));
    }

    /// Go back one entry. The first entry is never popped.
    pub fn go_back(&self) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() > 1 {
            entries.pop();
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Always `false`: a history has at least its initial entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns `true` if both handles refer to the same provider.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("kind", &self.kind)
            .field("location", &self.location().pathname)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_prefixes_slash() {
        assert_eq!(Location::new("c2").pathname, "/c2");
        assert_eq!(Location::new("/c2").pathname, "/c2");
    }

    #[test]
    fn test_hash_starts_at_root() {
        let h = History::hash();
        assert_eq!(h.kind(), HistoryKind::Hash);
        assert_eq!(h.location().pathname, "/");
    }

    #[test]
    fn test_push_and_go_back() {
        let h = History::memory("/c1");
        h.push("/c2");
        assert_eq!(h.location().pathname, "/c2");
        assert_eq!(h.len(), 2);

        h.go_back();
        h.go_back();
        assert_eq!(h.location().pathname, "/c1");
        assert!(!h.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let h = History::memory("/");
        let clone = h.clone();
        clone.push("/c1");
        assert_eq!(h.location().pathname, "/c1");
        assert!(h.same_as(&clone));
        assert!(!h.same_as(&History::memory("/")));
    }
}
