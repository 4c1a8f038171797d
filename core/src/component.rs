//! Component — the renderable units a route tree refers to.
//!
//! The adapter never defines components. It only asks each one for the handle
//! the router library stores in `component`/`components` props.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Anything that can hand the router library a render handle.
///
/// For react-router this is the React component class; for the in-memory
/// library it is a plain descriptor.
///
/// Closures returning a handle are components too:
///
/// ```
/// use grouter::Component;
///
/// let header = || "Header";
/// assert_eq!(header.node(), "Header");
/// ```
pub trait Component {
    /// The handle type produced for the router library.
    type Node;

    /// Produce the render handle.
    ///
    /// Called exactly once per component reference per router build.
    fn node(&self) -> Self::Node;
}

impl<F, N> Component for F
where
    F: Fn() -> N,
{
    type Node = N;

    fn node(&self) -> N {
        self()
    }
}

/// A shared, type-erased component reference.
///
/// The same component often fills slots in several routes (an index route and
/// a path route rendering the same page), hence `Rc`.
pub type ComponentRef<N> = Rc<dyn Component<Node = N>>;

/// Named component slots filled by a non-root route.
///
/// Slot names map to the outlets the parent component renders
/// (e.g. `"main"` and `"sidebar"`). Iteration order is by slot name.
pub struct Components<N> {
    slots: BTreeMap<String, ComponentRef<N>>,
}

impl<N> Components<N> {
    /// Create an empty slot map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Fill a slot (builder pattern). A repeated name replaces the earlier component.
    #[must_use]
    pub fn with(mut self, slot: impl Into<String>, component: ComponentRef<N>) -> Self {
        self.insert(slot, component);
        self
    }

    /// Fill a slot in place.
    pub fn insert(&mut self, slot: impl Into<String>, component: ComponentRef<N>) {
        self.slots.insert(slot.into(), component);
    }

    /// Look up the component filling a slot.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&ComponentRef<N>> {
        self.slots.get(slot)
    }

    /// Returns the number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate slot names.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Iterate `(slot, component)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentRef<N>)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Produce the render handle for every slot.
    pub(crate) fn nodes(&self) -> BTreeMap<String, N> {
        self.slots
            .iter()
            .map(|(slot, component)| (slot.clone(), component.node()))
            .collect()
    }
}

impl<N> Default for Components<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for Components<N> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<N> fmt::Debug for Components<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.slots.keys()).finish()
    }
}

impl<N, S: Into<String>> FromIterator<(S, ComponentRef<N>)> for Components<N> {
    fn from_iter<I: IntoIterator<Item = (S, ComponentRef<N>)>>(iter: I) -> Self {
        let mut components = Self::new();
        for (slot, component) in iter {
            components.insert(slot, component);
        }
        components
    }
}
