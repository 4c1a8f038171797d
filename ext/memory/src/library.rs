//! MemoryLibrary — `RouterLibrary` backed by plain Rust values.

use std::cell::Cell;
use std::collections::HashSet;
use std::fmt;

use grouter::{LinkProps, MountProps, RegistrationKind, RouteProps, RouterLibrary};
use tracing::trace;

use crate::{ComponentNode, Element, ElementRef, History};

/// How many times each factory was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactoryCalls {
    /// `Route` calls.
    pub route: usize,
    /// `IndexRoute` calls.
    pub index_route: usize,
    /// `Router` calls.
    pub router: usize,
    /// `Link` calls.
    pub link: usize,
}

impl FactoryCalls {
    /// Sum of all factory calls.
    #[must_use]
    pub fn total(&self) -> usize {
        self.route + self.index_route + self.router + self.link
    }
}

/// An in-memory router library.
///
/// Factories can be switched off one by one with [`failing`](Self::failing)
/// to reproduce a missing or incompatible library.
pub struct MemoryLibrary {
    hash: History,
    memory_history: bool,
    failing: HashSet<&'static str>,
    calls: Cell<FactoryCalls>,
}

impl MemoryLibrary {
    /// A library with every factory and both history providers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hash: History::hash(),
            memory_history: true,
            failing: HashSet::new(),
            calls: Cell::new(FactoryCalls::default()),
        }
    }

    /// Make the named factory (`"Route"`, `"IndexRoute"`, `"Router"` or `"Link"`) yield nothing.
    #[must_use]
    pub fn failing(mut self, factory: &'static str) -> Self {
        self.failing.insert(factory);
        self
    }

    /// Drop the memory history provider.
    #[must_use]
    pub fn without_memory_history(mut self) -> Self {
        self.memory_history = false;
        self
    }

    /// Factory invocations so far.
    #[must_use]
    pub fn calls(&self) -> FactoryCalls {
        self.calls.get()
    }

    fn invoke(&self, factory: &'static str, bump: impl FnOnce(&mut FactoryCalls)) -> bool {
        let mut calls = self.calls.get();
        bump(&mut calls);
        self.calls.set(calls);

        let available = !self.failing.contains(factory);
        trace!(factory, available, "factory invoked");
        available
    }
}

impl Default for MemoryLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterLibrary for MemoryLibrary {
    type Node = ComponentNode;
    type Element = ElementRef;
    type History = History;

    fn create_route(
        &self,
        kind: RegistrationKind,
        props: &RouteProps<ComponentNode>,
        children: Option<Vec<ElementRef>>,
    ) -> Option<ElementRef> {
        let available = self.invoke(kind.factory_name(), |c| match kind {
            RegistrationKind::Route => c.route += 1,
            RegistrationKind::IndexRoute => c.index_route += 1,
        });
        available.then(|| {
            ElementRef::new(Element::Route {
                kind,
                key: props.key,
                path: props.path.clone(),
                content: props.content.clone(),
                children,
            })
        })
    }

    fn create_router(&self, props: &MountProps<History>, root: ElementRef) -> Option<ElementRef> {
        self.invoke("Router", |c| c.router += 1).then(|| {
            ElementRef::new(Element::Router {
                history: props.history.clone(),
                root,
            })
        })
    }

    fn create_link(&self, props: &LinkProps, text: &str) -> Option<ElementRef> {
        self.invoke("Link", |c| c.link += 1).then(|| {
            ElementRef::new(Element::Link {
                to: props.to.clone(),
                active_class_name: props.active_class_name.clone(),
                text: text.to_owned(),
            })
        })
    }

    fn hash_history(&self) -> History {
        self.hash.clone()
    }

    fn memory_history(&self, path: &str) -> Option<History> {
        self.memory_history.then(|| History::memory(path))
    }

    fn with_router(&self, component: ComponentNode) -> ComponentNode {
        ComponentNode {
            decorated: true,
            ..component
        }
    }
}

impl fmt::Debug for MemoryLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut failing: Vec<&str> = self.failing.iter().copied().collect();
        failing.sort_unstable();
        f.debug_struct("MemoryLibrary")
            .field("memory_history", &self.memory_history)
            .field("failing", &failing)
            .field("calls", &self.calls.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grouter::{Key, RouteContent};

    fn props(path: Option<&str>) -> RouteProps<ComponentNode> {
        RouteProps {
            key: Key::Position(0),
            path: path.map(str::to_owned),
            content: RouteContent::Component(ComponentNode::new("c1")),
        }
    }

    #[test]
    fn test_hash_history_is_singleton() {
        let lib = MemoryLibrary::new();
        assert!(lib.hash_history().same_as(&lib.hash_history()));
    }

    #[test]
    fn test_memory_history_optional() {
        assert!(MemoryLibrary::new().memory_history("/c1").is_some());
        assert!(MemoryLibrary::new()
            .without_memory_history()
            .memory_history("/c1")
            .is_none());
    }

    #[test]
    fn test_counts_calls() {
        let lib = MemoryLibrary::new();
        lib.create_route(RegistrationKind::Route, &props(Some("c1")), None);
        lib.create_route(RegistrationKind::IndexRoute, &props(None), None);
        lib.create_link(&LinkProps::new("/c1"), "c1");
        assert_eq!(
            lib.calls(),
            FactoryCalls {
                route: 1,
                index_route: 1,
                router: 0,
                link: 1
            }
        );
        assert_eq!(lib.calls().total(), 3);
    }

    #[test]
    fn test_failing_factory() {
        let lib = MemoryLibrary::new().failing("IndexRoute");
        assert!(lib
            .create_route(RegistrationKind::Route, &props(Some("c1")), None)
            .is_some());
        assert!(lib
            .create_route(RegistrationKind::IndexRoute, &props(None), None)
            .is_none());
        assert_eq!(lib.calls().index_route, 1);
    }

    #[test]
    fn test_with_router_decorates() {
        let node = MemoryLibrary::new().with_router(ComponentNode::new("app"));
        assert!(node.decorated);
        assert_eq!(node.name, "app");
    }

    #[test]
    fn test_link_element() {
        let link = MemoryLibrary::new()
            .create_link(&LinkProps::new("/c2"), "go")
            .unwrap();
        assert!(matches!(
            &*link,
            Element::Link { to, active_class_name, text }
                if to == "/c2" && active_class_name == "active" && text == "go"
        ));
    }
}
