//! Elements produced by the in-memory factories.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use grouter::{Key, RegistrationKind, RouteContent};

use crate::{ComponentNode, History};

/// One factory call's output.
#[derive(Debug, Clone)]
pub enum Element {
    /// From the `Route` or `IndexRoute` factory.
    Route {
        /// Which factory produced it.
        kind: RegistrationKind,
        /// Reconciliation key.
        key: Key,
        /// Route path; `None` for index routes.
        path: Option<String>,
        /// `component` or `components`.
        content: RouteContent<ComponentNode>,
        /// Nested route elements; `None` when the factory received no children.
        children: Option<Vec<ElementRef>>,
    },
    /// From the `Router` factory.
    Router {
        /// The history provider passed as a prop.
        history: History,
        /// The root route element.
        root: ElementRef,
    },
    /// From the `Link` factory.
    Link {
        /// Target path.
        to: String,
        /// Class added while the target is active.
        active_class_name: String,
        /// Link text.
        text: String,
    },
}

/// Shared handle to an [`Element`].
///
/// Clones share the element, so identity is observable through [`ptr_eq`](Self::ptr_eq).
#[derive(Clone)]
pub struct ElementRef(Rc<Element>);

impl ElementRef {
    /// Wrap an element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(Rc::new(element))
    }

    /// Returns `true` if both handles point at the same element.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Factory kind, for route elements.
    #[must_use]
    pub fn route_kind(&self) -> Option<RegistrationKind> {
        match &*self.0 {
            Element::Route { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Route path, for path-bearing route elements.
    #[must_use]
    pub fn route_path(&self) -> Option<&str> {
        match &*self.0 {
            Element::Route { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// Nested route elements, empty for leaves and non-route elements.
    #[must_use]
    pub fn route_children(&self) -> &[ElementRef] {
        match &*self.0 {
            Element::Route {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// Component in `slot`. The root's single component answers to any slot name.
    #[must_use]
    pub fn component(&self, slot: &str) -> Option<&ComponentNode> {
        match &*self.0 {
            Element::Route {
                content: RouteContent::Components(slots),
                ..
            } => slots.get(slot),
            Element::Route {
                content: RouteContent::Component(node),
                ..
            } => Some(node),
            _ => None,
        }
    }

    /// A compact structural rendering, e.g. `Route(/)[IndexRoute, Route(c1)]`.
    #[must_use]
    pub fn shape(&self) -> String {
        match &*self.0 {
            Element::Router { root, .. } => format!("Router > {}", root.shape()),
            Element::Link { to, .. } => format!("Link({to})"),
            Element::Route {
                kind,
                path,
                children,
                ..
            } => {
                let mut out = kind.factory_name().to_owned();
                if let Some(path) = path {
                    out.push_str(&format!("({path})"));
                }
                if let Some(children) = children {
                    let inner: Vec<String> = children.iter().map(ElementRef::shape).collect();
                    out.push_str(&format!("[{}]", inner.join(", ")));
                }
                out
            }
        }
    }
}

impl Deref for ElementRef {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.0
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
