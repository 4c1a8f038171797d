//! RouterLibrary — the external router library as an injected handle.
//!
//! Every call the adapter makes into react-router goes through this trait, so
//! a JS binding and an in-memory fake are interchangeable. Factories return
//! `Option`: `None` means the library is missing or incompatible, which the
//! adapter treats as a fatal precondition.

use crate::{RegistrationKind, RouteProps};

/// The external router library.
///
/// # Associated types
///
/// - `Node` — render handle a [`Component`](crate::Component) produces
///   (a component class for React)
/// - `Element` — result of a factory call (a React element). Cloning must
///   yield the same underlying element, not a copy.
/// - `History` — a history provider handle
pub trait RouterLibrary {
    /// Render handle produced by components.
    type Node: Clone;
    /// Factory output.
    type Element: Clone;
    /// History provider handle.
    type History: Clone;

    /// Invoke the `Route` or `IndexRoute` factory.
    fn create_route(
        &self,
        kind: RegistrationKind,
        props: &RouteProps<Self::Node>,
        children: Option<Vec<Self::Element>>,
    ) -> Option<Self::Element>;

    /// Invoke the `Router` factory with the root route element.
    fn create_router(
        &self,
        props: &MountProps<Self::History>,
        root: Self::Element,
    ) -> Option<Self::Element>;

    /// Invoke the `Link` factory.
    fn create_link(&self, props: &LinkProps, text: &str) -> Option<Self::Element>;

    /// The library's hash-based history singleton.
    fn hash_history(&self) -> Self::History;

    /// A memory history starting at `path`, if the library provides one.
    ///
    /// Memory histories neither read nor write the address bar, which makes
    /// them the provider of choice for tests.
    fn memory_history(&self, path: &str) -> Option<Self::History> {
        let _ = path;
        None
    }

    /// Decorate a component so the library injects the routing context into its props.
    fn with_router(&self, component: Self::Node) -> Self::Node;
}

/// Props passed to the `Router` factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountProps<H> {
    /// The history provider the router listens to.
    pub history: H,
}

/// Props passed to the `Link` factory.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LinkProps {
    /// Target path.
    pub to: String,
    /// Class the link adds to itself while its target is active.
    pub active_class_name: String,
}

impl LinkProps {
    /// Link props marking the link with [`ACTIVE_CLASS`](crate::ACTIVE_CLASS) when active.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            active_class_name: crate::ACTIVE_CLASS.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_props_default_class() {
        let props = LinkProps::new("/c1");
        assert_eq!(props.to, "/c1");
        assert_eq!(props.active_class_name, "active");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_link_props_serialize_camel_case() {
        let json = serde_json::to_value(LinkProps::new("/c2")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "to": "/c2", "activeClassName": "active" })
        );
    }
}
