//! Shallow rendering of a router element.
//!
//! Resolves the history's current location against the route elements the
//! way a react-router style router does: path routes match segment by
//! segment (`:name` matches any one segment), the first matching sibling
//! wins, and an index route is entered when its parent consumed the whole
//! pathname. Nothing is rendered beyond the matched branch's component slots.

use std::collections::BTreeMap;

use grouter::{RegistrationKind, RouteContent};
use thiserror::Error;
use tracing::debug;

use crate::props::segments;
use crate::{ComponentNode, Element, ElementRef, History, Location, MemoryContext, MemoryProps};

/// Errors from [`shallow_render`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The element is not a `Router` element.
    #[error("expected a Router element, got {found}")]
    NotARouter {
        /// Shape of the element received.
        found: String,
    },

    /// No route matches the current location.
    #[error("no route matches {pathname}")]
    NoMatch {
        /// The unmatched pathname.
        pathname: String,
    },
}

/// Result of rendering a router at its current location.
#[derive(Debug, Clone)]
pub struct RenderedRouter {
    location: Location,
    history: History,
    branch: Vec<ElementRef>,
    params: BTreeMap<String, String>,
}

impl RenderedRouter {
    /// The location that was rendered.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Matched route elements, root first.
    #[must_use]
    pub fn branch(&self) -> &[ElementRef] {
        &self.branch
    }

    /// Values of the `:name` segments on the matched branch.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The root route's component.
    #[must_use]
    pub fn root_component(&self) -> Option<&ComponentNode> {
        self.branch.first().and_then(|root| root.component(""))
    }

    /// The component filling `slot`. Deeper routes override shallower ones.
    #[must_use]
    pub fn slot(&self, slot: &str) -> Option<&ComponentNode> {
        self.branch
            .iter()
            .skip(1)
            .rev()
            .find_map(|route| route.component(slot))
    }

    /// Every filled slot, by slot name.
    #[must_use]
    pub fn slots(&self) -> BTreeMap<String, String> {
        let mut slots = BTreeMap::new();
        for route in self.branch.iter().skip(1) {
            if let Element::Route {
                content: RouteContent::Components(components),
                ..
            } = &**route
            {
                for (slot, node) in components {
                    slots.insert(slot.clone(), node.name.clone());
                }
            }
        }
        slots
    }

    /// Props the root component receives. Only a decorated root sees the routing context.
    #[must_use]
    pub fn props(&self) -> MemoryProps {
        match self.root_component() {
            Some(node) if node.decorated => {
                MemoryProps::decorated(MemoryContext::for_history(&self.history))
            }
            _ => MemoryProps::undecorated(),
        }
    }
}

/// Render `element`, which must come from the `Router` factory.
///
/// # Errors
///
/// - [`RenderError::NotARouter`] for any other element
/// - [`RenderError::NoMatch`] when the location matches no route
pub fn shallow_render(element: &ElementRef) -> Result<RenderedRouter, RenderError> {
    let Element::Router { history, root } = &**element else {
        return Err(RenderError::NotARouter {
            found: element.shape(),
        });
    };

    let location = history.location();
    let mut params = BTreeMap::new();
    let mut branch = Vec::new();

    if !match_route(root, &segments(&location.pathname), &mut branch, &mut params) {
        return Err(RenderError::NoMatch {
            pathname: location.pathname,
        });
    }

    debug!(
        pathname = location.pathname.as_str(),
        depth = branch.len(),
        "router rendered"
    );
    Ok(RenderedRouter {
        location,
        history: history.clone(),
        branch,
        params,
    })
}

fn match_route(
    route: &ElementRef,
    remaining: &[&str],
    branch: &mut Vec<ElementRef>,
    params: &mut BTreeMap<String, String>,
) -> bool {
    let pattern = segments(route.route_path().unwrap_or(""));
    if pattern.len() > remaining.len() {
        return false;
    }

    let mut captured = Vec::new();
    for (p, s) in pattern.iter().zip(remaining) {
        match p.strip_prefix(':') {
            Some(name) => captured.push((name.to_owned(), (*s).to_owned())),
            None if p == s => {}
            None => return false,
        }
    }
    let rest = &remaining[pattern.len()..];

    let mark = branch.len();
    branch.push(route.clone());

    let children = route.route_children();
    let matched = if rest.is_empty() {
        if let Some(index) = children
            .iter()
            .find(|c| c.route_kind() == Some(RegistrationKind::IndexRoute))
        {
            branch.push(index.clone());
        }
        true
    } else {
        children
            .iter()
            .filter(|c| c.route_kind() == Some(RegistrationKind::Route))
            .any(|child| match_route(child, rest, branch, params))
    };

    if matched {
        params.extend(captured);
    } else {
        branch.truncate(mark);
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use grouter::Key;

    fn route(
        kind: RegistrationKind,
        path: Option<&str>,
        main: &str,
        children: Vec<ElementRef>,
    ) -> ElementRef {
        ElementRef::new(Element::Route {
            kind,
            key: Key::Position(0),
            path: path.map(str::to_owned),
            content: RouteContent::Components(BTreeMap::from([(
                "main".to_owned(),
                ComponentNode::new(main),
            )])),
            children: (!children.is_empty()).then_some(children),
        })
    }

    fn router(at: &str) -> ElementRef {
        let root = ElementRef::new(Element::Route {
            kind: RegistrationKind::Route,
            key: Key::Root,
            path: Some("/".into()),
            content: RouteContent::Component(ComponentNode::new("app")),
            children: Some(vec![
                route(RegistrationKind::IndexRoute, None, "home", vec![]),
                route(
                    RegistrationKind::Route,
                    Some("users"),
                    "users",
                    vec![
                        route(RegistrationKind::IndexRoute, None, "list", vec![]),
                        route(RegistrationKind::Route, Some(":id"), "user", vec![]),
                    ],
                ),
            ]),
        });
        ElementRef::new(Element::Router {
            history: History::memory(at),
            root,
        })
    }

    #[test]
    fn test_index_at_root() {
        let r = shallow_render(&router("/")).unwrap();
        assert_eq!(r.slot("main").map(|c| c.name.as_str()), Some("home"));
        assert_eq!(r.branch().len(), 2);
        assert_eq!(r.root_component().map(|c| c.name.as_str()), Some("app"));
    }

    #[test]
    fn test_nested_index() {
        let r = shallow_render(&router("/users")).unwrap();
        assert_eq!(r.slot("main").map(|c| c.name.as_str()), Some("list"));
        assert_eq!(r.branch().len(), 3);
    }

    #[test]
    fn test_param_segment() {
        let r = shallow_render(&router("/users/7")).unwrap();
        assert_eq!(r.slot("main").map(|c| c.name.as_str()), Some("user"));
        assert_eq!(r.params().get("id").map(String::as_str), Some("7"));
        assert_eq!(r.slots().get("main").map(String::as_str), Some("user"));
    }

    #[test]
    fn test_no_match() {
        let err = shallow_render(&router("/nope")).unwrap_err();
        assert_eq!(
            err,
            RenderError::NoMatch {
                pathname: "/nope".into()
            }
        );
        assert_eq!(err.to_string(), "no route matches /nope");
    }

    #[test]
    fn test_not_a_router() {
        let leaf = route(RegistrationKind::Route, Some("c1"), "c1", vec![]);
        assert!(matches!(
            shallow_render(&leaf),
            Err(RenderError::NotARouter { .. })
        ));
    }

    #[test]
    fn test_undecorated_root_has_no_context() {
        let r = shallow_render(&router("/")).unwrap();
        assert!(r.props().router.is_none());
    }
}
