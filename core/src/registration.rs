//! Route Tree Builder — route tree in, factory-call description out.
//!
//! A [`Registration`] is the library-agnostic shape of one `Route`/`IndexRoute`
//! factory call: its kind, its props and its (optional) child registrations.
//! Building registrations is pure. The only observable effect is each
//! referenced component's [`Component::node`](crate::Component::node) being
//! called once.
//!
//! # Props shape
//!
//! | Node | `key` | `path` | content |
//! |------|-------|--------|---------|
//! | root | `"root"` | root path | `component` |
//! | path route | position in parent | path | `components` |
//! | index route | position in parent | *omitted* | `components` |

use std::collections::BTreeMap;
use std::fmt;

use crate::{ChildRoute, PreconditionError, RootRoute, RouterLibrary, ROOT_KEY};

/// Reconciliation key of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The tree root, rendered as `"root"`.
    Root,
    /// Zero-based position within the parent's children.
    Position(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_KEY),
            Self::Position(i) => write!(f, "{i}"),
        }
    }
}

/// Which library factory a registration goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    /// `Route`: the root and every path-bearing route.
    Route,
    /// `IndexRoute`: routes active when the parent is visited on its own.
    IndexRoute,
}

impl RegistrationKind {
    /// The library export backing this kind.
    #[must_use]
    pub fn factory_name(self) -> &'static str {
        match self {
            Self::Route => "Route",
            Self::IndexRoute => "IndexRoute",
        }
    }
}

/// The component prop(s) of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteContent<N> {
    /// `component`: root only.
    Component(N),
    /// `components`: slot name to render handle.
    Components(BTreeMap<String, N>),
}

/// Props passed to a `Route`/`IndexRoute` factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProps<N> {
    /// Reconciliation key.
    pub key: Key,
    /// Route path; `None` means the prop is omitted entirely.
    pub path: Option<String>,
    /// `component` or `components`.
    pub content: RouteContent<N>,
}

/// One factory call, with its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration<N> {
    /// Factory to invoke.
    pub kind: RegistrationKind,
    /// Props for the factory.
    pub props: RouteProps<N>,
    /// Child registrations in declaration order; `None` when the route has no children.
    pub children: Option<Vec<Registration<N>>>,
}

impl<N> Registration<N> {
    /// Number of registrations in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(Registration::count)
            .sum::<usize>()
    }

    /// Depth of this subtree, counting this registration as 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(Registration::depth)
            .max()
            .unwrap_or(0)
    }

    /// Invoke the library factories for this subtree, children first.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::FactoryFailed`] when a factory yields no element.
    pub fn materialize<L>(&self, library: &L) -> Result<L::Element, PreconditionError>
    where
        L: RouterLibrary<Node = N>,
    {
        let children = match &self.children {
            Some(children) => Some(
                children
                    .iter()
                    .map(|c| c.materialize(library))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        library
            .create_route(self.kind, &self.props, children)
            .ok_or(PreconditionError::FactoryFailed {
                factory: self.kind.factory_name(),
            })
    }
}

/// Build the root registration, recursing into the whole tree.
pub fn root_registration<N>(root: &RootRoute<N>) -> Registration<N> {
    Registration {
        kind: RegistrationKind::Route,
        props: RouteProps {
            key: Key::Root,
            path: Some(root.path().to_owned()),
            content: RouteContent::Component(root.component().node()),
        },
        children: child_registrations(root.children()),
    }
}

/// Build registrations for a `children` sequence.
///
/// Returns `None` for an empty sequence: routes without children carry no
/// descendant slot at all.
pub fn child_registrations<N>(children: &[ChildRoute<N>]) -> Option<Vec<Registration<N>>> {
    if children.is_empty() {
        return None;
    }
    Some(
        children
            .iter()
            .enumerate()
            .map(|(position, child)| child_registration(position, child))
            .collect(),
    )
}

fn child_registration<N>(position: usize, child: &ChildRoute<N>) -> Registration<N> {
    let kind = if child.is_index() {
        RegistrationKind::IndexRoute
    } else {
        RegistrationKind::Route
    };

    Registration {
        kind,
        props: RouteProps {
            key: Key::Position(position),
            path: child.path().as_path().map(str::to_owned),
            content: RouteContent::Components(child.components().nodes()),
        },
        children: child_registrations(child.children()),
    }
}
