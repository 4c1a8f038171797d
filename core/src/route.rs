//! Route tree — the declarative navigation structure.
//!
//! The root and its descendants are different types: the root always has a
//! path and one unnamed component, descendants fill named slots and may be
//! index routes.

use std::fmt;

use crate::{ComponentRef, Components, ConfigurationError, MAX_ROUTE_DEPTH};

/// Where a child route attaches under its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoutePath {
    /// Matches a path segment (or pattern) below the parent.
    Path(String),
    /// Selected when the parent path is visited with no further segment.
    Index,
}

impl RoutePath {
    /// Returns `true` for [`RoutePath::Index`].
    #[must_use]
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index)
    }

    /// The path string, or `None` for an index route.
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(p) => Some(p),
            Self::Index => None,
        }
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.write_str(p),
            Self::Index => f.write_str("<index>"),
        }
    }
}

/// The root of a route tree.
pub struct RootRoute<N> {
    path: String,
    component: ComponentRef<N>,
    children: Vec<ChildRoute<N>>,
}

impl<N> RootRoute<N> {
    /// Create a root with no children.
    pub fn new(path: impl Into<String>, component: ComponentRef<N>) -> Self {
        Self {
            path: path.into(),
            component,
            children: Vec::new(),
        }
    }

    /// Replace the children (builder pattern).
    #[must_use]
    pub fn with_children(mut self, children: Vec<ChildRoute<N>>) -> Self {
        self.children = children;
        self
    }

    /// The root path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The single root component.
    #[must_use]
    pub fn component(&self) -> &ComponentRef<N> {
        &self.component
    }

    /// Child routes in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ChildRoute<N>] {
        &self.children
    }

    /// Depth of the tree, counting the root as 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + forest_depth(&self.children)
    }

    /// Check the structural invariants a router library relies on.
    ///
    /// - at most one index route per `children` sequence
    /// - every child route fills at least one slot
    /// - no child path is empty (index routes use [`RoutePath::Index`])
    /// - depth does not exceed [`MAX_ROUTE_DEPTH`]
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigurationError`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let depth = self.depth();
        if depth > MAX_ROUTE_DEPTH {
            return Err(ConfigurationError::DepthExceeded {
                depth,
                max: MAX_ROUTE_DEPTH,
            });
        }
        validate_forest(&self.path, &self.children)
    }
}

impl<N> Clone for RootRoute<N> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            component: self.component.clone(),
            children: self.children.clone(),
        }
    }
}

impl<N> fmt::Debug for RootRoute<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootRoute")
            .field("path", &self.path)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// A non-root route filling one or more named slots.
pub struct ChildRoute<N> {
    path: RoutePath,
    components: Components<N>,
    children: Vec<ChildRoute<N>>,
}

impl<N> ChildRoute<N> {
    /// A route matching `path` below its parent.
    pub fn new(path: impl Into<String>, components: Components<N>) -> Self {
        Self {
            path: RoutePath::Path(path.into()),
            components,
            children: Vec::new(),
        }
    }

    /// An index route, selected when the parent path is visited on its own.
    pub fn index(components: Components<N>) -> Self {
        Self {
            path: RoutePath::Index,
            components,
            children: Vec::new(),
        }
    }

    /// Replace the children (builder pattern).
    #[must_use]
    pub fn with_children(mut self, children: Vec<ChildRoute<N>>) -> Self {
        self.children = children;
        self
    }

    /// Where this route attaches.
    #[must_use]
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    /// Returns `true` for an index route.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.path.is_index()
    }

    /// The named slots this route fills.
    #[must_use]
    pub fn components(&self) -> &Components<N> {
        &self.components
    }

    /// Child routes in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ChildRoute<N>] {
        &self.children
    }
}

impl<N> Clone for ChildRoute<N> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            components: self.components.clone(),
            children: self.children.clone(),
        }
    }
}

impl<N> fmt::Debug for ChildRoute<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildRoute")
            .field("path", &self.path)
            .field("components", &self.components)
            .field("children", &self.children)
            .finish()
    }
}

fn forest_depth<N>(children: &[ChildRoute<N>]) -> usize {
    children
        .iter()
        .map(|c| 1 + forest_depth(&c.children))
        .max()
        .unwrap_or(0)
}

fn validate_forest<N>(parent: &str, children: &[ChildRoute<N>]) -> Result<(), ConfigurationError> {
    if children.iter().filter(|c| c.is_index()).count() > 1 {
        return Err(ConfigurationError::DuplicateIndexRoute {
            parent: parent.to_owned(),
        });
    }
    for child in children {
        if child.path.as_path() == Some("") {
            return Err(ConfigurationError::EmptyPath {
                parent: parent.to_owned(),
            });
        }
        let path = child.path.to_string();
        if child.components.is_empty() {
            return Err(ConfigurationError::EmptyComponents { path });
        }
        validate_forest(&path, &child.children)?;
    }
    Ok(())
}
