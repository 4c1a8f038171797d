//! grouter - route tree adapter for react-router style routers
//!
//! Translates a Rust-side route tree into the nested factory calls a
//! react-router style library expects (`Route`, `IndexRoute`, `Router`, `Link`),
//! and answers active-path queries through the routing context the library
//! injects into decorated components.
//!
//! # Architecture
//!
//! The library itself is an injected handle, never a global:
//!
//! - [`RouterLibrary`] — The external router library (factories, history, decoration)
//! - [`Component`] — Anything that produces a render handle for the library
//! - [`RootRoute`] / [`ChildRoute`] — The route tree (root carries one component,
//!   children carry named slots)
//! - [`Registration`] — Pure, library-agnostic description of one factory call
//! - [`Router`] — Materializes the tree once and caches the mount element
//!
//! # Key Design Insights
//!
//! 1. **Two route types**: only the root carries a single unnamed component.
//!    Every other route fills named slots. Illegal mixes are unrepresentable.
//!
//! 2. **Index routes are a variant**: [`RoutePath::Index`] instead of an empty
//!    path string. Index routes register through a distinct factory.
//!
//! 3. **Referential stability**: [`Router::node`] builds once and returns the
//!    same handle until [`Router::with`] produces a new router.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use grouter::prelude::*;
//! use grouter_memory::{MemoryLibrary, TestComponent};
//!
//! let library = Rc::new(MemoryLibrary::new());
//! let app = TestComponent::shared("app");
//! let c1 = TestComponent::shared("c1");
//!
//! let router = Router::new(library.clone(), "/", app, vec![with_memory_history("/c1")])
//!     .unwrap()
//!     .with(vec![
//!         ChildRoute::index(Components::new().with("main", c1.clone())),
//!         ChildRoute::new("c1", Components::new().with("main", c1)),
//!     ]);
//!
//! let first = router.node();
//! let second = router.node();
//! assert!(first.ptr_eq(&second));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod active;
mod component;
mod library;
mod registration;
mod route;
mod router;

#[cfg(feature = "registry")]
mod config;
#[cfg(feature = "registry")]
mod registry;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use component::{Component, ComponentRef, Components};
pub use library::{LinkProps, MountProps, RouterLibrary};
pub use registration::{
    child_registrations, root_registration, Key, Registration, RegistrationKind, RouteContent,
    RouteProps,
};
pub use route::{ChildRoute, RootRoute, RoutePath};
pub use router::{with_history, with_memory_history, Router, RouterOption, RouterSettings};

// Active-path helpers
pub use active::{
    decorate, is_active, link, mark_if_active, router_function, try_is_active, with_router,
    ComponentProps, Modifier, RouterFn, RoutingContext,
};

// Registry (feature-gated)
#[cfg(feature = "registry")]
pub use config::{HistoryConfig, RouteConfig, RouterConfig};
#[cfg(feature = "registry")]
pub use registry::{ComponentRegistry, ComponentRegistryBuilder};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use grouter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Helpers
        decorate,
        is_active,
        link,
        mark_if_active,
        with_history,
        with_memory_history,
        with_router,
        // Routes
        ChildRoute,
        // Traits
        Component,
        ComponentProps,
        ComponentRef,
        Components,
        // Errors
        ConfigurationError,
        Modifier,
        PreconditionError,
        // Builder output
        Registration,
        RegistrationKind,
        RootRoute,
        RoutePath,
        Router,
        RouterLibrary,
        RouterOption,
        RoutingContext,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Key given to the root route registration.
pub const ROOT_KEY: &str = "root";

/// Class name applied to active links and returned by [`mark_if_active`].
pub const ACTIVE_CLASS: &str = "active";

/// Name of the routing-context entry the library injects into decorated props.
pub const ROUTER_PROP: &str = "router";

/// Name of the routing-context function answering active-path queries.
pub const IS_ACTIVE_FN: &str = "isActive";

/// Maximum nesting depth accepted by [`RootRoute::validate`].
///
/// Registration is recursive; this bounds stack use for config-loaded trees.
pub const MAX_ROUTE_DEPTH: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Broken embedding environment or programmer error.
///
/// These are never recovered. The panicking entry points ([`Router::node`],
/// [`link`], [`is_active`]) abort with the error's message; the `try_` variants
/// hand the same value to hosts that surface errors themselves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// A required global (React, `ReactRouter`) is not loaded.
    #[error("{name} not found, make sure it is loaded.")]
    LibraryNotFound {
        /// The missing global.
        name: String,
    },
    /// The library is loaded but lacks an expected export.
    #[error("{name} not found.")]
    FactoryNotFound {
        /// The missing export, e.g. `ReactRouter.IndexRoute`.
        name: String,
    },
    /// A factory returned no element.
    #[error("failed to create {factory} element")]
    FactoryFailed {
        /// Which factory was invoked.
        factory: &'static str,
    },
    /// The props carry no routing context.
    #[error("router not found in props, make sure to decorate your component with WithRouter.")]
    RouterNotFound,
    /// The routing context lacks the requested function.
    #[error("{name} not found")]
    FunctionNotFound {
        /// The function that was looked up.
        name: String,
    },
    /// A routing-context function threw instead of answering.
    #[error("{name} failed: {reason}")]
    FunctionFailed {
        /// The function that was called.
        name: String,
        /// What the library reported.
        reason: String,
    },
}

/// Errors from router construction and configuration.
///
/// Returned synchronously from [`Router::new`] and config loading. Construction
/// yields no router when any of these occur.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The library cannot provide the requested history.
    #[error("{provider} history is not available from this router library")]
    HistoryUnavailable {
        /// Which history provider was requested.
        provider: &'static str,
    },
    /// More than one index route under the same parent.
    #[error("route \"{parent}\" has more than one index route")]
    DuplicateIndexRoute {
        /// Path of the parent route (`<index>` for an index parent).
        parent: String,
    },
    /// A child route with no component slots.
    #[error("route \"{path}\" has no components")]
    EmptyComponents {
        /// Path of the offending route.
        path: String,
    },
    /// A child route with an empty path string instead of an index route.
    #[error("route \"{parent}\" has a child with an empty path, use an index route instead")]
    EmptyPath {
        /// Path of the parent route.
        parent: String,
    },
    /// Route nesting exceeds [`MAX_ROUTE_DEPTH`].
    #[error("route nesting depth is {depth}, but maximum allowed is {max}")]
    DepthExceeded {
        /// Actual depth of the tree.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },
    /// A component name was not found in the registry.
    #[error("unknown component \"{name}\"{}", available_suffix(.available))]
    UnknownComponent {
        /// The unregistered name.
        name: String,
        /// Names that ARE registered.
        available: Vec<String>,
    },
    /// Configuration deserialization or shape error.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },
    /// A caller-defined [`RouterOption`] failed.
    #[error("router option failed: {0}")]
    Option(String),
}

fn available_suffix(available: &[String]) -> String {
    if available.is_empty() {
        " (no components are registered)".to_owned()
    } else {
        format!(" (registered: {})", available.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_component_lists_available() {
        let err = ConfigurationError::UnknownComponent {
            name: "nav".into(),
            available: vec!["c1".into(), "c2".into()],
        };
        assert_eq!(
            err.to_string(),
            "unknown component \"nav\" (registered: c1, c2)"
        );
    }

    #[test]
    fn test_unknown_component_empty_registry() {
        let err = ConfigurationError::UnknownComponent {
            name: "nav".into(),
            available: vec![],
        };
        assert!(err.to_string().ends_with("(no components are registered)"));
    }

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            PreconditionError::FunctionNotFound {
                name: "isActive".into()
            }
            .to_string(),
            "isActive not found"
        );
        assert!(PreconditionError::RouterNotFound
            .to_string()
            .starts_with("router not found in props"));
    }
}
