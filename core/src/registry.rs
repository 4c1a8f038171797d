//! Component registry for config-driven router construction.
//!
//! Components are registered by name, then the registry is frozen. Loading a
//! [`RouterConfig`] resolves every name, builds the route tree, validates it
//! and applies the configured history.
//!
//! ```ignore
//! let registry = ComponentRegistryBuilder::new()
//!     .component("app", app)
//!     .component("c1", c1)
//!     .build();
//!
//! let config = RouterConfig::from_json(json)?;
//! let router = registry.load_router(library, &config)?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::{
    with_memory_history, ChildRoute, ComponentRef, Components, ConfigurationError, HistoryConfig,
    RouteConfig, Router, RouterConfig, RouterLibrary, RouterOption,
};

/// Builder for constructing a [`ComponentRegistry`].
///
/// Immutable after [`build()`](Self::build): no runtime registration is possible.
pub struct ComponentRegistryBuilder<N> {
    components: HashMap<String, ComponentRef<N>>,
}

impl<N> ComponentRegistryBuilder<N> {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a component under `name`. A repeated name replaces the earlier one.
    #[must_use]
    pub fn component(mut self, name: &str, component: ComponentRef<N>) -> Self {
        self.components.insert(name.to_owned(), component);
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> ComponentRegistry<N> {
        ComponentRegistry {
            components: self.components,
        }
    }
}

impl<N> Default for ComponentRegistryBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable name-to-component registry.
pub struct ComponentRegistry<N> {
    components: HashMap<String, ComponentRef<N>>,
}

impl<N> ComponentRegistry<N> {
    /// Returns the number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no components are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.components.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve a component by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownComponent`] listing the registered names.
    pub fn resolve(&self, name: &str) -> Result<ComponentRef<N>, ConfigurationError> {
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownComponent {
                name: name.to_owned(),
                available: self.names(),
            })
    }

    /// Build a child route (and its descendants) from config.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownComponent`] for an unregistered name
    /// - [`ConfigurationError::InvalidConfig`] for an empty `path` string
    pub fn load_route(&self, config: &RouteConfig) -> Result<ChildRoute<N>, ConfigurationError> {
        let components = config
            .components
            .iter()
            .map(|(slot, name)| Ok((slot.as_str(), self.resolve(name)?)))
            .collect::<Result<Components<N>, ConfigurationError>>()?;

        let route = match config.path.as_deref() {
            None => ChildRoute::index(components),
            Some("") => {
                return Err(ConfigurationError::InvalidConfig {
                    reason: "route path must not be empty; omit it for an index route".into(),
                })
            }
            Some(path) => ChildRoute::new(path, components),
        };

        let children = config
            .children
            .iter()
            .map(|c| self.load_route(c))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(route.with_children(children))
    }

    /// Build and validate a router from config.
    ///
    /// # Errors
    ///
    /// Any resolution, shape or invariant failure, and history options the
    /// library cannot satisfy.
    pub fn load_router<L>(
        &self,
        library: Rc<L>,
        config: &RouterConfig,
    ) -> Result<Router<L>, ConfigurationError>
    where
        L: RouterLibrary<Node = N> + 'static,
    {
        if config.path.is_empty() {
            return Err(ConfigurationError::InvalidConfig {
                reason: "root path must not be empty".into(),
            });
        }

        let component = self.resolve(&config.component)?;
        let children = config
            .children
            .iter()
            .map(|c| self.load_route(c))
            .collect::<Result<Vec<_>, _>>()?;

        let options: Vec<RouterOption<L>> = match &config.history {
            HistoryConfig::Hash => Vec::new(),
            HistoryConfig::Memory { path } => vec![with_memory_history(path.as_str())],
        };

        let router = Router::new(library, config.path.as_str(), component, options)?.with(children);
        router.validate()?;

        debug!(
            path = config.path.as_str(),
            children = config.children.len(),
            "router loaded from config"
        );
        Ok(router)
    }
}

impl<N> fmt::Debug for ComponentRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.names())
            .finish()
    }
}
