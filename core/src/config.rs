//! Config types for config-driven router construction.
//!
//! These mirror the route tree but name components instead of holding them.
//! Names are resolved through a [`ComponentRegistry`](crate::ComponentRegistry)
//! at load time.
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`RouterConfig`] | [`Router`](crate::Router) | `ComponentRegistry::load_router()` |
//! | [`RouteConfig`] | [`ChildRoute`](crate::ChildRoute) | `ComponentRegistry::load_route()` |
//! | [`HistoryConfig`] | [`RouterOption`](crate::RouterOption) | via `load_router()` |
//!
//! ```yaml
//! path: /
//! component: app
//! history: { type: memory, path: /c2 }
//! children:
//!   - components: { main: c1 }          # no path: index route
//!   - path: c1
//!     components: { main: c1 }
//!   - path: c2
//!     components: { main: c2, sub: c2_sub }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ConfigurationError;

/// Configuration for a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Root path.
    pub path: String,

    /// Registered name of the root component.
    pub component: String,

    /// History provider. Defaults to hash history.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Child routes of the root.
    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

impl RouterConfig {
    /// Parse a router config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidConfig`] on malformed JSON or an
    /// unexpected shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidConfig {
            reason: e.to_string(),
        })
    }
}

/// Configuration for a [`ChildRoute`](crate::ChildRoute).
///
/// A missing `path` makes the route an index route. An empty `path` string is
/// rejected at load time rather than read as an index route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Route path below the parent; absent for an index route.
    #[serde(default)]
    pub path: Option<String>,

    /// Slot name to registered component name.
    pub components: BTreeMap<String, String>,

    /// Child routes.
    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

/// Which history provider the router listens to.
///
/// ```json
/// { "type": "hash" }
/// { "type": "memory", "path": "/c2" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryConfig {
    /// The library's hash history.
    #[default]
    Hash,

    /// An in-memory history starting at `path`.
    Memory {
        /// Initial location.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults() {
        let config = RouterConfig::from_json(r#"{ "path": "/", "component": "app" }"#).unwrap();
        assert_eq!(config.history, HistoryConfig::Hash);
        assert!(config.children.is_empty());
    }

    #[test]
    fn test_from_json_full() {
        let config = RouterConfig::from_json(
            r#"{
                "path": "/",
                "component": "app",
                "history": { "type": "memory", "path": "/c2" },
                "children": [
                    { "components": { "main": "c1" } },
                    { "path": "c2", "components": { "main": "c2", "sub": "c2_sub" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.history,
            HistoryConfig::Memory {
                path: "/c2".into()
            }
        );
        assert_eq!(config.children[0].path, None);
        assert_eq!(config.children[1].path.as_deref(), Some("c2"));
        assert_eq!(config.children[1].components.len(), 2);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "
path: /
component: app
children:
  - path: users
    components: { main: users }
    children:
      - components: { main: list }
";
        let config: RouterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.children[0].children[0].path, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RouterConfig::from_json(r#"{ "path": "/", "component": "app", "extra": 1 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_component_rejected() {
        assert!(RouterConfig::from_json(r#"{ "path": "/" }"#).is_err());
    }
}
