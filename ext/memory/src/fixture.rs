//! YAML router fixtures.
//!
//! A fixture names the components to register, a router config in the
//! registry format, and what rendering that router must produce at one or
//! more locations. `---` separates fixtures within a file.
//!
//! ```yaml
//! name: index and named slots
//! components: [app, c1, c2, c2_sub]
//! decorated: [app]
//! config:
//!   path: /
//!   component: app
//!   children:
//!     - components: { main: c1 }
//!     - path: c2
//!       components: { main: c2, sub: c2_sub }
//! shape: "Router > Route(/)[IndexRoute, Route(c2)]"
//! cases:
//!   - name: c2
//!     at: /c2
//!     slots: { main: c2, sub: c2_sub }
//!     active: [/, /c2]
//!     inactive: [/c1]
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use grouter::{decorate, ComponentRegistry, ComponentRegistryBuilder, RouterConfig};
use serde::Deserialize;

use crate::{ComponentNode, MemoryLibrary, TestComponent};

/// A router fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Component names to register.
    #[serde(default)]
    pub components: Vec<String>,
    /// Registered names to decorate with `withRouter`.
    #[serde(default)]
    pub decorated: Vec<String>,
    /// Raw router config, parsed as [`RouterConfig`] by the runner.
    pub config: serde_yaml::Value,
    /// Expected `ElementRef::shape` of the mount element.
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub cases: Vec<FixtureCase>,
    /// Parsing or loading the config must fail.
    #[serde(default)]
    pub expect_error: bool,
}

/// One location to render.
#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    /// Path pushed onto the router's history before rendering.
    pub at: String,
    /// Expected slot name to component name, for every filled slot.
    #[serde(default)]
    pub slots: BTreeMap<String, String>,
    /// Expected route params.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Paths `isActive` must accept.
    #[serde(default)]
    pub active: Vec<String>,
    /// Paths `isActive` must reject.
    #[serde(default)]
    pub inactive: Vec<String>,
    /// The location must match no route.
    #[serde(default)]
    pub no_match: bool,
}

impl Fixture {
    /// Parse a single fixture from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Parse the `config` section.
    pub fn router_config(&self) -> Result<RouterConfig, serde_yaml::Error> {
        serde_yaml::from_value(self.config.clone())
    }

    /// Register this fixture's components, decorating the ones listed in `decorated`.
    pub fn registry(&self, library: &Rc<MemoryLibrary>) -> ComponentRegistry<ComponentNode> {
        self.components
            .iter()
            .fold(ComponentRegistryBuilder::new(), |builder, name| {
                let component = TestComponent::shared(name.as_str());
                let component = if self.decorated.contains(name) {
                    decorate(library, component)
                } else {
                    component
                };
                builder.component(name, component)
            })
            .build()
    }
}
