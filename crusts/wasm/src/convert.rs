//! Conversion from JS route objects to Rust route trees, with input validation.
//!
//! Every shape check happens here, at the FFI boundary. Invalid inputs
//! produce clear JS errors, never panics.

use std::rc::Rc;

use grouter::{ChildRoute, Component, ComponentRef, Components, MAX_ROUTE_DEPTH};
use js_sys::{Array, Object};
use wasm_bindgen::prelude::*;

use crate::library::get;

/// Maximum number of children under one route.
pub const MAX_CHILDREN: u32 = 256;

/// Maximum number of named components on one route.
const MAX_SLOTS: usize = 64;

/// Maximum number of components handed to `Router.fromConfig`.
pub const MAX_REGISTERED: usize = 4096;

/// A JS component (class or function) handed to react-router as-is.
pub struct JsComponent(JsValue);

impl JsComponent {
    /// Wrap a JS component for a route tree.
    pub fn shared(component: JsValue) -> ComponentRef<JsValue> {
        Rc::new(Self(component))
    }
}

impl Component for JsComponent {
    type Node = JsValue;

    fn node(&self) -> JsValue {
        self.0.clone()
    }
}

/// Check that `val` can be used as a component.
pub fn convert_component(val: JsValue, what: &str) -> Result<ComponentRef<JsValue>, JsValue> {
    if val.is_undefined() || val.is_null() {
        return Err(JsValue::from_str(&format!("{what} must be a component")));
    }
    Ok(JsComponent::shared(val))
}

/// Convert an array of route objects.
///
/// ```js
/// [{ type: "index", components: { main: C1 } },
///  { type: "path", path: "c2", components: { main: C2 }, children: [...] }]
/// ```
pub fn convert_children(val: &JsValue) -> Result<Vec<ChildRoute<JsValue>>, JsValue> {
    convert_children_at(val, 1)
}

fn convert_children_at(val: &JsValue, depth: usize) -> Result<Vec<ChildRoute<JsValue>>, JsValue> {
    if val.is_undefined() || val.is_null() {
        return Ok(Vec::new());
    }
    if !Array::is_array(val) {
        return Err(JsValue::from_str("children must be an array of routes"));
    }
    // Root is depth 1, its children depth 2.
    if depth + 1 > MAX_ROUTE_DEPTH {
        return Err(JsValue::from_str(&format!(
            "route nesting exceeds maximum depth of {MAX_ROUTE_DEPTH}"
        )));
    }

    let array = Array::from(val);
    if array.length() > MAX_CHILDREN {
        return Err(JsValue::from_str(&format!(
            "too many children: {} exceeds limit of {MAX_CHILDREN}",
            array.length()
        )));
    }

    array
        .iter()
        .map(|item| convert_route(&item, depth + 1))
        .collect()
}

fn convert_route(val: &JsValue, depth: usize) -> Result<ChildRoute<JsValue>, JsValue> {
    if !val.is_object() {
        return Err(JsValue::from_str(
            "route must be an object created by Route.path() or Route.index()",
        ));
    }

    let components = convert_components(&get(val, "components"))?;
    let route = match get(val, "type").as_string().as_deref() {
        Some("index") => ChildRoute::index(components),
        Some("path") => {
            let path = get(val, "path")
                .as_string()
                .ok_or_else(|| JsValue::from_str("path route requires a string path"))?;
            if path.is_empty() {
                return Err(JsValue::from_str(
                    "route path must not be empty; use Route.index() for index routes",
                ));
            }
            ChildRoute::new(path, components)
        }
        Some(other) => {
            return Err(JsValue::from_str(&format!(
                "unknown route type: {other:?} (expected \"path\" or \"index\")"
            )))
        }
        None => return Err(JsValue::from_str("route type must be a string")),
    };

    let children = convert_children_at(&get(val, "children"), depth)?;
    Ok(route.with_children(children))
}

/// Convert a `{ slot: Component }` object.
pub fn convert_components(val: &JsValue) -> Result<Components<JsValue>, JsValue> {
    if !val.is_object() || Array::is_array(val) {
        return Err(JsValue::from_str(
            "components must be an object mapping slot names to components",
        ));
    }

    let entries = Object::entries(&Object::from(val.clone()));
    if entries.length() == 0 {
        return Err(JsValue::from_str("components must name at least one slot"));
    }
    if entries.length() as usize > MAX_SLOTS {
        return Err(JsValue::from_str(&format!(
            "too many components: {} exceeds limit of {MAX_SLOTS}",
            entries.length()
        )));
    }

    let mut components = Components::new();
    for (slot, component) in named_components(&entries, "components")? {
        components.insert(slot, component);
    }
    Ok(components)
}

/// Convert the `{ name: Component }` map given to `Router.fromConfig`.
///
/// An empty map is accepted; the config then fails on its first name.
pub fn convert_registry(val: &JsValue) -> Result<Vec<(String, ComponentRef<JsValue>)>, JsValue> {
    if !val.is_object() || Array::is_array(val) {
        return Err(JsValue::from_str(
            "registry must be an object mapping component names to components",
        ));
    }

    let entries = Object::entries(&Object::from(val.clone()));
    if entries.length() as usize > MAX_REGISTERED {
        return Err(JsValue::from_str(&format!(
            "too many registered components: {} exceeds limit of {MAX_REGISTERED}",
            entries.length()
        )));
    }
    named_components(&entries, "registry")
}

fn named_components(
    entries: &Array,
    what: &str,
) -> Result<Vec<(String, ComponentRef<JsValue>)>, JsValue> {
    entries
        .iter()
        .map(|entry| {
            let pair = Array::from(&entry);
            let name = pair
                .get(0)
                .as_string()
                .ok_or_else(|| JsValue::from_str(&format!("{what} keys must be strings")))?;
            let component = convert_component(pair.get(1), &format!("{what}.{name}"))?;
            Ok((name, component))
        })
        .collect()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::library::set;
    use grouter::RoutePath;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn component(name: &str) -> JsValue {
        js_sys::Function::new_no_args(&format!("return '{name}';")).into()
    }

    fn slots(pairs: &[(&str, &str)]) -> JsValue {
        let obj = Object::new();
        for (slot, name) in pairs {
            set(&obj, slot, &component(name)).unwrap();
        }
        obj.into()
    }

    fn route(kind: &str, path: Option<&str>, components: JsValue, children: Option<Array>) -> JsValue {
        let obj = Object::new();
        set(&obj, "type", &JsValue::from_str(kind)).unwrap();
        if let Some(path) = path {
            set(&obj, "path", &JsValue::from_str(path)).unwrap();
        }
        set(&obj, "components", &components).unwrap();
        if let Some(children) = children {
            set(&obj, "children", &children).unwrap();
        }
        obj.into()
    }

    #[wasm_bindgen_test]
    fn test_convert_children() {
        let nested: Array = [route("path", Some(":id"), slots(&[("main", "user")]), None)]
            .into_iter()
            .collect();
        let children: Array = [
            route("index", None, slots(&[("main", "c1")]), None),
            route("path", Some("users"), slots(&[("main", "users")]), Some(nested)),
        ]
        .into_iter()
        .collect();

        let routes = convert_children(&children).unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes[0].is_index());
        assert_eq!(routes[1].path(), &RoutePath::Path("users".into()));
        assert_eq!(routes[1].children().len(), 1);
        assert_eq!(routes[1].children()[0].components().len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_absent_children() {
        assert!(convert_children(&JsValue::UNDEFINED).unwrap().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_rejects_bad_shapes() {
        let not_array = JsValue::from_str("routes");
        assert!(convert_children(&not_array).is_err());

        let unknown: Array = [route("wildcard", None, slots(&[("main", "c1")]), None)]
            .into_iter()
            .collect();
        assert!(convert_children(&unknown).is_err());

        let empty_path: Array = [route("path", Some(""), slots(&[("main", "c1")]), None)]
            .into_iter()
            .collect();
        assert!(convert_children(&empty_path).is_err());

        let no_slots: Array = [route("path", Some("c1"), Object::new().into(), None)]
            .into_iter()
            .collect();
        assert!(convert_children(&no_slots).is_err());
    }

    #[wasm_bindgen_test]
    fn test_rejects_missing_component() {
        let obj = Object::new();
        set(&obj, "main", &JsValue::UNDEFINED).unwrap();
        let err = convert_components(&obj.into()).err().unwrap();
        assert_eq!(err.as_string().as_deref(), Some("components.main must be a component"));
    }

    #[wasm_bindgen_test]
    fn test_registry_is_not_capped_by_slot_limit() {
        let registry = Object::new();
        for i in 0..100 {
            set(&registry, &format!("c{i}"), &component("c")).unwrap();
        }
        assert_eq!(convert_registry(&registry.clone().into()).unwrap().len(), 100);
        assert!(convert_components(&registry.into()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_registry_errors_name_the_registry() {
        assert!(convert_registry(&Object::new().into()).unwrap().is_empty());

        let err = convert_registry(&Array::new().into()).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("registry must be an object"));

        let obj = Object::new();
        set(&obj, "nav", &JsValue::NULL).unwrap();
        let err = convert_registry(&obj.into()).err().unwrap();
        assert_eq!(err.as_string().as_deref(), Some("registry.nav must be a component"));
    }
}
