//! The router and its helpers, exposed to JS.
//!
//! `Router` is opaque: the route tree lives in Rust and only the mount
//! element crosses back. Route objects are plain JS values with a `type`
//! discriminant, built by the `Route` factories.

use grouter::{
    try_is_active, with_history, ComponentProps, ComponentRegistryBuilder, ConfigurationError,
    LinkProps, PreconditionError, RouterConfig, RouterFn, RouterLibrary, RouterOption,
    RoutingContext, ACTIVE_CLASS, ROUTER_PROP,
};
use js_sys::{Array, Function, Object};
use wasm_bindgen::prelude::*;

use crate::convert;
use crate::library::{get, library, set, to_js, ReactRouter};

/// A react-router `Router` configuration with its cached mount element.
#[wasm_bindgen(js_name = Router)]
pub struct JsRouter {
    inner: grouter::Router<ReactRouter>,
}

#[wasm_bindgen(js_class = Router)]
#[allow(clippy::needless_pass_by_value)] // wasm-bindgen requires owned JsValue across FFI
impl JsRouter {
    /// Create a router rooted at `path`, rendered by `component`.
    ///
    /// `history` defaults to `ReactRouter.hashHistory`.
    ///
    /// # Errors
    ///
    /// Throws if react-router is not loaded or `component` is missing.
    #[wasm_bindgen(constructor)]
    pub fn new(
        path: String,
        component: JsValue,
        history: Option<JsValue>,
    ) -> Result<JsRouter, JsValue> {
        let component = convert::convert_component(component, "root component")?;
        let options: Vec<RouterOption<ReactRouter>> =
            history.into_iter().map(with_history::<ReactRouter>).collect();
        let inner = grouter::Router::new(library()?, path, component, options).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Build a router from a config object and a `{ name: Component }` map.
    ///
    /// ```js
    /// Router.fromConfig({
    ///   path: "/",
    ///   component: "app",
    ///   history: { type: "memory", path: "/c2" },
    ///   children: [{ path: "c2", components: { main: "c2" } }],
    /// }, { app: App, c2: C2 });
    /// ```
    ///
    /// # Errors
    ///
    /// Throws on a malformed config, an unregistered name, or a violated
    /// route invariant.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue, components: JsValue) -> Result<JsRouter, JsValue> {
        let config: RouterConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;

        let registry = convert::convert_registry(&components)?
            .into_iter()
            .fold(ComponentRegistryBuilder::new(), |builder, (name, component)| {
                builder.component(&name, component)
            })
            .build();

        let inner = registry.load_router(library()?, &config).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// A new router with `children` attached to the root. The receiver keeps its
    /// own tree and cached element.
    ///
    /// # Errors
    ///
    /// Throws if any route object is malformed or the tree violates a route invariant.
    pub fn with(&self, children: JsValue) -> Result<JsRouter, JsValue> {
        let children = convert::convert_children(&children)?;
        let inner = self.inner.with(children);
        inner.validate().map_err(to_js)?;
        Ok(Self { inner })
    }

    /// The mount element, built on the first call and cached afterwards.
    ///
    /// # Errors
    ///
    /// Throws if a react-router factory yields no element.
    pub fn node(&self) -> Result<JsValue, JsValue> {
        self.inner.try_node().map_err(to_js)
    }

    /// The history provider the router listens to.
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> JsValue {
        self.inner.history().clone()
    }
}

/// Factory methods for route objects.
///
/// - `Route.path("c2", { main: C2 })` → `{ type: "path", path: "c2", components, children: [] }`
/// - `Route.index({ main: C1 })` → `{ type: "index", components, children: [] }`
#[wasm_bindgen]
pub struct Route {
    // Zero-size: exists only as a namespace for static methods.
    _private: u8,
}

#[wasm_bindgen]
#[allow(clippy::needless_pass_by_value)] // wasm-bindgen requires owned values across FFI
impl Route {
    /// A route matching `path` below its parent.
    ///
    /// # Errors
    ///
    /// Throws if the object cannot be built.
    pub fn path(
        path: String,
        components: JsValue,
        children: Option<Array>,
    ) -> Result<JsValue, JsValue> {
        let obj = make_route("path", components, children)?;
        set(&obj, "path", &JsValue::from_str(&path))?;
        Ok(obj.into())
    }

    /// A route rendered when its parent is visited on its own.
    ///
    /// # Errors
    ///
    /// Throws if the object cannot be built.
    pub fn index(components: JsValue, children: Option<Array>) -> Result<JsValue, JsValue> {
        Ok(make_route("index", components, children)?.into())
    }
}

fn make_route(kind: &str, components: JsValue, children: Option<Array>) -> Result<Object, JsValue> {
    let obj = Object::new();
    set(&obj, "type", &JsValue::from_str(kind))?;
    set(&obj, "components", &components)?;
    set(&obj, "children", &children.unwrap_or_else(Array::new))?;
    Ok(obj)
}

/// A `Link` element to `to` that gets the `active` class while its target is active.
///
/// # Errors
///
/// Throws if react-router is not loaded or the `Link` factory fails.
#[wasm_bindgen]
pub fn link(to: String, text: String) -> Result<JsValue, JsValue> {
    let library = library()?;
    library
        .create_link(&LinkProps::new(to), &text)
        .ok_or_else(|| to_js(PreconditionError::FactoryFailed { factory: "Link" }))
}

/// Whether `pathOrLoc` is active, asked through `props.router.isActive`.
///
/// # Errors
///
/// Throws if the component was not decorated with `withRouter`.
#[wasm_bindgen(js_name = isActive)]
pub fn is_active(props: JsValue, path_or_loc: String) -> Result<bool, JsValue> {
    try_is_active(&JsProps(props), &path_or_loc).map_err(to_js)
}

/// `"active"` when `pathOrLoc` is active, `undefined` otherwise.
///
/// # Errors
///
/// Throws if the component was not decorated with `withRouter`.
#[wasm_bindgen(js_name = markIfActive)]
pub fn mark_if_active(props: JsValue, path_or_loc: String) -> Result<Option<String>, JsValue> {
    let active = try_is_active(&JsProps(props), &path_or_loc).map_err(to_js)?;
    Ok(active.then(|| ACTIVE_CLASS.to_owned()))
}

/// Decorate `component` so react-router injects `router` into its props.
///
/// # Errors
///
/// Throws if react-router is not loaded.
#[wasm_bindgen(js_name = withRouter)]
pub fn with_router(component: JsValue) -> Result<JsValue, JsValue> {
    Ok(library()?.with_router(component))
}

/// A memory history starting at `path`, for tests and server rendering.
///
/// # Errors
///
/// Throws if react-router lacks `createMemoryHistory`.
#[wasm_bindgen(js_name = memoryHistory)]
pub fn memory_history(path: String) -> Result<JsValue, JsValue> {
    library()?
        .memory_history(&path)
        .ok_or_else(|| to_js(ConfigurationError::HistoryUnavailable { provider: "memory" }))
}

/// Props of a rendered JS component.
struct JsProps(JsValue);

impl ComponentProps for JsProps {
    type Context = JsRoutingContext;

    fn routing_context(&self) -> Option<JsRoutingContext> {
        let router = get(&self.0, ROUTER_PROP);
        router.is_object().then(|| JsRoutingContext(router))
    }
}

/// The `router` object react-router injects into decorated components.
struct JsRoutingContext(JsValue);

impl RoutingContext for JsRoutingContext {
    fn function(&self, name: &str) -> Option<RouterFn> {
        let function: Function = get(&self.0, name).dyn_into().ok()?;
        let this = self.0.clone();
        let name = name.to_owned();
        Some(Box::new(move |arg: &str| {
            function
                .call1(&this, &JsValue::from_str(arg))
                .map(|result| result.is_truthy())
                .map_err(|thrown| PreconditionError::FunctionFailed {
                    name: name.clone(),
                    reason: describe(&thrown),
                })
        }))
    }
}

/// A thrown JS value as text: an `Error`'s message, a string as-is.
fn describe(thrown: &JsValue) -> String {
    if let Some(error) = thrown.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    thrown
        .as_string()
        .unwrap_or_else(|| format!("{thrown:?}"))
}
