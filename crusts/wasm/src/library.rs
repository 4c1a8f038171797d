//! The page's react-router, resolved once and used through `RouterLibrary`.

use std::cell::RefCell;
use std::rc::Rc;

use grouter::{
    Key, LinkProps, MountProps, PreconditionError, RegistrationKind, RouteContent, RouteProps,
    RouterLibrary, ROOT_KEY,
};
use js_sys::{Function, Object, Reflect};
use tracing::debug;
use wasm_bindgen::prelude::*;

thread_local! {
    static LIBRARY: RefCell<Option<Rc<ReactRouter>>> = const { RefCell::new(None) };
}

/// The shared library handle, loaded on first use.
///
/// # Errors
///
/// Throws the [`PreconditionError`] message when React or react-router is missing.
pub fn library() -> Result<Rc<ReactRouter>, JsValue> {
    LIBRARY.with(|cell| {
        if let Some(library) = cell.borrow().as_ref() {
            return Ok(Rc::clone(library));
        }
        let library = Rc::new(ReactRouter::load().map_err(to_js)?);
        *cell.borrow_mut() = Some(Rc::clone(&library));
        Ok(library)
    })
}

/// A precondition failure as a JS error value.
pub fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// react-router (v3) as loaded in the page.
pub struct ReactRouter {
    route: Function,
    index_route: Function,
    router: Function,
    link: Function,
    hash_history: JsValue,
    create_memory_history: Option<Function>,
    with_router: Function,
}

impl ReactRouter {
    /// Resolve `React` and `ReactRouter` from the global object, falling back
    /// to `require`, and create the element factories.
    ///
    /// # Errors
    ///
    /// - [`PreconditionError::LibraryNotFound`] when either library is missing
    /// - [`PreconditionError::FactoryNotFound`] when an export is missing
    pub fn load() -> Result<Self, PreconditionError> {
        let react = resolve("React", "react")?;
        let router_lib = resolve("ReactRouter", "react-router")?;

        let create_factory: Function = get(&react, "createFactory")
            .dyn_into()
            .map_err(|_| not_found("React.createFactory"))?;
        let factory = |export: &'static str| -> Result<Function, PreconditionError> {
            let component = get(&router_lib, export);
            if component.is_undefined() {
                return Err(not_found(&format!("ReactRouter.{export}")));
            }
            create_factory
                .call1(&react, &component)
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
                .ok_or(PreconditionError::FactoryFailed { factory: export })
        };

        let library = Self {
            route: factory("Route")?,
            index_route: factory("IndexRoute")?,
            router: factory("Router")?,
            link: factory("Link")?,
            hash_history: present(get(&router_lib, "hashHistory"))
                .ok_or_else(|| not_found("ReactRouter.hashHistory"))?,
            create_memory_history: get(&router_lib, "createMemoryHistory").dyn_into().ok(),
            with_router: get(&router_lib, "withRouter")
                .dyn_into()
                .map_err(|_| not_found("ReactRouter.withRouter"))?,
        };
        debug!(
            memory_history = library.create_memory_history.is_some(),
            "react-router loaded"
        );
        Ok(library)
    }

    fn factory(&self, kind: RegistrationKind) -> &Function {
        match kind {
            RegistrationKind::Route => &self.route,
            RegistrationKind::IndexRoute => &self.index_route,
        }
    }
}

impl RouterLibrary for ReactRouter {
    type Node = JsValue;
    type Element = JsValue;
    type History = JsValue;

    fn create_route(
        &self,
        kind: RegistrationKind,
        props: &RouteProps<JsValue>,
        children: Option<Vec<JsValue>>,
    ) -> Option<JsValue> {
        let obj = Object::new();
        let key = match props.key {
            Key::Root => JsValue::from_str(ROOT_KEY),
            Key::Position(i) => JsValue::from_f64(i as f64),
        };
        set(&obj, "key", &key).ok()?;
        if let Some(path) = &props.path {
            set(&obj, "path", &JsValue::from_str(path)).ok()?;
        }
        match &props.content {
            RouteContent::Component(node) => set(&obj, "component", node).ok()?,
            RouteContent::Components(slots) => {
                let components = Object::new();
                for (slot, node) in slots {
                    set(&components, slot, node).ok()?;
                }
                set(&obj, "components", &components).ok()?;
            }
        }

        let factory = self.factory(kind);
        let element = match children {
            Some(children) => {
                let array: js_sys::Array = children.into_iter().collect();
                factory.call2(&JsValue::NULL, &obj, &array)
            }
            None => factory.call1(&JsValue::NULL, &obj),
        };
        element.ok().and_then(present)
    }

    fn create_router(&self, props: &MountProps<JsValue>, root: JsValue) -> Option<JsValue> {
        let obj = Object::new();
        set(&obj, "history", &props.history).ok()?;
        self.router
            .call2(&JsValue::NULL, &obj, &root)
            .ok()
            .and_then(present)
    }

    fn create_link(&self, props: &LinkProps, text: &str) -> Option<JsValue> {
        let props = serde_wasm_bindgen::to_value(props).ok()?;
        self.link
            .call2(&JsValue::NULL, &props, &JsValue::from_str(text))
            .ok()
            .and_then(present)
    }

    fn hash_history(&self) -> JsValue {
        self.hash_history.clone()
    }

    fn memory_history(&self, path: &str) -> Option<JsValue> {
        self.create_memory_history
            .as_ref()?
            .call1(&JsValue::NULL, &JsValue::from_str(path))
            .ok()
            .and_then(present)
    }

    fn with_router(&self, component: JsValue) -> JsValue {
        match self.with_router.call1(&JsValue::NULL, &component) {
            Ok(decorated) if !decorated.is_undefined() => decorated,
            _ => panic!(
                "{}",
                PreconditionError::FactoryFailed {
                    factory: "withRouter"
                }
            ),
        }
    }
}

/// `globalThis[global]`, else `require(module)`.
fn resolve(global: &str, module: &str) -> Result<JsValue, PreconditionError> {
    let root = js_sys::global();
    if let Some(value) = present(get(&root, global)) {
        return Ok(value);
    }

    let required = get(&root, "require")
        .dyn_into::<Function>()
        .ok()
        .and_then(|require| require.call1(&JsValue::NULL, &JsValue::from_str(module)).ok())
        .and_then(present);
    required.ok_or_else(|| PreconditionError::LibraryNotFound {
        name: global.to_owned(),
    })
}

fn not_found(name: &str) -> PreconditionError {
    PreconditionError::FactoryNotFound {
        name: name.to_owned(),
    }
}

/// `obj[key]`, `undefined` when absent.
pub fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// `obj[key] = value`.
pub fn set(obj: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(obj, &JsValue::from_str(key), value).map(|_| ())
}

fn present(value: JsValue) -> Option<JsValue> {
    (!value.is_undefined() && !value.is_null()).then_some(value)
}
