//! Active-path helpers: links, `isActive` queries and the `withRouter` decoration.
//!
//! A component decorated through [`with_router`] receives a routing context in
//! its props (react-router's `this.props.router`). [`is_active`] looks that
//! context up and asks its `isActive` function about a path.
//!
//! A missing context or function is a programmer error: the component was not
//! decorated, or the library is not the one this adapter was written against.
//! The panicking helpers abort; [`try_is_active`] and [`router_function`]
//! return the same [`PreconditionError`] instead.

use std::rc::Rc;

use crate::{
    Component, ComponentRef, LinkProps, PreconditionError, RouterLibrary, ACTIVE_CLASS,
    IS_ACTIVE_FN,
};

/// A routing-context function, e.g. `isActive(pathOrLoc)`.
///
/// A library-side failure comes back as [`PreconditionError::FunctionFailed`].
pub type RouterFn = Box<dyn Fn(&str) -> Result<bool, PreconditionError>>;

/// The routing context the library injects into decorated props.
pub trait RoutingContext {
    /// Look up a context function by name.
    fn function(&self, name: &str) -> Option<RouterFn>;
}

/// A component's props bag, as far as routing is concerned.
pub trait ComponentProps {
    /// The injected routing context type.
    type Context: RoutingContext;

    /// The value under [`ROUTER_PROP`](crate::ROUTER_PROP), if the component was decorated.
    fn routing_context(&self) -> Option<Self::Context>;
}

/// What a helper contributes to the element it is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier<E> {
    /// Contributes nothing.
    Discard,
    /// Adds a CSS class.
    Class(String),
    /// Adds a prepared child element.
    Element(E),
}

impl<E> Modifier<E> {
    /// Returns `true` for [`Modifier::Discard`].
    #[must_use]
    pub fn is_discard(&self) -> bool {
        matches!(self, Self::Discard)
    }

    /// The class added, if this is a [`Modifier::Class`].
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// The element added, if this is a [`Modifier::Element`].
    #[must_use]
    pub fn element(&self) -> Option<&E> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// Look up a routing-context function in `props`.
///
/// # Errors
///
/// - [`PreconditionError::RouterNotFound`] when `props` carry no routing context
/// - [`PreconditionError::FunctionNotFound`] when the context lacks `name`
pub fn router_function<P>(props: &P, name: &str) -> Result<RouterFn, PreconditionError>
where
    P: ComponentProps + ?Sized,
{
    let context = props
        .routing_context()
        .ok_or(PreconditionError::RouterNotFound)?;
    context
        .function(name)
        .ok_or_else(|| PreconditionError::FunctionNotFound {
            name: name.to_owned(),
        })
}

/// Fallible form of [`is_active`].
///
/// # Errors
///
/// See [`router_function`]. A throwing `isActive` yields
/// [`PreconditionError::FunctionFailed`].
pub fn try_is_active<P>(props: &P, path_or_loc: &str) -> Result<bool, PreconditionError>
where
    P: ComponentProps + ?Sized,
{
    let query = router_function(props, IS_ACTIVE_FN)?;
    query(path_or_loc)
}

/// Whether `path_or_loc` is active for the location the router is showing.
///
/// # Panics
///
/// Panics when the component was not decorated with [`with_router`], or the
/// routing context has no `isActive`, or `isActive` itself fails.
pub fn is_active<P>(props: &P, path_or_loc: &str) -> bool
where
    P: ComponentProps + ?Sized,
{
    match try_is_active(props, path_or_loc) {
        Ok(active) => active,
        Err(err) => panic!("{err}"),
    }
}

/// [`Modifier::Class`]`("active")` when [`is_active`], [`Modifier::Discard`] otherwise.
///
/// # Panics
///
/// Same as [`is_active`].
pub fn mark_if_active<E, P>(props: &P, path_or_loc: &str) -> Modifier<E>
where
    P: ComponentProps + ?Sized,
{
    if is_active(props, path_or_loc) {
        Modifier::Class(ACTIVE_CLASS.to_owned())
    } else {
        Modifier::Discard
    }
}

/// A link to `to` that marks itself with the `active` class while its target is active.
///
/// # Panics
///
/// Panics when the library's `Link` factory yields no element.
pub fn link<L: RouterLibrary + ?Sized>(library: &L, to: &str, text: &str) -> Modifier<L::Element> {
    match library.create_link(&LinkProps::new(to), text) {
        Some(element) => Modifier::Element(element),
        None => panic!("{}", PreconditionError::FactoryFailed { factory: "Link" }),
    }
}

/// Decorate `component` so the library injects the routing context into its props.
pub fn with_router<L: RouterLibrary + ?Sized>(library: &L, component: L::Node) -> L::Node {
    library.with_router(component)
}

/// A component whose render handle is decorated through [`with_router`].
///
/// Use this to put a decorated component into a route tree:
///
/// ```ignore
/// let app = decorate(&library, app);
/// let router = Router::new(library, "/", app, [])?;
/// ```
pub fn decorate<L>(library: &Rc<L>, component: ComponentRef<L::Node>) -> ComponentRef<L::Node>
where
    L: RouterLibrary + 'static,
{
    Rc::new(Decorated {
        library: Rc::clone(library),
        inner: component,
    })
}

struct Decorated<L: RouterLibrary> {
    library: Rc<L>,
    inner: ComponentRef<L::Node>,
}

impl<L: RouterLibrary> Component for Decorated<L> {
    type Node = L::Node;

    fn node(&self) -> L::Node {
        self.library.with_router(self.inner.node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Context {
        functions: HashMap<&'static str, Rc<dyn Fn(&str) -> bool>>,
    }

    impl RoutingContext for Context {
        fn function(&self, name: &str) -> Option<RouterFn> {
            let f = Rc::clone(self.functions.get(name)?);
            Some(Box::new(move |arg: &str| Ok(f(arg))))
        }
    }

    struct Props {
        router: Option<Context>,
    }

    impl ComponentProps for Props {
        type Context = Context;

        fn routing_context(&self) -> Option<Context> {
            self.router.clone()
        }
    }

    fn decorated(current: &'static str) -> Props {
        let mut functions: HashMap<&'static str, Rc<dyn Fn(&str) -> bool>> = HashMap::new();
        functions.insert("isActive", Rc::new(move |p: &str| p == current));
        Props {
            router: Some(Context { functions }),
        }
    }

    #[test]
    fn test_is_active() {
        let props = decorated("/c2");
        assert!(is_active(&props, "/c2"));
        assert!(!is_active(&props, "/c1"));
    }

    #[test]
    fn test_mark_if_active() {
        let props = decorated("/c2");
        let active: Modifier<()> = mark_if_active(&props, "/c2");
        let inactive: Modifier<()> = mark_if_active(&props, "/c1");

        assert_eq!(active, Modifier::Class("active".into()));
        assert_eq!(active.class(), Some("active"));
        assert!(inactive.is_discard());
    }

    #[test]
    fn test_missing_router() {
        let props = Props { router: None };
        assert_eq!(
            try_is_active(&props, "/").unwrap_err(),
            PreconditionError::RouterNotFound
        );
    }

    #[test]
    fn test_missing_function() {
        let props = Props {
            router: Some(Context::default()),
        };
        assert_eq!(
            router_function(&props, "isActive").err(),
            Some(PreconditionError::FunctionNotFound {
                name: "isActive".into()
            })
        );
    }

    struct Throwing;

    impl RoutingContext for Throwing {
        fn function(&self, name: &str) -> Option<RouterFn> {
            let name = name.to_owned();
            Some(Box::new(move |_: &str| {
                Err(PreconditionError::FunctionFailed {
                    name: name.clone(),
                    reason: "boom".into(),
                })
            }))
        }
    }

    struct ThrowingProps;

    impl ComponentProps for ThrowingProps {
        type Context = Throwing;

        fn routing_context(&self) -> Option<Throwing> {
            Some(Throwing)
        }
    }

    #[test]
    fn test_failing_function_is_reported() {
        assert_eq!(
            try_is_active(&ThrowingProps, "/c1"),
            Err(PreconditionError::FunctionFailed {
                name: "isActive".into(),
                reason: "boom".into()
            })
        );
    }

    #[test]
    #[should_panic(expected = "isActive failed: boom")]
    fn test_mark_if_active_panics_when_function_fails() {
        let _: Modifier<()> = mark_if_active(&ThrowingProps, "/c1");
    }

    #[test]
    #[should_panic(expected = "router not found in props")]
    fn test_is_active_panics_without_router() {
        is_active(&Props { router: None }, "/c1");
    }

    #[test]
    #[should_panic(expected = "isActive not found")]
    fn test_mark_if_active_panics_without_function() {
        let props = Props {
            router: Some(Context::default()),
        };
        let _: Modifier<()> = mark_if_active(&props, "/c1");
    }
}
