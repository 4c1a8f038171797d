//! Router — the facade materializing a route tree into a router mount element.
//!
//! A `Router` owns the library handle, the history provider and the root
//! route. [`Router::node`] builds the mount element on first use and caches
//! it; [`Router::with`] returns a new router with an empty cache, so a router
//! whose children changed never hands out a stale element.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    root_registration, ChildRoute, Component, ComponentRef, ConfigurationError, MountProps,
    PreconditionError, RootRoute, RouterLibrary,
};

/// Settings an option may adjust while a [`Router`] is constructed.
pub struct RouterSettings<L: RouterLibrary> {
    history: Option<L::History>,
}

impl<L: RouterLibrary> RouterSettings<L> {
    /// Use `history` instead of the library's hash history.
    pub fn set_history(&mut self, history: L::History) {
        self.history = Some(history);
    }

    /// The history chosen so far, if any.
    #[must_use]
    pub fn history(&self) -> Option<&L::History> {
        self.history.as_ref()
    }
}

type ApplyFn<L> = Box<dyn FnOnce(&L, &mut RouterSettings<L>) -> Result<(), ConfigurationError>>;

/// A construction-time option for [`Router::new`].
///
/// Options run in order; the first failure aborts construction.
///
/// ```ignore
/// let strict = RouterOption::new(|_library, settings| {
///     settings
///         .history()
///         .map(|_| ())
///         .ok_or_else(|| ConfigurationError::Option("history must be set first".into()))
/// });
/// ```
pub struct RouterOption<L: RouterLibrary> {
    apply: ApplyFn<L>,
}

impl<L: RouterLibrary + 'static> RouterOption<L> {
    /// Wrap a closure as an option.
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&L, &mut RouterSettings<L>) -> Result<(), ConfigurationError> + 'static,
    {
        Self {
            apply: Box::new(apply),
        }
    }
}

impl<L: RouterLibrary> fmt::Debug for RouterOption<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterOption").finish_non_exhaustive()
    }
}

/// Use a caller-supplied history provider.
pub fn with_history<L: RouterLibrary + 'static>(history: L::History) -> RouterOption<L> {
    RouterOption::new(move |_, settings| {
        settings.set_history(history);
        Ok(())
    })
}

/// Use the library's memory history, starting at `path`.
///
/// # Errors
///
/// Applying the option fails with [`ConfigurationError::HistoryUnavailable`]
/// when the library has no memory history.
pub fn with_memory_history<L: RouterLibrary + 'static>(path: impl Into<String>) -> RouterOption<L> {
    let path = path.into();
    RouterOption::new(move |library: &L, settings| {
        let history = library
            .memory_history(&path)
            .ok_or(ConfigurationError::HistoryUnavailable { provider: "memory" })?;
        settings.set_history(history);
        Ok(())
    })
}

/// Router configuration and its cached mount element.
///
/// Not `Sync`: the cache is filled at most once, from a single thread.
pub struct Router<L: RouterLibrary> {
    library: Rc<L>,
    root: RootRoute<L::Node>,
    history: L::History,
    materialized: OnceCell<L::Element>,
}

impl<L: RouterLibrary> Router<L> {
    /// Create a router whose root route is `path` rendered by `component`.
    ///
    /// Options are applied in order. When none of them sets a history, the
    /// library's hash history is used.
    ///
    /// # Errors
    ///
    /// Returns the first option failure; no router is produced.
    pub fn new(
        library: Rc<L>,
        path: impl Into<String>,
        component: ComponentRef<L::Node>,
        options: impl IntoIterator<Item = RouterOption<L>>,
    ) -> Result<Self, ConfigurationError> {
        let mut settings = RouterSettings { history: None };
        for option in options {
            (option.apply)(&library, &mut settings)?;
        }
        let history = match settings.history {
            Some(history) => history,
            None => library.hash_history(),
        };

        Ok(Self {
            library,
            root: RootRoute::new(path, component),
            history,
            materialized: OnceCell::new(),
        })
    }

    /// A new router with the same root, history and library, and `children`
    /// attached to the root. The returned router has not been materialized.
    #[must_use]
    pub fn with(&self, children: Vec<ChildRoute<L::Node>>) -> Self {
        let root = RootRoute::new(self.root.path(), self.root.component().clone())
            .with_children(children);
        Self {
            library: Rc::clone(&self.library),
            root,
            history: self.history.clone(),
            materialized: OnceCell::new(),
        }
    }

    /// The router mount element.
    ///
    /// Built on the first call, then returned from cache: two calls without an
    /// intervening [`with`](Self::with) return the same element.
    ///
    /// # Panics
    ///
    /// Panics when a library factory yields no element. That means the router
    /// library is missing or incompatible, which no caller can recover from.
    pub fn node(&self) -> L::Element {
        match self.try_node() {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`node`](Self::node).
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::FactoryFailed`] when a factory yields no element.
    pub fn try_node(&self) -> Result<L::Element, PreconditionError> {
        if let Some(element) = self.materialized.get() {
            trace!(path = self.root.path(), "router element served from cache");
            return Ok(element.clone());
        }

        let element = self.build()?;
        Ok(self.materialized.get_or_init(|| element).clone())
    }

    fn build(&self) -> Result<L::Element, PreconditionError> {
        let registration = root_registration(&self.root);
        debug!(
            path = self.root.path(),
            routes = registration.count(),
            depth = registration.depth(),
            "materializing router"
        );

        let root = registration.materialize(self.library.as_ref())?;
        let props = MountProps {
            history: self.history.clone(),
        };
        self.library
            .create_router(&props, root)
            .ok_or(PreconditionError::FactoryFailed { factory: "Router" })
    }

    /// Returns `true` once the mount element has been built.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.materialized.get().is_some()
    }

    /// The root route.
    #[must_use]
    pub fn root(&self) -> &RootRoute<L::Node> {
        &self.root
    }

    /// The history provider passed to the `Router` factory.
    #[must_use]
    pub fn history(&self) -> &L::History {
        &self.history
    }

    /// The library handle.
    #[must_use]
    pub fn library(&self) -> &Rc<L> {
        &self.library
    }

    /// Check the route tree invariants. See [`RootRoute::validate`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.root.validate()
    }
}

/// A router renders as its mount element, so it can be handed to anything
/// expecting a component.
impl<L: RouterLibrary> Component for Router<L> {
    type Node = L::Element;

    fn node(&self) -> L::Element {
        Router::node(self)
    }
}

impl<L: RouterLibrary> fmt::Debug for Router<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("root", &self.root)
            .field("materialized", &self.is_materialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Components, LinkProps, RegistrationKind, RouteContent, RouteProps};
    use std::cell::Cell;

    /// Elements are `Rc<String>` descriptions; identity via `Rc::ptr_eq`.
    #[derive(Default)]
    struct FakeLibrary {
        routes: Cell<usize>,
        routers: Cell<usize>,
        broken_router: bool,
        no_memory: bool,
    }

    impl RouterLibrary for FakeLibrary {
        type Node = &'static str;
        type Element = Rc<String>;
        type History = String;

        fn create_route(
            &self,
            kind: RegistrationKind,
            props: &RouteProps<&'static str>,
            children: Option<Vec<Rc<String>>>,
        ) -> Option<Rc<String>> {
            self.routes.set(self.routes.get() + 1);
            let content = match &props.content {
                RouteContent::Component(c) => (*c).to_owned(),
                RouteContent::Components(m) => m.values().copied().collect::<Vec<_>>().join("+"),
            };
            let children = children
                .map(|cs| cs.iter().map(|c| c.as_str().to_owned()).collect::<Vec<_>>().join(","))
                .unwrap_or_default();
            Some(Rc::new(format!(
                "{}#{}({:?}:{content})[{children}]",
                kind.factory_name(),
                props.key,
                props.path
            )))
        }

        fn create_router(&self, props: &MountProps<String>, root: Rc<String>) -> Option<Rc<String>> {
            self.routers.set(self.routers.get() + 1);
            if self.broken_router {
                return None;
            }
            Some(Rc::new(format!("Router<{}>{root}", props.history)))
        }

        fn create_link(&self, props: &LinkProps, text: &str) -> Option<Rc<String>> {
            Some(Rc::new(format!("Link({}){text}", props.to)))
        }

        fn hash_history(&self) -> String {
            "hash".to_owned()
        }

        fn memory_history(&self, path: &str) -> Option<String> {
            (!self.no_memory).then(|| format!("memory:{path}"))
        }

        fn with_router(&self, component: &'static str) -> &'static str {
            component
        }
    }

    fn app() -> ComponentRef<&'static str> {
        Rc::new(|| "app")
    }

    fn main_slot(name: &'static str) -> Components<&'static str> {
        Components::new().with("main", Rc::new(move || name))
    }

    fn router(library: FakeLibrary) -> Router<FakeLibrary> {
        Router::new(Rc::new(library), "/", app(), []).unwrap()
    }

    #[test]
    fn test_default_history_is_hash() {
        let r = router(FakeLibrary::default());
        assert_eq!(r.history(), "hash");
    }

    #[test]
    fn test_with_history_option() {
        let r = Router::new(
            Rc::new(FakeLibrary::default()),
            "/",
            app(),
            [with_history("custom".to_owned())],
        )
        .unwrap();
        assert_eq!(r.history(), "custom");
    }

    #[test]
    fn test_with_memory_history_option() {
        let r = Router::new(
            Rc::new(FakeLibrary::default()),
            "/",
            app(),
            [with_memory_history("/c2")],
        )
        .unwrap();
        assert_eq!(r.history(), "memory:/c2");
    }

    #[test]
    fn test_memory_history_unavailable_fails_construction() {
        let library = FakeLibrary {
            no_memory: true,
            ..FakeLibrary::default()
        };
        let err = Router::new(Rc::new(library), "/", app(), [with_memory_history("/c2")])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::HistoryUnavailable { provider: "memory" }
        );
    }

    #[test]
    fn test_failing_option_stops_later_options() {
        let ran_second = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran_second);
        let result = Router::new(
            Rc::new(FakeLibrary::default()),
            "/",
            app(),
            [
                RouterOption::new(|_, _| Err(ConfigurationError::Option("nope".into()))),
                RouterOption::new(move |_, _| {
                    flag.set(true);
                    Ok(())
                }),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::Option("nope".into())
        );
        assert!(!ran_second.get());
    }

    #[test]
    fn test_node_is_cached() {
        let r = router(FakeLibrary::default());
        assert!(!r.is_materialized());

        let first = r.node();
        let second = r.node();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(r.is_materialized());
        assert_eq!(r.library().routers.get(), 1);
    }

    #[test]
    fn test_with_invalidates_cache() {
        let r = router(FakeLibrary::default());
        let before = r.node();

        let r2 = r.with(vec![ChildRoute::new("c1", main_slot("c1"))]);
        assert!(!r2.is_materialized());
        let after = r2.node();

        assert!(!Rc::ptr_eq(&before, &after));
        // receiver keeps its own cache
        assert!(Rc::ptr_eq(&before, &r.node()));
        assert!(r.root().children().is_empty());
        assert_eq!(r2.root().children().len(), 1);
    }

    #[test]
    fn test_node_shape() {
        let r = router(FakeLibrary::default()).with(vec![
            ChildRoute::index(main_slot("home")),
            ChildRoute::new("c1", main_slot("c1")),
        ]);
        assert_eq!(
            r.node().as_str(),
            "Router<hash>Route#root(Some(\"/\"):app)\
             [IndexRoute#0(None:home)[],Route#1(Some(\"c1\"):c1)[]]"
        );
    }

    #[test]
    fn test_try_node_reports_broken_router_factory() {
        let r = router(FakeLibrary {
            broken_router: true,
            ..FakeLibrary::default()
        });
        assert_eq!(
            r.try_node(),
            Err(PreconditionError::FactoryFailed { factory: "Router" })
        );
        assert!(!r.is_materialized());
    }

    #[test]
    #[should_panic(expected = "failed to create Router element")]
    fn test_node_panics_on_broken_router_factory() {
        let r = router(FakeLibrary {
            broken_router: true,
            ..FakeLibrary::default()
        });
        let _ = r.node();
    }

    #[test]
    fn test_router_is_a_component() {
        let r = router(FakeLibrary::default());
        let as_component: &dyn Component<Node = Rc<String>> = &r;
        assert!(Rc::ptr_eq(&as_component.node(), &r.node()));
    }

    #[test]
    fn test_validate_delegates_to_root() {
        let r = router(FakeLibrary::default()).with(vec![
            ChildRoute::index(main_slot("a")),
            ChildRoute::index(main_slot("b")),
        ]);
        assert!(matches!(
            r.validate(),
            Err(ConfigurationError::DuplicateIndexRoute { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_child_path() {
        let r = router(FakeLibrary::default()).with(vec![ChildRoute::new("", main_slot("a"))]);
        assert_eq!(
            r.validate(),
            Err(ConfigurationError::EmptyPath { parent: "/".into() })
        );
    }
}
