//! Component props carrying the in-memory routing context.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use grouter::{ComponentProps, RouterFn, RoutingContext, IS_ACTIVE_FN};

use crate::History;

type SharedFn = Rc<dyn Fn(&str) -> bool>;

/// The routing context handed to decorated components.
#[derive(Clone, Default)]
pub struct MemoryContext {
    functions: BTreeMap<String, SharedFn>,
}

impl MemoryContext {
    /// A context without any functions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose `isActive` answers for the live location of `history`.
    #[must_use]
    pub fn for_history(history: &History) -> Self {
        let history = history.clone();
        Self::new().with_function(IS_ACTIVE_FN, move |path: &str| {
            path_is_active(&history.location().pathname, path)
        })
    }

    /// Add or replace a function.
    #[must_use]
    pub fn with_function<F>(mut self, name: &str, function: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.functions.insert(name.to_owned(), Rc::new(function));
        self
    }

    /// Names of the functions in this context.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl RoutingContext for MemoryContext {
    fn function(&self, name: &str) -> Option<RouterFn> {
        let function = Rc::clone(self.functions.get(name)?);
        Some(Box::new(move |arg: &str| Ok(function(arg))))
    }
}

impl fmt::Debug for MemoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Props of a rendered component. `router` is set only for decorated components.
#[derive(Debug, Clone, Default)]
pub struct MemoryProps {
    /// The injected routing context.
    pub router: Option<MemoryContext>,
}

impl MemoryProps {
    /// Props of an undecorated component.
    #[must_use]
    pub fn undecorated() -> Self {
        Self::default()
    }

    /// Props carrying `context`.
    #[must_use]
    pub fn decorated(context: MemoryContext) -> Self {
        Self {
            router: Some(context),
        }
    }
}

impl ComponentProps for MemoryProps {
    type Context = MemoryContext;

    fn routing_context(&self) -> Option<MemoryContext> {
        self.router.clone()
    }
}

/// Whether `path` is active while `current` is shown.
///
/// A path is active when it equals the current pathname or is one of its
/// ancestors. `/` is therefore always active.
pub(crate) fn path_is_active(current: &str, path: &str) -> bool {
    let current = segments(current);
    let path = segments(path);
    path.len() <= current.len() && path.iter().zip(&current).all(|(p, c)| p == c)
}

pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
