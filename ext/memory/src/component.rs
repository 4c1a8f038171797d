//! Named test components.

use std::cell::Cell;
use std::rc::Rc;

use grouter::{Component, ComponentRef};

/// Render handle of a [`TestComponent`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentNode {
    /// Component name.
    pub name: String,
    /// Set by the library's `with_router` decoration.
    pub decorated: bool,
}

impl ComponentNode {
    /// An undecorated handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decorated: false,
        }
    }
}

/// A component identified by name that counts how often it was asked for its handle.
#[derive(Debug)]
pub struct TestComponent {
    name: String,
    calls: Cell<usize>,
}

impl TestComponent {
    /// Create a component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Cell::new(0),
        }
    }

    /// Create a component behind an `Rc`, keeping access to its call counter.
    pub fn counted(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self::new(name))
    }

    /// Create a component as a type-erased reference, ready for a route tree.
    pub fn shared(name: impl Into<String>) -> ComponentRef<ComponentNode> {
        Rc::new(Self::new(name))
    }

    /// The component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many times [`Component::node`] was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Component for TestComponent {
    type Node = ComponentNode;

    fn node(&self) -> ComponentNode {
        self.calls.set(self.calls.get() + 1);
        ComponentNode::new(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_counts_calls() {
        let c = TestComponent::counted("c1");
        assert_eq!(c.calls(), 0);
        assert_eq!(c.node(), ComponentNode::new("c1"));
        assert_eq!(c.node().name, "c1");
        assert_eq!(c.calls(), 2);
    }

    #[test]
    fn test_shared_is_component_ref() {
        let c = TestComponent::shared("app");
        assert!(!c.node().decorated);
    }
}
