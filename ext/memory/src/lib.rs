//! grouter-memory: an in-memory router library
//!
//! A deterministic stand-in for react-router. Elements are plain Rust values,
//! histories never touch an address bar, and a shallow renderer resolves the
//! current location against the materialized route elements. This is the
//! reference implementation of [`RouterLibrary`](grouter::RouterLibrary) and
//! the test domain for the adapter.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use grouter::prelude::*;
//! use grouter_memory::prelude::*;
//!
//! let library = Rc::new(MemoryLibrary::new());
//! let app = decorate(&library, TestComponent::shared("app"));
//! let c2 = TestComponent::shared("c2");
//!
//! let router = Router::new(library.clone(), "/", app, [with_memory_history("/c2")])
//!     .unwrap()
//!     .with(vec![ChildRoute::new("c2", Components::new().with("main", c2))]);
//!
//! let rendered = shallow_render(&router.node()).unwrap();
//! assert_eq!(rendered.location().pathname, "/c2");
//! assert!(is_active(&rendered.props(), "/c2"));
//! ```

mod component;
mod element;
mod history;
mod library;
mod props;
mod render;

#[cfg(feature = "fixtures")]
pub mod fixture;

pub use component::{ComponentNode, TestComponent};
pub use element::{Element, ElementRef};
pub use history::{History, HistoryKind, Location};
pub use library::{FactoryCalls, MemoryLibrary};
pub use props::{MemoryContext, MemoryProps};
pub use render::{shallow_render, RenderError, RenderedRouter};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        shallow_render, ComponentNode, Element, ElementRef, History, Location, MemoryLibrary,
        MemoryProps, RenderedRouter, TestComponent,
    };
}
