//! grouter-crust — react-router bindings for grouter via `wasm-bindgen`.
//!
//! Route trees are plain JS objects built with the `Route` factories. The
//! tree is converted and validated in Rust, then materialized through the
//! page's `React` and `ReactRouter` globals.
//!
//! ```ts
//! const router = new Router("/", App, memoryHistory("/c2")).with([
//!   Route.index({ main: C1 }),
//!   Route.path("c1", { main: C1 }),
//!   Route.path("c2", { main: C2, sub: C2Sub }),
//! ]);
//! ReactDOM.render(router.node(), root);
//! ```

mod convert;
mod library;
mod router;

use wasm_bindgen::prelude::*;

/// Install console logging and the panic hook. Runs once when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_wasm::WASMLayerConfigBuilder;

    let mut builder = WASMLayerConfigBuilder::new();
    builder.set_max_level(if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    });
    // Fails only when the host page installed a subscriber first; keep theirs.
    if tracing_subscriber::registry()
        .with(tracing_wasm::WASMLayer::new(builder.build()))
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}
