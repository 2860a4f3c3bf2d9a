//! Top-level facade crate for kindgate.
//!
//! Re-exports the core types and the plugin library so embedders can depend on a single crate.

pub mod core {
    pub use kindgate_core::*;
}

pub mod plugin {
    pub use kindgate_plugin::*;
}
