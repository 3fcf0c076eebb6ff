//! GrubDash application library
//!
//! Dishes and orders resource modules, their in-memory stores, and the
//! bootstrap that wires both into a [`ModuleRegistry`](grubdash_kernel::ModuleRegistry).

#![recursion_limit = "256"]

pub mod modules;
pub mod store;
pub mod utils;

pub use modules::register_all;
