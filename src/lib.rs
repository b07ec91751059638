//! gridlink — handle-based client for dispatching compiled parallel
//! compute kernels to an external execution engine.
//!
//! Application toolchains compile kernel sets ahead of time; at runtime,
//! generated call sites use this crate to name kernels and exported
//! fields, marshal typed arguments, and issue multi-dimensional
//! (optionally clipped) parallel launches. The engine itself — kernel
//! compilation, scheduling, execution — lives behind the [`Engine`]
//! trait: gridlink defines the trait, engine crates implement it.
//!
//! The pieces:
//! - [`Context`]: one engine connection; every object it creates is
//!   tagged with its identity, and foreign-context arguments are rejected
//!   before any engine call.
//! - [`Script`]: the handle for one compiled kernel set, owning
//!   at-most-one-per-slot caches of [`KernelId`] and [`FieldId`].
//! - [`ArgPack`]: packed-argument builder for kernel invocations and
//!   structured exported variables.
//! - [`LaunchOptions`] / [`LaunchRequest`]: 3-D clipping and the
//!   immutable launch value handed to the engine in one synchronous call.
//!
//! Every operation is a blocking round trip; the model is
//! single-threaded and callers needing concurrent access serialize
//! externally.

pub mod allocation;
pub mod context;
pub mod engine;
pub mod error;
pub mod handle;
pub mod launch;
pub mod pack;
pub mod script;

pub use allocation::{Allocation, AllocationShape, Element};
pub use context::{CompatMode, Context, ContextHandle};
pub use engine::Engine;
pub use error::{Error, Result};
pub use handle::{ContextId, ObjectCore, RawHandle};
pub use launch::{LaunchOptions, LaunchRequest};
pub use pack::ArgPack;
pub use script::{FieldId, KernelId, KernelSignature, Script, VarValue};
