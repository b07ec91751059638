//! Execution-context handle: engine access, validity, compatibility mode.
//!
//! A `Context` wraps one engine instance. Every engine-backed object
//! records the id of the context that created it, and every operation
//! validates the context (and any object arguments) before touching the
//! engine, so a failed call has no engine-visible effect.
//!
//! The model is deliberately single-threaded: operations are blocking
//! round trips and callers needing concurrent access must serialize
//! externally. `ContextHandle` is therefore an `Rc`, and the engine sits
//! behind a `RefCell` rather than a lock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::handle::{ContextId, ObjectCore};

/// Shared reference to a live context.
pub type ContextHandle = Rc<Context>;

/// Validation behavior for legacy kernel sets.
///
/// Passed explicitly at construction so the compatibility branch is
/// deterministic and testable, instead of probing the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompatMode {
    /// Older compatibility mode: binding is restricted to simple 1-D,
    /// non-mipmapped, single-face buffers.
    Legacy,
    /// Modern mode: no bind-shape restriction.
    Modern,
}

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// One execution context: owns the engine connection and the identity all
/// of its objects are tagged with.
pub struct Context {
    id: ContextId,
    engine: RefCell<Box<dyn Engine>>,
    valid: Cell<bool>,
    compat: CompatMode,
}

impl Context {
    /// Wrap an engine connection in a new context.
    pub fn new(engine: Box<dyn Engine>, compat: CompatMode) -> ContextHandle {
        let id = ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));
        debug!(context = id.0, ?compat, "context created");
        Rc::new(Context {
            id,
            engine: RefCell::new(engine),
            valid: Cell::new(true),
            compat,
        })
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn compat(&self) -> CompatMode {
        self.compat
    }

    /// Fail if this context has been torn down. Checked before every
    /// engine call that requires a live context.
    pub fn validate(&self) -> Result<()> {
        if !self.valid.get() {
            return Err(Error::Validation("context has been torn down".into()));
        }
        Ok(())
    }

    /// Fail if `object` was created by a different context.
    pub fn validate_object(&self, object: &ObjectCore) -> Result<()> {
        if object.context() != self.id {
            return Err(Error::Validation(
                "object belongs to a different execution context".into(),
            ));
        }
        Ok(())
    }

    /// Mark the context invalid. Subsequent operations fail validation
    /// before reaching the engine.
    pub fn tear_down(&self) {
        debug!(context = self.id.0, "context torn down");
        self.valid.set(false);
    }

    /// Run one synchronous engine call.
    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&mut dyn Engine) -> R) -> R {
        let mut engine = self.engine.borrow_mut();
        f(engine.as_mut())
    }
}
