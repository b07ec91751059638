//! Raw engine handles and the owned-resource core shared by every
//! engine-backed object.
//!
//! The engine identifies every resource by an opaque 64-bit handle; 0 is
//! the universal none/failure sentinel on creation calls. Each object this
//! crate hands out pairs its handle with the identity of the execution
//! context that created it, so foreign-context arguments can be rejected
//! before any engine call.

/// An opaque engine-side resource handle. 0 means none/failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawHandle(pub u64);

impl RawHandle {
    /// The none/failure sentinel.
    pub const NONE: RawHandle = RawHandle(0);

    /// Whether this is the none/failure sentinel.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Identity of one execution context. Two contexts never share an id
/// within a process, so comparing ids detects foreign-context objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextId(pub u64);

/// Handle plus owning-context identity, embedded by composition in every
/// engine-backed object (`Script`, `KernelId`, `FieldId`, `Allocation`,
/// `Element`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectCore {
    handle: RawHandle,
    context: ContextId,
}

impl ObjectCore {
    pub fn new(handle: RawHandle, context: ContextId) -> Self {
        Self { handle, context }
    }

    /// The engine-side handle.
    #[inline]
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// Identity of the context that created this object.
    #[inline]
    pub fn context(&self) -> ContextId {
        self.context
    }
}
