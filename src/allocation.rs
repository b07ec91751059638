//! Typed-buffer collaborator boundary.
//!
//! Allocations and element descriptors live in the engine; this crate
//! only reads their handles and governing shapes. Whatever owns the real
//! buffers constructs these views and keeps them alive for the duration
//! of a call — they are referenced by handle during the call and never
//! retained past its return.

use crate::handle::ObjectCore;

/// Governing shape of an allocation: extents per dimension plus whether
/// mip levels or multiple faces exist. A `y` or `z` of 0 means the
/// dimension is absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocationShape {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub has_mips: bool,
    pub has_faces: bool,
}

impl AllocationShape {
    /// Shape of a plain one-dimensional buffer.
    pub fn one_d(x: u32) -> Self {
        Self {
            x,
            ..Self::default()
        }
    }

    /// Whether this is a simple 1-D, non-mipmapped, single-face buffer —
    /// the only shape legacy-mode binding accepts.
    pub fn is_simple_1d(&self) -> bool {
        !self.has_mips && !self.has_faces && self.y == 0 && self.z == 0
    }
}

/// An element-type descriptor handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    core: ObjectCore,
}

impl Element {
    pub fn new(core: ObjectCore) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &ObjectCore {
        &self.core
    }
}

/// A typed multi-dimensional buffer, seen through its handle, shape, and
/// element type.
#[derive(Clone, Copy, Debug)]
pub struct Allocation {
    core: ObjectCore,
    shape: AllocationShape,
    element: Element,
}

impl Allocation {
    pub fn new(core: ObjectCore, shape: AllocationShape, element: Element) -> Self {
        Self {
            core,
            shape,
            element,
        }
    }

    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    pub fn shape(&self) -> &AllocationShape {
        &self.shape
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}
