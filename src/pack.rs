//! Packed-argument builder.
//!
//! Kernel invocations and structured exported variables take their
//! arguments as one opaque byte sequence laid out to match the kernel's
//! declared parameter struct. `ArgPack` is the append-only builder for
//! that sequence: plain-old-data values go in via bytemuck in the
//! engine's native byte order, and `align_to` inserts the zero padding a
//! struct layout requires.

use bytemuck::NoUninit;

/// Append-only builder for packed kernel arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgPack {
    data: Vec<u8>,
}

impl ArgPack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any plain-old-data value, including `#[repr(C)]` structs
    /// deriving [`bytemuck::NoUninit`].
    pub fn push<T: NoUninit>(&mut self, value: &T) -> &mut Self {
        self.data.extend_from_slice(bytemuck::bytes_of(value));
        self
    }

    pub fn push_i32(&mut self, value: i32) -> &mut Self {
        self.push(&value)
    }

    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.push(&value)
    }

    pub fn push_i64(&mut self, value: i64) -> &mut Self {
        self.push(&value)
    }

    pub fn push_u64(&mut self, value: u64) -> &mut Self {
        self.push(&value)
    }

    pub fn push_f32(&mut self, value: f32) -> &mut Self {
        self.push(&value)
    }

    pub fn push_f64(&mut self, value: f64) -> &mut Self {
        self.push(&value)
    }

    /// Append raw bytes verbatim.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Zero-pad until the current length is a multiple of `align`.
    /// `align` must be a power of two.
    pub fn align_to(&mut self, align: usize) -> &mut Self {
        debug_assert!(align.is_power_of_two());
        let rem = self.data.len() % align;
        if rem != 0 {
            self.data.resize(self.data.len() + align - rem, 0);
        }
        self
    }

    /// The finished byte sequence.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
