//! Launch geometry: clipping options and the immutable launch request.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::handle::RawHandle;

/// Clipping for a kernel launch: one `[start, end)` range per dimension.
///
/// A dimension whose `end` is 0 is not clipped and the launch covers its
/// full declared extent; the engine ignores that dimension's `start`.
/// The default value leaves all three dimensions unclipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    xstart: u32,
    xend: u32,
    ystart: u32,
    yend: u32,
    zstart: u32,
    zend: u32,
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the X range. `end` must be greater than `start`; on failure the
    /// prior state is unchanged.
    pub fn set_x(&mut self, start: u32, end: u32) -> Result<&mut Self> {
        if end <= start {
            return Err(Error::InvalidArgument(
                "invalid X range: end must be greater than start".into(),
            ));
        }
        self.xstart = start;
        self.xend = end;
        Ok(self)
    }

    /// Set the Y range. `end` must be greater than `start`; on failure the
    /// prior state is unchanged.
    pub fn set_y(&mut self, start: u32, end: u32) -> Result<&mut Self> {
        if end <= start {
            return Err(Error::InvalidArgument(
                "invalid Y range: end must be greater than start".into(),
            ));
        }
        self.ystart = start;
        self.yend = end;
        Ok(self)
    }

    /// Set the Z range. `end` must be greater than `start`; on failure the
    /// prior state is unchanged.
    pub fn set_z(&mut self, start: u32, end: u32) -> Result<&mut Self> {
        if end <= start {
            return Err(Error::InvalidArgument(
                "invalid Z range: end must be greater than start".into(),
            ));
        }
        self.zstart = start;
        self.zend = end;
        Ok(self)
    }

    pub fn x_start(&self) -> u32 {
        self.xstart
    }

    pub fn x_end(&self) -> u32 {
        self.xend
    }

    pub fn y_start(&self) -> u32 {
        self.ystart
    }

    pub fn y_end(&self) -> u32 {
        self.yend
    }

    pub fn z_start(&self) -> u32 {
        self.zstart
    }

    pub fn z_end(&self) -> u32 {
        self.zend
    }

    /// The six-integer clip vector `[x0, x1, y0, y1, z0, z1]`, or `None`
    /// when every dimension is unclipped (full-extent dispatch).
    ///
    /// Only the `end` values decide whether a dimension is clipped; a
    /// dimension with `end` 0 contributes its stored pair untouched and
    /// the engine treats it as full extent.
    pub fn to_clip_vector(&self) -> Option<[u32; 6]> {
        if self.xend == 0 && self.yend == 0 && self.zend == 0 {
            return None;
        }
        Some([
            self.xstart,
            self.xend,
            self.ystart,
            self.yend,
            self.zstart,
            self.zend,
        ])
    }
}

/// Ordered input handles; one inline slot keeps the common single-input
/// launch off the heap.
pub type InputIds = SmallVec<[RawHandle; 1]>;

/// One fully-assembled parallel launch, handed to the engine in a single
/// synchronous call. Immutable once built.
#[derive(Clone, Debug)]
pub struct LaunchRequest {
    slot: u32,
    input_ids: InputIds,
    output_id: RawHandle,
    args: Option<Vec<u8>>,
    clip: Option<[u32; 6]>,
}

impl LaunchRequest {
    /// Assemble a request. Fails when neither inputs nor an output are
    /// supplied. Input order is preserved exactly: it must match the
    /// kernel's declared parameter order.
    pub(crate) fn build(
        slot: u32,
        input_ids: InputIds,
        output_id: RawHandle,
        args: Option<&[u8]>,
        options: Option<&LaunchOptions>,
    ) -> Result<Self> {
        if input_ids.is_empty() && output_id.is_none() {
            return Err(Error::InvalidArgument(
                "at least one of input or output is required".into(),
            ));
        }
        Ok(Self {
            slot,
            input_ids,
            output_id,
            args: args.map(<[u8]>::to_vec),
            clip: options.and_then(LaunchOptions::to_clip_vector),
        })
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn input_ids(&self) -> &[RawHandle] {
        &self.input_ids
    }

    /// Output handle, or [`RawHandle::NONE`] when the launch has no output.
    pub fn output_id(&self) -> RawHandle {
        self.output_id
    }

    pub fn args(&self) -> Option<&[u8]> {
        self.args.as_deref()
    }

    pub fn clip(&self) -> Option<[u32; 6]> {
        self.clip
    }
}
