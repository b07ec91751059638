//! The execution-engine seam.
//!
//! gridlink defines this trait; engine crates implement it. An engine is
//! the native runtime that compiled a kernel set and owns every handle a
//! script references — this crate only marshals arguments and launch
//! geometry into the primitive calls below.
//!
//! Every method is a synchronous round trip: it either returns or the
//! engine has observed the full effect. Creation calls signal rejection by
//! returning the 0 handle; the remaining primitives are fire-and-forget,
//! so every typed error in [`crate::Error`] originates in this crate's own
//! validation, never here.

use crate::handle::RawHandle;
use crate::launch::LaunchRequest;

/// Primitive operations of the external execution engine.
///
/// Methods take `&mut self`: the owning [`crate::Context`] is the sole
/// synchronization point, and calls issued sequentially from one thread
/// reach the engine in that order.
pub trait Engine {
    /// Create a kernel identifier for `(script, slot)`. Returns
    /// [`RawHandle::NONE`] if the engine rejects the request.
    fn create_kernel_id(&mut self, script: RawHandle, slot: u32, signature: u32) -> RawHandle;

    /// Create a field identifier for `(script, slot)`. Returns
    /// [`RawHandle::NONE`] if the engine rejects the request.
    fn create_field_id(&mut self, script: RawHandle, slot: u32) -> RawHandle;

    /// Fire a no-result procedure call into the kernel set.
    fn invoke(&mut self, script: RawHandle, slot: u32);

    /// Fire a no-result procedure call carrying packed byte arguments.
    fn invoke_with_args(&mut self, script: RawHandle, slot: u32, args: &[u8]);

    /// Execute one parallel launch described by `request`.
    fn dispatch_for_each(&mut self, script: RawHandle, request: &LaunchRequest);

    /// Rebind the global buffer reference at `slot`. `allocation` 0 unbinds.
    fn bind_allocation(&mut self, script: RawHandle, allocation: RawHandle, slot: u32);

    fn set_var_i32(&mut self, script: RawHandle, index: u32, value: i32);
    fn set_var_i64(&mut self, script: RawHandle, index: u32, value: i64);
    fn set_var_f32(&mut self, script: RawHandle, index: u32, value: f32);
    fn set_var_f64(&mut self, script: RawHandle, index: u32, value: f64);

    /// Set an object-reference variable. `object` 0 unbinds.
    fn set_var_obj(&mut self, script: RawHandle, index: u32, object: RawHandle);

    /// Set a packed-bytes variable.
    fn set_var_bytes(&mut self, script: RawHandle, index: u32, data: &[u8]);

    /// Set a structured variable: packed bytes plus element descriptor and
    /// ordered dimension sizes.
    fn set_var_bytes_typed(
        &mut self,
        script: RawHandle,
        index: u32,
        data: &[u8],
        element: RawHandle,
        dims: &[u32],
    );

    fn get_var_i32(&mut self, script: RawHandle, index: u32) -> i32;
    fn get_var_i64(&mut self, script: RawHandle, index: u32) -> i64;
    fn get_var_f32(&mut self, script: RawHandle, index: u32) -> f32;
    fn get_var_f64(&mut self, script: RawHandle, index: u32) -> f64;

    /// Fill `out` in place with the packed bytes of the variable at `index`.
    fn get_var_bytes(&mut self, script: RawHandle, index: u32, out: &mut [u8]);

    /// Forward a UTF-8 timezone name to the kernel set.
    fn set_time_zone(&mut self, script: RawHandle, timezone: &[u8]);
}
