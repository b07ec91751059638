//! Script handle: identifier caches, variable marshalling, and launch
//! dispatch against one compiled kernel set.
//!
//! A `Script` is the client-side face of a kernel set the engine has
//! already compiled. Generated call sites ask it for kernel/field
//! identifiers (created engine-side at most once per slot), set and read
//! exported variables, bind global buffers, and issue parallel launches.
//! Every operation validates the context — and any object arguments —
//! before the single synchronous engine call it maps to, so a failed
//! operation has no engine-visible effect.

use std::collections::HashMap;
use std::ops::BitOr;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::allocation::{Allocation, Element};
use crate::context::{CompatMode, ContextHandle};
use crate::error::{Error, Result};
use crate::handle::{ObjectCore, RawHandle};
use crate::launch::{InputIds, LaunchOptions, LaunchRequest};
use crate::pack::ArgPack;


/// Bitmask describing which optional launch parameters a kernel accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelSignature(u32);

impl KernelSignature {
    /// Kernel takes an input buffer element.
    pub const INPUT: KernelSignature = KernelSignature(1);
    /// Kernel produces an output buffer element.
    pub const OUTPUT: KernelSignature = KernelSignature(1 << 1);
    /// Kernel takes packed user data.
    pub const USER_DATA: KernelSignature = KernelSignature(1 << 2);
    /// Kernel takes the per-thread index.
    pub const THREAD_INDEX: KernelSignature = KernelSignature(1 << 3);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether every parameter in `what` is accepted.
    pub fn accepts(self, what: KernelSignature) -> bool {
        self.0 & what.0 == what.0
    }
}

impl BitOr for KernelSignature {
    type Output = KernelSignature;

    fn bitor(self, rhs: KernelSignature) -> KernelSignature {
        KernelSignature(self.0 | rhs.0)
    }
}

/// Identifier for a (script, kernel-slot) pair, used as an opaque token
/// in kernel-group composition. At most one exists per slot per script.
#[derive(Debug)]
pub struct KernelId {
    core: ObjectCore,
    script: RawHandle,
    slot: u32,
    signature: KernelSignature,
}

impl KernelId {
    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    /// Handle of the owning script.
    pub fn script(&self) -> RawHandle {
        self.script
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn signature(&self) -> KernelSignature {
        self.signature
    }
}

/// Identifier for a (script, field-slot) pair, used for linking exported
/// globals across kernel-group compositions. Same uniqueness and
/// lifecycle as [`KernelId`], in a separate slot namespace.
#[derive(Debug)]
pub struct FieldId {
    core: ObjectCore,
    script: RawHandle,
    slot: u32,
}

impl FieldId {
    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    pub fn script(&self) -> RawHandle {
        self.script
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }
}

/// One typed value for an exported variable. Replaces overload resolution
/// with an explicit tag; the marshaller dispatches on it.
#[derive(Clone, Copy, Debug)]
pub enum VarValue<'a> {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Encoded as the 32-bit integers 0/1.
    Bool(bool),
    /// Reference to an engine-backed object from the same context;
    /// `None` unbinds (handle 0).
    Object(Option<&'a ObjectCore>),
    /// Packed bytes for a structured value.
    Bytes(&'a ArgPack),
    /// Packed bytes plus element descriptor and ordered dimension sizes —
    /// the only path for structured (non-scalar) exported variables.
    BytesTyped {
        pack: &'a ArgPack,
        element: &'a Element,
        dims: &'a [u32],
    },
}

/// Client handle for one compiled kernel set.
pub struct Script {
    core: ObjectCore,
    context: ContextHandle,
    kernel_ids: HashMap<u32, Rc<KernelId>>,
    field_ids: HashMap<u32, Rc<FieldId>>,
}

impl Script {
    /// Wrap the handle of a kernel set the engine has already loaded.
    pub fn new(context: ContextHandle, handle: RawHandle) -> Self {
        let core = ObjectCore::new(handle, context.id());
        Self {
            core,
            context,
            kernel_ids: HashMap::new(),
            field_ids: HashMap::new(),
        }
    }

    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    pub fn context(&self) -> &ContextHandle {
        &self.context
    }

    /// Get or create the kernel identifier for `slot`.
    ///
    /// The slot is the sole cache key: on a hit the cached identifier is
    /// returned unchanged and `signature` and the element hints are
    /// ignored — first caller wins. On a miss exactly one creation
    /// request goes to the engine; a rejected creation caches nothing.
    pub fn kernel_id(
        &mut self,
        slot: u32,
        signature: KernelSignature,
        _input_hint: Option<&Element>,
        _output_hint: Option<&Element>,
    ) -> Result<Rc<KernelId>> {
        self.context.validate()?;
        if let Some(id) = self.kernel_ids.get(&slot) {
            return Ok(Rc::clone(id));
        }

        let handle = self
            .context
            .with_engine(|e| e.create_kernel_id(self.core.handle(), slot, signature.bits()));
        if handle.is_none() {
            return Err(Error::Driver("handle creation rejected by engine".into()));
        }

        debug!(slot, signature = signature.bits(), "kernel id created");
        let id = Rc::new(KernelId {
            core: ObjectCore::new(handle, self.context.id()),
            script: self.core.handle(),
            slot,
            signature,
        });
        self.kernel_ids.insert(slot, Rc::clone(&id));
        Ok(id)
    }

    /// Get or create the field identifier for `slot`. Fields live in
    /// their own slot namespace; the caching contract matches
    /// [`Script::kernel_id`].
    pub fn field_id(&mut self, slot: u32, _element_hint: Option<&Element>) -> Result<Rc<FieldId>> {
        self.context.validate()?;
        if let Some(id) = self.field_ids.get(&slot) {
            return Ok(Rc::clone(id));
        }

        let handle = self
            .context
            .with_engine(|e| e.create_field_id(self.core.handle(), slot));
        if handle.is_none() {
            return Err(Error::Driver("handle creation rejected by engine".into()));
        }

        debug!(slot, "field id created");
        let id = Rc::new(FieldId {
            core: ObjectCore::new(handle, self.context.id()),
            script: self.core.handle(),
            slot,
        });
        self.field_ids.insert(slot, Rc::clone(&id));
        Ok(id)
    }

    /// Fire a no-result procedure call into the kernel set at `slot`.
    pub fn invoke(&self, slot: u32) -> Result<()> {
        self.context.validate()?;
        trace!(slot, "invoke");
        self.context.with_engine(|e| e.invoke(self.core.handle(), slot));
        Ok(())
    }

    /// Fire a procedure call optionally carrying packed arguments.
    /// `None` is equivalent to the no-argument form.
    pub fn invoke_with_args(&self, slot: u32, args: Option<&ArgPack>) -> Result<()> {
        match args {
            Some(pack) => {
                self.context.validate()?;
                trace!(slot, len = pack.len(), "invoke with args");
                self.context
                    .with_engine(|e| e.invoke_with_args(self.core.handle(), slot, pack.bytes()));
                Ok(())
            }
            None => self.invoke(slot),
        }
    }

    /// Launch the kernel at `slot` across its iteration domain.
    ///
    /// Each input and the output must belong to this script's context;
    /// the first foreign one fails the whole call before anything reaches
    /// the engine. Input order is preserved exactly — it must match the
    /// kernel's declared parameter order. A missing `options` (or one
    /// with every dimension unclipped) launches over the full extent of
    /// the governing buffer.
    pub fn for_each(
        &self,
        slot: u32,
        inputs: &[&Allocation],
        output: Option<&Allocation>,
        args: Option<&ArgPack>,
        options: Option<&LaunchOptions>,
    ) -> Result<()> {
        self.context.validate()?;
        for input in inputs {
            self.context.validate_object(input.core())?;
        }
        if let Some(out) = output {
            self.context.validate_object(out.core())?;
        }

        let mut input_ids = InputIds::with_capacity(inputs.len());
        for input in inputs {
            input_ids.push(input.core().handle());
        }
        let output_id = output.map_or(RawHandle::NONE, |a| a.core().handle());

        let request = LaunchRequest::build(
            slot,
            input_ids,
            output_id,
            args.map(ArgPack::bytes),
            options,
        )?;
        trace!(
            slot,
            inputs = request.input_ids().len(),
            output = !request.output_id().is_none(),
            clipped = request.clip().is_some(),
            "for_each dispatch"
        );
        self.context
            .with_engine(|e| e.dispatch_for_each(self.core.handle(), &request));
        Ok(())
    }

    /// Single-input convenience form of [`Script::for_each`].
    pub fn for_each_one(
        &self,
        slot: u32,
        input: Option<&Allocation>,
        output: Option<&Allocation>,
        args: Option<&ArgPack>,
        options: Option<&LaunchOptions>,
    ) -> Result<()> {
        match input {
            Some(a) => self.for_each(slot, &[a], output, args, options),
            None => self.for_each(slot, &[], output, args, options),
        }
    }

    /// Rebind the global buffer reference at `slot`; `None` unbinds
    /// (sends handle 0). Under [`CompatMode::Legacy`] only simple 1-D,
    /// non-mipmapped, single-face buffers may be bound.
    pub fn bind_allocation(&self, allocation: Option<&Allocation>, slot: u32) -> Result<()> {
        self.context.validate()?;
        let id = match allocation {
            Some(a) => {
                self.context.validate_object(a.core())?;
                if self.context.compat() == CompatMode::Legacy && !a.shape().is_simple_1d() {
                    return Err(Error::InvalidArgument(
                        "legacy mode only allows simple 1D allocations to be bound".into(),
                    ));
                }
                a.core().handle()
            }
            None => RawHandle::NONE,
        };
        trace!(slot, allocation = id.0, "bind allocation");
        self.context
            .with_engine(|e| e.bind_allocation(self.core.handle(), id, slot));
        Ok(())
    }

    /// Set the exported variable at `index`.
    pub fn set_var(&self, index: u32, value: VarValue<'_>) -> Result<()> {
        self.context.validate()?;
        let script = self.core.handle();
        match value {
            VarValue::I32(v) => self.context.with_engine(|e| e.set_var_i32(script, index, v)),
            VarValue::I64(v) => self.context.with_engine(|e| e.set_var_i64(script, index, v)),
            VarValue::F32(v) => self.context.with_engine(|e| e.set_var_f32(script, index, v)),
            VarValue::F64(v) => self.context.with_engine(|e| e.set_var_f64(script, index, v)),
            VarValue::Bool(v) => self
                .context
                .with_engine(|e| e.set_var_i32(script, index, i32::from(v))),
            VarValue::Object(object) => {
                if let Some(core) = object {
                    self.context.validate_object(core)?;
                }
                let id = object.map_or(RawHandle::NONE, |core| core.handle());
                self.context.with_engine(|e| e.set_var_obj(script, index, id));
            }
            VarValue::Bytes(pack) => self
                .context
                .with_engine(|e| e.set_var_bytes(script, index, pack.bytes())),
            VarValue::BytesTyped { pack, element, dims } => {
                self.context.validate_object(element.core())?;
                self.context.with_engine(|e| {
                    e.set_var_bytes_typed(
                        script,
                        index,
                        pack.bytes(),
                        element.core().handle(),
                        dims,
                    )
                });
            }
        }
        Ok(())
    }

    pub fn get_var_i32(&self, index: u32) -> Result<i32> {
        self.context.validate()?;
        Ok(self
            .context
            .with_engine(|e| e.get_var_i32(self.core.handle(), index)))
    }

    pub fn get_var_i64(&self, index: u32) -> Result<i64> {
        self.context.validate()?;
        Ok(self
            .context
            .with_engine(|e| e.get_var_i64(self.core.handle(), index)))
    }

    pub fn get_var_f32(&self, index: u32) -> Result<f32> {
        self.context.validate()?;
        Ok(self
            .context
            .with_engine(|e| e.get_var_f32(self.core.handle(), index)))
    }

    pub fn get_var_f64(&self, index: u32) -> Result<f64> {
        self.context.validate()?;
        Ok(self
            .context
            .with_engine(|e| e.get_var_f64(self.core.handle(), index)))
    }

    /// Read a boolean variable. Any stored integer greater than 0 reads
    /// back as `true`; only the canonical 0/1 encodings round-trip.
    pub fn get_var_bool(&self, index: u32) -> Result<bool> {
        Ok(self.get_var_i32(index)? > 0)
    }

    /// Fill `out` in place with the packed bytes of the variable at
    /// `index`.
    pub fn get_var_bytes(&self, index: u32, out: &mut [u8]) -> Result<()> {
        self.context.validate()?;
        self.context
            .with_engine(|e| e.get_var_bytes(self.core.handle(), index, out));
        Ok(())
    }

    /// Forward a timezone name to the kernel set. The name is sent as its
    /// UTF-8 bytes, which a `&str` carries by construction.
    pub fn set_time_zone(&self, timezone: &str) -> Result<()> {
        self.context.validate()?;
        self.context
            .with_engine(|e| e.set_time_zone(self.core.handle(), timezone.as_bytes()));
        Ok(())
    }
}
