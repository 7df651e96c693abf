//! Runtime loader service contract
//!
//! Everything the introspector asks of the OpenXR loader goes through
//! [`Runtime`]: the production implementation is [`Loader`](crate::loader::Loader),
//! tests substitute a scripted one

use openxr_sys as sys;
use openxr_sys::pfn;

use std::error::Error;
use std::ffi::CStr;
use std::fmt;

/// Operations consumed from the runtime loader
///
/// Buffer-filling calls keep the raw two-call shape of the C API: the
/// capacity is the buffer length, the written count comes back through
/// `count`, and every output record must carry its structure tag before the
/// call
pub trait Runtime {
    #[doc = "See more <https://registry.khronos.org/OpenXR/specs/1.0/man/html/xrEnumerateApiLayerProperties.html>"]
    fn enumerate_api_layer_properties(
        &self,
        count: &mut u32,
        properties: &mut [sys::ApiLayerProperties],
    ) -> sys::Result;

    /// Instance extension enumeration with no layer filter
    #[doc = "See more <https://registry.khronos.org/OpenXR/specs/1.0/man/html/xrEnumerateInstanceExtensionProperties.html>"]
    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: &mut [sys::ExtensionProperties],
    ) -> sys::Result;

    fn create_instance(
        &self,
        create_info: &sys::InstanceCreateInfo,
        instance: &mut sys::Instance,
    ) -> sys::Result;

    /// Resolve a named entry point against a live instance
    ///
    /// A success code with `function` still unset means the name exists but
    /// the runtime offers no implementation
    fn get_instance_proc_addr(
        &self,
        instance: sys::Instance,
        name: &CStr,
        function: &mut Option<pfn::VoidFunction>,
    ) -> sys::Result;

    fn get_system(
        &self,
        instance: sys::Instance,
        get_info: &sys::SystemGetInfo,
        system: &mut sys::SystemId,
    ) -> sys::Result;

    fn get_system_properties(
        &self,
        instance: sys::Instance,
        system: sys::SystemId,
        properties: &mut sys::SystemProperties,
    ) -> sys::Result;

    fn destroy_instance(&self, instance: sys::Instance) -> sys::Result;

    /// Human-readable description of a result code
    ///
    /// Must always produce something printable, even for codes the runtime
    /// does not know
    fn result_to_string(&self, instance: sys::Instance, value: sys::Result) -> String;
}

/// A runtime call that came back with a non-success code
#[derive(Debug)]
pub struct CallError {
    i_op: &'static str,
    i_description: String,
}

impl CallError {
    pub(crate) fn new(op: &'static str, description: String) -> CallError {
        CallError {
            i_op: op,
            i_description: description,
        }
    }

    /// Name of the entry point that failed
    pub fn op(&self) -> &str {
        self.i_op
    }

    pub fn description(&self) -> &str {
        &self.i_description
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Call to '{}' failed: {}", self.i_op, self.i_description)
    }
}

impl Error for CallError {}

/// Turn a result code into `Ok` or a described [`CallError`]
///
/// Non-negative codes are successes: some of them carry information
/// (`XR_SESSION_LOSS_PENDING` and friends) but none of them invalidates the
/// call's output. Pass a null `instance` for calls made before negotiation
pub fn check<R: Runtime>(
    runtime: &R,
    op: &'static str,
    instance: sys::Instance,
    code: sys::Result,
) -> Result<(), CallError> {
    if code.into_raw() >= 0 {
        Ok(())
    } else {
        Err(CallError::new(op, runtime.result_to_string(instance, code)))
    }
}

/// Two-phase list retrieval: query the count, then fill exactly that many
/// tagged records
///
/// `template` is a correctly tagged empty record cloned into every slot
/// before the fill call. The runtime may legitimately write fewer records
/// than it first reported if its set shrank between the calls; the surplus
/// capacity is discarded and the shrink is logged
pub fn enumerate<R, T, F>(
    runtime: &R,
    op: &'static str,
    template: T,
    mut fill: F,
) -> Result<Vec<T>, CallError>
where
    R: Runtime,
    T: Copy,
    F: FnMut(&R, &mut u32, &mut [T]) -> sys::Result,
{
    let null_instance = sys::Instance::from_raw(0);

    let mut count: u32 = 0;
    check(runtime, op, null_instance, fill(runtime, &mut count, &mut []))?;

    let mut records: Vec<T> = vec![template; count as usize];

    let mut written: u32 = 0;
    check(
        runtime,
        op,
        null_instance,
        fill(runtime, &mut written, &mut records),
    )?;

    let written = written as usize;

    if written < records.len() {
        log::warn!(
            "{} reported {} entries but wrote {}",
            op,
            records.len(),
            written
        );
    }

    records.truncate(written);

    Ok(records)
}
