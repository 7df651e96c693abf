//! Negotiated session with the runtime

use openxr_sys as sys;

use crate::runtime::Runtime;
use crate::utils;

use std::error::Error;
use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;
use std::ptr;

/// Declared application identity and required capability set
///
/// Names longer than the fixed OpenXR fields are truncated, see
/// [`utils::strings::to_fixed`]
#[derive(Debug)]
pub struct InstanceType<'a> {
    pub application_name: &'a str,
    pub application_version: u32,
    pub engine_name: &'a str,
    pub engine_version: u32,
    pub extensions: &'a [&'static CStr],
}

impl<'a> Default for InstanceType<'a> {
    fn default() -> InstanceType<'a> {
        InstanceType {
            application_name: "xrinfo",
            application_version: 1,
            engine_name: "xrinfo",
            engine_version: 1,
            extensions: &[],
        }
    }
}

#[derive(Debug)]
pub enum InstanceError {
    Create,
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err_msg = match self {
            InstanceError::Create => {
                "Failed to create XrInstance (xrCreateInstance call failed)"
            }
        };

        write!(f, "{}", err_msg)
    }
}

impl Error for InstanceError {}

/// Live instance handle, released exactly once on drop
pub struct Instance<'a, R: Runtime> {
    i_runtime: &'a R,
    i_instance: sys::Instance,
}

impl<'a, R: Runtime> Instance<'a, R> {
    /// Negotiate an instance with every extension in `desc` enabled
    ///
    /// There is no fallback set: an extension the runtime does not support
    /// fails the whole negotiation
    pub fn new(runtime: &'a R, desc: &InstanceType) -> Result<Instance<'a, R>, InstanceError> {
        let mut app_info = sys::ApplicationInfo {
            application_name: [0; sys::MAX_APPLICATION_NAME_SIZE],
            application_version: desc.application_version,
            engine_name: [0; sys::MAX_ENGINE_NAME_SIZE],
            engine_version: desc.engine_version,
            api_version: sys::CURRENT_API_VERSION,
        };

        utils::strings::to_fixed(&mut app_info.application_name, desc.application_name);
        utils::strings::to_fixed(&mut app_info.engine_name, desc.engine_name);

        let extensions: Vec<*const c_char> =
            desc.extensions.iter().map(|name| name.as_ptr()).collect();

        let create_info = sys::InstanceCreateInfo {
            ty: sys::StructureType::INSTANCE_CREATE_INFO,
            next: ptr::null(),
            create_flags: sys::InstanceCreateFlags::EMPTY,
            application_info: app_info,
            enabled_api_layer_count: 0,
            enabled_api_layer_names: ptr::null(),
            enabled_extension_count: extensions.len() as u32,
            enabled_extension_names: if extensions.is_empty() {
                ptr::null()
            } else {
                extensions.as_ptr()
            },
        };

        let mut instance = sys::Instance::from_raw(0);

        let code = runtime.create_instance(&create_info, &mut instance);

        if code.into_raw() < 0 || instance.into_raw() == 0 {
            return Err(InstanceError::Create);
        }

        Ok(Instance {
            i_runtime: runtime,
            i_instance: instance,
        })
    }

    #[doc(hidden)]
    pub fn handle(&self) -> sys::Instance {
        self.i_instance
    }

    #[doc(hidden)]
    pub fn runtime(&self) -> &'a R {
        self.i_runtime
    }
}

impl<'a, R: Runtime> Drop for Instance<'a, R> {
    fn drop(&mut self) {
        let code = self.i_runtime.destroy_instance(self.i_instance);

        if code.into_raw() < 0 {
            log::error!("xrDestroyInstance failed: {:?}", code);
        }
    }
}
