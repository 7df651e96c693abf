//! Graphics backend requirements
//!
//! The min/max graphics-API version query lives behind a KHR extension, so
//! its entry point has to be resolved by name before it can be called.
//! [`RequirementsFn`] only exists after a successful resolve, which keeps a
//! call-before-resolve out of the type system entirely

use openxr_sys as sys;
use openxr_sys::pfn;

use crate::instance::Instance;
use crate::on_option;
use crate::runtime::{self, CallError, Runtime};
use crate::system::SystemDescription;
use crate::{extensions, utils};

use std::ffi::CStr;
use std::fmt;
use std::mem;
use std::ptr;

/// Graphics API a report can be asked to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenGL,
    Vulkan,
}

impl Backend {
    /// Instance extension that has to be enabled for this backend
    pub fn enable_extension(self) -> &'static CStr {
        match self {
            Backend::OpenGL => extensions::OPENGL_ENABLE_EXT_NAME,
            Backend::Vulkan => extensions::VULKAN_ENABLE_EXT_NAME,
        }
    }

    /// Name of the extension entry point answering the requirements query
    pub fn requirements_fn(self) -> &'static CStr {
        match self {
            Backend::OpenGL => c"xrGetOpenGLGraphicsRequirementsKHR",
            Backend::Vulkan => c"xrGetVulkanGraphicsRequirementsKHR",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Backend::OpenGL => "OpenGL",
                Backend::Vulkan => "Vulkan",
            }
        )
    }
}

/// Resolved requirements entry point, bound to a live instance
pub struct RequirementsFn<'a, R: Runtime> {
    i_instance: &'a Instance<'a, R>,
    i_function: pfn::VoidFunction,
    i_backend: Backend,
}

impl<'a, R: Runtime> RequirementsFn<'a, R> {
    /// Look up the backend's entry point against the negotiated instance
    ///
    /// Resolution can only happen after negotiation; a runtime that accepts
    /// the lookup but hands back no implementation is a failure too
    pub fn resolve(
        instance: &'a Instance<'a, R>,
        backend: Backend,
    ) -> Result<RequirementsFn<'a, R>, CallError> {
        let runtime = instance.runtime();
        let name = backend.requirements_fn();

        let mut function: Option<pfn::VoidFunction> = None;

        let code = runtime.get_instance_proc_addr(instance.handle(), name, &mut function);
        runtime::check(runtime, "xrGetInstanceProcAddr", instance.handle(), code)?;

        let function = on_option!(
            function,
            return Err(CallError::new(
                "xrGetInstanceProcAddr",
                format!("no implementation for '{}'", name.to_string_lossy()),
            ))
        );

        Ok(RequirementsFn {
            i_instance: instance,
            i_function: function,
            i_backend: backend,
        })
    }

    /// Fetch the accepted graphics-API version bounds for `system`
    pub fn query(&self, system: &SystemDescription) -> Result<Requirements, CallError> {
        let instance = self.i_instance.handle();
        let runtime = self.i_instance.runtime();

        let (min, max) = match self.i_backend {
            Backend::OpenGL => {
                let mut requirements = sys::GraphicsRequirementsOpenGLKHR {
                    ty: sys::StructureType::GRAPHICS_REQUIREMENTS_OPENGL_KHR,
                    next: ptr::null_mut(),
                    min_api_version_supported: sys::Version::new(0, 0, 0),
                    max_api_version_supported: sys::Version::new(0, 0, 0),
                };

                let function: pfn::GetOpenGLGraphicsRequirementsKHR =
                    unsafe { mem::transmute(self.i_function) };

                let code = unsafe { function(instance, system.system_id(), &mut requirements) };
                runtime::check(runtime, "xrGetOpenGLGraphicsRequirementsKHR", instance, code)?;

                (
                    requirements.min_api_version_supported,
                    requirements.max_api_version_supported,
                )
            }
            Backend::Vulkan => {
                let mut requirements = sys::GraphicsRequirementsVulkanKHR {
                    ty: sys::StructureType::GRAPHICS_REQUIREMENTS_VULKAN_KHR,
                    next: ptr::null_mut(),
                    min_api_version_supported: sys::Version::new(0, 0, 0),
                    max_api_version_supported: sys::Version::new(0, 0, 0),
                };

                let function: pfn::GetVulkanGraphicsRequirementsKHR =
                    unsafe { mem::transmute(self.i_function) };

                let code = unsafe { function(instance, system.system_id(), &mut requirements) };
                runtime::check(runtime, "xrGetVulkanGraphicsRequirementsKHR", instance, code)?;

                (
                    requirements.min_api_version_supported,
                    requirements.max_api_version_supported,
                )
            }
        };

        Ok(Requirements {
            i_backend: self.i_backend,
            i_min: min,
            i_max: max,
        })
    }
}

/// Accepted graphics-API version bounds for one backend
#[derive(Debug, Clone, Copy)]
pub struct Requirements {
    i_backend: Backend,
    i_min: sys::Version,
    i_max: sys::Version,
}

impl Requirements {
    pub fn backend(&self) -> Backend {
        self.i_backend
    }

    pub fn min_version(&self) -> sys::Version {
        self.i_min
    }

    pub fn max_version(&self) -> sys::Version {
        self.i_max
    }
}

impl fmt::Display for Requirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  Min {} version: {}",
            self.i_backend,
            utils::version::short(self.i_min)
        )?;
        writeln!(
            f,
            "  Max {} version: {}",
            self.i_backend,
            utils::version::short(self.i_max)
        )
    }
}
