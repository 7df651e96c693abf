//! Instance extensions

use openxr_sys as sys;

use crate::runtime::{self, CallError, Runtime};
use crate::utils;

use std::ffi::CStr;
use std::fmt;
use std::ptr;

pub const OPENGL_ENABLE_EXT_NAME: &CStr = c"XR_KHR_opengl_enable";

pub const VULKAN_ENABLE_EXT_NAME: &CStr = c"XR_KHR_vulkan_enable";

/// One instance extension reported by the loader
#[derive(Debug, Clone)]
pub struct ExtensionDescription {
    i_name: String,
    i_version: u32,
}

impl ExtensionDescription {
    /// List every available instance extension, unfiltered, in loader order
    pub fn list<R: Runtime>(runtime: &R) -> Result<Vec<ExtensionDescription>, CallError> {
        let template = sys::ExtensionProperties {
            ty: sys::StructureType::EXTENSION_PROPERTIES,
            next: ptr::null_mut(),
            extension_name: [0; sys::MAX_EXTENSION_NAME_SIZE],
            extension_version: 0,
        };

        let records = runtime::enumerate(
            runtime,
            "xrEnumerateInstanceExtensionProperties",
            template,
            |rt, count, buffer| rt.enumerate_instance_extension_properties(count, buffer),
        )?;

        Ok(records.iter().map(ExtensionDescription::new).collect())
    }

    fn new(properties: &sys::ExtensionProperties) -> ExtensionDescription {
        ExtensionDescription {
            i_name: utils::strings::from_fixed(&properties.extension_name),
            i_version: properties.extension_version,
        }
    }

    pub fn name(&self) -> &str {
        &self.i_name
    }

    pub fn version(&self) -> u32 {
        self.i_version
    }
}

impl fmt::Display for ExtensionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {:<40} (v{})", self.i_name, self.i_version)
    }
}
