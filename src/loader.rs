//! Dynamic loading of the installed OpenXR runtime loader

use openxr_sys as sys;
use openxr_sys::pfn;

use libloading::Library;

use crate::runtime::Runtime;
use crate::utils;
use crate::{on_error_ret, on_option};

use std::error::Error;
use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;
use std::ptr;

#[cfg(target_os = "windows")]
const LOADER_NAMES: &[&str] = &["openxr_loader.dll"];

#[cfg(target_os = "macos")]
const LOADER_NAMES: &[&str] = &["libopenxr_loader.dylib", "libopenxr_loader.1.dylib"];

#[cfg(all(unix, not(target_os = "macos")))]
const LOADER_NAMES: &[&str] = &["libopenxr_loader.so.1", "libopenxr_loader.so"];

#[derive(Debug)]
pub enum LoaderError {
    LibraryLoad,
    Symbol(&'static str),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::LibraryLoad => {
                write!(f, "Failed to load the OpenXR loader library")
            }
            LoaderError::Symbol(name) => {
                write!(f, "Failed to resolve loader entry point '{}'", name)
            }
        }
    }
}

impl Error for LoaderError {}

/// Entry points of the installed loader
///
/// The core entry points are exported by the loader library itself, so they
/// are resolved once at load time; only extension functions go through
/// `xrGetInstanceProcAddr` later
pub struct Loader {
    i_enumerate_api_layer_properties: pfn::EnumerateApiLayerProperties,
    i_enumerate_instance_extension_properties: pfn::EnumerateInstanceExtensionProperties,
    i_create_instance: pfn::CreateInstance,
    i_destroy_instance: pfn::DestroyInstance,
    i_get_instance_proc_addr: pfn::GetInstanceProcAddr,
    i_get_system: pfn::GetSystem,
    i_get_system_properties: pfn::GetSystemProperties,
    i_result_to_string: pfn::ResultToString,
    // resolved entry points stay valid only while the library is mapped
    _library: Library,
}

impl Loader {
    pub fn load() -> Result<Loader, LoaderError> {
        let library = on_option!(
            LOADER_NAMES
                .iter()
                .find_map(|name| unsafe { Library::new(name) }.ok()),
            return Err(LoaderError::LibraryLoad)
        );

        Ok(Loader {
            i_enumerate_api_layer_properties: Self::symbol(
                &library,
                "xrEnumerateApiLayerProperties",
            )?,
            i_enumerate_instance_extension_properties: Self::symbol(
                &library,
                "xrEnumerateInstanceExtensionProperties",
            )?,
            i_create_instance: Self::symbol(&library, "xrCreateInstance")?,
            i_destroy_instance: Self::symbol(&library, "xrDestroyInstance")?,
            i_get_instance_proc_addr: Self::symbol(&library, "xrGetInstanceProcAddr")?,
            i_get_system: Self::symbol(&library, "xrGetSystem")?,
            i_get_system_properties: Self::symbol(&library, "xrGetSystemProperties")?,
            i_result_to_string: Self::symbol(&library, "xrResultToString")?,
            _library: library,
        })
    }

    fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, LoaderError> {
        let symbol = on_error_ret!(
            unsafe { library.get::<T>(name.as_bytes()) },
            LoaderError::Symbol(name)
        );

        Ok(*symbol)
    }
}

impl Runtime for Loader {
    fn enumerate_api_layer_properties(
        &self,
        count: &mut u32,
        properties: &mut [sys::ApiLayerProperties],
    ) -> sys::Result {
        let buffer = if properties.is_empty() {
            ptr::null_mut()
        } else {
            properties.as_mut_ptr()
        };

        unsafe { (self.i_enumerate_api_layer_properties)(properties.len() as u32, count, buffer) }
    }

    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: &mut [sys::ExtensionProperties],
    ) -> sys::Result {
        let buffer = if properties.is_empty() {
            ptr::null_mut()
        } else {
            properties.as_mut_ptr()
        };

        unsafe {
            (self.i_enumerate_instance_extension_properties)(
                ptr::null(),
                properties.len() as u32,
                count,
                buffer,
            )
        }
    }

    fn create_instance(
        &self,
        create_info: &sys::InstanceCreateInfo,
        instance: &mut sys::Instance,
    ) -> sys::Result {
        unsafe { (self.i_create_instance)(create_info, instance) }
    }

    fn get_instance_proc_addr(
        &self,
        instance: sys::Instance,
        name: &CStr,
        function: &mut Option<pfn::VoidFunction>,
    ) -> sys::Result {
        unsafe { (self.i_get_instance_proc_addr)(instance, name.as_ptr(), function) }
    }

    fn get_system(
        &self,
        instance: sys::Instance,
        get_info: &sys::SystemGetInfo,
        system: &mut sys::SystemId,
    ) -> sys::Result {
        unsafe { (self.i_get_system)(instance, get_info, system) }
    }

    fn get_system_properties(
        &self,
        instance: sys::Instance,
        system: sys::SystemId,
        properties: &mut sys::SystemProperties,
    ) -> sys::Result {
        unsafe { (self.i_get_system_properties)(instance, system, properties) }
    }

    fn destroy_instance(&self, instance: sys::Instance) -> sys::Result {
        unsafe { (self.i_destroy_instance)(instance) }
    }

    fn result_to_string(&self, instance: sys::Instance, value: sys::Result) -> String {
        let mut buffer = [0 as c_char; sys::MAX_RESULT_STRING_SIZE];

        let code = unsafe { (self.i_result_to_string)(instance, value, buffer.as_mut_ptr()) };

        if code.into_raw() >= 0 {
            utils::strings::from_fixed(&buffer)
        } else {
            format!("{:?}", value)
        }
    }
}
