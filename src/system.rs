//! System discovery for a requested form factor

use openxr_sys as sys;

use crate::instance::Instance;
use crate::runtime::{self, CallError, Runtime};
use crate::utils;

use std::error::Error;
use std::fmt;
use std::ptr;

#[derive(Debug)]
pub enum SystemError {
    Call(CallError),
    NoSystem,
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::Call(err) => write!(f, "{}", err),
            SystemError::NoSystem => write!(
                f,
                "No system matching the requested form factor (xrGetSystem returned XR_NULL_SYSTEM_ID)"
            ),
        }
    }
}

impl Error for SystemError {}

impl From<CallError> for SystemError {
    fn from(err: CallError) -> SystemError {
        SystemError::Call(err)
    }
}

/// Static capability snapshot of one discovered system
///
/// Fetched once with a tagged-buffer query and never refreshed
pub struct SystemDescription {
    i_system: sys::SystemId,
    i_name: String,
    i_vendor_id: u32,
    i_max_swapchain_width: u32,
    i_max_swapchain_height: u32,
    i_max_layer_count: u32,
    i_orientation_tracking: bool,
    i_position_tracking: bool,
}

impl SystemDescription {
    /// Resolve the system for `form_factor` and fetch its properties
    ///
    /// A null system id means no matching hardware is connected; nothing
    /// later in the sequence can run without one, so it is an error here
    pub fn new<R: Runtime>(
        instance: &Instance<'_, R>,
        form_factor: sys::FormFactor,
    ) -> Result<SystemDescription, SystemError> {
        let runtime = instance.runtime();

        let get_info = sys::SystemGetInfo {
            ty: sys::StructureType::SYSTEM_GET_INFO,
            next: ptr::null(),
            form_factor,
        };

        let mut system = sys::SystemId::from_raw(0);

        let code = runtime.get_system(instance.handle(), &get_info, &mut system);
        runtime::check(runtime, "xrGetSystem", instance.handle(), code)?;

        if system.into_raw() == 0 {
            return Err(SystemError::NoSystem);
        }

        let mut properties = sys::SystemProperties {
            ty: sys::StructureType::SYSTEM_PROPERTIES,
            next: ptr::null_mut(),
            system_id: sys::SystemId::from_raw(0),
            vendor_id: 0,
            system_name: [0; sys::MAX_SYSTEM_NAME_SIZE],
            graphics_properties: sys::SystemGraphicsProperties {
                max_swapchain_image_height: 0,
                max_swapchain_image_width: 0,
                max_layer_count: 0,
            },
            tracking_properties: sys::SystemTrackingProperties {
                orientation_tracking: sys::Bool32::from(false),
                position_tracking: sys::Bool32::from(false),
            },
        };

        let code = runtime.get_system_properties(instance.handle(), system, &mut properties);
        runtime::check(runtime, "xrGetSystemProperties", instance.handle(), code)?;

        Ok(SystemDescription {
            i_system: system,
            i_name: utils::strings::from_fixed(&properties.system_name),
            i_vendor_id: properties.vendor_id,
            i_max_swapchain_width: properties.graphics_properties.max_swapchain_image_width,
            i_max_swapchain_height: properties.graphics_properties.max_swapchain_image_height,
            i_max_layer_count: properties.graphics_properties.max_layer_count,
            i_orientation_tracking: properties.tracking_properties.orientation_tracking.into(),
            i_position_tracking: properties.tracking_properties.position_tracking.into(),
        })
    }

    #[doc(hidden)]
    pub fn system_id(&self) -> sys::SystemId {
        self.i_system
    }

    pub fn name(&self) -> &str {
        &self.i_name
    }

    pub fn vendor_id(&self) -> u32 {
        self.i_vendor_id
    }

    /// Widest swapchain image the system will accept
    pub fn max_swapchain_width(&self) -> u32 {
        self.i_max_swapchain_width
    }

    pub fn max_swapchain_height(&self) -> u32 {
        self.i_max_swapchain_height
    }

    /// Composition layer limit
    pub fn max_layer_count(&self) -> u32 {
        self.i_max_layer_count
    }

    pub fn orientation_tracking(&self) -> bool {
        self.i_orientation_tracking
    }

    pub fn position_tracking(&self) -> bool {
        self.i_position_tracking
    }
}

impl fmt::Display for SystemDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  System Name: {}", self.i_name)?;
        writeln!(f, "  Vendor ID: {}", self.i_vendor_id)?;
        writeln!(f, "  Graphics Props:")?;
        writeln!(f, "   Swapchain max W: {}", self.i_max_swapchain_width)?;
        writeln!(f, "   Swapchain max H: {}", self.i_max_swapchain_height)?;
        writeln!(f, "   Max layers: {}", self.i_max_layer_count)?;
        writeln!(f, "  Tracking:")?;
        writeln!(f, "   Orientation: {}", self.i_orientation_tracking)?;
        writeln!(f, "   Position: {}", self.i_position_tracking)
    }
}
