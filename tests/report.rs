use openxr_sys as sys;
use openxr_sys::pfn;

use xrinfo::graphics::Backend;
use xrinfo::report::{self, ReportType};
use xrinfo::runtime::Runtime;
use xrinfo::utils::strings;

use std::cell::RefCell;
use std::ffi::CStr;
use std::mem;

#[derive(Clone, Copy)]
struct SystemSpec {
    name: &'static str,
    vendor_id: u32,
    max_swapchain_width: u32,
    max_swapchain_height: u32,
    max_layer_count: u32,
    orientation_tracking: bool,
    position_tracking: bool,
}

const TEST_HMD: SystemSpec = SystemSpec {
    name: "Test HMD",
    vendor_id: 42,
    max_swapchain_width: 2048,
    max_swapchain_height: 2048,
    max_layer_count: 4,
    orientation_tracking: true,
    position_tracking: false,
};

/// Scripted runtime: answers every query from fixed data and keeps a log of
/// the calls it saw
struct MockRuntime {
    layers: Vec<(&'static str, u32, &'static str)>,
    extensions: Vec<(&'static str, u32)>,
    layer_fill_limit: Option<u32>,
    fail_op: Option<&'static str>,
    system: Option<SystemSpec>,
    calls: RefCell<Vec<String>>,
    destroyed: RefCell<u32>,
}

impl MockRuntime {
    fn new() -> MockRuntime {
        MockRuntime {
            layers: Vec::new(),
            extensions: Vec::new(),
            layer_fill_limit: None,
            fail_op: None,
            system: Some(TEST_HMD),
            calls: RefCell::new(Vec::new()),
            destroyed: RefCell::new(0),
        }
    }

    fn log(&self, entry: String) {
        self.calls.borrow_mut().push(entry);
    }

    fn called(&self, op: &str) -> bool {
        self.calls.borrow().iter().any(|entry| entry.starts_with(op))
    }

    fn fails(&self, op: &str) -> bool {
        self.fail_op == Some(op)
    }

    fn destroy_count(&self) -> u32 {
        *self.destroyed.borrow()
    }
}

impl Runtime for MockRuntime {
    fn enumerate_api_layer_properties(
        &self,
        count: &mut u32,
        properties: &mut [sys::ApiLayerProperties],
    ) -> sys::Result {
        self.log(format!(
            "xrEnumerateApiLayerProperties cap={}",
            properties.len()
        ));

        if self.fails("xrEnumerateApiLayerProperties") {
            return sys::Result::ERROR_RUNTIME_FAILURE;
        }

        if properties.is_empty() {
            *count = self.layers.len() as u32;
            return sys::Result::SUCCESS;
        }

        let limit = self.layer_fill_limit.unwrap_or(u32::MAX) as usize;
        let written = self.layers.len().min(properties.len()).min(limit);

        for i in 0..written {
            let (name, version, description) = self.layers[i];
            let slot = &mut properties[i];

            if slot.ty != sys::StructureType::API_LAYER_PROPERTIES {
                return sys::Result::ERROR_VALIDATION_FAILURE;
            }

            strings::to_fixed(&mut slot.layer_name, name);
            slot.layer_version = version;
            strings::to_fixed(&mut slot.description, description);
        }

        *count = written as u32;

        sys::Result::SUCCESS
    }

    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: &mut [sys::ExtensionProperties],
    ) -> sys::Result {
        self.log(format!(
            "xrEnumerateInstanceExtensionProperties cap={}",
            properties.len()
        ));

        if self.fails("xrEnumerateInstanceExtensionProperties") {
            return sys::Result::ERROR_RUNTIME_FAILURE;
        }

        if properties.is_empty() {
            *count = self.extensions.len() as u32;
            return sys::Result::SUCCESS;
        }

        let written = self.extensions.len().min(properties.len());

        for i in 0..written {
            let (name, version) = self.extensions[i];
            let slot = &mut properties[i];

            if slot.ty != sys::StructureType::EXTENSION_PROPERTIES {
                return sys::Result::ERROR_VALIDATION_FAILURE;
            }

            strings::to_fixed(&mut slot.extension_name, name);
            slot.extension_version = version;
        }

        *count = written as u32;

        sys::Result::SUCCESS
    }

    fn create_instance(
        &self,
        create_info: &sys::InstanceCreateInfo,
        instance: &mut sys::Instance,
    ) -> sys::Result {
        self.log(format!(
            "xrCreateInstance extensions={}",
            create_info.enabled_extension_count
        ));

        if self.fails("xrCreateInstance") {
            return sys::Result::ERROR_RUNTIME_FAILURE;
        }

        *instance = sys::Instance::from_raw(0x42);

        sys::Result::SUCCESS
    }

    fn get_instance_proc_addr(
        &self,
        _instance: sys::Instance,
        name: &CStr,
        function: &mut Option<pfn::VoidFunction>,
    ) -> sys::Result {
        self.log(format!("xrGetInstanceProcAddr {}", name.to_string_lossy()));

        if self.fails("xrGetInstanceProcAddr") {
            *function = None;
            return sys::Result::ERROR_FUNCTION_UNSUPPORTED;
        }

        *function = match name.to_bytes() {
            b"xrGetOpenGLGraphicsRequirementsKHR" => {
                let f: pfn::GetOpenGLGraphicsRequirementsKHR = opengl_requirements;
                Some(unsafe { mem::transmute(f) })
            }
            b"xrGetVulkanGraphicsRequirementsKHR" => {
                let f: pfn::GetVulkanGraphicsRequirementsKHR = vulkan_requirements;
                Some(unsafe { mem::transmute(f) })
            }
            _ => return sys::Result::ERROR_FUNCTION_UNSUPPORTED,
        };

        sys::Result::SUCCESS
    }

    fn get_system(
        &self,
        _instance: sys::Instance,
        _get_info: &sys::SystemGetInfo,
        system: &mut sys::SystemId,
    ) -> sys::Result {
        self.log("xrGetSystem".to_string());

        if self.fails("xrGetSystem") {
            return sys::Result::ERROR_RUNTIME_FAILURE;
        }

        *system = match self.system {
            Some(_) => sys::SystemId::from_raw(7),
            None => sys::SystemId::from_raw(0),
        };

        sys::Result::SUCCESS
    }

    fn get_system_properties(
        &self,
        _instance: sys::Instance,
        _system: sys::SystemId,
        properties: &mut sys::SystemProperties,
    ) -> sys::Result {
        self.log("xrGetSystemProperties".to_string());

        if properties.ty != sys::StructureType::SYSTEM_PROPERTIES {
            return sys::Result::ERROR_VALIDATION_FAILURE;
        }

        let spec = match self.system {
            Some(spec) => spec,
            None => return sys::Result::ERROR_SYSTEM_INVALID,
        };

        strings::to_fixed(&mut properties.system_name, spec.name);
        properties.vendor_id = spec.vendor_id;
        properties.graphics_properties.max_swapchain_image_width = spec.max_swapchain_width;
        properties.graphics_properties.max_swapchain_image_height = spec.max_swapchain_height;
        properties.graphics_properties.max_layer_count = spec.max_layer_count;
        properties.tracking_properties.orientation_tracking = spec.orientation_tracking.into();
        properties.tracking_properties.position_tracking = spec.position_tracking.into();

        sys::Result::SUCCESS
    }

    fn destroy_instance(&self, _instance: sys::Instance) -> sys::Result {
        self.log("xrDestroyInstance".to_string());

        *self.destroyed.borrow_mut() += 1;

        sys::Result::SUCCESS
    }

    fn result_to_string(&self, _instance: sys::Instance, value: sys::Result) -> String {
        format!("{:?}", value)
    }
}

unsafe extern "system" fn opengl_requirements(
    _instance: sys::Instance,
    _system: sys::SystemId,
    requirements: *mut sys::GraphicsRequirementsOpenGLKHR,
) -> sys::Result {
    unsafe {
        (*requirements).min_api_version_supported = sys::Version::new(4, 1, 0);
        (*requirements).max_api_version_supported = sys::Version::new(4, 6, 0);
    }

    sys::Result::SUCCESS
}

unsafe extern "system" fn vulkan_requirements(
    _instance: sys::Instance,
    _system: sys::SystemId,
    requirements: *mut sys::GraphicsRequirementsVulkanKHR,
) -> sys::Result {
    unsafe {
        (*requirements).min_api_version_supported = sys::Version::new(1, 1, 0);
        (*requirements).max_api_version_supported = sys::Version::new(1, 3, 0);
    }

    sys::Result::SUCCESS
}

fn run_report(
    runtime: &MockRuntime,
    backends: &'static [Backend],
) -> (Result<(), report::ReportError>, String) {
    let desc = ReportType {
        backends,
        ..ReportType::default()
    };

    let mut out = Vec::new();
    let result = report::run(runtime, &desc, &mut out);

    (result, String::from_utf8(out).unwrap())
}

#[test]
fn full_report() {
    let mut runtime = MockRuntime::new();
    runtime.layers = vec![
        ("XR_APILAYER_test_one", 1, "First test layer"),
        ("XR_APILAYER_test_two", 2, "Second test layer"),
    ];

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    assert!(result.is_ok());

    assert!(out.contains("Built against OpenXR loader version"));
    assert!(out.contains("(v1): First test layer"));
    assert!(out.contains("(v2): Second test layer"));
    assert!(out.contains("  No supported instance extensions"));
    assert!(out.contains("  System Name: Test HMD"));
    assert!(out.contains("  Vendor ID: 42"));
    assert!(out.contains("   Swapchain max W: 2048"));
    assert!(out.contains("   Swapchain max H: 2048"));
    assert!(out.contains("   Max layers: 4"));
    assert!(out.contains("   Orientation: true"));
    assert!(out.contains("   Position: false"));
    assert!(out.contains("  Min OpenGL version: 4.1"));
    assert!(out.contains("  Max OpenGL version: 4.6"));

    assert_eq!(runtime.destroy_count(), 1);
}

#[test]
fn empty_lists_render_placeholders() {
    let runtime = MockRuntime::new();

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    assert!(result.is_ok());
    assert!(out.contains("Supported API Layers"));
    assert!(out.contains("  No supported API layers"));
    assert!(out.contains("  No supported instance extensions"));
}

#[test]
fn second_phase_uses_reported_capacity() {
    let mut runtime = MockRuntime::new();
    runtime.layers = vec![
        ("XR_APILAYER_a", 1, "a"),
        ("XR_APILAYER_b", 1, "b"),
        ("XR_APILAYER_c", 1, "c"),
    ];

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    assert!(result.is_ok());
    assert!(runtime.called("xrEnumerateApiLayerProperties cap=0"));
    assert!(runtime.called("xrEnumerateApiLayerProperties cap=3"));
    assert!(out.contains("XR_APILAYER_c"));
}

#[test]
fn shrunk_fill_count_is_tolerated() {
    let mut runtime = MockRuntime::new();
    runtime.layers = vec![
        ("XR_APILAYER_a", 1, "a"),
        ("XR_APILAYER_b", 1, "b"),
        ("XR_APILAYER_c", 1, "c"),
    ];
    runtime.layer_fill_limit = Some(2);

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    assert!(result.is_ok());
    assert!(out.contains("XR_APILAYER_a"));
    assert!(out.contains("XR_APILAYER_b"));
    assert!(!out.contains("XR_APILAYER_c"));
}

#[test]
fn enumeration_failure_stops_the_pass() {
    let mut runtime = MockRuntime::new();
    runtime.fail_op = Some("xrEnumerateApiLayerProperties");

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    let err = result.unwrap_err();

    assert!(err.to_string().contains("xrEnumerateApiLayerProperties"));
    assert!(!runtime.called("xrCreateInstance"));
    assert!(!out.contains("System Info"));
}

#[test]
fn instance_creation_failure_has_a_dedicated_diagnostic() {
    let mut runtime = MockRuntime::new();
    runtime.fail_op = Some("xrCreateInstance");

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    let err = result.unwrap_err();

    assert!(err.to_string().contains("xrCreateInstance"));
    assert!(out.contains("Supported API Layers"));
    assert!(!out.contains("System Info"));
    assert!(!out.contains("Requirements"));
    assert!(!runtime.called("xrGetSystem"));
    assert_eq!(runtime.destroy_count(), 0);
}

#[test]
fn resolver_failure_blocks_everything_after_it() {
    let mut runtime = MockRuntime::new();
    runtime.fail_op = Some("xrGetInstanceProcAddr");

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    let err = result.unwrap_err();

    assert!(err.to_string().contains("xrGetInstanceProcAddr"));
    assert!(!runtime.called("xrGetSystem"));
    assert!(!runtime.called("xrGetSystemProperties"));
    assert!(!out.contains("Requirements"));

    // the negotiated instance is still released on the failure path
    assert_eq!(runtime.destroy_count(), 1);
}

#[test]
fn null_system_id_is_fatal_before_properties() {
    let mut runtime = MockRuntime::new();
    runtime.system = None;

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    let err = result.unwrap_err();

    assert!(err.to_string().contains("form factor"));
    assert!(runtime.called("xrGetSystem"));
    assert!(!runtime.called("xrGetSystemProperties"));
    assert!(!out.contains("System Info"));
    assert_eq!(runtime.destroy_count(), 1);
}

#[test]
fn both_backends_render_their_own_sections() {
    let runtime = MockRuntime::new();

    let (result, out) = run_report(&runtime, &[Backend::OpenGL, Backend::Vulkan]);

    assert!(result.is_ok());
    assert!(out.contains("OpenGL Requirements:"));
    assert!(out.contains("Vulkan Requirements:"));
    assert!(out.contains("  Min Vulkan version: 1.1"));
    assert!(out.contains("  Max Vulkan version: 1.3"));

    // both enable extensions were declared during negotiation
    assert!(runtime.called("xrCreateInstance extensions=2"));
}

#[test]
fn extensions_render_with_versions() {
    let mut runtime = MockRuntime::new();
    runtime.extensions = vec![("XR_KHR_opengl_enable", 10), ("XR_EXT_debug_utils", 4)];

    let (result, out) = run_report(&runtime, &[Backend::OpenGL]);

    assert!(result.is_ok());
    assert!(out.contains("XR_KHR_opengl_enable"));
    assert!(out.contains("(v10)"));
    assert!(out.contains("(v4)"));
    assert!(!out.contains("No supported instance extensions"));
}
