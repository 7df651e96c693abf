//! Report assembly
//!
//! One linear pass over the runtime in the required order, writing each
//! section as soon as its data is complete. Rendering itself is pure
//! formatting over already-fetched records; a failed query stops the pass
//! with the sections gathered so far already on `out`

use openxr_sys as sys;

use crate::extensions::ExtensionDescription;
use crate::graphics::{Backend, RequirementsFn};
use crate::instance::{Instance, InstanceError, InstanceType};
use crate::layers::LayerDescription;
use crate::runtime::{CallError, Runtime};
use crate::system::{SystemDescription, SystemError};
use crate::utils;

use std::error::Error;
use std::ffi::CStr;
use std::fmt;
use std::io;

/// What one introspection pass should cover
#[derive(Debug)]
pub struct ReportType<'a> {
    pub application_name: &'a str,
    pub application_version: u32,
    pub engine_name: &'a str,
    pub engine_version: u32,
    pub form_factor: sys::FormFactor,
    pub backends: &'a [Backend],
}

impl<'a> Default for ReportType<'a> {
    fn default() -> ReportType<'a> {
        ReportType {
            application_name: "xrinfo",
            application_version: 1,
            engine_name: "xrinfo",
            engine_version: 1,
            form_factor: sys::FormFactor::HEAD_MOUNTED_DISPLAY,
            backends: &[Backend::OpenGL],
        }
    }
}

#[derive(Debug)]
pub enum ReportError {
    Call(CallError),
    Instance(InstanceError),
    System(SystemError),
    Io(io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Call(err) => write!(f, "{}", err),
            ReportError::Instance(err) => write!(f, "{}", err),
            ReportError::System(err) => write!(f, "{}", err),
            ReportError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ReportError {}

impl From<CallError> for ReportError {
    fn from(err: CallError) -> ReportError {
        ReportError::Call(err)
    }
}

impl From<InstanceError> for ReportError {
    fn from(err: InstanceError) -> ReportError {
        ReportError::Instance(err)
    }
}

impl From<SystemError> for ReportError {
    fn from(err: SystemError) -> ReportError {
        ReportError::System(err)
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> ReportError {
        ReportError::Io(err)
    }
}

/// Run the whole discovery sequence once and render it onto `out`
///
/// Order is fixed: layers, extensions, instance negotiation, entry point
/// resolution, system discovery, then one requirements section per backend.
/// The first failure stops everything after it; the negotiated instance is
/// still released
pub fn run<R: Runtime, W: io::Write>(
    runtime: &R,
    desc: &ReportType,
    out: &mut W,
) -> Result<(), ReportError> {
    writeln!(
        out,
        "Built against OpenXR loader version {}",
        utils::version::full(sys::CURRENT_API_VERSION)
    )?;
    writeln!(out)?;

    let layers = LayerDescription::list(runtime)?;
    write_list(out, "Supported API Layers", &layers, "No supported API layers")?;

    let extensions = ExtensionDescription::list(runtime)?;
    writeln!(out)?;
    write_list(
        out,
        "Supported Instance Extensions",
        &extensions,
        "No supported instance extensions",
    )?;

    let enabled: Vec<&'static CStr> = desc
        .backends
        .iter()
        .map(|backend| backend.enable_extension())
        .collect();

    let instance = Instance::new(
        runtime,
        &InstanceType {
            application_name: desc.application_name,
            application_version: desc.application_version,
            engine_name: desc.engine_name,
            engine_version: desc.engine_version,
            extensions: &enabled,
        },
    )?;

    let requirement_fns = desc
        .backends
        .iter()
        .map(|&backend| RequirementsFn::resolve(&instance, backend))
        .collect::<Result<Vec<_>, _>>()?;

    let system = SystemDescription::new(&instance, desc.form_factor)?;

    writeln!(out)?;
    write_title(out, "System Info")?;
    write!(out, "{}", system)?;

    for function in &requirement_fns {
        let requirements = function.query(&system)?;

        writeln!(out)?;
        write_title(out, &format!("{} Requirements:", requirements.backend()))?;
        write!(out, "{}", requirements)?;
    }

    Ok(())
}

fn write_title<W: io::Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

/// A section of one-line entries; an empty list is still a section with an
/// explicit placeholder line
fn write_list<W: io::Write, T: fmt::Display>(
    out: &mut W,
    title: &str,
    items: &[T],
    none_found: &str,
) -> io::Result<()> {
    write_title(out, title)?;

    if items.is_empty() {
        writeln!(out, "  {}", none_found)?;
    }

    for item in items {
        writeln!(out, "{}", item)?;
    }

    Ok(())
}
