//! API layers

use openxr_sys as sys;

use crate::runtime::{self, CallError, Runtime};
use crate::utils;

use std::fmt;
use std::ptr;

/// One API layer reported by the loader
#[derive(Debug, Clone)]
pub struct LayerDescription {
    i_name: String,
    i_version: u32,
    i_description: String,
}

impl LayerDescription {
    /// List every installed API layer, in loader order
    ///
    /// Duplicates are kept: what the loader reports is what gets displayed
    pub fn list<R: Runtime>(runtime: &R) -> Result<Vec<LayerDescription>, CallError> {
        let template = sys::ApiLayerProperties {
            ty: sys::StructureType::API_LAYER_PROPERTIES,
            next: ptr::null_mut(),
            layer_name: [0; sys::MAX_API_LAYER_NAME_SIZE],
            spec_version: sys::Version::new(0, 0, 0),
            layer_version: 0,
            description: [0; sys::MAX_API_LAYER_DESCRIPTION_SIZE],
        };

        let records = runtime::enumerate(
            runtime,
            "xrEnumerateApiLayerProperties",
            template,
            |rt, count, buffer| rt.enumerate_api_layer_properties(count, buffer),
        )?;

        Ok(records.iter().map(LayerDescription::new).collect())
    }

    fn new(properties: &sys::ApiLayerProperties) -> LayerDescription {
        LayerDescription {
            i_name: utils::strings::from_fixed(&properties.layer_name),
            i_version: properties.layer_version,
            i_description: utils::strings::from_fixed(&properties.description),
        }
    }

    pub fn name(&self) -> &str {
        &self.i_name
    }

    pub fn version(&self) -> u32 {
        self.i_version
    }

    pub fn description(&self) -> &str {
        &self.i_description
    }
}

impl fmt::Display for LayerDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {:<40} (v{}): {}",
            self.i_name, self.i_version, self.i_description
        )
    }
}
