//! Capability introspection for an installed OpenXR runtime
//!
//! The runtime loader is queried once, in a fixed order: API layers,
//! instance extensions, instance negotiation, extension function resolution,
//! system discovery, graphics requirements
//!
//! Every query goes through [`runtime::Runtime`] so the whole sequence can
//! run against the real loader ([`loader::Loader`]) or a scripted one

pub mod macros;
pub mod utils;
pub mod runtime;
pub mod loader;
pub mod instance;
pub mod layers;
pub mod extensions;
pub mod system;
pub mod graphics;
pub mod report;
