//! ## Crate layout
//! - `config`: session configuration read from `rptmodel.toml`.
//! - `core`: runtime object model, resolution, reader, writer and checker.
//! - `schema`: property, structure and element definitions plus reflection.
//! - `locator`: finds design and library documents.
//! - `session`: opens documents and loads their library inclusion tree.
//!
//! The `prelude` module mirrors the read surface used by report tooling.

pub use rptmodel_config as config;
pub use rptmodel_core as core;
pub use rptmodel_schema as schema;

pub mod locator;
pub mod session;

#[cfg(test)]
mod tests;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{Error, ErrorClass, ErrorOrigin};
pub use locator::{FileSystemLocator, MemoryLocator, ResourceLocator};
pub use session::{Design, DesignSession};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::SessionConfig,
        core::prelude::*,
        locator::{FileSystemLocator, MemoryLocator, ResourceLocator},
        session::{Design, DesignSession},
    };
}
