//! Image upload preview.
//!
//! Shows the name and a thumbnail of an image chosen through a file input or
//! dropped on a drop zone, before it is uploaded. Runs in the browser as
//! WebAssembly; a native build previews files from the command line or a file
//! dialog.

pub mod config;
pub mod controller;
pub mod data_uri;
pub mod error;

pub use config::PreviewConfig;
pub use controller::{PreviewController, PreviewSink, ReadOutcome, ReadRequest, SelectedFile};
pub use error::PreviewError;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

// WASM entry point
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
