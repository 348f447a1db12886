//! Helpers for relating emitted asset paths to the names referenced in markup.
//!
//! The responsibilities are split into focused submodules so that origin name recovery,
//! main-bundle filtering and final URL construction can be tested independently. Both the
//! strict and loose engines share them.

mod filters;
mod naming;
mod url;

pub use filters::MainBundleFilter;
pub use naming::{HashNaming, base_file_name, origin_name};
pub use url::UrlDecorator;
