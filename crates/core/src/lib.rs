//! Core library for skillpack.
//!
//! Discovers agent skill bundles, parses their customization schema, resolves
//! variable values and renders templates into an agent's skills directory.

pub mod bundle;
pub mod config;
pub mod customize;
pub mod install;
pub mod ledger;
pub mod outcome;
pub mod templates;

pub use outcome::Outcome;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
