//! Template discovery and rendering of skill bundles.

pub mod discovery;
pub mod engine;
pub mod renderer;

pub use discovery::{TEMPLATE_SUFFIX, TemplateInfo, discover_passthrough, discover_templates};
pub use engine::TemplateEngine;
pub use renderer::{RenderError, RenderOptions, copy_passthrough, render_bundle};
