pub mod animation;
pub mod classify;
pub mod config;
pub mod diagrams;
pub mod display;
pub mod dot_repair;
pub mod dot_writer;
pub mod engine;
pub mod error;
pub mod fixed_diagram;
pub mod layout_json;
pub mod model;
pub mod prompt;
pub mod service;
pub mod web_context;

pub use display::{DisplayEdge, DisplayGraph, DisplayNode};
pub use error::{Error, Result};

pub fn convert_dot(
    engine: &dyn engine::LayoutEngine,
    raw: &str,
    scale: f64,
) -> Result<DisplayGraph> {
    let repaired = dot_repair::repair(raw);
    display::layout_to_display(engine, &repaired, scale)
}
