//! Form rendering module
//!
//! - `field_renderer`: per-widget field drawing and scroll math

mod field_renderer;

pub use field_renderer::{draw_field, field_height, first_visible};
