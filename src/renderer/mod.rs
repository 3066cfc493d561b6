//! Rendering module
//!
//! Bodies are drawn through the `Surface` trait, a minimal 2D raster API
//! (gradient-filled circles, stroked arcs, circle-clipped images). Backends:
//! - `record::DrawList` records commands (headless runs, tests)
//! - `platform::web::CanvasSurface` draws onto an HTML canvas (wasm32)

pub mod ball;
pub mod record;
pub mod style;

pub use ball::{draw_body, draw_world, fit_texture};
pub use record::{DrawCommand, DrawList};
pub use style::{ColorStop, RadialGradient, Rgba, Shadow, Stroke};

use glam::Vec2;

use crate::Bounds;
use crate::sim::TextureId;

/// A 2D raster target the renderer draws onto
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self, bounds: Bounds);

    /// Fill a circle with a radial gradient, optionally casting a shadow
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient, shadow: Option<&Shadow>);

    /// Stroke a clockwise arc from `start` to `end` (radians)
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        stroke: &Stroke,
        glow: Option<&Shadow>,
    );

    /// Natural size of a texture, `None` until it has finished loading
    fn texture_size(&self, texture: TextureId) -> Option<Vec2>;

    /// Draw a texture into `dest_min..dest_min + dest_size`, clipped to a circle
    fn draw_texture(
        &mut self,
        texture: TextureId,
        clip_center: Vec2,
        clip_radius: f32,
        dest_min: Vec2,
        dest_size: Vec2,
    );
}
