//! Draws balls: shaded body, specular arc, outline, then the logo

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::Surface;
use super::style::{ColorStop, RadialGradient, Shadow, Stroke, colors};
use crate::sim::{Body, World};

/// Clear the surface and draw every body in world order
pub fn draw_world<S: Surface>(surface: &mut S, world: &World) {
    surface.clear(world.bounds);
    for body in &world.bodies {
        draw_body(surface, body, world.config.texture_inset);
    }
}

/// Draw one ball. The logo layer is drawn last, and only once loaded.
pub fn draw_body<S: Surface>(surface: &mut S, body: &Body, texture_inset: f32) {
    let c = body.pos;
    let r = body.radius();

    // Shaded body, light source up and to the left
    let gradient = RadialGradient {
        inner_center: c - Vec2::splat(r * 0.3),
        inner_radius: r * 0.2,
        outer_center: c,
        outer_radius: r,
        stops: vec![
            ColorStop { offset: 0.0, color: colors::GRADIENT_HIGHLIGHT },
            ColorStop { offset: 0.5, color: colors::GRADIENT_MID },
            ColorStop { offset: 1.0, color: colors::GRADIENT_EDGE },
        ],
    };
    let drop_shadow = Shadow {
        color: colors::DROP_SHADOW,
        blur: 18.0,
        offset: Vec2::new(0.0, 8.0),
    };
    surface.fill_circle(c, r, &gradient, Some(&drop_shadow));

    // Glossy highlight
    let specular = Stroke {
        color: colors::SPECULAR,
        width: r * 0.18,
    };
    let glow = Shadow {
        color: colors::SPECULAR_GLOW,
        blur: 8.0,
        offset: Vec2::ZERO,
    };
    surface.stroke_arc(
        c - Vec2::splat(r * 0.35),
        r * 0.35,
        PI * 1.1,
        PI * 1.9,
        &specular,
        Some(&glow),
    );

    let outline = Stroke {
        color: colors::OUTLINE,
        width: 2.0,
    };
    surface.stroke_arc(c, r, 0.0, TAU, &outline, None);

    let Some(texture) = body.texture else {
        return;
    };
    let Some(size) = surface.texture_size(texture) else {
        return;
    };
    if let Some(dest_size) = fit_texture(r, texture_inset, size) {
        surface.draw_texture(texture, c, r - texture_inset, c - dest_size * 0.5, dest_size);
    }
}

/// Scale a texture to fit the inset disc, keeping its aspect ratio
///
/// Returns `None` for empty textures or balls too small to show one.
pub fn fit_texture(radius: f32, inset: f32, size: Vec2) -> Option<Vec2> {
    let room = radius * 2.0 - inset * 2.0;
    if room <= 0.0 || size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let scale = (room / size.x).min(room / size.y);
    Some(size * scale)
}
