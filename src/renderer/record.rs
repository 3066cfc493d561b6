//! Recording surface: keeps draw commands instead of rasterising them

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Surface;
use super::style::{RadialGradient, Shadow, Stroke};
use crate::Bounds;
use crate::sim::TextureId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        bounds: Bounds,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        fill: RadialGradient,
        shadow: Option<Shadow>,
    },
    StrokeArc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        stroke: Stroke,
        glow: Option<Shadow>,
    },
    DrawTexture {
        texture: TextureId,
        clip_center: Vec2,
        clip_radius: f32,
        dest_min: Vec2,
        dest_size: Vec2,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear { .. } => "clear",
            DrawCommand::FillCircle { .. } => "fill_circle",
            DrawCommand::StrokeArc { .. } => "stroke_arc",
            DrawCommand::DrawTexture { .. } => "draw_texture",
        }
    }
}

/// A frame's worth of draw commands
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    /// Textures that have "finished loading", with their natural size
    #[serde(skip)]
    textures: HashMap<TextureId, Vec2>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a texture as loaded
    pub fn set_texture_size(&mut self, texture: TextureId, size: Vec2) {
        self.textures.insert(texture, size);
    }

    /// Number of commands since the last clear
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, bounds: Bounds) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { bounds });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient, shadow: Option<&Shadow>) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            fill: fill.clone(),
            shadow: shadow.copied(),
        });
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        stroke: &Stroke,
        glow: Option<&Shadow>,
    ) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            start,
            end,
            stroke: *stroke,
            glow: glow.copied(),
        });
    }

    fn texture_size(&self, texture: TextureId) -> Option<Vec2> {
        self.textures.get(&texture).copied()
    }

    fn draw_texture(
        &mut self,
        texture: TextureId,
        clip_center: Vec2,
        clip_radius: f32,
        dest_min: Vec2,
        dest_size: Vec2,
    ) {
        self.commands.push(DrawCommand::DrawTexture {
            texture,
            clip_center,
            clip_radius,
            dest_min,
            dest_size,
        });
    }
}
