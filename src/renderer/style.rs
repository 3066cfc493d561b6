//! Paint types and the ball look

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit colour with float alpha, the way CSS spells it
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Two-circle radial gradient (canvas `createRadialGradient` semantics)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f32,
    pub offset: Vec2,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// Colors for the ball layers
pub mod colors {
    use super::Rgba;

    pub const GRADIENT_HIGHLIGHT: Rgba = Rgba::opaque(0xf8, 0xf8, 0xf8);
    pub const GRADIENT_MID: Rgba = Rgba::opaque(0xe0, 0xe0, 0xe0);
    pub const GRADIENT_EDGE: Rgba = Rgba::opaque(0xb0, 0xb0, 0xb0);
    pub const DROP_SHADOW: Rgba = Rgba::new(80, 80, 80, 0.25);
    pub const SPECULAR: Rgba = Rgba::new(255, 255, 255, 0.45);
    pub const SPECULAR_GLOW: Rgba = Rgba::new(255, 255, 255, 0.5);
    pub const OUTLINE: Rgba = Rgba::new(180, 180, 180, 0.7);
}
