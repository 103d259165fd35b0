//! Tint colours used to signal attack wind-up.
use serde::{Deserialize, Serialize};

/// Linear RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha; defaults to opaque when deserialised.
    #[serde(default = "opaque_alpha")]
    pub a: f32,
}

const fn opaque_alpha() -> f32 {
    1.0
}

impl Rgba {
    /// Attack wind-up tint.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Default body tint.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Builds an opaque colour.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with alpha forced to 1.
    #[must_use]
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}
