use crate::foundation::error::{VistraError, VistraResult};

pub use glam::{DMat3, DVec3};

/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// Used for declarative color state (e.g. a scene background); backends convert
/// to whatever their native representation is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (straight, not premultiplied).
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Build an opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color from RGBA channels.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A dense 2D grid of `f64` samples, row-major.
///
/// The in-memory form of image data: `values[y * width + x]`. Mapping samples
/// to colors (colormap, contrast limits, gamma) is declarative node state;
/// rasterization is the backend's concern.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScalarField2 {
    /// Grid width in samples.
    pub width: usize,
    /// Grid height in samples.
    pub height: usize,
    /// Samples, tightly packed, row-major.
    pub values: Vec<f64>,
}

impl ScalarField2 {
    /// Create a validated grid with `values.len() == width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> VistraResult<Self> {
        if values.len() != width * height {
            return Err(VistraError::validation(format!(
                "ScalarField2 expects {} samples for {width}x{height}, got {}",
                width * height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Create a zero-filled grid.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    /// Return `true` when the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }
}

/// A dense 3D grid of `f64` samples.
///
/// Layout is `values[(z * dims[1] + y) * dims[0] + x]` with `dims = [x, y, z]`
/// extents.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScalarField3 {
    /// Grid extents, `[x, y, z]`.
    pub dims: [usize; 3],
    /// Samples, tightly packed, x fastest.
    pub values: Vec<f64>,
}

impl ScalarField3 {
    /// Create a validated grid with `values.len() == dims[0] * dims[1] * dims[2]`.
    pub fn new(dims: [usize; 3], values: Vec<f64>) -> VistraResult<Self> {
        let expected = dims[0] * dims[1] * dims[2];
        if values.len() != expected {
            return Err(VistraError::validation(format!(
                "ScalarField3 expects {expected} samples for {}x{}x{}, got {}",
                dims[0],
                dims[1],
                dims[2],
                values.len()
            )));
        }
        Ok(Self { dims, values })
    }

    /// Create a zero-filled grid.
    pub fn zeros(dims: [usize; 3]) -> Self {
        Self {
            dims,
            values: vec![0.0; dims[0] * dims[1] * dims[2]],
        }
    }

    /// Return `true` when the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at `(x, y, z)`, or `None` out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f64> {
        if x >= self.dims[0] || y >= self.dims[1] || z >= self.dims[2] {
            return None;
        }
        Some(self.values[(z * self.dims[1] + y) * self.dims[0] + x])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
