use crate::foundation::core::{ScalarField2, ScalarField3};
use crate::scene::field::{FieldKind, FieldSpec, FieldValue};
use std::sync::Arc;

/// Colormap applied to scalar data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// Linear grayscale.
    #[default]
    Gray,
    Viridis,
    Magma,
    Plasma,
    Inferno,
}

/// Sampling mode when an image is drawn away from its native resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Nearest,
    Linear,
}

/// Projection used to draw a volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Maximum intensity projection.
    #[default]
    Mip,
    /// Isosurface extraction.
    Iso,
    /// Emission/absorption compositing.
    Translucent,
}

/// Field name: scalar sample grid of an image or volume.
pub const DATA: &str = "data";
/// Field name: colormap of an image or volume.
pub const COLORMAP: &str = "colormap";
/// Field name: contrast limits of an image or volume.
pub const CLIM: &str = "clim";
/// Field name: gamma correction exponent of an image.
pub const GAMMA: &str = "gamma";
/// Field name: sampling mode of an image.
pub const INTERPOLATION: &str = "interpolation";
/// Field name: projection mode of a volume.
pub const RENDER_MODE: &str = "render_mode";

/// Fields the image kind declares on top of the base set.
pub static IMAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: DATA,
        kind: FieldKind::Field2,
        default: default_field2,
        description: "2D scalar samples, row-major.",
        validate: None,
    },
    FieldSpec {
        name: COLORMAP,
        kind: FieldKind::Colormap,
        default: default_colormap,
        description: "Colormap mapping samples to colors.",
        validate: None,
    },
    FieldSpec {
        name: CLIM,
        kind: FieldKind::Clim,
        default: default_clim,
        description: "Contrast limits (min, max); None maps the full data range.",
        validate: Some(validate_clim),
    },
    FieldSpec {
        name: GAMMA,
        kind: FieldKind::F64,
        default: default_gamma,
        description: "Gamma exponent applied after contrast scaling.",
        validate: Some(validate_gamma),
    },
    FieldSpec {
        name: INTERPOLATION,
        kind: FieldKind::Interpolation,
        default: default_interpolation,
        description: "Sampling mode when drawn off native resolution.",
        validate: None,
    },
];

/// Fields the volume kind declares on top of the base set.
pub static VOLUME_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: DATA,
        kind: FieldKind::Field3,
        default: default_field3,
        description: "3D scalar samples, x fastest.",
        validate: None,
    },
    FieldSpec {
        name: COLORMAP,
        kind: FieldKind::Colormap,
        default: default_colormap,
        description: "Colormap mapping samples to colors.",
        validate: None,
    },
    FieldSpec {
        name: CLIM,
        kind: FieldKind::Clim,
        default: default_clim,
        description: "Contrast limits (min, max); None maps the full data range.",
        validate: Some(validate_clim),
    },
    FieldSpec {
        name: RENDER_MODE,
        kind: FieldKind::RenderMode,
        default: default_render_mode,
        description: "Projection used to draw the volume.",
        validate: None,
    },
];

fn default_field2() -> FieldValue {
    FieldValue::Field2(Arc::new(ScalarField2::default()))
}

fn default_field3() -> FieldValue {
    FieldValue::Field3(Arc::new(ScalarField3::default()))
}

fn default_colormap() -> FieldValue {
    FieldValue::Colormap(Colormap::Gray)
}

fn default_clim() -> FieldValue {
    FieldValue::Clim(None)
}

fn default_gamma() -> FieldValue {
    FieldValue::F64(1.0)
}

fn default_interpolation() -> FieldValue {
    FieldValue::Interpolation(Interpolation::Nearest)
}

fn default_render_mode() -> FieldValue {
    FieldValue::RenderMode(RenderMode::Mip)
}

fn validate_gamma(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::F64(g) if *g > 0.0 => Ok(()),
        _ => Err("gamma must be > 0".to_string()),
    }
}

fn validate_clim(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::Clim(None) => Ok(()),
        FieldValue::Clim(Some((min, max))) if min <= max => Ok(()),
        _ => Err("clim requires min <= max".to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/visuals.rs"]
mod tests;
