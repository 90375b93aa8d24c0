use crate::foundation::core::{Color, DMat3, DVec3, ScalarField2, ScalarField3};
use crate::scene::camera::{self, CameraMode};
use crate::scene::field::{FieldKind, FieldSpec, FieldValue};
use crate::scene::visuals::{self, Colormap, Interpolation, RenderMode};
use std::sync::Arc;

/// Concrete node kinds of the visual model tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root-like container a backend renders as a unit.
    Scene,
    /// Viewpoint, projection and interaction policy for a scene.
    Camera,
    /// 2D scalar grid drawn through a colormap.
    Image,
    /// 3D scalar grid drawn through a colormap and render mode.
    Volume,
}

impl NodeKind {
    /// Static field schema for this kind: base node fields, then kind fields.
    pub fn schema(self) -> [&'static [FieldSpec]; 2] {
        let own = match self {
            Self::Scene => SCENE_FIELDS,
            Self::Camera => camera::CAMERA_FIELDS,
            Self::Image => visuals::IMAGE_FIELDS,
            Self::Volume => visuals::VOLUME_FIELDS,
        };
        [BASE_FIELDS, own]
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scene => "scene",
            Self::Camera => "camera",
            Self::Image => "image",
            Self::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Field name: draw flag shared by all node kinds.
pub const VISIBLE: &str = "visible";
/// Field name: opacity shared by all node kinds.
pub const OPACITY: &str = "opacity";
/// Field name: scene background color.
pub const BACKGROUND: &str = "background";

/// Fields every node kind declares.
pub static BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: VISIBLE,
        kind: FieldKind::Bool,
        default: default_visible,
        description: "Whether the node and its subtree are drawn.",
        validate: None,
    },
    FieldSpec {
        name: OPACITY,
        kind: FieldKind::F64,
        default: default_opacity,
        description: "Opacity in [0, 1], composed down the subtree.",
        validate: Some(validate_opacity),
    },
];

/// Fields the scene kind declares on top of the base set.
pub static SCENE_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: BACKGROUND,
    kind: FieldKind::Color,
    default: default_background,
    description: "Clear color behind all scene content.",
    validate: None,
}];

fn default_visible() -> FieldValue {
    FieldValue::Bool(true)
}

fn default_opacity() -> FieldValue {
    FieldValue::F64(1.0)
}

fn default_background() -> FieldValue {
    FieldValue::Color(Color::BLACK)
}

fn validate_opacity(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::F64(o) if (0.0..=1.0).contains(o) => Ok(()),
        _ => Err("opacity must be within [0, 1]".to_string()),
    }
}

/// A typed field write.
///
/// One variant per declared field, so the mapping from field to backend setter
/// is a statically checked `match` rather than a name lookup. Applying an
/// update to a kind that does not declare the field fails with a validation
/// error and dispatches nothing.
#[derive(Clone, Debug)]
pub enum Update {
    /// `visible` on any kind.
    Visible(bool),
    /// `opacity` on any kind.
    Opacity(f64),
    /// `background` on a scene.
    Background(Color),
    /// `position` on a camera.
    Position(DVec3),
    /// `orientation` on a camera.
    Orientation(DMat3),
    /// `zoom` on a camera.
    Zoom(f64),
    /// `mode` on a camera.
    Mode(CameraMode),
    /// `interactive` on a camera.
    Interactive(bool),
    /// `data` on an image.
    ImageData(Arc<ScalarField2>),
    /// `colormap` on an image or volume.
    Colormap(Colormap),
    /// `clim` on an image or volume.
    Clim(Option<(f64, f64)>),
    /// `gamma` on an image.
    Gamma(f64),
    /// `interpolation` on an image.
    Interpolation(Interpolation),
    /// `data` on a volume.
    VolumeData(Arc<ScalarField3>),
    /// `render_mode` on a volume.
    RenderMode(RenderMode),
}

impl Update {
    /// Name of the field this update writes.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Visible(_) => VISIBLE,
            Self::Opacity(_) => OPACITY,
            Self::Background(_) => BACKGROUND,
            Self::Position(_) => camera::POSITION,
            Self::Orientation(_) => camera::ORIENTATION,
            Self::Zoom(_) => camera::ZOOM,
            Self::Mode(_) => camera::MODE,
            Self::Interactive(_) => camera::INTERACTIVE,
            Self::ImageData(_) | Self::VolumeData(_) => visuals::DATA,
            Self::Colormap(_) => visuals::COLORMAP,
            Self::Clim(_) => visuals::CLIM,
            Self::Gamma(_) => visuals::GAMMA,
            Self::Interpolation(_) => visuals::INTERPOLATION,
            Self::RenderMode(_) => visuals::RENDER_MODE,
        }
    }

    /// The written value, in storage form.
    pub(crate) fn value(&self) -> FieldValue {
        match self {
            Self::Visible(v) | Self::Interactive(v) => FieldValue::Bool(*v),
            Self::Opacity(v) | Self::Zoom(v) | Self::Gamma(v) => FieldValue::F64(*v),
            Self::Background(v) => FieldValue::Color(*v),
            Self::Position(v) => FieldValue::Vec3(*v),
            Self::Orientation(v) => FieldValue::Mat3(*v),
            Self::Mode(v) => FieldValue::CameraMode(*v),
            Self::ImageData(v) => FieldValue::Field2(Arc::clone(v)),
            Self::Colormap(v) => FieldValue::Colormap(*v),
            Self::Clim(v) => FieldValue::Clim(*v),
            Self::Interpolation(v) => FieldValue::Interpolation(*v),
            Self::VolumeData(v) => FieldValue::Field3(Arc::clone(v)),
            Self::RenderMode(v) => FieldValue::RenderMode(*v),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
