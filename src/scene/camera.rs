use crate::foundation::core::{DMat3, DVec3};
use crate::scene::field::{FieldKind, FieldSpec, FieldValue};

/// Interactive navigation mode of a camera.
///
/// Mode changes are dispatched through a dedicated capability call because
/// interaction wiring is backend-specific, not a plain value to copy over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// 2D pan/zoom navigation.
    #[default]
    PanZoom,
    /// Orbit navigation around a center point.
    Arcball,
    /// Free-flight navigation.
    Fly,
}

/// Field name: viewpoint position.
pub const POSITION: &str = "position";
/// Field name: view orientation.
pub const ORIENTATION: &str = "orientation";
/// Field name: zoom factor.
pub const ZOOM: &str = "zoom";
/// Field name: navigation mode.
pub const MODE: &str = "mode";
/// Field name: whether user interaction drives the camera.
pub const INTERACTIVE: &str = "interactive";

/// Fields the camera kind declares on top of the base set.
///
/// A camera deliberately folds three concerns into one node: the view
/// transform (position, orientation), the projection (zoom) and the user
/// interaction policy (mode, interactive).
pub static CAMERA_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: POSITION,
        kind: FieldKind::Vec3,
        default: default_position,
        description: "Position of the viewpoint in scene coordinates.",
        validate: None,
    },
    FieldSpec {
        name: ORIENTATION,
        kind: FieldKind::Mat3,
        default: default_orientation,
        description: "Orientation of the view onto the scene.",
        validate: None,
    },
    FieldSpec {
        name: ZOOM,
        kind: FieldKind::F64,
        default: default_zoom,
        description: "Zoom factor: data units per screen pixel before transform.",
        validate: Some(validate_zoom),
    },
    FieldSpec {
        name: MODE,
        kind: FieldKind::CameraMode,
        default: default_mode,
        description: "Interactive navigation mode.",
        validate: None,
    },
    FieldSpec {
        name: INTERACTIVE,
        kind: FieldKind::Bool,
        default: default_interactive,
        description: "Whether mouse/keyboard input drives the camera.",
        validate: None,
    },
];

fn default_position() -> FieldValue {
    FieldValue::Vec3(DVec3::ZERO)
}

fn default_orientation() -> FieldValue {
    FieldValue::Mat3(DMat3::IDENTITY)
}

fn default_zoom() -> FieldValue {
    FieldValue::F64(1.0)
}

fn default_mode() -> FieldValue {
    FieldValue::CameraMode(CameraMode::PanZoom)
}

fn default_interactive() -> FieldValue {
    FieldValue::Bool(true)
}

fn validate_zoom(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::F64(z) if *z > 0.0 => Ok(()),
        _ => Err("zoom must be > 0".to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
