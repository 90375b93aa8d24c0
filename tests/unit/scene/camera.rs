use super::*;
use crate::scene::field::{FieldValue, Fields};
use crate::scene::node::NodeKind;

#[test]
fn defaults_match_the_contract() {
    let fields = Fields::from_schema(NodeKind::Camera.schema());
    assert_eq!(fields.get(POSITION), Some(&FieldValue::Vec3(DVec3::ZERO)));
    assert_eq!(
        fields.get(ORIENTATION),
        Some(&FieldValue::Mat3(DMat3::IDENTITY))
    );
    assert_eq!(fields.get(ZOOM), Some(&FieldValue::F64(1.0)));
    assert_eq!(
        fields.get(MODE),
        Some(&FieldValue::CameraMode(CameraMode::PanZoom))
    );
    assert_eq!(fields.get(INTERACTIVE), Some(&FieldValue::Bool(true)));
}

#[test]
fn zoom_must_be_positive() {
    let mut fields = Fields::from_schema(NodeKind::Camera.schema());
    assert!(fields.set(ZOOM, FieldValue::F64(0.25)).is_ok());
    assert!(fields.set(ZOOM, FieldValue::F64(0.0)).is_err());
    assert!(fields.set(ZOOM, FieldValue::F64(-1.0)).is_err());
    assert_eq!(fields.get(ZOOM), Some(&FieldValue::F64(0.25)));
}

#[test]
fn mode_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&CameraMode::PanZoom).unwrap(),
        "\"pan_zoom\""
    );
    assert_eq!(
        serde_json::from_str::<CameraMode>("\"arcball\"").unwrap(),
        CameraMode::Arcball
    );
}
