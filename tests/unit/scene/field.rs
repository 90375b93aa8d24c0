use super::*;
use crate::scene::camera;
use crate::scene::node::{self, NodeKind};
use crate::scene::visuals;

fn camera_fields() -> Fields {
    Fields::from_schema(NodeKind::Camera.schema())
}

#[test]
fn storage_is_seeded_from_schema_defaults() {
    let fields = camera_fields();
    assert_eq!(fields.get(node::VISIBLE), Some(&FieldValue::Bool(true)));
    assert_eq!(fields.get(node::OPACITY), Some(&FieldValue::F64(1.0)));
    assert_eq!(fields.get(camera::ZOOM), Some(&FieldValue::F64(1.0)));
    assert_eq!(fields.get("no_such_field"), None);
}

#[test]
fn spec_lookup_covers_base_and_kind_fields() {
    let fields = camera_fields();
    assert!(fields.spec(node::VISIBLE).is_some());
    assert!(fields.spec(camera::POSITION).is_some());
    assert!(fields.spec(visuals::DATA).is_none());
    assert_eq!(fields.specs().count(), 7);
}

#[test]
fn set_rejects_unknown_field() {
    let mut fields = camera_fields();
    let err = fields
        .set("frobnicate", FieldValue::Bool(true))
        .unwrap_err();
    assert!(err.to_string().contains("no field named"));
}

#[test]
fn set_rejects_type_mismatch_and_keeps_prior_value() {
    let mut fields = camera_fields();
    let err = fields.set(camera::ZOOM, FieldValue::Bool(true)).unwrap_err();
    assert!(err.to_string().contains("expects"));
    assert_eq!(fields.get(camera::ZOOM), Some(&FieldValue::F64(1.0)));
}

#[test]
fn set_runs_validators_and_keeps_prior_value_on_failure() {
    let mut fields = camera_fields();
    fields.set(camera::ZOOM, FieldValue::F64(2.5)).unwrap();
    let err = fields.set(camera::ZOOM, FieldValue::F64(-1.0)).unwrap_err();
    assert!(err.to_string().contains("zoom must be > 0"));
    assert_eq!(fields.get(camera::ZOOM), Some(&FieldValue::F64(2.5)));
}

#[test]
fn value_kind_tags_match_accessors() {
    assert_eq!(FieldValue::Bool(true).kind(), FieldKind::Bool);
    assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
    assert_eq!(FieldValue::Bool(true).as_f64(), None);
    assert_eq!(FieldValue::Clim(Some((0.0, 1.0))).kind(), FieldKind::Clim);
    assert_eq!(
        FieldValue::Clim(Some((0.0, 1.0))).as_clim(),
        Some(Some((0.0, 1.0)))
    );
}
