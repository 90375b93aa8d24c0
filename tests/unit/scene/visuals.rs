use super::*;
use crate::scene::field::{FieldValue, Fields};
use crate::scene::node::NodeKind;

#[test]
fn image_defaults() {
    let fields = Fields::from_schema(NodeKind::Image.schema());
    assert_eq!(
        fields.get(COLORMAP),
        Some(&FieldValue::Colormap(Colormap::Gray))
    );
    assert_eq!(fields.get(CLIM), Some(&FieldValue::Clim(None)));
    assert_eq!(fields.get(GAMMA), Some(&FieldValue::F64(1.0)));
    assert_eq!(
        fields.get(INTERPOLATION),
        Some(&FieldValue::Interpolation(Interpolation::Nearest))
    );
    assert!(fields.get(RENDER_MODE).is_none());
}

#[test]
fn volume_defaults() {
    let fields = Fields::from_schema(NodeKind::Volume.schema());
    assert_eq!(
        fields.get(RENDER_MODE),
        Some(&FieldValue::RenderMode(RenderMode::Mip))
    );
    assert!(fields.get(GAMMA).is_none());
    assert!(fields.get(INTERPOLATION).is_none());
}

#[test]
fn gamma_must_be_positive() {
    let mut fields = Fields::from_schema(NodeKind::Image.schema());
    assert!(fields.set(GAMMA, FieldValue::F64(2.2)).is_ok());
    let err = fields.set(GAMMA, FieldValue::F64(0.0)).unwrap_err();
    assert!(err.to_string().contains("gamma must be > 0"));
    assert_eq!(fields.get(GAMMA), Some(&FieldValue::F64(2.2)));
}

#[test]
fn clim_requires_ordered_bounds() {
    let mut fields = Fields::from_schema(NodeKind::Volume.schema());
    assert!(fields.set(CLIM, FieldValue::Clim(Some((0.0, 1.0)))).is_ok());
    assert!(fields.set(CLIM, FieldValue::Clim(Some((1.0, 1.0)))).is_ok());
    assert!(fields.set(CLIM, FieldValue::Clim(None)).is_ok());
    let err = fields
        .set(CLIM, FieldValue::Clim(Some((2.0, 1.0))))
        .unwrap_err();
    assert!(err.to_string().contains("min <= max"));
}
