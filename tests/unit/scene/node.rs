use super::*;
use crate::scene::camera;
use crate::scene::field::FieldKind;
use crate::scene::visuals;

#[test]
fn schema_chains_base_fields_first() {
    for kind in [
        NodeKind::Scene,
        NodeKind::Camera,
        NodeKind::Image,
        NodeKind::Volume,
    ] {
        let [base, own] = kind.schema();
        assert_eq!(base[0].name, VISIBLE);
        assert_eq!(base[1].name, OPACITY);
        assert!(!own.is_empty());
    }
}

#[test]
fn data_field_is_kind_typed() {
    let [_, image] = NodeKind::Image.schema();
    let [_, volume] = NodeKind::Volume.schema();
    let image_data = image.iter().find(|s| s.name == visuals::DATA).unwrap();
    let volume_data = volume.iter().find(|s| s.name == visuals::DATA).unwrap();
    assert_eq!(image_data.kind, FieldKind::Field2);
    assert_eq!(volume_data.kind, FieldKind::Field3);
}

#[test]
fn updates_name_their_fields() {
    assert_eq!(Update::Visible(false).field(), VISIBLE);
    assert_eq!(Update::Opacity(0.5).field(), OPACITY);
    assert_eq!(Update::Background(Color::WHITE).field(), BACKGROUND);
    assert_eq!(Update::Zoom(2.0).field(), camera::ZOOM);
    assert_eq!(Update::Interactive(false).field(), camera::INTERACTIVE);
    assert_eq!(
        Update::ImageData(Arc::new(ScalarField2::default())).field(),
        visuals::DATA
    );
    assert_eq!(
        Update::VolumeData(Arc::new(ScalarField3::default())).field(),
        visuals::DATA
    );
    assert_eq!(Update::RenderMode(RenderMode::Iso).field(), visuals::RENDER_MODE);
}

#[test]
fn update_values_carry_the_payload() {
    assert_eq!(Update::Zoom(2.5).value(), FieldValue::F64(2.5));
    assert_eq!(
        Update::Mode(CameraMode::Fly).value(),
        FieldValue::CameraMode(CameraMode::Fly)
    );
    assert_eq!(Update::Clim(None).value(), FieldValue::Clim(None));
}

#[test]
fn kind_display_names_are_stable() {
    assert_eq!(NodeKind::Scene.to_string(), "scene");
    assert_eq!(NodeKind::Camera.to_string(), "camera");
    assert_eq!(NodeKind::Image.to_string(), "image");
    assert_eq!(NodeKind::Volume.to_string(), "volume");
}
