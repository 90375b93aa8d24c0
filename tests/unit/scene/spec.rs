use super::*;
use crate::scene::camera;
use crate::scene::node::{self, NodeKind};
use crate::scene::visuals;

fn demo_spec() -> SceneSpec {
    let mut root = NodeSpec::new(NodeSpecKind::Scene {
        background: Color::WHITE,
    });
    let mut cam = NodeSpec::new(NodeSpecKind::Camera {
        position: DVec3::new(0.0, 0.0, 5.0),
        orientation: DMat3::IDENTITY,
        zoom: 2.0,
        mode: CameraMode::Arcball,
        interactive: true,
    });
    cam.visible = true;
    let mut img = NodeSpec::new(NodeSpecKind::Image {
        data: ScalarField2::new(2, 1, vec![0.0, 1.0]).unwrap(),
        colormap: Colormap::Viridis,
        clim: Some((0.0, 1.0)),
        gamma: 1.0,
        interpolation: Interpolation::Linear,
    });
    img.opacity = 0.5;
    root.children.push(cam);
    root.children.push(img);
    SceneSpec { root }
}

#[test]
fn json_round_trip_preserves_the_tree() {
    let spec = demo_spec();
    let json = serde_json::to_string(&spec).unwrap();
    let parsed = SceneSpec::from_reader(json.as_bytes()).unwrap();
    assert_eq!(
        serde_json::to_value(&spec).unwrap(),
        serde_json::to_value(&parsed).unwrap()
    );
}

#[test]
fn omitted_json_fields_take_schema_defaults() {
    let spec = SceneSpec::from_reader(r#"{"root": {"kind": {"camera": {}}}}"#.as_bytes()).unwrap();
    let mut graph = SceneGraph::new();
    let root = spec.instantiate(&mut graph).unwrap();
    assert_eq!(graph.kind(root).unwrap(), NodeKind::Camera);
    assert_eq!(
        graph.get(root, camera::ZOOM).unwrap().as_f64(),
        Some(1.0)
    );
    assert_eq!(
        graph.get(root, node::VISIBLE).unwrap().as_bool(),
        Some(true)
    );
}

#[test]
fn instantiate_builds_the_declared_tree() {
    let mut graph = SceneGraph::new();
    let root = demo_spec().instantiate(&mut graph).unwrap();

    assert_eq!(graph.kind(root).unwrap(), NodeKind::Scene);
    let children = graph.children(root).unwrap().to_vec();
    assert_eq!(children.len(), 2);
    assert_eq!(graph.kind(children[0]).unwrap(), NodeKind::Camera);
    assert_eq!(graph.kind(children[1]).unwrap(), NodeKind::Image);
    assert_eq!(
        graph.get(children[0], camera::ZOOM).unwrap().as_f64(),
        Some(2.0)
    );
    assert_eq!(
        graph.get(children[1], node::OPACITY).unwrap().as_f64(),
        Some(0.5)
    );
    assert_eq!(
        graph
            .get(children[1], visuals::COLORMAP)
            .unwrap()
            .as_colormap(),
        Some(Colormap::Viridis)
    );
}

#[test]
fn invalid_specs_roll_back_every_created_node() {
    let mut spec = demo_spec();
    if let NodeSpecKind::Camera { zoom, .. } = &mut spec.root.children[0].kind {
        *zoom = -1.0;
    }

    let mut graph = SceneGraph::new();
    let bystander = graph.spawn_scene();
    let err = spec.instantiate(&mut graph).unwrap_err();
    assert!(matches!(err, VistraError::Validation(_)));
    assert_eq!(graph.len(), 1);
    assert!(graph.contains(bystander));
}

#[test]
fn validate_uses_a_scratch_graph() {
    assert!(demo_spec().validate().is_ok());
    let mut bad = demo_spec();
    bad.root.opacity = 7.0;
    assert!(bad.validate().is_err());
}
