use super::*;
use crate::scene::field::Fields;
use crate::scene::graph::SceneGraph;

fn adaptor(graph: &mut SceneGraph, kind: NodeKind) -> HeadlessAdaptor {
    let id = match kind {
        NodeKind::Scene => graph.spawn_scene(),
        NodeKind::Camera => graph.spawn_camera(),
        NodeKind::Image => graph.spawn_image(ScalarField2::default()),
        NodeKind::Volume => graph.spawn_volume(ScalarField3::default()),
    };
    let fields = Fields::from_schema(kind.schema());
    HeadlessAdaptor::from_snapshot(NodeSnapshot {
        id,
        kind,
        fields: &fields,
    })
}

#[test]
fn construction_mirrors_field_defaults() {
    let mut graph = SceneGraph::new();
    let scene = adaptor(&mut graph, NodeKind::Scene);
    assert!(scene.visible());
    assert_eq!(scene.opacity(), 1.0);
    assert_eq!(scene.scene().unwrap().background, Color::BLACK);

    let camera = adaptor(&mut graph, NodeKind::Camera);
    let state = camera.camera().unwrap();
    assert_eq!(state.position, DVec3::ZERO);
    assert_eq!(state.orientation, DMat3::IDENTITY);
    assert_eq!(state.zoom, 1.0);
    assert_eq!(state.mode, CameraMode::PanZoom);
    assert!(state.interactive);
}

#[test]
fn capability_accessors_follow_the_kind() {
    let mut graph = SceneGraph::new();
    let mut scene = adaptor(&mut graph, NodeKind::Scene);
    let mut camera = adaptor(&mut graph, NodeKind::Camera);
    let mut image = adaptor(&mut graph, NodeKind::Image);
    let mut volume = adaptor(&mut graph, NodeKind::Volume);
    assert!(scene.as_scene().is_some());
    assert!(scene.as_camera().is_none());
    assert!(camera.as_camera().is_some());
    assert!(camera.as_image().is_none());
    assert!(image.as_image().is_some());
    assert!(image.as_volume().is_none());
    assert!(volume.as_volume().is_some());
    assert!(volume.as_scene().is_none());
}

#[test]
fn setters_update_the_mirror() {
    let mut graph = SceneGraph::new();
    let mut scene = adaptor(&mut graph, NodeKind::Scene);
    scene.set_visible(false);
    scene.set_opacity(0.25);
    scene.set_background(Color::WHITE);
    assert!(!scene.visible());
    assert_eq!(scene.opacity(), 0.25);
    assert_eq!(scene.scene().unwrap().background, Color::WHITE);

    let mut camera = adaptor(&mut graph, NodeKind::Camera);
    camera.set_zoom(4.0);
    camera.set_mode(CameraMode::Fly);
    camera.set_interactive(false);
    let state = camera.camera().unwrap();
    assert_eq!(state.zoom, 4.0);
    assert_eq!(state.mode, CameraMode::Fly);
    assert!(!state.interactive);
}

#[test]
fn children_link_and_unlink_by_identity() {
    let mut graph = SceneGraph::new();
    let mut parent = adaptor(&mut graph, NodeKind::Scene);
    let mut child = adaptor(&mut graph, NodeKind::Camera);
    parent.add_child(&mut child).unwrap();
    assert_eq!(parent.children(), &[child.id()]);

    parent.remove_child(&mut child).unwrap();
    assert!(parent.children().is_empty());
}

#[test]
fn removing_a_never_linked_child_signals_not_found_without_corruption() {
    let mut graph = SceneGraph::new();
    let mut parent = adaptor(&mut graph, NodeKind::Scene);
    let mut linked = adaptor(&mut graph, NodeKind::Camera);
    let mut stranger = adaptor(&mut graph, NodeKind::Camera);
    parent.add_child(&mut linked).unwrap();

    let err = parent.remove_child(&mut stranger).unwrap_err();
    assert!(matches!(err, VistraError::NotFound(_)));
    assert_eq!(parent.children(), &[linked.id()]);
}

struct ForeignAdaptor;

impl NodeAdaptor for ForeignAdaptor {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
    fn set_visible(&mut self, _visible: bool) {}
    fn set_opacity(&mut self, _opacity: f64) {}
    fn add_child(&mut self, _child: &mut dyn NodeAdaptor) -> VistraResult<()> {
        Ok(())
    }
    fn remove_child(&mut self, _child: &mut dyn NodeAdaptor) -> VistraResult<()> {
        Ok(())
    }
}

#[test]
fn foreign_children_are_rejected() {
    let mut graph = SceneGraph::new();
    let mut parent = adaptor(&mut graph, NodeKind::Scene);
    let err = parent.add_child(&mut ForeignAdaptor).unwrap_err();
    assert!(matches!(err, VistraError::Validation(_)));
}
