//! Built-in render-nothing backend.
//!
//! Its adaptors mirror the model state they receive (field values and child
//! order) without touching any rendering API, which makes the backend useful
//! for wiring smoke-checks, tests, and as a reference implementation of the
//! adaptor contract.

use crate::backend::adaptor::{
    CameraAdaptor, ImageAdaptor, NodeAdaptor, NodeSnapshot, SceneAdaptor, VolumeAdaptor,
};
use crate::backend::registry::{Backend, BackendKind};
use crate::foundation::core::{Color, DMat3, DVec3, ScalarField2, ScalarField3};
use crate::foundation::error::{VistraError, VistraResult};
use crate::scene::camera::{self, CameraMode};
use crate::scene::field::FieldValue;
use crate::scene::graph::NodeId;
use crate::scene::node::{self, NodeKind};
use crate::scene::visuals::{self, Colormap, Interpolation, RenderMode};
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

/// Mirrored scene state.
#[derive(Clone, Copy, Debug)]
pub struct SceneState {
    pub background: Color,
}

/// Mirrored camera state.
#[derive(Clone, Copy, Debug)]
pub struct CameraState {
    pub position: DVec3,
    pub orientation: DMat3,
    pub zoom: f64,
    pub mode: CameraMode,
    pub interactive: bool,
}

/// Mirrored image state.
#[derive(Clone, Debug)]
pub struct ImageState {
    pub data: Arc<ScalarField2>,
    pub colormap: Colormap,
    pub clim: Option<(f64, f64)>,
    pub gamma: f64,
    pub interpolation: Interpolation,
}

/// Mirrored volume state.
#[derive(Clone, Debug)]
pub struct VolumeState {
    pub data: Arc<ScalarField3>,
    pub colormap: Colormap,
    pub clim: Option<(f64, f64)>,
    pub render_mode: RenderMode,
}

/// Adaptor of the headless backend: a passive mirror of one node.
pub struct HeadlessAdaptor {
    id: NodeId,
    kind: NodeKind,
    visible: bool,
    opacity: f64,
    children: Vec<NodeId>,
    scene: Option<SceneState>,
    camera: Option<CameraState>,
    image: Option<ImageState>,
    volume: Option<VolumeState>,
}

impl HeadlessAdaptor {
    fn from_snapshot(snapshot: NodeSnapshot<'_>) -> Self {
        let fields = snapshot.fields;
        let visible = fields
            .get(node::VISIBLE)
            .and_then(FieldValue::as_bool)
            .unwrap_or(true);
        let opacity = fields
            .get(node::OPACITY)
            .and_then(FieldValue::as_f64)
            .unwrap_or(1.0);
        let mut adaptor = Self {
            id: snapshot.id,
            kind: snapshot.kind,
            visible,
            opacity,
            children: Vec::new(),
            scene: None,
            camera: None,
            image: None,
            volume: None,
        };
        match snapshot.kind {
            NodeKind::Scene => {
                adaptor.scene = Some(SceneState {
                    background: fields
                        .get(node::BACKGROUND)
                        .and_then(FieldValue::as_color)
                        .unwrap_or_default(),
                });
            }
            NodeKind::Camera => {
                adaptor.camera = Some(CameraState {
                    position: fields
                        .get(camera::POSITION)
                        .and_then(FieldValue::as_vec3)
                        .unwrap_or(DVec3::ZERO),
                    orientation: fields
                        .get(camera::ORIENTATION)
                        .and_then(FieldValue::as_mat3)
                        .unwrap_or(DMat3::IDENTITY),
                    zoom: fields
                        .get(camera::ZOOM)
                        .and_then(FieldValue::as_f64)
                        .unwrap_or(1.0),
                    mode: fields
                        .get(camera::MODE)
                        .and_then(FieldValue::as_camera_mode)
                        .unwrap_or_default(),
                    interactive: fields
                        .get(camera::INTERACTIVE)
                        .and_then(FieldValue::as_bool)
                        .unwrap_or(true),
                });
            }
            NodeKind::Image => {
                adaptor.image = Some(ImageState {
                    data: fields
                        .get(visuals::DATA)
                        .and_then(FieldValue::as_field2)
                        .cloned()
                        .unwrap_or_default(),
                    colormap: fields
                        .get(visuals::COLORMAP)
                        .and_then(FieldValue::as_colormap)
                        .unwrap_or_default(),
                    clim: fields
                        .get(visuals::CLIM)
                        .and_then(FieldValue::as_clim)
                        .unwrap_or(None),
                    gamma: fields
                        .get(visuals::GAMMA)
                        .and_then(FieldValue::as_f64)
                        .unwrap_or(1.0),
                    interpolation: fields
                        .get(visuals::INTERPOLATION)
                        .and_then(FieldValue::as_interpolation)
                        .unwrap_or_default(),
                });
            }
            NodeKind::Volume => {
                adaptor.volume = Some(VolumeState {
                    data: fields
                        .get(visuals::DATA)
                        .and_then(FieldValue::as_field3)
                        .cloned()
                        .unwrap_or_default(),
                    colormap: fields
                        .get(visuals::COLORMAP)
                        .and_then(FieldValue::as_colormap)
                        .unwrap_or_default(),
                    clim: fields
                        .get(visuals::CLIM)
                        .and_then(FieldValue::as_clim)
                        .unwrap_or(None),
                    render_mode: fields
                        .get(visuals::RENDER_MODE)
                        .and_then(FieldValue::as_render_mode)
                        .unwrap_or_default(),
                });
            }
        }
        adaptor
    }

    /// Handle of the mirrored node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Kind of the mirrored node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Mirrored `visible` value.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Mirrored `opacity` value.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Linked children, in link order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Mirrored scene state, when this adapts a scene.
    pub fn scene(&self) -> Option<&SceneState> {
        self.scene.as_ref()
    }

    /// Mirrored camera state, when this adapts a camera.
    pub fn camera(&self) -> Option<&CameraState> {
        self.camera.as_ref()
    }

    /// Mirrored image state, when this adapts an image.
    pub fn image(&self) -> Option<&ImageState> {
        self.image.as_ref()
    }

    /// Mirrored volume state, when this adapts a volume.
    pub fn volume(&self) -> Option<&VolumeState> {
        self.volume.as_ref()
    }
}

impl NodeAdaptor for HeadlessAdaptor {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn add_child(&mut self, child: &mut dyn NodeAdaptor) -> VistraResult<()> {
        let child = child
            .as_any()
            .downcast_ref::<HeadlessAdaptor>()
            .ok_or_else(|| {
                VistraError::validation("headless adaptor received a foreign child".to_string())
            })?;
        self.children.push(child.id);
        Ok(())
    }

    fn remove_child(&mut self, child: &mut dyn NodeAdaptor) -> VistraResult<()> {
        let child = child
            .as_any()
            .downcast_ref::<HeadlessAdaptor>()
            .ok_or_else(|| {
                VistraError::validation("headless adaptor received a foreign child".to_string())
            })?;
        let pos = self.children.iter().position(|c| *c == child.id).ok_or_else(|| {
            VistraError::not_found(format!("{} was never linked here", child.id))
        })?;
        self.children.remove(pos);
        Ok(())
    }

    fn as_scene(&mut self) -> Option<&mut dyn SceneAdaptor> {
        if self.scene.is_some() { Some(self) } else { None }
    }

    fn as_camera(&mut self) -> Option<&mut dyn CameraAdaptor> {
        if self.camera.is_some() { Some(self) } else { None }
    }

    fn as_image(&mut self) -> Option<&mut dyn ImageAdaptor> {
        if self.image.is_some() { Some(self) } else { None }
    }

    fn as_volume(&mut self) -> Option<&mut dyn VolumeAdaptor> {
        if self.volume.is_some() { Some(self) } else { None }
    }
}

impl SceneAdaptor for HeadlessAdaptor {
    fn set_background(&mut self, background: Color) {
        if let Some(scene) = &mut self.scene {
            scene.background = background;
        }
    }
}

impl CameraAdaptor for HeadlessAdaptor {
    fn set_position(&mut self, position: DVec3) {
        if let Some(camera) = &mut self.camera {
            camera.position = position;
        }
    }

    fn set_orientation(&mut self, orientation: DMat3) {
        if let Some(camera) = &mut self.camera {
            camera.orientation = orientation;
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        if let Some(camera) = &mut self.camera {
            camera.zoom = zoom;
        }
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if let Some(camera) = &mut self.camera {
            camera.mode = mode;
        }
    }

    fn set_interactive(&mut self, interactive: bool) {
        if let Some(camera) = &mut self.camera {
            camera.interactive = interactive;
        }
    }
}

impl ImageAdaptor for HeadlessAdaptor {
    fn set_data(&mut self, data: &Arc<ScalarField2>) {
        if let Some(image) = &mut self.image {
            image.data = Arc::clone(data);
        }
    }

    fn set_colormap(&mut self, colormap: Colormap) {
        if let Some(image) = &mut self.image {
            image.colormap = colormap;
        }
    }

    fn set_clim(&mut self, clim: Option<(f64, f64)>) {
        if let Some(image) = &mut self.image {
            image.clim = clim;
        }
    }

    fn set_gamma(&mut self, gamma: f64) {
        if let Some(image) = &mut self.image {
            image.gamma = gamma;
        }
    }

    fn set_interpolation(&mut self, interpolation: Interpolation) {
        if let Some(image) = &mut self.image {
            image.interpolation = interpolation;
        }
    }
}

impl VolumeAdaptor for HeadlessAdaptor {
    fn set_data(&mut self, data: &Arc<ScalarField3>) {
        if let Some(volume) = &mut self.volume {
            volume.data = Arc::clone(data);
        }
    }

    fn set_colormap(&mut self, colormap: Colormap) {
        if let Some(volume) = &mut self.volume {
            volume.colormap = colormap;
        }
    }

    fn set_clim(&mut self, clim: Option<(f64, f64)>) {
        if let Some(volume) = &mut self.volume {
            volume.clim = clim;
        }
    }

    fn set_render_mode(&mut self, mode: RenderMode) {
        if let Some(volume) = &mut self.volume {
            volume.render_mode = mode;
        }
    }
}

/// The built-in headless backend (always available).
#[derive(Default, Debug)]
pub struct HeadlessBackend {
    built: Rc<Cell<usize>>,
}

impl HeadlessBackend {
    /// Create a headless backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter of adaptor constructions.
    ///
    /// Clone the handle before registering the backend to observe lazy
    /// construction from the outside.
    pub fn built_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.built)
    }
}

impl Backend for HeadlessBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::HEADLESS
    }

    fn create_adaptor(&mut self, node: NodeSnapshot<'_>) -> VistraResult<Box<dyn NodeAdaptor>> {
        self.built.set(self.built.get() + 1);
        Ok(Box::new(HeadlessAdaptor::from_snapshot(node)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/headless.rs"]
mod tests;
