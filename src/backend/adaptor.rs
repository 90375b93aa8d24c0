use crate::backend::registry::BackendKind;
use crate::foundation::core::{Color, DMat3, DVec3, ScalarField2, ScalarField3};
use crate::foundation::error::{VistraError, VistraResult};
use crate::scene::camera::CameraMode;
use crate::scene::field::Fields;
use crate::scene::graph::NodeId;
use crate::scene::node::NodeKind;
use crate::scene::visuals::{Colormap, Interpolation, RenderMode};
use std::any::Any;
use std::sync::Arc;

/// Borrowed view of a node handed to a backend when it constructs an adaptor.
///
/// Exposes the node's current state so the adaptor is born synchronized; the
/// graph itself is not reachable from here, so a factory cannot re-enter it.
#[derive(Clone, Copy)]
pub struct NodeSnapshot<'a> {
    /// Handle of the node being adapted.
    pub id: NodeId,
    /// Concrete node kind.
    pub kind: NodeKind,
    /// Current field values.
    pub fields: &'a Fields,
}

/// Capability protocol every backend adaptor implements.
///
/// Structural calls are fallible so a backend can surface its own failure;
/// field setters are not — by the time one runs, the value has already been
/// validated and stored on the model side.
pub trait NodeAdaptor {
    /// Downcast hook; backends use it to reach a peer's native object inside
    /// [`NodeAdaptor::add_child`] / [`NodeAdaptor::remove_child`].
    fn as_any(&self) -> &dyn Any;
    /// Mutable downcast hook.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Reflect the node's `visible` field.
    fn set_visible(&mut self, visible: bool);
    /// Reflect the node's `opacity` field.
    fn set_opacity(&mut self, opacity: f64);

    /// Attach `child`'s backend representation under this node's.
    fn add_child(&mut self, child: &mut dyn NodeAdaptor) -> VistraResult<()>;
    /// Detach `child`'s backend representation.
    ///
    /// Called only for edges the graph believes linked; how to signal a child
    /// that was never linked is backend-defined, but the backend's own
    /// structure must stay intact either way.
    fn remove_child(&mut self, child: &mut dyn NodeAdaptor) -> VistraResult<()>;

    /// Scene capability, when this adaptor drives a scene node.
    fn as_scene(&mut self) -> Option<&mut dyn SceneAdaptor> {
        None
    }
    /// Camera capability, when this adaptor drives a camera node.
    fn as_camera(&mut self) -> Option<&mut dyn CameraAdaptor> {
        None
    }
    /// Image capability, when this adaptor drives an image node.
    fn as_image(&mut self) -> Option<&mut dyn ImageAdaptor> {
        None
    }
    /// Volume capability, when this adaptor drives a volume node.
    fn as_volume(&mut self) -> Option<&mut dyn VolumeAdaptor> {
        None
    }
}

/// Capabilities required of a scene adaptor.
pub trait SceneAdaptor {
    /// Reflect the scene's background color.
    fn set_background(&mut self, background: Color);
}

/// Capabilities required of a camera adaptor.
pub trait CameraAdaptor {
    /// Reflect a new viewpoint position.
    fn set_position(&mut self, position: DVec3);
    /// Reflect a new view orientation.
    fn set_orientation(&mut self, orientation: DMat3);
    /// Reflect a new zoom factor (always positive).
    fn set_zoom(&mut self, zoom: f64);
    /// Rewire interaction handlers for a new navigation mode.
    fn set_mode(&mut self, mode: CameraMode);
    /// Enable or disable user-driven navigation.
    fn set_interactive(&mut self, interactive: bool);
}

/// Capabilities required of an image adaptor.
pub trait ImageAdaptor {
    /// Reflect new sample data.
    fn set_data(&mut self, data: &Arc<ScalarField2>);
    /// Reflect a new colormap.
    fn set_colormap(&mut self, colormap: Colormap);
    /// Reflect new contrast limits.
    fn set_clim(&mut self, clim: Option<(f64, f64)>);
    /// Reflect a new gamma exponent (always positive).
    fn set_gamma(&mut self, gamma: f64);
    /// Reflect a new sampling mode.
    fn set_interpolation(&mut self, interpolation: Interpolation);
}

/// Capabilities required of a volume adaptor.
pub trait VolumeAdaptor {
    /// Reflect new sample data.
    fn set_data(&mut self, data: &Arc<ScalarField3>);
    /// Reflect a new colormap.
    fn set_colormap(&mut self, colormap: Colormap);
    /// Reflect new contrast limits.
    fn set_clim(&mut self, clim: Option<(f64, f64)>);
    /// Reflect a new projection mode.
    fn set_render_mode(&mut self, mode: RenderMode);
}

/// Check once, at construction time, that an adaptor carries the capability
/// its node kind requires.
pub(crate) fn verify_capabilities(
    node_kind: NodeKind,
    backend: BackendKind,
    adaptor: &mut dyn NodeAdaptor,
) -> VistraResult<()> {
    let satisfied = match node_kind {
        NodeKind::Scene => adaptor.as_scene().is_some(),
        NodeKind::Camera => adaptor.as_camera().is_some(),
        NodeKind::Image => adaptor.as_image().is_some(),
        NodeKind::Volume => adaptor.as_volume().is_some(),
    };
    if satisfied {
        Ok(())
    } else {
        Err(VistraError::missing_adaptor(format!(
            "backend '{backend}' adaptor lacks the {node_kind} capability"
        )))
    }
}
