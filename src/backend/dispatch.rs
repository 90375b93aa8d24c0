//! Statically declared mapping from field updates to adaptor capability calls.
//!
//! Capabilities are verified when an adaptor is constructed, so the error
//! paths here only fire for a backend whose capability surface changed behind
//! the graph's back.

use crate::backend::adaptor::{
    CameraAdaptor, ImageAdaptor, NodeAdaptor, SceneAdaptor, VolumeAdaptor,
};
use crate::foundation::error::{VistraError, VistraResult};
use crate::scene::node::Update;

fn scene_cap(adaptor: &mut dyn NodeAdaptor) -> VistraResult<&mut dyn SceneAdaptor> {
    adaptor
        .as_scene()
        .ok_or_else(|| VistraError::missing_adaptor("scene capability".to_string()))
}

fn camera_cap(adaptor: &mut dyn NodeAdaptor) -> VistraResult<&mut dyn CameraAdaptor> {
    adaptor
        .as_camera()
        .ok_or_else(|| VistraError::missing_adaptor("camera capability".to_string()))
}

fn image_cap(adaptor: &mut dyn NodeAdaptor) -> VistraResult<&mut dyn ImageAdaptor> {
    adaptor
        .as_image()
        .ok_or_else(|| VistraError::missing_adaptor("image capability".to_string()))
}

fn volume_cap(adaptor: &mut dyn NodeAdaptor) -> VistraResult<&mut dyn VolumeAdaptor> {
    adaptor
        .as_volume()
        .ok_or_else(|| VistraError::missing_adaptor("volume capability".to_string()))
}

/// Invoke the capability setter corresponding to one validated field write.
pub(crate) fn dispatch_update(adaptor: &mut dyn NodeAdaptor, update: &Update) -> VistraResult<()> {
    match update {
        Update::Visible(v) => adaptor.set_visible(*v),
        Update::Opacity(v) => adaptor.set_opacity(*v),
        Update::Background(v) => scene_cap(adaptor)?.set_background(*v),
        Update::Position(v) => camera_cap(adaptor)?.set_position(*v),
        Update::Orientation(v) => camera_cap(adaptor)?.set_orientation(*v),
        Update::Zoom(v) => camera_cap(adaptor)?.set_zoom(*v),
        Update::Mode(v) => camera_cap(adaptor)?.set_mode(*v),
        Update::Interactive(v) => camera_cap(adaptor)?.set_interactive(*v),
        Update::ImageData(v) => image_cap(adaptor)?.set_data(v),
        Update::Gamma(v) => image_cap(adaptor)?.set_gamma(*v),
        Update::Interpolation(v) => image_cap(adaptor)?.set_interpolation(*v),
        Update::VolumeData(v) => volume_cap(adaptor)?.set_data(v),
        Update::RenderMode(v) => volume_cap(adaptor)?.set_render_mode(*v),
        // Shared between image and volume; route by whichever capability the
        // adaptor actually carries.
        Update::Colormap(v) => {
            if adaptor.as_image().is_some() {
                image_cap(adaptor)?.set_colormap(*v);
            } else {
                volume_cap(adaptor)?.set_colormap(*v);
            }
        }
        Update::Clim(v) => {
            if adaptor.as_image().is_some() {
                image_cap(adaptor)?.set_clim(*v);
            } else {
                volume_cap(adaptor)?.set_clim(*v);
            }
        }
    }
    Ok(())
}
