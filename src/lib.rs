//! Vistra is a backend-agnostic declarative scene graph for scientific
//! visualization.
//!
//! Applications build a tree of typed visual model nodes (scene, camera,
//! image, volume) and mutate it through validated field writes; rendering
//! backends attach through a capability-checked adaptor protocol and receive
//! every change synchronously, exactly once per attached backend:
//!
//! - Build nodes with [`SceneGraph::spawn_scene`] and friends, wire the tree
//!   with [`SceneGraph::add_child`]
//! - Register a [`Backend`] and attach it with [`SceneGraph::attach`]
//! - Mutate fields with [`SceneGraph::set`] and a typed [`Update`]
#![forbid(unsafe_code)]

pub mod backend;
mod foundation;
pub mod scene;

pub use crate::foundation::core::{Color, DMat3, DVec3, ScalarField2, ScalarField3};
pub use crate::foundation::error::{VistraError, VistraResult};

pub use crate::backend::adaptor::{
    CameraAdaptor, ImageAdaptor, NodeAdaptor, NodeSnapshot, SceneAdaptor, VolumeAdaptor,
};
pub use crate::backend::headless::HeadlessBackend;
pub use crate::backend::registry::{Backend, BackendKind, create_backend};
pub use crate::scene::camera::CameraMode;
pub use crate::scene::field::{FieldKind, FieldSpec, FieldValue, Fields};
pub use crate::scene::graph::{NodeId, SceneGraph};
pub use crate::scene::node::{NodeKind, Update};
pub use crate::scene::spec::{NodeSpec, NodeSpecKind, SceneSpec};
pub use crate::scene::visuals::{Colormap, Interpolation, RenderMode};
