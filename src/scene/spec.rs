use crate::foundation::core::{Color, DMat3, DVec3, ScalarField2, ScalarField3};
use crate::foundation::error::{VistraError, VistraResult};
use crate::scene::camera::CameraMode;
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::node::Update;
use crate::scene::visuals::{Colormap, Interpolation, RenderMode};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON-facing representation of a scene tree.
///
/// This is the interchange form of a graph: human-editable, serde
/// round-trippable, and instantiated through the same validated write path as
/// manual construction, so a malformed spec fails with the same error
/// taxonomy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    /// Root of the declared tree.
    pub root: NodeSpec,
}

/// One declared node: common fields plus a kind-specific payload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    /// Kind payload.
    pub kind: NodeSpecKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Declare a node of `kind` with default common fields and no children.
    pub fn new(kind: NodeSpecKind) -> Self {
        Self {
            kind,
            visible: default_visible(),
            opacity: default_opacity(),
            children: Vec::new(),
        }
    }
}

/// Kind-specific declared fields. Omitted fields take the schema defaults.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpecKind {
    Scene {
        #[serde(default)]
        background: Color,
    },
    Camera {
        #[serde(default)]
        position: DVec3,
        #[serde(default = "default_orientation")]
        orientation: DMat3,
        #[serde(default = "default_zoom")]
        zoom: f64,
        #[serde(default)]
        mode: CameraMode,
        #[serde(default = "default_interactive")]
        interactive: bool,
    },
    Image {
        data: ScalarField2,
        #[serde(default)]
        colormap: Colormap,
        #[serde(default)]
        clim: Option<(f64, f64)>,
        #[serde(default = "default_gamma")]
        gamma: f64,
        #[serde(default)]
        interpolation: Interpolation,
    },
    Volume {
        data: ScalarField3,
        #[serde(default)]
        colormap: Colormap,
        #[serde(default)]
        clim: Option<(f64, f64)>,
        #[serde(default)]
        render_mode: RenderMode,
    },
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

fn default_orientation() -> DMat3 {
    DMat3::IDENTITY
}

fn default_zoom() -> f64 {
    1.0
}

fn default_interactive() -> bool {
    true
}

fn default_gamma() -> f64 {
    1.0
}

impl SceneSpec {
    /// Parse a scene spec from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VistraResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| VistraError::validation(format!("parse scene spec JSON: {e}")))
    }

    /// Parse a scene spec from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VistraResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VistraError::validation(format!("open scene spec '{}': {e}", path.display()))
        })?;
        let r = BufReader::new(f);
        Self::from_reader(r)
    }

    /// Write the spec as pretty-printed JSON.
    pub fn to_writer<W: std::io::Write>(&self, w: W) -> VistraResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| VistraError::validation(format!("serialize scene spec: {e}")))
    }

    /// Check the spec without keeping anything: instantiate into a scratch
    /// graph and discard it.
    pub fn validate(&self) -> VistraResult<()> {
        let mut scratch = SceneGraph::new();
        self.instantiate(&mut scratch).map(|_| ())
    }

    /// Build the declared tree in `graph` and return the root handle.
    ///
    /// All-or-nothing: when any declared value fails validation, every node
    /// this call created is removed again before the error is returned.
    #[tracing::instrument(skip(self, graph))]
    pub fn instantiate(&self, graph: &mut SceneGraph) -> VistraResult<NodeId> {
        let mut created = Vec::new();
        match build(graph, &self.root, &mut created) {
            Ok(id) => Ok(id),
            Err(err) => {
                for id in created {
                    if graph.contains(id) {
                        // Fresh nodes have no adaptors yet; removal is pure
                        // bookkeeping and cannot fail further.
                        let _ = graph.remove(id);
                    }
                }
                Err(err)
            }
        }
    }
}

fn build(graph: &mut SceneGraph, spec: &NodeSpec, created: &mut Vec<NodeId>) -> VistraResult<NodeId> {
    let id = match &spec.kind {
        NodeSpecKind::Scene { background } => {
            let id = graph.spawn_scene();
            created.push(id);
            graph.set(id, Update::Background(*background))?;
            id
        }
        NodeSpecKind::Camera {
            position,
            orientation,
            zoom,
            mode,
            interactive,
        } => {
            let id = graph.spawn_camera();
            created.push(id);
            graph.set(id, Update::Position(*position))?;
            graph.set(id, Update::Orientation(*orientation))?;
            graph.set(id, Update::Zoom(*zoom))?;
            graph.set(id, Update::Mode(*mode))?;
            graph.set(id, Update::Interactive(*interactive))?;
            id
        }
        NodeSpecKind::Image {
            data,
            colormap,
            clim,
            gamma,
            interpolation,
        } => {
            let id = graph.spawn_image(data.clone());
            created.push(id);
            graph.set(id, Update::Colormap(*colormap))?;
            graph.set(id, Update::Clim(*clim))?;
            graph.set(id, Update::Gamma(*gamma))?;
            graph.set(id, Update::Interpolation(*interpolation))?;
            id
        }
        NodeSpecKind::Volume {
            data,
            colormap,
            clim,
            render_mode,
        } => {
            let id = graph.spawn_volume(data.clone());
            created.push(id);
            graph.set(id, Update::Colormap(*colormap))?;
            graph.set(id, Update::Clim(*clim))?;
            graph.set(id, Update::RenderMode(*render_mode))?;
            id
        }
    };
    graph.set(id, Update::Visible(spec.visible))?;
    graph.set(id, Update::Opacity(spec.opacity))?;
    for child_spec in &spec.children {
        let child = build(graph, child_spec, created)?;
        graph.add_child(id, child)?;
    }
    Ok(id)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/spec.rs"]
mod tests;
