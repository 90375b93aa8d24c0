use crate::foundation::core::{Color, DMat3, DVec3, ScalarField2, ScalarField3};
use crate::foundation::error::{VistraError, VistraResult};
use crate::scene::camera::CameraMode;
use crate::scene::visuals::{Colormap, Interpolation, RenderMode};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Type tag for a declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    F64,
    Vec3,
    Mat3,
    Color,
    CameraMode,
    Colormap,
    Interpolation,
    RenderMode,
    Clim,
    Field2,
    Field3,
}

/// A current field value.
///
/// Bulk sample grids are `Arc`-shared so storing and dispatching a value never
/// deep-copies the data.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    F64(f64),
    Vec3(DVec3),
    Mat3(DMat3),
    Color(Color),
    CameraMode(CameraMode),
    Colormap(Colormap),
    Interpolation(Interpolation),
    RenderMode(RenderMode),
    /// Contrast limits `(min, max)`; `None` means auto.
    Clim(Option<(f64, f64)>),
    Field2(Arc<ScalarField2>),
    Field3(Arc<ScalarField3>),
}

impl FieldValue {
    /// Type tag of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::F64(_) => FieldKind::F64,
            Self::Vec3(_) => FieldKind::Vec3,
            Self::Mat3(_) => FieldKind::Mat3,
            Self::Color(_) => FieldKind::Color,
            Self::CameraMode(_) => FieldKind::CameraMode,
            Self::Colormap(_) => FieldKind::Colormap,
            Self::Interpolation(_) => FieldKind::Interpolation,
            Self::RenderMode(_) => FieldKind::RenderMode,
            Self::Clim(_) => FieldKind::Clim,
            Self::Field2(_) => FieldKind::Field2,
            Self::Field3(_) => FieldKind::Field3,
        }
    }

    /// Inner value when `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `F64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Vec3`.
    pub fn as_vec3(&self) -> Option<DVec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Mat3`.
    pub fn as_mat3(&self) -> Option<DMat3> {
        match self {
            Self::Mat3(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Color`.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `CameraMode`.
    pub fn as_camera_mode(&self) -> Option<CameraMode> {
        match self {
            Self::CameraMode(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Colormap`.
    pub fn as_colormap(&self) -> Option<Colormap> {
        match self {
            Self::Colormap(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Interpolation`.
    pub fn as_interpolation(&self) -> Option<Interpolation> {
        match self {
            Self::Interpolation(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `RenderMode`.
    pub fn as_render_mode(&self) -> Option<RenderMode> {
        match self {
            Self::RenderMode(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Clim`.
    pub fn as_clim(&self) -> Option<Option<(f64, f64)>> {
        match self {
            Self::Clim(v) => Some(*v),
            _ => None,
        }
    }

    /// Inner value when `Field2`.
    pub fn as_field2(&self) -> Option<&Arc<ScalarField2>> {
        match self {
            Self::Field2(v) => Some(v),
            _ => None,
        }
    }

    /// Inner value when `Field3`.
    pub fn as_field3(&self) -> Option<&Arc<ScalarField3>> {
        match self {
            Self::Field3(v) => Some(v),
            _ => None,
        }
    }
}

/// Constraint check run after the type tag matched.
pub type Validator = fn(&FieldValue) -> Result<(), String>;

/// A declared field: one entry in a node kind's static schema table.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Stable field name.
    pub name: &'static str,
    /// Declared value type.
    pub kind: FieldKind,
    /// Default value factory (a `fn` so tables stay `'static`).
    pub default: fn() -> FieldValue,
    /// Human-readable description, surfaced through introspection.
    pub description: &'static str,
    /// Optional constraint beyond the type tag.
    pub validate: Option<Validator>,
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Per-instance field storage: a plain name → value map seeded from the
/// owning kind's schema defaults.
#[derive(Debug)]
pub struct Fields {
    values: BTreeMap<&'static str, FieldValue>,
    schema: [&'static [FieldSpec]; 2],
}

impl Fields {
    /// Seed storage from a schema chain (base fields, then kind fields).
    pub(crate) fn from_schema(schema: [&'static [FieldSpec]; 2]) -> Self {
        let mut values = BTreeMap::new();
        for spec in schema.iter().copied().flatten() {
            values.insert(spec.name, (spec.default)());
        }
        Self { values, schema }
    }

    /// Look up the declaration for `name`.
    pub fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.schema
            .iter()
            .copied()
            .flatten()
            .find(|spec| spec.name == name)
    }

    /// Iterate all declarations, base fields first.
    pub fn specs(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.schema.into_iter().flatten()
    }

    /// Current value of `name`, or `None` for an undeclared field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Store a value without validation.
    ///
    /// For internal seeding where the caller guarantees the schema type
    /// (e.g. constructor-provided data); application writes go through
    /// [`Fields::set`].
    pub(crate) fn put(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Validate and store a value.
    ///
    /// A failed write leaves the previous value intact.
    pub(crate) fn set(&mut self, name: &str, value: FieldValue) -> VistraResult<()> {
        let spec = self.spec(name).ok_or_else(|| {
            VistraError::validation(format!("no field named '{name}' on this node kind"))
        })?;
        if value.kind() != spec.kind {
            return Err(VistraError::validation(format!(
                "field '{name}' expects {:?}, got {:?}",
                spec.kind,
                value.kind()
            )));
        }
        if let Some(validate) = spec.validate {
            validate(&value)
                .map_err(|msg| VistraError::validation(format!("field '{name}': {msg}")))?;
        }
        self.values.insert(spec.name, value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/field.rs"]
mod tests;
