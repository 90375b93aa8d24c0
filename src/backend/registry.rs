use crate::backend::adaptor::{NodeAdaptor, NodeSnapshot};
use crate::foundation::error::{VistraError, VistraResult};

/// Identifies a backend implementation by a stable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendKind(pub &'static str);

impl BackendKind {
    /// The built-in render-nothing backend (always available).
    pub const HEADLESS: Self = Self("headless");
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// A rendering backend, acting as an adaptor factory for the node kinds it
/// supports.
///
/// Backends stay passive: the graph decides when adaptors are constructed and
/// how a subtree is materialized; the factory only builds one adaptor from one
/// node snapshot.
pub trait Backend: std::fmt::Debug {
    /// Stable kind under which this backend registers.
    fn kind(&self) -> BackendKind;

    /// Whether this backend can drive user interaction (mouse/keyboard).
    fn interactive(&self) -> bool {
        false
    }

    /// Construct the adaptor for one node, initialized from its snapshot.
    fn create_adaptor(&mut self, node: NodeSnapshot<'_>) -> VistraResult<Box<dyn NodeAdaptor>>;
}

/// Registered backends, keyed by kind. At most one backend per kind.
#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Box<dyn Backend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its own kind.
    ///
    /// Registering a second backend of the same kind is a validation error.
    pub fn register(&mut self, backend: Box<dyn Backend>) -> VistraResult<()> {
        let kind = backend.kind();
        if self.contains(kind) {
            return Err(VistraError::validation(format!(
                "backend '{kind}' is already registered"
            )));
        }
        tracing::debug!(backend = %kind, "registering backend");
        self.backends.push(backend);
        Ok(())
    }

    /// Return `true` when a backend of `kind` is registered.
    pub fn contains(&self, kind: BackendKind) -> bool {
        self.backends.iter().any(|b| b.kind() == kind)
    }

    /// Mutable access to the backend of `kind`.
    pub fn get_mut(&mut self, kind: BackendKind) -> VistraResult<&mut (dyn Backend + 'static)> {
        self.backends
            .iter_mut()
            .find(|b| b.kind() == kind)
            .map(|b| b.as_mut())
            .ok_or_else(|| {
                VistraError::unsupported_backend(format!("backend '{kind}' is not registered"))
            })
    }

    /// Iterate registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = BackendKind> + '_ {
        self.backends.iter().map(|b| b.kind())
    }
}

/// Create a built-in backend implementation.
///
/// - [`BackendKind::HEADLESS`] is always available.
pub fn create_backend(kind: BackendKind) -> VistraResult<Box<dyn Backend>> {
    match kind {
        BackendKind::HEADLESS => Ok(Box::new(crate::backend::headless::HeadlessBackend::new())),
        other => Err(VistraError::unsupported_backend(format!(
            "no built-in backend of kind '{other}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/registry.rs"]
mod tests;
