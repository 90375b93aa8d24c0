//! Arena-backed scene graph and the model → backend synchronization driver.
//!
//! Nodes live in a slot vector and are addressed by [`NodeId`] handles: the
//! parent link is a handle (never an owning reference), children are an
//! ordered handle list, and each node entry owns at most one adaptor per
//! backend kind. Every field write and tree edit updates the model first and
//! dispatches to attached adaptors second, synchronously, before returning.
//!
//! Adaptors receive values only — the graph is not reachable from inside a
//! dispatch, so a backend cannot re-enter it mid-write. A backend that wants
//! to write back does so after the call returns, as a new top-level mutation.

use crate::backend::adaptor::{NodeAdaptor, NodeSnapshot, verify_capabilities};
use crate::backend::dispatch::dispatch_update;
use crate::backend::registry::{Backend, BackendKind, BackendRegistry};
use crate::foundation::core::{ScalarField2, ScalarField3};
use crate::foundation::error::{VistraError, VistraResult};
use crate::scene::field::{FieldValue, Fields};
use crate::scene::node::{NodeKind, Update};
use crate::scene::visuals;
use smallvec::SmallVec;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Stable handle to a node in a [`SceneGraph`].
///
/// Handles are issued monotonically and never reused, so a handle to a
/// removed node can only miss (`NotFound`), never alias a newer node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One cached adaptor: the backend kind it belongs to, whether it is linked
/// under its parent's adaptor, and the adaptor object itself.
struct AdaptorSlot {
    kind: BackendKind,
    linked: bool,
    adaptor: Box<dyn NodeAdaptor>,
}

struct NodeEntry {
    kind: NodeKind,
    fields: Fields,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    adaptors: Vec<AdaptorSlot>,
}

enum Structural {
    Add,
    Remove,
}

/// The declarative node tree plus its attached backends.
///
/// All mutation goes through `&mut self`: the core is single-threaded and
/// synchronous by contract; multi-threaded callers add their own locking.
pub struct SceneGraph {
    slots: Vec<Option<NodeEntry>>,
    live: usize,
    next: NonZeroU32,
    backends: BackendRegistry,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create an empty graph with no backends registered.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            next: NonZeroU32::MIN,
            backends: BackendRegistry::new(),
        }
    }

    // ---- node lifecycle -------------------------------------------------

    fn spawn(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.saturating_add(1);
        self.slots.push(Some(NodeEntry {
            kind,
            fields: Fields::from_schema(kind.schema()),
            parent: None,
            children: SmallVec::new(),
            adaptors: Vec::new(),
        }));
        self.live += 1;
        id
    }

    /// Create a standalone scene node with default fields.
    pub fn spawn_scene(&mut self) -> NodeId {
        self.spawn(NodeKind::Scene)
    }

    /// Create a standalone camera node with default fields.
    pub fn spawn_camera(&mut self) -> NodeId {
        self.spawn(NodeKind::Camera)
    }

    /// Create a standalone image node holding `data`.
    pub fn spawn_image(&mut self, data: ScalarField2) -> NodeId {
        let id = self.spawn(NodeKind::Image);
        if let Some(entry) = self.slots[id.index()].as_mut() {
            entry
                .fields
                .put(visuals::DATA, FieldValue::Field2(Arc::new(data)));
        }
        id
    }

    /// Create a standalone volume node holding `data`.
    pub fn spawn_volume(&mut self, data: ScalarField3) -> NodeId {
        let id = self.spawn(NodeKind::Volume);
        if let Some(entry) = self.slots[id.index()].as_mut() {
            entry
                .fields
                .put(visuals::DATA, FieldValue::Field3(Arc::new(data)));
        }
        id
    }

    /// Remove a node and its whole subtree, releasing their adaptors.
    ///
    /// The node is detached from its parent first (with the usual structural
    /// dispatch), then every entry in the subtree is dropped.
    pub fn remove(&mut self, id: NodeId) -> VistraResult<()> {
        let parent = self.entry(id)?.parent;
        if let Some(p) = parent {
            self.remove_child(p, id)?;
        }
        for n in self.collect_subtree(id).into_iter().rev() {
            if let Some(slot) = self.slots.get_mut(n.index())
                && slot.take().is_some()
            {
                self.live -= 1;
            }
        }
        Ok(())
    }

    // ---- accessors ------------------------------------------------------

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Return `true` when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Return `true` when `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.is_some())
    }

    /// Concrete kind of a node.
    pub fn kind(&self, id: NodeId) -> VistraResult<NodeKind> {
        Ok(self.entry(id)?.kind)
    }

    /// Field storage of a node (values plus schema introspection).
    pub fn fields(&self, id: NodeId) -> VistraResult<&Fields> {
        Ok(&self.entry(id)?.fields)
    }

    /// Current value of one field.
    pub fn get(&self, id: NodeId, field: &str) -> VistraResult<&FieldValue> {
        self.entry(id)?.fields.get(field).ok_or_else(|| {
            VistraError::validation(format!("no field named '{field}' on this node kind"))
        })
    }

    /// Parent handle, or `None` for a detached node.
    pub fn parent(&self, id: NodeId) -> VistraResult<Option<NodeId>> {
        Ok(self.entry(id)?.parent)
    }

    /// Children in stacking/traversal order.
    pub fn children(&self, id: NodeId) -> VistraResult<&[NodeId]> {
        Ok(&self.entry(id)?.children)
    }

    /// Depth-first subtree of `id` (inclusive): parents before children,
    /// children in stored order.
    pub fn descendants(&self, id: NodeId) -> VistraResult<Vec<NodeId>> {
        self.entry(id)?;
        Ok(self.collect_subtree(id))
    }

    // ---- field writes ---------------------------------------------------

    /// Validate and store a field write, then dispatch it to every adaptor
    /// attached to the node, one call per backend, in attachment order.
    ///
    /// A failed validation leaves the stored value untouched and dispatches
    /// nothing. A write that does not change the value still dispatches.
    pub fn set(&mut self, id: NodeId, update: Update) -> VistraResult<()> {
        let entry = self.entry_mut(id)?;
        entry.fields.set(update.field(), update.value())?;
        for slot in &mut entry.adaptors {
            dispatch_update(slot.adaptor.as_mut(), &update)?;
        }
        Ok(())
    }

    // ---- tree edits -----------------------------------------------------

    /// Append `child` to `parent`'s children (reparenting if needed).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> VistraResult<()> {
        let len = self.entry(parent)?.children.len();
        let index = if self.entry(child)?.parent == Some(parent) {
            len.saturating_sub(1)
        } else {
            len
        };
        self.insert_child(parent, index, child)
    }

    /// Insert `child` into `parent`'s children at `index`.
    ///
    /// If `child` already has a parent it is atomically moved: callers never
    /// observe it parentless in between. `index` addresses the children list
    /// as it will be after the detach.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> VistraResult<()> {
        self.entry(child)?;
        self.entry(parent)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(VistraError::cycle(format!(
                "adding {child} under {parent} would make it its own ancestor"
            )));
        }
        let old_parent = self.entry(child)?.parent;
        let len = self.entry(parent)?.children.len();
        let future_len = if old_parent == Some(parent) {
            len - 1
        } else {
            len
        };
        if index > future_len {
            return Err(VistraError::validation(format!(
                "child index {index} out of range 0..={future_len}"
            )));
        }

        // Model bookkeeping first, backend dispatch second: when a backend
        // call fails, the tree is already consistent.
        if let Some(old) = old_parent {
            self.entry_mut(old)?.children.retain(|c| *c != child);
        }
        self.entry_mut(parent)?.children.insert(index, child);
        self.entry_mut(child)?.parent = Some(parent);

        if let Some(old) = old_parent {
            self.unlink_edge(old, child)?;
        }
        let kinds: Vec<BackendKind> = self
            .entry(parent)?
            .adaptors
            .iter()
            .map(|slot| slot.kind)
            .collect();
        for kind in kinds {
            self.materialize(child, kind)?;
        }
        Ok(())
    }

    /// Break the parent/child link between two nodes.
    ///
    /// The child keeps its cached adaptors; re-adding it re-links them
    /// without reconstruction.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> VistraResult<()> {
        self.entry(child)?;
        if !self.entry(parent)?.children.contains(&child) {
            return Err(VistraError::not_found(format!(
                "{child} is not a child of {parent}"
            )));
        }
        self.entry_mut(parent)?.children.retain(|c| *c != child);
        self.entry_mut(child)?.parent = None;
        self.unlink_edge(parent, child)
    }

    // ---- backends -------------------------------------------------------

    /// Register a backend under its own kind (at most one per kind).
    pub fn register_backend(&mut self, backend: Box<dyn Backend>) -> VistraResult<()> {
        self.backends.register(backend)
    }

    /// Registered backend kinds, in registration order.
    pub fn backend_kinds(&self) -> impl Iterator<Item = BackendKind> + '_ {
        self.backends.kinds()
    }

    /// Materialize adaptors of `kind` for `root` and its entire current
    /// subtree: depth-first, parents before children, children in stored
    /// order, each freshly built adaptor linked under its parent's.
    ///
    /// Idempotent: adaptors are constructed at most once per (node, backend)
    /// pair and re-attachment reuses the cache.
    #[tracing::instrument(skip(self))]
    pub fn attach(&mut self, root: NodeId, kind: BackendKind) -> VistraResult<()> {
        self.entry(root)?;
        if !self.backends.contains(kind) {
            return Err(VistraError::unsupported_backend(format!(
                "backend '{kind}' is not registered"
            )));
        }
        self.materialize(root, kind)
    }

    /// Return `true` when `id` holds an adaptor of `kind`.
    pub fn has_adaptor(&self, id: NodeId, kind: BackendKind) -> bool {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .is_some_and(|entry| entry.adaptors.iter().any(|slot| slot.kind == kind))
    }

    /// Mutable access to the cached adaptor of `kind` on `id`.
    pub fn adaptor_mut(
        &mut self,
        id: NodeId,
        kind: BackendKind,
    ) -> VistraResult<&mut (dyn NodeAdaptor + 'static)> {
        let entry = self.entry_mut(id)?;
        entry
            .adaptors
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.adaptor.as_mut())
            .ok_or_else(|| VistraError::not_found(format!("{id} has no '{kind}' adaptor")))
    }

    // ---- internals ------------------------------------------------------

    fn entry(&self, id: NodeId) -> VistraResult<&NodeEntry> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| VistraError::not_found(format!("node {id} is not alive")))
    }

    fn entry_mut(&mut self, id: NodeId) -> VistraResult<&mut NodeEntry> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| VistraError::not_found(format!("node {id} is not alive")))
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self
            .slots
            .get(node.index())
            .and_then(Option::as_ref)
            .and_then(|entry| entry.parent);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self
                .slots
                .get(p.index())
                .and_then(Option::as_ref)
                .and_then(|entry| entry.parent);
        }
        false
    }

    fn collect_subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(entry) = self.slots.get(id.index()).and_then(Option::as_ref) {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    fn materialize(&mut self, root: NodeId, kind: BackendKind) -> VistraResult<()> {
        for id in self.collect_subtree(root) {
            self.ensure_adaptor(id, kind)?;
            let parent = self
                .slots
                .get(id.index())
                .and_then(Option::as_ref)
                .and_then(|entry| entry.parent);
            if let Some(p) = parent {
                self.link_edge(p, id, kind)?;
            }
        }
        Ok(())
    }

    fn ensure_adaptor(&mut self, id: NodeId, kind: BackendKind) -> VistraResult<()> {
        let entry = self
            .slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| VistraError::not_found(format!("node {id} is not alive")))?;
        if entry.adaptors.iter().any(|slot| slot.kind == kind) {
            return Ok(());
        }
        let node_kind = entry.kind;
        let snapshot = NodeSnapshot {
            id,
            kind: node_kind,
            fields: &entry.fields,
        };
        let mut adaptor = self.backends.get_mut(kind)?.create_adaptor(snapshot)?;
        verify_capabilities(node_kind, kind, adaptor.as_mut())?;
        tracing::debug!(node = %id, node_kind = %node_kind, backend = %kind, "adaptor constructed");
        if let Some(entry) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            entry.adaptors.push(AdaptorSlot {
                kind,
                linked: false,
                adaptor,
            });
        }
        Ok(())
    }

    /// Link the (parent, child) edge in backend `kind` if both endpoints hold
    /// adaptors and the edge is not linked yet.
    fn link_edge(&mut self, parent: NodeId, child: NodeId, kind: BackendKind) -> VistraResult<()> {
        if !self.has_adaptor(parent, kind) || self.child_linked(child, kind) != Some(false) {
            return Ok(());
        }
        self.set_linked(child, kind, true);
        self.call_structural(parent, child, kind, Structural::Add)
    }

    /// Unlink the (parent, child) edge in every backend where it is linked.
    fn unlink_edge(&mut self, parent: NodeId, child: NodeId) -> VistraResult<()> {
        let kinds: Vec<BackendKind> = match self.slots.get(parent.index()).and_then(Option::as_ref)
        {
            Some(entry) => entry.adaptors.iter().map(|slot| slot.kind).collect(),
            None => return Ok(()),
        };
        for kind in kinds {
            if self.child_linked(child, kind) != Some(true) {
                continue;
            }
            self.set_linked(child, kind, false);
            self.call_structural(parent, child, kind, Structural::Remove)?;
        }
        Ok(())
    }

    /// Link state of `child`'s adaptor of `kind`, or `None` when absent.
    fn child_linked(&self, child: NodeId, kind: BackendKind) -> Option<bool> {
        self.slots
            .get(child.index())
            .and_then(Option::as_ref)?
            .adaptors
            .iter()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.linked)
    }

    fn set_linked(&mut self, id: NodeId, kind: BackendKind, linked: bool) {
        if let Some(entry) = self.slots.get_mut(id.index()).and_then(Option::as_mut)
            && let Some(slot) = entry.adaptors.iter_mut().find(|slot| slot.kind == kind)
        {
            slot.linked = linked;
        }
    }

    /// Run one structural call with both adaptors temporarily taken out of
    /// the arena (parent and child are distinct by the acyclicity invariant).
    fn call_structural(
        &mut self,
        parent: NodeId,
        child: NodeId,
        kind: BackendKind,
        op: Structural,
    ) -> VistraResult<()> {
        let Some((ppos, mut pslot)) = self.take_adaptor(parent, kind) else {
            return Ok(());
        };
        let Some((cpos, mut cslot)) = self.take_adaptor(child, kind) else {
            self.put_adaptor(parent, ppos, pslot);
            return Ok(());
        };
        let result = match op {
            Structural::Add => pslot.adaptor.add_child(cslot.adaptor.as_mut()),
            Structural::Remove => pslot.adaptor.remove_child(cslot.adaptor.as_mut()),
        };
        self.put_adaptor(child, cpos, cslot);
        self.put_adaptor(parent, ppos, pslot);
        result
    }

    fn take_adaptor(&mut self, id: NodeId, kind: BackendKind) -> Option<(usize, AdaptorSlot)> {
        let entry = self.slots.get_mut(id.index())?.as_mut()?;
        let pos = entry.adaptors.iter().position(|slot| slot.kind == kind)?;
        Some((pos, entry.adaptors.remove(pos)))
    }

    fn put_adaptor(&mut self, id: NodeId, pos: usize, slot: AdaptorSlot) {
        if let Some(entry) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            entry.adaptors.insert(pos, slot);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
