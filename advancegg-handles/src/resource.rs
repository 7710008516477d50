//! Handle table owning every canvas, gradient and layer manager.

use advancegg_canvas::{Canvas, CanvasError, CanvasResult, Gradient, LayerManager};
use std::collections::HashMap;

/// Opaque integer id of a resource in a [`HandleTable`].
pub type Handle = i64;

/// Returned by creation operations that fail.
pub const INVALID_HANDLE: Handle = -1;

/// A resource stored in the handle table.
#[derive(Debug)]
pub enum Resource {
    Canvas(Canvas),
    Gradient(Gradient),
    LayerManager(LayerManager),
    /// A canvas owned by a layer manager, addressed by layer name.
    Layer { manager: Handle, name: String },
}

impl Resource {
    fn kind(&self) -> &'static str {
        match self {
            Resource::Canvas(_) => "canvas",
            Resource::Gradient(_) => "gradient",
            Resource::LayerManager(_) => "layer manager",
            Resource::Layer { .. } => "layer",
        }
    }
}

/// Arena of resources keyed by monotonically increasing handles.
///
/// Ids start at 1, are shared by every resource kind and are never reused,
/// so a destroyed handle can never alias a newer resource. Looking up a
/// handle of the wrong kind is reported as an invalid handle.
#[derive(Debug)]
pub struct HandleTable {
    next_id: Handle,
    resources: HashMap<Handle, Resource>,
    last_error: Option<CanvasError>,
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            resources: HashMap::new(),
            last_error: None,
        }
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn contains(&self, id: Handle) -> bool {
        self.resources.contains_key(&id)
    }

    /// The error behind the most recent sentinel return, if not yet taken.
    pub fn take_last_error(&mut self) -> Option<CanvasError> {
        self.last_error.take()
    }

    pub(crate) fn insert(&mut self, resource: Resource) -> Handle {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!(target: "handles", "created {} {}", resource.kind(), id);
        self.resources.insert(id, resource);
        id
    }

    /// Turn the result of a creation call into a handle, or the sentinel.
    pub(crate) fn created(&mut self, result: CanvasResult<Resource>) -> Handle {
        match result {
            Ok(resource) => self.insert(resource),
            Err(err) => {
                log::warn!(target: "handles", "creation failed: {}", err);
                self.last_error = Some(err);
                INVALID_HANDLE
            }
        }
    }

    pub(crate) fn get(&self, id: Handle) -> CanvasResult<&Resource> {
        self.resources.get(&id).ok_or(CanvasError::InvalidHandle(id))
    }

    pub(crate) fn remove(&mut self, id: Handle) -> CanvasResult<Resource> {
        let resource = self
            .resources
            .remove(&id)
            .ok_or(CanvasError::InvalidHandle(id))?;
        log::debug!(target: "handles", "destroyed {} {}", resource.kind(), id);
        Ok(resource)
    }

    /// The canvas behind a canvas or layer handle.
    pub fn canvas(&self, id: Handle) -> CanvasResult<&Canvas> {
        match self.get(id)? {
            Resource::Canvas(canvas) => Ok(canvas),
            Resource::Layer { manager, name } => self
                .layer_manager(*manager)
                .ok()
                .and_then(|m| m.layer(name))
                .ok_or(CanvasError::InvalidHandle(id)),
            _ => Err(CanvasError::InvalidHandle(id)),
        }
    }

    /// Mutable access to the canvas behind a canvas or layer handle.
    pub fn canvas_mut(&mut self, id: Handle) -> CanvasResult<&mut Canvas> {
        let layer = match self.get(id)? {
            Resource::Canvas(_) => None,
            Resource::Layer { manager, name } => Some((*manager, name.clone())),
            _ => return Err(CanvasError::InvalidHandle(id)),
        };
        match layer {
            None => match self.resources.get_mut(&id) {
                Some(Resource::Canvas(canvas)) => Ok(canvas),
                _ => Err(CanvasError::InvalidHandle(id)),
            },
            Some((manager, name)) => self
                .layer_manager_mut(manager)
                .ok()
                .and_then(|m| m.layer_mut(&name))
                .ok_or(CanvasError::InvalidHandle(id)),
        }
    }

    pub fn gradient(&self, id: Handle) -> CanvasResult<&Gradient> {
        match self.get(id)? {
            Resource::Gradient(gradient) => Ok(gradient),
            _ => Err(CanvasError::InvalidHandle(id)),
        }
    }

    pub fn layer_manager(&self, id: Handle) -> CanvasResult<&LayerManager> {
        match self.get(id)? {
            Resource::LayerManager(manager) => Ok(manager),
            _ => Err(CanvasError::InvalidHandle(id)),
        }
    }

    pub fn layer_manager_mut(&mut self, id: Handle) -> CanvasResult<&mut LayerManager> {
        match self.resources.get_mut(&id) {
            Some(Resource::LayerManager(manager)) => Ok(manager),
            _ => Err(CanvasError::InvalidHandle(id)),
        }
    }

    /// Drop every layer handle that points into `manager`.
    pub(crate) fn forget_layers_of(&mut self, manager: Handle) {
        self.resources
            .retain(|_, r| !matches!(r, Resource::Layer { manager: m, .. } if *m == manager));
    }
}
