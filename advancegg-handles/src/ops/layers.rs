//! Layer managers and their layers.
//!
//! `add_layer` returns a handle that every canvas operation accepts and
//! that resolves to the layer's canvas inside its manager. Destroying the
//! manager invalidates those handles along with the layers.

use crate::ops::dimensions;
use crate::resource::{Handle, HandleTable, Resource};
use advancegg_canvas::{CanvasResult, LayerManager};

pub fn create_layer_manager(table: &mut HandleTable, width: i64, height: i64) -> Handle {
    let result = dimensions(width, height)
        .and_then(|(w, h)| LayerManager::new(w, h))
        .map(Resource::LayerManager);
    table.created(result)
}

pub fn destroy_layer_manager(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.layer_manager(id)?;
    table.remove(id)?;
    table.forget_layers_of(id);
    Ok(())
}

/// Add a transparent layer on top of the stack and return a canvas handle for it.
///
/// Returns `-1` if the manager handle is invalid or the name is taken.
pub fn add_layer(table: &mut HandleTable, manager: Handle, name: &str) -> Handle {
    let result = table
        .layer_manager_mut(manager)
        .and_then(|m| m.add_layer(name).map(drop))
        .map(|()| Resource::Layer {
            manager,
            name: name.to_string(),
        });
    table.created(result)
}

/// Set a layer's opacity, clamped to `[0, 1]`.
pub fn set_layer_opacity(
    table: &mut HandleTable,
    manager: Handle,
    name: &str,
    opacity: f64,
) -> CanvasResult<()> {
    table
        .layer_manager_mut(manager)?
        .set_layer_opacity(name, opacity)
}

pub fn set_layer_visible(
    table: &mut HandleTable,
    manager: Handle,
    name: &str,
    visible: bool,
) -> CanvasResult<()> {
    table
        .layer_manager_mut(manager)?
        .set_layer_visible(name, visible)
}

/// Composite the visible layers into a new canvas and return its handle.
pub fn flatten_layers(table: &mut HandleTable, manager: Handle) -> Handle {
    let result = table
        .layer_manager(manager)
        .and_then(LayerManager::flatten)
        .map(Resource::Canvas);
    table.created(result)
}
