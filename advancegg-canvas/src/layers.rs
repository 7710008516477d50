//! Named layer stacks composited back to front.

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::composite;
use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};

/// One canvas in a [`LayerManager`] together with its compositing settings.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    canvas: Canvas,
    opacity: f32,
    visible: bool,
}

impl Layer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn opacity(&self) -> f64 {
        self.opacity as f64
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// An ordered stack of uniquely named layers sharing one size.
///
/// Insertion order is compositing order: the first layer added is the
/// bottom one.
#[derive(Debug, Clone)]
pub struct LayerManager {
    width: u32,
    height: u32,
    config: CanvasConfig,
    layers: Vec<Layer>,
    background: Option<Rgba>,
}

impl LayerManager {
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Self::with_config(width, height, CanvasConfig::default())
    }

    /// Create an empty stack whose layers and flattened output use `config`.
    pub fn with_config(width: u32, height: u32, config: CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        config.check_dimensions(width, height)?;
        log::debug!(target: "layers", "new layer manager {}x{}", width, height);
        Ok(Self {
            width,
            height,
            config,
            layers: Vec::new(),
            background: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names from bottom to top.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Add a transparent, fully opaque, visible layer on top of the stack.
    pub fn add_layer(&mut self, name: &str) -> CanvasResult<&mut Canvas> {
        if self.position(name).is_some() {
            return Err(CanvasError::DuplicateLayer(name.to_string()));
        }
        log::debug!(target: "layers", "add layer {:?}", name);
        let canvas = Canvas::with_config(self.width, self.height, self.config.clone())?;
        self.layers.push(Layer {
            name: name.to_string(),
            canvas,
            opacity: 1.0,
            visible: true,
        });
        let idx = self.layers.len() - 1;
        Ok(&mut self.layers[idx].canvas)
    }

    pub fn layer(&self, name: &str) -> Option<&Canvas> {
        self.get(name).map(|l| &l.canvas)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Canvas> {
        self.get_mut(name).ok().map(|l| &mut l.canvas)
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Set a layer's opacity, clamped to `[0, 1]`. NaN is rejected.
    pub fn set_layer_opacity(&mut self, name: &str, opacity: f64) -> CanvasResult<()> {
        if opacity.is_nan() {
            return Err(CanvasError::invalid_parameter("layer opacity is NaN"));
        }
        log::debug!(target: "layers", "set opacity of {:?} to {}", name, opacity);
        self.get_mut(name)?.opacity = opacity.clamp(0.0, 1.0) as f32;
        Ok(())
    }

    /// Show or hide a layer. Hidden layers are skipped by [`flatten`](Self::flatten).
    pub fn set_layer_visible(&mut self, name: &str, visible: bool) -> CanvasResult<()> {
        self.get_mut(name)?.visible = visible;
        Ok(())
    }

    /// Remove a layer and hand back its canvas.
    pub fn remove_layer(&mut self, name: &str) -> CanvasResult<Canvas> {
        let idx = self
            .position(name)
            .ok_or_else(|| CanvasError::UnknownLayer(name.to_string()))?;
        log::debug!(target: "layers", "remove layer {:?}", name);
        Ok(self.layers.remove(idx).canvas)
    }

    /// Move a layer to `index` in the stack (0 is the bottom).
    pub fn move_layer(&mut self, name: &str, index: usize) -> CanvasResult<()> {
        let from = self
            .position(name)
            .ok_or_else(|| CanvasError::UnknownLayer(name.to_string()))?;
        if index >= self.layers.len() {
            return Err(CanvasError::invalid_parameter(format!(
                "layer index {index} out of range for {} layers",
                self.layers.len()
            )));
        }
        let layer = self.layers.remove(from);
        self.layers.insert(index, layer);
        Ok(())
    }

    /// Color the flattened output starts from; `None` means transparent.
    pub fn set_background(&mut self, color: Option<Rgba>) {
        self.background = color;
    }

    /// Composite every visible layer, bottom to top, onto a new canvas.
    ///
    /// Each layer contributes with its per-pixel alpha times its opacity.
    /// The layers themselves are left unchanged.
    pub fn flatten(&self) -> CanvasResult<Canvas> {
        log::debug!(target: "layers", "flatten {} layers", self.layers.len());
        let mut out = Canvas::with_config(self.width, self.height, self.config.clone())?;
        if let Some(bg) = self.background {
            out.set_color(bg);
            out.clear();
        }
        for layer in self.layers.iter().filter(|l| l.visible) {
            composite::composite_pixmap(&mut out.pixmap, &layer.canvas.pixmap, layer.opacity);
        }
        Ok(out)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    fn get_mut(&mut self, name: &str) -> CanvasResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| CanvasError::UnknownLayer(name.to_string()))
    }
}
