//! Per-pixel coverage produced by scan conversion.

/// Fractional pixel coverage over a rectangular device-space region.
///
/// Values are in `[0, 1]`; pixels outside the region have zero coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    pub(crate) fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at a device pixel.
    pub fn get(&self, x: i32, y: i32) -> f32 {
        let (lx, ly) = (x - self.left, y - self.top);
        if lx < 0 || ly < 0 || lx as u32 >= self.width || ly as u32 >= self.height {
            return 0.0;
        }
        self.data[ly as usize * self.width as usize + lx as usize]
    }

    /// One row of coverage values, indexed from `left`.
    pub(crate) fn row(&self, local_y: u32) -> &[f32] {
        let w = self.width as usize;
        let start = local_y as usize * w;
        &self.data[start..start + w]
    }

    pub(crate) fn row_mut(&mut self, local_y: u32) -> &mut [f32] {
        let w = self.width as usize;
        let start = local_y as usize * w;
        &mut self.data[start..start + w]
    }

    /// The same coverage placed at a different device origin.
    pub(crate) fn translated(mut self, dx: i32, dy: i32) -> Self {
        self.left += dx;
        self.top += dy;
        self
    }

    /// Sum of all coverage values (the covered area in pixels).
    pub fn area(&self) -> f64 {
        self.data.iter().map(|&c| c as f64).sum()
    }
}
