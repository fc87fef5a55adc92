//! Window configuration and viewport layout.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            // 15 px per cell for the default 67x50 grid
            window_width: 1005,
            window_height: 750,
        }
    }
}

/// Per-frame viewport fit: disc diameter and centered grid origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Disc diameter (pixels)
    pub cell_px: f32,

    /// Top-left corner of the grid within the viewport (pixels)
    pub origin_px: [f32; 2],
}

impl CellLayout {
    /// Fit the grid into a viewport.
    ///
    /// The diameter is the smaller of the per-axis fits so the whole
    /// grid stays visible; leftover margin centers the grid.
    pub fn fit(viewport_px: [f32; 2], columns: usize, rows: usize) -> Self {
        let cell_px = (viewport_px[0] / columns as f32).min(viewport_px[1] / rows as f32);
        let origin_px = [
            (viewport_px[0] - cell_px * columns as f32) / 2.0,
            (viewport_px[1] - cell_px * rows as f32) / 2.0,
        ];
        Self { cell_px, origin_px }
    }
}
