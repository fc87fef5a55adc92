//! Grid geometry and pacing configuration.

/// Grid animation configuration
///
/// Fixed at initialization; the frame document is encoded against
/// these dimensions, so changing them mid-run makes no sense.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Grid width (cells per row)
    pub width: usize,

    /// Grid height (rows)
    pub height: usize,

    /// Target animation rate (grid frames per second of playback)
    pub fps: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 67,
            height: 50,
            fps: 30,
        }
    }
}

impl GridConfig {
    /// Total number of cells in one frame
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_dimensions() {
        let config = GridConfig::default();
        assert_eq!(config.width, 67);
        assert_eq!(config.height, 50);
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn test_cell_count() {
        let config = GridConfig::default();
        assert_eq!(config.cell_count(), 67 * 50);
    }
}
