//! Frame codec: run-length pairs to and from a row-major cell grid.

use serde::Deserialize;

/// One grid snapshot, run-length encoded as alternating (value, count)
/// pairs covering the grid in row-major order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct EncodedFrame(pub Vec<u32>);

impl EncodedFrame {
    /// Iterate the (value, count) run pairs.
    ///
    /// A trailing value with no count is ignored.
    pub fn runs(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1] as usize))
    }

    /// Total number of cells the runs cover.
    ///
    /// A well-formed frame covers exactly width x height cells.
    pub fn cell_total(&self) -> usize {
        self.runs().map(|(_, count)| count).sum()
    }

    /// Run-length encode a grid snapshot
    pub fn from_grid(grid: &Grid) -> Self {
        let mut data = Vec::new();
        let mut cells = grid.cells().iter();

        if let Some(&first) = cells.next() {
            let mut value = first;
            let mut count = 1u32;
            for &cell in cells {
                if cell == value {
                    count += 1;
                } else {
                    data.push(value);
                    data.push(count);
                    value = cell;
                    count = 1;
                }
            }
            data.push(value);
            data.push(count);
        }

        Self(data)
    }
}

/// Row-major cell grid, decoded into in place each tick.
///
/// Cell values are opaque codes taken straight from the frame
/// document; the renderer decides what they look like.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Allocate a zeroed grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat row-major cell values
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Cell value at (column, row)
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.width + x]
    }

    /// Decode one frame into the grid.
    ///
    /// Runs fill consecutive row-major cells, wrapping from the end of
    /// one row to the start of the next. An undersupplied frame leaves
    /// trailing cells at their previous values; an oversupplied frame
    /// is truncated at grid capacity.
    pub fn apply_frame(&mut self, frame: &EncodedFrame) {
        let mut index = 0;
        for (value, count) in frame.runs() {
            if index >= self.cells.len() {
                break;
            }
            let end = (index + count).min(self.cells.len());
            self.cells[index..end].fill(value);
            index = end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fills_row_major() {
        // 2x2 grid, runs [0 x3, 1 x1] -> rows [[0, 0], [0, 1]]
        let mut grid = Grid::new(2, 2);
        grid.apply_frame(&EncodedFrame(vec![0, 3, 1, 1]));

        assert_eq!(grid.cells(), &[0, 0, 0, 1]);
        assert_eq!(grid.get(0, 0), 0);
        assert_eq!(grid.get(1, 0), 0);
        assert_eq!(grid.get(0, 1), 0);
        assert_eq!(grid.get(1, 1), 1);
    }

    #[test]
    fn test_decode_wraps_across_rows() {
        // A run longer than one row continues on the next row
        let mut grid = Grid::new(3, 2);
        grid.apply_frame(&EncodedFrame(vec![7, 4, 2, 2]));
        assert_eq!(grid.cells(), &[7, 7, 7, 7, 2, 2]);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let frame = EncodedFrame(vec![1, 2, 0, 1, 3, 1]);
        let mut first = Grid::new(2, 2);
        first.apply_frame(&frame);
        let mut second = first.clone();
        second.apply_frame(&frame);
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip() {
        let mut grid = Grid::new(4, 3);
        grid.apply_frame(&EncodedFrame(vec![5, 4, 0, 4, 7, 4]));

        let encoded = EncodedFrame::from_grid(&grid);
        assert_eq!(encoded, EncodedFrame(vec![5, 4, 0, 4, 7, 4]));

        let mut decoded = Grid::new(4, 3);
        decoded.apply_frame(&encoded);
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_undersupply_leaves_trailing_cells() {
        let mut grid = Grid::new(2, 2);
        grid.apply_frame(&EncodedFrame(vec![9, 4]));
        grid.apply_frame(&EncodedFrame(vec![3, 2]));
        assert_eq!(grid.cells(), &[3, 3, 9, 9]);
    }

    #[test]
    fn test_oversupply_truncates() {
        let mut grid = Grid::new(2, 2);
        grid.apply_frame(&EncodedFrame(vec![1, 10, 5, 3]));
        assert_eq!(grid.cells(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_trailing_value_without_count_is_ignored() {
        let mut grid = Grid::new(2, 2);
        grid.apply_frame(&EncodedFrame(vec![1, 2, 7]));
        assert_eq!(grid.cells(), &[1, 1, 0, 0]);
    }

    #[test]
    fn test_cell_total() {
        assert_eq!(EncodedFrame(vec![0, 3, 1, 1]).cell_total(), 4);
        assert_eq!(EncodedFrame(vec![]).cell_total(), 0);
        assert_eq!(EncodedFrame(vec![1, 10]).cell_total(), 10);
    }
}
