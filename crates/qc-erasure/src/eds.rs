//! Extended data square.
//!
//! ```text
//!        0 .. k      k .. 2k
//!      ┌──────────┬──────────┐
//!  0   │    Q0    │    Q1    │   Q0: original shares
//!  ..  │ original │ row par. │   Q1: row parity of Q0
//!  k   ├──────────┼──────────┤   Q2: column parity of Q0
//!  ..  │    Q2    │    Q3    │   Q3: row parity of Q2
//!  2k  │ col par. │          │
//!      └──────────┴──────────┘
//! ```

/// A 2k×2k erasure-coded square, row-major. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedDataSquare {
    original_width: usize,
    share_size: usize,
    cells: Vec<Vec<u8>>,
}

impl ExtendedDataSquare {
    pub(crate) fn from_cells(original_width: usize, share_size: usize, cells: Vec<Vec<u8>>) -> Self {
        debug_assert_eq!(cells.len(), 4 * original_width * original_width);
        Self {
            original_width,
            share_size,
            cells,
        }
    }

    /// Extended width `2k`.
    pub fn width(&self) -> usize {
        2 * self.original_width
    }

    /// Original width `k`.
    pub fn original_width(&self) -> usize {
        self.original_width
    }

    /// Bytes per share.
    pub fn share_size(&self) -> usize {
        self.share_size
    }

    /// Whether `(row, col)` lies in the original quadrant.
    pub fn is_original(&self, row: usize, col: usize) -> bool {
        row < self.original_width && col < self.original_width
    }

    /// Share at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&[u8]> {
        let width = self.width();
        if row >= width || col >= width {
            return None;
        }
        self.cells.get(row * width + col).map(Vec::as_slice)
    }

    /// Row `index`, all `2k` shares.
    pub fn row(&self, index: usize) -> Vec<&[u8]> {
        let width = self.width();
        if index >= width {
            return Vec::new();
        }
        self.cells[index * width..(index + 1) * width]
            .iter()
            .map(Vec::as_slice)
            .collect()
    }

    /// Column `index`, all `2k` shares.
    pub fn col(&self, index: usize) -> Vec<&[u8]> {
        let width = self.width();
        if index >= width {
            return Vec::new();
        }
        (0..width)
            .map(|r| self.cells[r * width + index].as_slice())
            .collect()
    }

    /// The original k×k shares, row-major.
    pub fn original_shares(&self) -> Vec<&[u8]> {
        (0..self.original_width)
            .flat_map(|r| self.row(r).into_iter().take(self.original_width))
            .collect()
    }
}
