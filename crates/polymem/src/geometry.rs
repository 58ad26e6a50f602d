//! Validated bank-grid and matrix-shape parameters.

use crate::error::PolymemError;

/// Maximum number of banks, bounded by the width of [`LaneMask`].
///
/// [`LaneMask`]: crate::mask::LaneMask
pub const MAX_LANES: usize = 64;

/// Bank-grid dimensions (`p` x `q`) together with the matrix extent
/// (`rows` x `cols`) they partition.
///
/// A geometry is only constructible in a valid state:
/// `rows % p == 0`, `cols % q == 0`, `rows >= p*q`, `cols >= p*q`,
/// and `p*q <= 64`. Every bank then holds exactly
/// `rows*cols / (p*q)` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    p: usize,
    q: usize,
    rows: usize,
    cols: usize,
}

impl Geometry {
    /// Create a validated geometry.
    ///
    /// # Errors
    ///
    /// Returns [`PolymemError::InvalidShape`] when the divisibility or
    /// minimum-extent rules are violated, and
    /// [`PolymemError::TooManyLanes`] when `p*q` exceeds 64.
    ///
    /// # Examples
    ///
    /// ```
    /// use polymem::Geometry;
    ///
    /// let g = Geometry::new(2, 4, 16, 16).unwrap();
    /// assert_eq!(g.lanes(), 8);
    /// assert_eq!(g.bank_len(), 32);
    ///
    /// assert!(Geometry::new(4, 2, 10, 16).is_err()); // 10 % 4 != 0
    /// ```
    pub fn new(p: usize, q: usize, rows: usize, cols: usize) -> Result<Self, PolymemError> {
        if p == 0 || q == 0 {
            return Err(PolymemError::InvalidShape { p, q, rows, cols });
        }
        let lanes = p * q;
        if lanes > MAX_LANES {
            return Err(PolymemError::TooManyLanes { lanes });
        }
        if rows % p != 0 || cols % q != 0 || rows < lanes || cols < lanes {
            return Err(PolymemError::InvalidShape { p, q, rows, cols });
        }
        Ok(Self { p, q, rows, cols })
    }

    /// Bank-grid row count.
    #[inline]
    pub fn p(&self) -> usize {
        self.p
    }

    /// Bank-grid column count.
    #[inline]
    pub fn q(&self) -> usize {
        self.q
    }

    /// Matrix row extent.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Matrix column extent.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of banks, equal to the number of parallel lanes.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.p * self.q
    }

    /// Number of elements held by each bank.
    #[inline]
    pub fn bank_len(&self) -> usize {
        self.rows * self.cols / self.lanes()
    }

    /// Whether `(row, col)` lies inside the matrix extent.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Bounds-check a coordinate.
    pub(crate) fn check(&self, row: usize, col: usize) -> Result<(), PolymemError> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(PolymemError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}
