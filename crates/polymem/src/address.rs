//! Single-coordinate bank addressing.
//!
//! A [`Layout`] pairs a validated [`Geometry`] with a [`Scheme`] and maps
//! every matrix coordinate to its physical slot: a bank index in
//! `0..p*q` and an offset inside that bank. The mapping is a bijection
//! onto `{0..p*q} x {0..bank_len}`: no two coordinates share a slot and
//! every slot is reachable.
//!
//! The schemes that serve rows or columns conflict-free do so by skewing:
//! the quotient of one axis is added into the other axis before the
//! modulo reduction, which diagonalizes consecutive rows or columns
//! across the bank grid.

use crate::geometry::Geometry;
use crate::scheme::Scheme;

/// A bank-addressing function: geometry plus scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    geometry: Geometry,
    scheme: Scheme,
}

impl Layout {
    /// Pair a geometry with a scheme.
    pub fn new(geometry: Geometry, scheme: Scheme) -> Self {
        Self { geometry, scheme }
    }

    /// The grid/shape parameters.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The bank-assignment scheme.
    #[inline]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Row position of the bank holding `(i, j)` within the p x q grid.
    pub fn bank_row(&self, i: usize, j: usize) -> usize {
        let p = self.geometry.p();
        let q = self.geometry.q();
        match self.scheme {
            Scheme::RectangleOnly | Scheme::RectangleColumn => i % p,
            Scheme::RectangleRow | Scheme::RowColumn => (i + j / q) % p,
            Scheme::RectangleTransposed => {
                if p < q {
                    i % p
                } else {
                    (i + j - j % q) % p
                }
            }
        }
    }

    /// Column position of the bank holding `(i, j)` within the p x q grid.
    pub fn bank_col(&self, i: usize, j: usize) -> usize {
        let p = self.geometry.p();
        let q = self.geometry.q();
        match self.scheme {
            Scheme::RectangleOnly | Scheme::RectangleRow => j % q,
            Scheme::RectangleColumn | Scheme::RowColumn => (i / p + j) % q,
            Scheme::RectangleTransposed => {
                if p < q {
                    (i - i % p + j) % q
                } else {
                    j % q
                }
            }
        }
    }

    /// Index of the bank holding `(i, j)`, in `0..p*q`.
    #[inline]
    pub fn bank_index(&self, i: usize, j: usize) -> usize {
        self.bank_row(i, j) * self.geometry.q() + self.bank_col(i, j)
    }

    /// Offset of `(i, j)` inside its bank. Scheme-independent.
    #[inline]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        (i / self.geometry.p()) * (self.geometry.cols() / self.geometry.q())
            + j / self.geometry.q()
    }

    /// Physical slot `(bank_index, offset)` of `(i, j)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use polymem::{Geometry, Layout, Scheme};
    ///
    /// let layout = Layout::new(Geometry::new(2, 4, 16, 16).unwrap(), Scheme::RowColumn);
    /// // bank row (3 + 4/4) % 2 = 0, bank col (3/2 + 4) % 4 = 1
    /// assert_eq!(layout.slot(3, 4), (1, 5));
    /// ```
    #[inline]
    pub fn slot(&self, i: usize, j: usize) -> (usize, usize) {
        (self.bank_index(i, j), self.offset(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(p: usize, q: usize, n: usize, m: usize, scheme: Scheme) -> Layout {
        Layout::new(Geometry::new(p, q, n, m).unwrap(), scheme)
    }

    #[test]
    fn test_rectangle_only_addressing() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleOnly);
        assert_eq!(l.bank_row(5, 7), 1);
        assert_eq!(l.bank_col(5, 7), 3);
        assert_eq!(l.bank_index(5, 7), 7);
        assert_eq!(l.offset(5, 7), 2 * 4 + 1);
    }

    #[test]
    fn test_row_skew() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleRow);
        // consecutive q-element groups of a row land on different bank rows
        assert_eq!(l.bank_row(0, 0), 0);
        assert_eq!(l.bank_row(0, 4), 1);
        assert_eq!(l.bank_row(0, 8), 0);
        assert_eq!(l.bank_col(0, 5), 1);
    }

    #[test]
    fn test_column_skew() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleColumn);
        // consecutive p-element groups of a column land on different bank cols
        assert_eq!(l.bank_col(0, 0), 0);
        assert_eq!(l.bank_col(2, 0), 1);
        assert_eq!(l.bank_col(4, 0), 2);
        assert_eq!(l.bank_row(5, 0), 1);
    }

    #[test]
    fn test_row_column_slot() {
        let l = layout(2, 4, 16, 16, Scheme::RowColumn);
        assert_eq!(l.slot(3, 4), (1, 5));
        assert_eq!(l.slot(0, 0), (0, 0));
    }

    #[test]
    fn test_transposed_both_branches() {
        // p < q branch
        let l = layout(2, 4, 16, 16, Scheme::RectangleTransposed);
        assert_eq!(l.bank_row(5, 0), 1);
        assert_eq!(l.bank_col(5, 3), (5 - 1 + 3) % 4);
        // p >= q branch
        let l = layout(4, 2, 16, 16, Scheme::RectangleTransposed);
        assert_eq!(l.bank_row(1, 3), (1 + 3 - 1) % 4);
        assert_eq!(l.bank_col(1, 3), 1);
    }

    #[test]
    fn test_slot_bijection_all_schemes() {
        for scheme in Scheme::ALL {
            for (p, q) in [(2, 2), (2, 4), (4, 2), (4, 4), (3, 2)] {
                let (n, m) = (3 * p * q, 2 * p * q);
                let l = layout(p, q, n, m, scheme);
                let mut seen = vec![false; n * m];
                for i in 0..n {
                    for j in 0..m {
                        let (bank, off) = l.slot(i, j);
                        assert!(bank < p * q);
                        assert!(off < l.geometry().bank_len());
                        let key = bank * l.geometry().bank_len() + off;
                        assert!(
                            !seen[key],
                            "slot collision at ({i}, {j}) under {scheme:?} p={p} q={q}"
                        );
                        seen[key] = true;
                    }
                }
                assert!(seen.iter().all(|&s| s));
            }
        }
    }
}
