//! Block-access footprint resolution.
//!
//! A block operation touches `p*q` coordinates at once: the footprint of
//! an [`AccessType`] anchored at some `(i, j)`. [`BlockPattern`] resolves
//! one footprint ahead of any storage access: it enumerates the member
//! coordinates in their caller-facing order, bounds-checks them, and
//! computes the destination bank and intra-bank offset of every member.
//! The store then scatters or gathers through the resolved arrays in one
//! pass.
//!
//! For a legal (scheme, access type) pair at a suitably aligned anchor the
//! member-to-bank map is a bijection onto all banks; that is the
//! conflict-freedom property the schemes exist to provide, and
//! [`BlockPattern::is_conflict_free`] makes it checkable.

use smallvec::SmallVec;

use crate::address::Layout;
use crate::error::PolymemError;
use crate::scheme::AccessType;

type LaneVec<T> = SmallVec<[T; 16]>;

/// One resolved footprint: member coordinates, their banks, and their
/// intra-bank offsets, all indexed by footprint position `0..p*q`.
#[derive(Debug, Clone)]
pub struct BlockPattern {
    access: AccessType,
    coords: LaneVec<(usize, usize)>,
    banks: LaneVec<usize>,
    offsets: LaneVec<usize>,
}

impl BlockPattern {
    /// Resolve the footprint of `access` anchored at `(i, j)`.
    ///
    /// # Errors
    ///
    /// - [`PolymemError::IllegalAccessType`] when the layout's scheme does
    ///   not support `access` (including failed coprimality or
    ///   divisibility conditions for diagonals and transposed tiles).
    /// - [`PolymemError::OutOfBounds`] when any footprint member falls
    ///   outside the matrix. A secondary diagonal running past the left
    ///   edge has no representable member coordinate, so that error
    ///   carries the anchor `(i, j)` itself.
    pub fn resolve(
        layout: &Layout,
        access: AccessType,
        i: usize,
        j: usize,
    ) -> Result<Self, PolymemError> {
        let geometry = layout.geometry();
        let (p, q) = (geometry.p(), geometry.q());
        let lanes = geometry.lanes();

        if !layout.scheme().supports(access, p, q) {
            return Err(PolymemError::IllegalAccessType {
                scheme: layout.scheme(),
                access,
            });
        }

        let mut coords: LaneVec<(usize, usize)> = SmallVec::with_capacity(lanes);
        for t in 0..lanes {
            let member = match access {
                AccessType::Rectangle => (i + t / q, j + t % q),
                AccessType::Row => (i, j + t),
                AccessType::Column => (i + t, j),
                AccessType::TransposedRectangle => (i + t / p, j + t % p),
                AccessType::MainDiagonal => (i + t, j + t),
                AccessType::SecondaryDiagonal => {
                    if t > j {
                        // the offending column would be negative; report
                        // the anchor
                        return Err(PolymemError::OutOfBounds {
                            row: i,
                            col: j,
                            rows: geometry.rows(),
                            cols: geometry.cols(),
                        });
                    }
                    (i + t, j - t)
                }
            };
            geometry.check(member.0, member.1)?;
            coords.push(member);
        }

        let banks = coords
            .iter()
            .map(|&(mi, mj)| layout.bank_index(mi, mj))
            .collect();
        let offsets = coords.iter().map(|&(mi, mj)| layout.offset(mi, mj)).collect();

        Ok(Self {
            access,
            coords,
            banks,
            offsets,
        })
    }

    /// The access type this pattern was resolved for.
    #[inline]
    pub fn access(&self) -> AccessType {
        self.access
    }

    /// Number of footprint members (= number of banks).
    #[inline]
    pub fn lanes(&self) -> usize {
        self.coords.len()
    }

    /// Member coordinates in footprint order.
    #[inline]
    pub fn coords(&self) -> &[(usize, usize)] {
        &self.coords
    }

    /// Destination bank of each member, in footprint order.
    #[inline]
    pub fn banks(&self) -> &[usize] {
        &self.banks
    }

    /// Intra-bank offset of each member, in footprint order.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Physical slot of member `t`.
    #[inline]
    pub fn slot(&self, t: usize) -> (usize, usize) {
        (self.banks[t], self.offsets[t])
    }

    /// Whether the member-to-bank map touches every bank exactly once.
    ///
    /// Holds for every legal (scheme, access type) pair at anchors aligned
    /// to the access type's constraints; this is what lets hardware serve
    /// the whole footprint in a single parallel step.
    pub fn is_conflict_free(&self) -> bool {
        let mut seen = 0u64;
        for &bank in &self.banks {
            if seen & (1 << bank) != 0 {
                return false;
            }
            seen |= 1 << bank;
        }
        true
    }

    /// For a conflict-free pattern, the permutation from bank index to
    /// footprint position. `None` when the pattern has a bank conflict.
    pub fn bank_permutation(&self) -> Option<LaneVec<usize>> {
        if !self.is_conflict_free() {
            return None;
        }
        let mut perm: LaneVec<usize> = SmallVec::from_elem(0, self.lanes());
        for (t, &bank) in self.banks.iter().enumerate() {
            perm[bank] = t;
        }
        Some(perm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::scheme::Scheme;

    fn layout(p: usize, q: usize, n: usize, m: usize, scheme: Scheme) -> Layout {
        Layout::new(Geometry::new(p, q, n, m).unwrap(), scheme)
    }

    #[test]
    fn test_row_footprint_order() {
        let l = layout(2, 4, 16, 16, Scheme::RowColumn);
        let pat = BlockPattern::resolve(&l, AccessType::Row, 3, 5).unwrap();
        let expected: Vec<_> = (0..8).map(|t| (3, 5 + t)).collect();
        assert_eq!(pat.coords(), &expected[..]);
    }

    #[test]
    fn test_column_footprint_order() {
        let l = layout(2, 4, 16, 16, Scheme::RowColumn);
        let pat = BlockPattern::resolve(&l, AccessType::Column, 3, 5).unwrap();
        let expected: Vec<_> = (0..8).map(|t| (3 + t, 5)).collect();
        assert_eq!(pat.coords(), &expected[..]);
    }

    #[test]
    fn test_rectangle_footprint_order() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleOnly);
        let pat = BlockPattern::resolve(&l, AccessType::Rectangle, 2, 4).unwrap();
        assert_eq!(pat.coords()[0], (2, 4));
        assert_eq!(pat.coords()[3], (2, 7));
        assert_eq!(pat.coords()[4], (3, 4));
        assert_eq!(pat.coords()[7], (3, 7));
    }

    #[test]
    fn test_transposed_footprint_is_q_by_p() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleTransposed);
        let pat = BlockPattern::resolve(&l, AccessType::TransposedRectangle, 1, 3).unwrap();
        // 4 rows of length 2
        assert_eq!(pat.coords()[0], (1, 3));
        assert_eq!(pat.coords()[1], (1, 4));
        assert_eq!(pat.coords()[2], (2, 3));
        assert_eq!(pat.coords()[7], (4, 4));
    }

    #[test]
    fn test_diagonal_footprints() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleRow);
        let md = BlockPattern::resolve(&l, AccessType::MainDiagonal, 1, 1).unwrap();
        assert_eq!(md.coords()[7], (8, 8));
        let sd = BlockPattern::resolve(&l, AccessType::SecondaryDiagonal, 1, 14).unwrap();
        assert_eq!(sd.coords()[7], (8, 7));
    }

    #[test]
    fn test_illegal_access_rejected() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleOnly);
        let err = BlockPattern::resolve(&l, AccessType::Row, 0, 0).unwrap_err();
        assert_eq!(
            err,
            PolymemError::IllegalAccessType {
                scheme: Scheme::RectangleOnly,
                access: AccessType::Row,
            }
        );
    }

    #[test]
    fn test_out_of_bounds_footprint() {
        let l = layout(2, 4, 16, 16, Scheme::RowColumn);
        // row of 8 starting at column 10 runs past column 15
        assert!(matches!(
            BlockPattern::resolve(&l, AccessType::Row, 0, 10),
            Err(PolymemError::OutOfBounds { .. })
        ));
        // secondary diagonal starting at column 3 underflows; the error
        // reports the anchor, not a wrapped coordinate
        let l = layout(2, 4, 16, 16, Scheme::RectangleRow);
        let err = BlockPattern::resolve(&l, AccessType::SecondaryDiagonal, 0, 3).unwrap_err();
        assert_eq!(
            err,
            PolymemError::OutOfBounds {
                row: 0,
                col: 3,
                rows: 16,
                cols: 16,
            }
        );
    }

    #[test]
    fn test_row_access_conflict_free() {
        let l = layout(2, 4, 96, 96, Scheme::RowColumn);
        let pat = BlockPattern::resolve(&l, AccessType::Row, 3, 8).unwrap();
        assert!(pat.is_conflict_free());
        let mut banks: Vec<_> = pat.banks().to_vec();
        banks.sort_unstable();
        assert_eq!(banks, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_bank_permutation_inverts() {
        let l = layout(2, 4, 16, 16, Scheme::RectangleRow);
        let pat = BlockPattern::resolve(&l, AccessType::Row, 2, 0).unwrap();
        let perm = pat.bank_permutation().unwrap();
        for bank in 0..8 {
            assert_eq!(pat.banks()[perm[bank]], bank);
        }
    }

    #[test]
    fn test_unaligned_row_column_rectangle_conflicts() {
        // RowColumn rectangles are only conflict-free when i % p == 0 or
        // j % q == 0
        let l = layout(2, 4, 16, 16, Scheme::RowColumn);
        let aligned = BlockPattern::resolve(&l, AccessType::Rectangle, 2, 4).unwrap();
        assert!(aligned.is_conflict_free());
        let unaligned = BlockPattern::resolve(&l, AccessType::Rectangle, 1, 1).unwrap();
        assert!(!unaligned.is_conflict_free());
        assert!(unaligned.bank_permutation().is_none());
    }
}
