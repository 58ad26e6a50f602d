//! The banked store.

use crate::address::Layout;
use crate::error::PolymemError;
use crate::geometry::Geometry;
use crate::mask::LaneMask;
use crate::pattern::BlockPattern;
use crate::scalar::Element;
use crate::scheme::{AccessType, Scheme};

/// A logical `rows` x `cols` matrix stored across `p*q` independent banks.
///
/// The bank-assignment [`Scheme`] is fixed at construction and decides
/// which block [`AccessType`]s are served with one element per bank.
/// Scalar `read`/`write` work for any in-bounds coordinate under every
/// scheme; block operations move `p*q` elements in one logical step and
/// are all-or-nothing: validation errors leave every bank untouched.
///
/// Block operations assume exclusive access to the store for their whole
/// duration; `&mut self` on every mutating method enforces that within
/// safe Rust. Callers sharing a store across threads should wrap it in a
/// read-write lock as a whole; per-bank locking buys nothing, since
/// every block operation touches every bank.
///
/// # Examples
///
/// ```
/// use polymem::{AccessType, PolyMem, Scheme};
///
/// let mut store: PolyMem<i32> = PolyMem::new(2, 4, 16, 16, Scheme::RowColumn).unwrap();
/// for i in 0..16 {
///     for j in 0..16 {
///         store.write(i as i32 * 16 + j as i32, i, j).unwrap();
///     }
/// }
/// // one column segment, eight rows deep, served by all eight banks
/// let col = store.read_block(3, 4, AccessType::Column).unwrap();
/// assert_eq!(col, (3..11).map(|i| i * 16 + 4).collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone)]
pub struct PolyMem<ElT: Element> {
    layout: Layout,
    banks: Vec<Vec<ElT>>,
}

impl<ElT: Element> PolyMem<ElT> {
    /// Create a store with zero-filled banks.
    ///
    /// # Errors
    ///
    /// Returns [`PolymemError::InvalidShape`] or
    /// [`PolymemError::TooManyLanes`] when the grid/shape parameters are
    /// rejected by [`Geometry::new`]; no store is constructed.
    pub fn new(
        p: usize,
        q: usize,
        rows: usize,
        cols: usize,
        scheme: Scheme,
    ) -> Result<Self, PolymemError> {
        let geometry = Geometry::new(p, q, rows, cols)?;
        Ok(Self::with_geometry(geometry, scheme))
    }

    /// Create a store from an already validated geometry.
    pub fn with_geometry(geometry: Geometry, scheme: Scheme) -> Self {
        let banks = vec![vec![ElT::zero(); geometry.bank_len()]; geometry.lanes()];
        Self {
            layout: Layout::new(geometry, scheme),
            banks,
        }
    }

    /// The addressing function (geometry plus scheme).
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The grid/shape parameters.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        self.layout.geometry()
    }

    /// The bank-assignment scheme.
    #[inline]
    pub fn scheme(&self) -> Scheme {
        self.layout.scheme()
    }

    /// Number of banks.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.geometry().lanes()
    }

    /// Number of elements per bank.
    #[inline]
    pub fn bank_len(&self) -> usize {
        self.geometry().bank_len()
    }

    /// Contents of bank `b`.
    #[inline]
    pub fn bank(&self, b: usize) -> &[ElT] {
        &self.banks[b]
    }

    /// Zero every bank.
    pub fn clear(&mut self) {
        for bank in &mut self.banks {
            bank.fill(ElT::zero());
        }
    }

    /// Read the element at `(i, j)`.
    pub fn read(&self, i: usize, j: usize) -> Result<ElT, PolymemError> {
        self.geometry().check(i, j)?;
        let (bank, offset) = self.layout.slot(i, j);
        Ok(self.banks[bank][offset])
    }

    /// Reference to the element at `(i, j)`, `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<&ElT> {
        if !self.geometry().contains(i, j) {
            return None;
        }
        let (bank, offset) = self.layout.slot(i, j);
        Some(&self.banks[bank][offset])
    }

    /// Write `value` at `(i, j)`.
    pub fn write(&mut self, value: ElT, i: usize, j: usize) -> Result<(), PolymemError> {
        self.geometry().check(i, j)?;
        self.put(i, j, value);
        Ok(())
    }

    /// Store to an in-bounds coordinate.
    #[inline]
    pub(crate) fn put(&mut self, i: usize, j: usize, value: ElT) {
        let (bank, offset) = self.layout.slot(i, j);
        self.banks[bank][offset] = value;
    }

    /// Gather one footprint of `access` anchored at `(i, j)`, returned in
    /// footprint order.
    ///
    /// # Errors
    ///
    /// [`PolymemError::IllegalAccessType`] when the scheme does not
    /// support `access`, [`PolymemError::OutOfBounds`] when the footprint
    /// leaves the matrix.
    pub fn read_block(
        &self,
        i: usize,
        j: usize,
        access: AccessType,
    ) -> Result<Vec<ElT>, PolymemError> {
        let pattern = BlockPattern::resolve(&self.layout, access, i, j)?;
        Ok(pattern
            .banks()
            .iter()
            .zip(pattern.offsets())
            .map(|(&bank, &offset)| self.banks[bank][offset])
            .collect())
    }

    /// Scatter `values` (in footprint order) into one footprint of
    /// `access` anchored at `(i, j)`.
    ///
    /// All validation happens before the first bank is touched: on error
    /// the store is unmodified.
    ///
    /// # Errors
    ///
    /// As [`read_block`](Self::read_block), plus
    /// [`PolymemError::BlockLengthMismatch`] when `values.len()` differs
    /// from the lane count.
    pub fn write_block(
        &mut self,
        values: &[ElT],
        i: usize,
        j: usize,
        access: AccessType,
    ) -> Result<(), PolymemError> {
        self.write_block_masked(values, LaneMask::all(self.lanes()), i, j, access)
    }

    /// Scatter the selected subset of `values` into one footprint.
    ///
    /// Member `t` is written iff `mask` bit `t` is set; unselected slots
    /// keep their previous contents. Same validation and all-or-nothing
    /// behavior as [`write_block`](Self::write_block).
    pub fn write_block_masked(
        &mut self,
        values: &[ElT],
        mask: LaneMask,
        i: usize,
        j: usize,
        access: AccessType,
    ) -> Result<(), PolymemError> {
        if values.len() != self.lanes() {
            return Err(PolymemError::BlockLengthMismatch {
                expected: self.lanes(),
                actual: values.len(),
            });
        }
        let pattern = BlockPattern::resolve(&self.layout, access, i, j)?;
        for (t, &value) in values.iter().enumerate() {
            if mask.contains(t) {
                let (bank, offset) = pattern.slot(t);
                self.banks[bank][offset] = value;
            }
        }
        Ok(())
    }

    /// Fill the whole matrix from a row-major slice.
    ///
    /// # Errors
    ///
    /// [`PolymemError::BlockLengthMismatch`] when `data.len()` differs
    /// from `rows * cols`.
    pub fn load_row_major(&mut self, data: &[ElT]) -> Result<(), PolymemError> {
        let (rows, cols) = (self.geometry().rows(), self.geometry().cols());
        if data.len() != rows * cols {
            return Err(PolymemError::BlockLengthMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        for i in 0..rows {
            for j in 0..cols {
                self.put(i, j, data[i * cols + j]);
            }
        }
        Ok(())
    }

    /// Copy the whole matrix out in row-major order.
    pub fn to_row_major(&self) -> Vec<ElT> {
        let (rows, cols) = (self.geometry().rows(), self.geometry().cols());
        let mut out = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let (bank, offset) = self.layout.slot(i, j);
                out.push(self.banks[bank][offset]);
            }
        }
        out
    }
}
