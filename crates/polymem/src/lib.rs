//! polymem - banked parallel-access matrix storage.
//!
//! A software port of a polymorphic register file: a logical `N` x `M`
//! matrix is spread over `p*q` independent banks so that whole access
//! patterns (rectangular tiles, rows, columns, transposed tiles,
//! diagonals) can be moved in one logical step with every bank touched
//! exactly once.
//!
//! # Architecture
//!
//! ```text
//! Scheme / AccessType  - bank-assignment policies and their legality table
//! Geometry             - validated grid and matrix-shape parameters
//! Layout               - coordinate -> (bank, offset), one scheme applied
//! BlockPattern         - one footprint: members, banks, offsets, permutation
//! PolyMem<ElT>         - the banks, plus scalar/block/masked operations
//! ```
//!
//! The layer below [`PolyMem`] is pure index algebra; only the store
//! itself holds data.
//!
//! # Example
//!
//! ```
//! use polymem::{AccessType, PolyMem, Scheme};
//!
//! // 8 banks on a 2x4 grid, skewed for row and column access
//! let mut store: PolyMem<f64> = PolyMem::new(2, 4, 16, 16, Scheme::RowColumn).unwrap();
//! store.write(3.5, 2, 9).unwrap();
//! assert_eq!(store.read(2, 9).unwrap(), 3.5);
//!
//! // a whole row segment in one block access
//! let row = store.read_block(2, 8, AccessType::Row).unwrap();
//! assert_eq!(row[1], 3.5);
//! ```

pub mod address;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod pattern;
pub mod random;
pub mod scalar;
pub mod scheme;
pub mod store;

pub use address::Layout;
pub use error::PolymemError;
pub use geometry::{Geometry, MAX_LANES};
pub use mask::LaneMask;
pub use pattern::BlockPattern;
pub use random::{RandomNormal, RandomUniform};
pub use scalar::Element;
pub use scheme::{AccessType, Scheme};
pub use store::PolyMem;
