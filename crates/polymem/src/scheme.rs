//! Bank-assignment schemes and access types.
//!
//! A scheme fixes how matrix coordinates are spread over the bank grid, and
//! with that which access patterns are guaranteed conflict-free (every bank
//! touched exactly once per block access):
//!
//! | Scheme                 | Re  | Ro  | Co  | Tr  | MD   | SD   |
//! |------------------------|-----|-----|-----|-----|------|------|
//! | `RectangleOnly`        | yes | -   | -   | -   | -    | -    |
//! | `RectangleRow`         | yes | yes | -   | -   | (1)  | (2)  |
//! | `RectangleColumn`      | yes | -   | yes | -   | (3)  | (4)  |
//! | `RowColumn`            | yes | yes | yes | -   | -    | -    |
//! | `RectangleTransposed`  | yes | -   | -   | (5) | -    | -    |
//!
//! 1. requires `p` and `q+1` coprime
//! 2. requires `p` and `q-1` coprime
//! 3. requires `p+1` and `q` coprime
//! 4. requires `p-1` and `q` coprime
//! 5. requires `q % p == 0` when `p <= q`, `p % q == 0` otherwise
//!
//! `RowColumn` rectangles are only conflict-free at anchors with
//! `i % p == 0` or `j % q == 0`; block operations still return correct
//! data at other anchors, but without the one-element-per-bank guarantee.

/// Bank-assignment policy, fixed for a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Conflict-free p x q rectangles at any anchor.
    RectangleOnly,
    /// Rectangles plus rows; diagonals under coprimality.
    RectangleRow,
    /// Rectangles plus columns; diagonals under coprimality.
    RectangleColumn,
    /// Rows and columns; rectangles only at aligned anchors.
    RowColumn,
    /// p x q rectangles plus their q x p transposes.
    RectangleTransposed,
}

impl Scheme {
    /// All five schemes, for exhaustive sweeps in tests.
    pub const ALL: [Scheme; 5] = [
        Scheme::RectangleOnly,
        Scheme::RectangleRow,
        Scheme::RectangleColumn,
        Scheme::RowColumn,
        Scheme::RectangleTransposed,
    ];

    /// Whether block operations with `access` are supported under this
    /// scheme on a `p` x `q` bank grid.
    ///
    /// Diagonal support depends on the grid through the coprimality
    /// conditions in the module table, so the grid dimensions are part of
    /// the query.
    pub fn supports(self, access: AccessType, p: usize, q: usize) -> bool {
        use AccessType::*;
        match (self, access) {
            (_, Rectangle) => true,
            (Scheme::RectangleRow | Scheme::RowColumn, Row) => true,
            (Scheme::RectangleColumn | Scheme::RowColumn, Column) => true,
            (Scheme::RectangleTransposed, TransposedRectangle) => {
                if p <= q {
                    q % p == 0
                } else {
                    p % q == 0
                }
            }
            (Scheme::RectangleRow, MainDiagonal) => coprime(p, q + 1),
            (Scheme::RectangleRow, SecondaryDiagonal) => coprime(p, q - 1),
            (Scheme::RectangleColumn, MainDiagonal) => coprime(p + 1, q),
            (Scheme::RectangleColumn, SecondaryDiagonal) => coprime(p - 1, q),
            _ => false,
        }
    }
}

/// Shape of one block access: the pattern of `p*q` coordinates fetched or
/// stored in a single logical step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// p x q tile, enumerated row-major.
    Rectangle,
    /// Row segment of length `p*q`.
    Row,
    /// Column segment of length `p*q`.
    Column,
    /// q x p tile, enumerated row-major.
    TransposedRectangle,
    /// Run of `p*q` elements along a main diagonal (down-right).
    MainDiagonal,
    /// Run of `p*q` elements along a secondary diagonal (down-left).
    SecondaryDiagonal,
}

impl AccessType {
    /// All six access types, for exhaustive sweeps in tests.
    pub const ALL: [AccessType; 6] = [
        AccessType::Rectangle,
        AccessType::Row,
        AccessType::Column,
        AccessType::TransposedRectangle,
        AccessType::MainDiagonal,
        AccessType::SecondaryDiagonal,
    ];
}

/// Greatest common divisor by the Euclidean algorithm.
pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Whether `a` and `b` are coprime.
pub(crate) fn coprime(a: usize, b: usize) -> bool {
    gcd(a, b) == 1
}
