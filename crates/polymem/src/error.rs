//! Error types for polymem.

use crate::scheme::{AccessType, Scheme};
use thiserror::Error;

/// Errors that can occur when building or accessing a banked store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolymemError {
    /// Matrix shape incompatible with the bank grid.
    #[error(
        "invalid shape: {rows}x{cols} matrix cannot be banked over a {p}x{q} grid \
         (requires rows % p == 0, cols % q == 0, rows >= p*q, cols >= p*q)"
    )]
    InvalidShape {
        p: usize,
        q: usize,
        rows: usize,
        cols: usize,
    },

    /// Bank grid larger than the lane mask can address.
    #[error("too many lanes: {lanes} banks requested, at most 64 supported")]
    TooManyLanes { lanes: usize },

    /// Access type not supported by the configured scheme.
    #[error("access type {access:?} is not supported by scheme {scheme:?}")]
    IllegalAccessType { scheme: Scheme, access: AccessType },

    /// Coordinate outside the matrix extent.
    #[error("coordinate ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Block slice length does not match the lane count.
    #[error("block length mismatch: expected {expected} elements, got {actual}")]
    BlockLengthMismatch { expected: usize, actual: usize },
}
