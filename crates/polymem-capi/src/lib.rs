//! C API for polymem
//!
//! This crate provides a C-compatible interface to the polymem library so
//! the banked store can be driven from C host code and other languages.
//!
//! All extern "C" functions are inherently unsafe as they work with raw
//! pointers from foreign code. Schemes and access types cross the boundary
//! as integer codes and are range-checked before use.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

use libc::{c_double, c_int, size_t};
use polymem::{AccessType, LaneMask, PolyMem, PolymemError, Scheme};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

// Status codes
pub type StatusCode = c_int;

pub const PM_SUCCESS: StatusCode = 0;
pub const PM_INVALID_ARGUMENT: StatusCode = -1;
pub const PM_INVALID_SHAPE: StatusCode = -2;
pub const PM_UNSUPPORTED_SCHEME: StatusCode = -3;
pub const PM_UNSUPPORTED_ACCESS_TYPE: StatusCode = -4;
pub const PM_ILLEGAL_ACCESS: StatusCode = -5;
pub const PM_OUT_OF_BOUNDS: StatusCode = -6;
pub const PM_INTERNAL_ERROR: StatusCode = -7;

// Scheme codes, matching the numbering of the original register file
pub const PM_SCHEME_RECTANGLE_ONLY: c_int = 0;
pub const PM_SCHEME_RECTANGLE_ROW: c_int = 1;
pub const PM_SCHEME_RECTANGLE_COLUMN: c_int = 2;
pub const PM_SCHEME_ROW_COLUMN: c_int = 3;
pub const PM_SCHEME_RECTANGLE_TRANSPOSED: c_int = 4;

// Access-type codes
pub const PM_ACCESS_RECTANGLE: c_int = 0;
pub const PM_ACCESS_ROW: c_int = 1;
pub const PM_ACCESS_COLUMN: c_int = 2;
pub const PM_ACCESS_TRANSPOSED_RECTANGLE: c_int = 3;
pub const PM_ACCESS_MAIN_DIAGONAL: c_int = 4;
pub const PM_ACCESS_SECONDARY_DIAGONAL: c_int = 5;

fn scheme_from_code(code: c_int) -> Option<Scheme> {
    match code {
        PM_SCHEME_RECTANGLE_ONLY => Some(Scheme::RectangleOnly),
        PM_SCHEME_RECTANGLE_ROW => Some(Scheme::RectangleRow),
        PM_SCHEME_RECTANGLE_COLUMN => Some(Scheme::RectangleColumn),
        PM_SCHEME_ROW_COLUMN => Some(Scheme::RowColumn),
        PM_SCHEME_RECTANGLE_TRANSPOSED => Some(Scheme::RectangleTransposed),
        _ => None,
    }
}

fn access_from_code(code: c_int) -> Option<AccessType> {
    match code {
        PM_ACCESS_RECTANGLE => Some(AccessType::Rectangle),
        PM_ACCESS_ROW => Some(AccessType::Row),
        PM_ACCESS_COLUMN => Some(AccessType::Column),
        PM_ACCESS_TRANSPOSED_RECTANGLE => Some(AccessType::TransposedRectangle),
        PM_ACCESS_MAIN_DIAGONAL => Some(AccessType::MainDiagonal),
        PM_ACCESS_SECONDARY_DIAGONAL => Some(AccessType::SecondaryDiagonal),
        _ => None,
    }
}

fn status_from_error(err: &PolymemError) -> StatusCode {
    match err {
        PolymemError::InvalidShape { .. } | PolymemError::TooManyLanes { .. } => PM_INVALID_SHAPE,
        PolymemError::IllegalAccessType { .. } => PM_ILLEGAL_ACCESS,
        PolymemError::OutOfBounds { .. } => PM_OUT_OF_BOUNDS,
        PolymemError::BlockLengthMismatch { .. } => PM_INVALID_ARGUMENT,
    }
}

/// Opaque banked store over f64
#[repr(C)]
pub struct pm_store_f64 {
    _private: *mut std::ffi::c_void,
}

impl pm_store_f64 {
    fn from_store(store: PolyMem<f64>) -> Self {
        let boxed = Box::new(store);
        Self {
            _private: Box::into_raw(boxed) as *mut std::ffi::c_void,
        }
    }

    fn inner(&self) -> &PolyMem<f64> {
        unsafe { &*(self._private as *const PolyMem<f64>) }
    }

    fn inner_mut(&mut self) -> &mut PolyMem<f64> {
        unsafe { &mut *(self._private as *mut PolyMem<f64>) }
    }
}

impl Drop for pm_store_f64 {
    fn drop(&mut self) {
        if !self._private.is_null() {
            unsafe {
                let _ = Box::from_raw(self._private as *mut PolyMem<f64>);
            }
        }
    }
}

// ============================================================================
// Store lifecycle functions
// ============================================================================

/// Create a banked store.
///
/// # Arguments
/// * `p`, `q` - Bank-grid dimensions
/// * `rows`, `cols` - Matrix extents (rows % p == 0, cols % q == 0)
/// * `scheme` - One of the `PM_SCHEME_*` codes
/// * `status` - Pointer to receive status code
///
/// # Returns
/// Pointer to new store, or null on error
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_new(
    p: size_t,
    q: size_t,
    rows: size_t,
    cols: size_t,
    scheme: c_int,
    status: *mut StatusCode,
) -> *mut pm_store_f64 {
    if status.is_null() {
        return ptr::null_mut();
    }

    let Some(scheme) = scheme_from_code(scheme) else {
        unsafe {
            *status = PM_UNSUPPORTED_SCHEME;
        }
        return ptr::null_mut();
    };

    let result = catch_unwind(|| match PolyMem::<f64>::new(p, q, rows, cols, scheme) {
        Ok(store) => (
            Box::into_raw(Box::new(pm_store_f64::from_store(store))),
            PM_SUCCESS,
        ),
        Err(err) => (ptr::null_mut(), status_from_error(&err)),
    });

    match result {
        Ok((ptr, code)) => {
            unsafe {
                *status = code;
            }
            ptr
        }
        Err(_) => {
            unsafe {
                *status = PM_INTERNAL_ERROR;
            }
            ptr::null_mut()
        }
    }
}

/// Release (free) a store.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_release(store: *mut pm_store_f64) {
    if !store.is_null() {
        unsafe {
            let _ = Box::from_raw(store);
        }
    }
}

/// Zero every bank.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_clear(store: *mut pm_store_f64) -> StatusCode {
    if store.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        (*store).inner_mut().clear();
        PM_SUCCESS
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}

// ============================================================================
// Store query functions
// ============================================================================

/// Get the number of banks (parallel lanes).
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_lanes(store: *const pm_store_f64) -> size_t {
    if store.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*store).inner().lanes() }));

    result.unwrap_or(0)
}

/// Get the number of elements per bank.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_bank_len(store: *const pm_store_f64) -> size_t {
    if store.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*store).inner().bank_len() }));

    result.unwrap_or(0)
}

// ============================================================================
// Scalar access
// ============================================================================

/// Write one element.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_write(
    store: *mut pm_store_f64,
    value: c_double,
    i: size_t,
    j: size_t,
) -> StatusCode {
    if store.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        match (*store).inner_mut().write(value, i, j) {
            Ok(()) => PM_SUCCESS,
            Err(err) => status_from_error(&err),
        }
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}

/// Read one element into `out`.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_read(
    store: *const pm_store_f64,
    i: size_t,
    j: size_t,
    out: *mut c_double,
) -> StatusCode {
    if store.is_null() || out.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        match (*store).inner().read(i, j) {
            Ok(value) => {
                *out = value;
                PM_SUCCESS
            }
            Err(err) => status_from_error(&err),
        }
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}

// ============================================================================
// Block access
// ============================================================================

/// Read one footprint into `out` (must hold `p*q` elements), in footprint
/// order.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_read_block(
    store: *const pm_store_f64,
    i: size_t,
    j: size_t,
    access: c_int,
    out: *mut c_double,
) -> StatusCode {
    if store.is_null() || out.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let Some(access) = access_from_code(access) else {
        return PM_UNSUPPORTED_ACCESS_TYPE;
    };

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        match (*store).inner().read_block(i, j, access) {
            Ok(values) => {
                let out_slice = std::slice::from_raw_parts_mut(out, values.len());
                out_slice.copy_from_slice(&values);
                PM_SUCCESS
            }
            Err(err) => status_from_error(&err),
        }
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}

/// Write one footprint from `values` (must hold `p*q` elements), in
/// footprint order.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_write_block(
    store: *mut pm_store_f64,
    values: *const c_double,
    i: size_t,
    j: size_t,
    access: c_int,
) -> StatusCode {
    pm_store_f64_write_block_masked(store, values, u64::MAX, i, j, access)
}

/// Write the selected members of one footprint; bit `t` of `mask` selects
/// footprint member `t`.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_write_block_masked(
    store: *mut pm_store_f64,
    values: *const c_double,
    mask: u64,
    i: size_t,
    j: size_t,
    access: c_int,
) -> StatusCode {
    if store.is_null() || values.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let Some(access) = access_from_code(access) else {
        return PM_UNSUPPORTED_ACCESS_TYPE;
    };

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let lanes = (*store).inner().lanes();
        let values_slice = std::slice::from_raw_parts(values, lanes);
        match (*store).inner_mut().write_block_masked(
            values_slice,
            LaneMask::from_bits(mask),
            i,
            j,
            access,
        ) {
            Ok(()) => PM_SUCCESS,
            Err(err) => status_from_error(&err),
        }
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}

// ============================================================================
// Whole-matrix transfer
// ============================================================================

/// Fill the whole matrix from a row-major array of `rows*cols` elements.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_load_row_major(
    store: *mut pm_store_f64,
    data: *const c_double,
    len: size_t,
) -> StatusCode {
    if store.is_null() || data.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let data_slice = std::slice::from_raw_parts(data, len);
        match (*store).inner_mut().load_row_major(data_slice) {
            Ok(()) => PM_SUCCESS,
            Err(err) => status_from_error(&err),
        }
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}

/// Copy the whole matrix out in row-major order; `out` must hold
/// `rows*cols` elements.
#[unsafe(no_mangle)]
pub extern "C" fn pm_store_f64_to_row_major(
    store: *const pm_store_f64,
    out: *mut c_double,
) -> StatusCode {
    if store.is_null() || out.is_null() {
        return PM_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let values = (*store).inner().to_row_major();
        let out_slice = std::slice::from_raw_parts_mut(out, values.len());
        out_slice.copy_from_slice(&values);
        PM_SUCCESS
    }));

    result.unwrap_or(PM_INTERNAL_ERROR)
}
