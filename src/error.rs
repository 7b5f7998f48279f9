//! Out-parameter error reporting for the C surface.
//!
//! Fallible entry points take a `*mut *mut ffi_probe_error_t` out-parameter
//! and leave it null on success. On failure they store a heap handle that
//! owns the message; the caller reads it with `ffi_probe_error_message` and
//! releases it with `ffi_probe_error_free`.

use std::ffi::{CString, c_char};
use std::ptr;

/// Opaque error handle returned through out-parameters.
#[repr(C)]
pub struct ffi_probe_error_t;

/// Converts `value` into C text, swapping interior NUL bytes for spaces.
pub(crate) fn c_text(value: &str) -> CString {
    let bytes: Vec<u8> = value
        .bytes()
        .map(|b| if b == 0 { b' ' } else { b })
        .collect();
    CString::new(bytes).unwrap_or_default()
}

pub(crate) fn reset(out_error: *mut *mut ffi_probe_error_t) {
    if out_error.is_null() {
        return;
    }
    // Safety: caller passed a writable out-parameter.
    unsafe { *out_error = ptr::null_mut() }
}

pub(crate) fn report(out_error: *mut *mut ffi_probe_error_t, message: impl Into<String>) {
    if out_error.is_null() {
        return;
    }
    let handle = Box::new(c_text(&message.into()));
    // Safety: caller passed a writable out-parameter.
    unsafe { *out_error = Box::into_raw(handle).cast() }
}

/// Returns the NUL-terminated message carried by `error`, or null.
///
/// The pointer stays valid until the handle is freed.
#[unsafe(no_mangle)]
pub extern "C" fn ffi_probe_error_message(error: *const ffi_probe_error_t) -> *const c_char {
    if error.is_null() {
        return ptr::null();
    }
    // Safety: a non-null handle came from `report` and wraps a CString.
    unsafe { (*error.cast::<CString>()).as_ptr() }
}

/// Releases an error handle. Null is ignored.
#[unsafe(no_mangle)]
pub extern "C" fn ffi_probe_error_free(error: *mut ffi_probe_error_t) {
    if error.is_null() {
        return;
    }
    // Safety: a non-null handle came from `report` and owns its allocation.
    drop(unsafe { Box::from_raw(error.cast::<CString>()) });
}
