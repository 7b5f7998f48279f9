//! The two probe entry points exercised by host FFI harnesses.

use std::ptr;

/// Callback signature accepted by `ffi_callback_test`.
#[allow(non_camel_case_types)]
pub type ffi_probe_callback_t = extern "C" fn(attribute: i32) -> i32;

/// Writes `attribute` through `assignee`.
///
/// # Safety
///
/// `assignee` must be valid for writes. The crash probe passes null on
/// purpose so the store faults here.
unsafe fn store_through(attribute: i32, assignee: *mut i32) {
    // Volatile keeps the store from being optimized away.
    unsafe { ptr::write_volatile(assignee, attribute) }
}

/// Scales `attribute` by 5, forwards it to `callback`, and returns the
/// callback's result unchanged.
///
/// Scaling wraps per two's-complement semantics near the `int32_t`
/// boundaries. Any fault raised inside `callback` belongs to the caller.
#[unsafe(no_mangle)]
pub extern "C" fn ffi_callback_test(attribute: i32, callback: ffi_probe_callback_t) -> i32 {
    let scaled = attribute.wrapping_mul(5);
    log::debug!("ffi_callback_test({attribute}): invoking callback with {scaled}");
    callback(scaled)
}

/// Writes `attribute` through a null pointer. Never returns normally.
///
/// The fault is a native invalid memory access, not a Rust panic, so the
/// host harness observes a segmentation fault crossing the FFI boundary.
#[unsafe(no_mangle)]
pub extern "C" fn ffi_crash_test(attribute: i32) {
    log::debug!("ffi_crash_test({attribute}): writing through null");
    // Safety: deliberately violated. Null is the write target.
    unsafe { store_through(attribute, ptr::null_mut()) }
}
