//! Exercises the callback probe through its exported C symbol, the same way
//! a host harness binds it.

use std::sync::atomic::{AtomicI32, Ordering};

// Link the probe library so the exported symbols below resolve.
use ffi_probe as _;

unsafe extern "C" {
    fn ffi_callback_test(attribute: i32, callback: extern "C" fn(i32) -> i32) -> i32;
}

static OBSERVED: AtomicI32 = AtomicI32::new(0);

extern "C" fn identity(attribute: i32) -> i32 {
    attribute
}

extern "C" fn recording(attribute: i32) -> i32 {
    OBSERVED.store(attribute, Ordering::SeqCst);
    attribute.wrapping_add(1)
}

#[test]
fn values_survive_the_round_trip_unchanged() {
    // Safety: the exported symbol matches the declared C signature.
    unsafe {
        assert_eq!(ffi_callback_test(2, identity), 10);
        assert_eq!(ffi_callback_test(0, identity), 0);
    }
}

#[test]
fn callback_sees_the_scaled_value_and_its_result_is_returned() {
    // Safety: the exported symbol matches the declared C signature.
    let result = unsafe { ffi_callback_test(9, recording) };
    assert_eq!(OBSERVED.load(Ordering::SeqCst), 45);
    assert_eq!(result, 46);
}
