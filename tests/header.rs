//! Generates the C header with cbindgen and checks that every exported
//! symbol a host harness binds against is present.

use std::path::PathBuf;

#[test]
fn generated_header_covers_the_exported_surface() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .generate()
        .expect("generate C header");

    let mut buffer = Vec::new();
    bindings.write(&mut buffer);
    let header = String::from_utf8(buffer).expect("header is utf-8");

    for symbol in [
        "ffi_crash_test",
        "ffi_callback_test",
        "ffi_probe_log_config_init",
        "ffi_probe_log_init",
        "ffi_probe_error_message",
        "ffi_probe_error_free",
    ] {
        assert!(header.contains(symbol), "header is missing `{symbol}`:\n{header}");
    }
}
