//! C FFI test probes for host crash and callback harnesses.

mod error;
mod logging;
mod probes;
