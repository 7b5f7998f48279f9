//! FFI-configurable logging for the probe surface.
//!
//! Hosts opt in through `ffi_probe_log_init`: records either reach a
//! caller-supplied C callback or fall back to stderr. The process-wide `log`
//! facade is claimed at most once; later calls only reconfigure the sink.

use std::ffi::{c_char, c_void};
use std::ptr;
use std::sync::{Mutex, PoisonError};

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

use crate::error::{c_text, ffi_probe_error_t, report, reset};

static LOGGER: Lazy<ProbeLogger> = Lazy::new(ProbeLogger::default);
static LOGGER_CLAIMED: Lazy<bool> = Lazy::new(|| log::set_logger(&*LOGGER).is_ok());

/// Log level values accepted and reported by the probe library.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub enum ffi_probe_log_level_t {
    FFI_PROBE_LOG_LEVEL_OFF = 0,
    FFI_PROBE_LOG_LEVEL_ERROR = 1,
    FFI_PROBE_LOG_LEVEL_WARN = 2,
    FFI_PROBE_LOG_LEVEL_INFO = 3,
    FFI_PROBE_LOG_LEVEL_DEBUG = 4,
    FFI_PROBE_LOG_LEVEL_TRACE = 5,
}

impl ffi_probe_log_level_t {
    fn as_filter(self) -> LevelFilter {
        use ffi_probe_log_level_t::*;
        match self {
            FFI_PROBE_LOG_LEVEL_OFF => LevelFilter::Off,
            FFI_PROBE_LOG_LEVEL_ERROR => LevelFilter::Error,
            FFI_PROBE_LOG_LEVEL_WARN => LevelFilter::Warn,
            FFI_PROBE_LOG_LEVEL_INFO => LevelFilter::Info,
            FFI_PROBE_LOG_LEVEL_DEBUG => LevelFilter::Debug,
            FFI_PROBE_LOG_LEVEL_TRACE => LevelFilter::Trace,
        }
    }

    fn of(level: Level) -> Self {
        use ffi_probe_log_level_t::*;
        match level {
            Level::Error => FFI_PROBE_LOG_LEVEL_ERROR,
            Level::Warn => FFI_PROBE_LOG_LEVEL_WARN,
            Level::Info => FFI_PROBE_LOG_LEVEL_INFO,
            Level::Debug => FFI_PROBE_LOG_LEVEL_DEBUG,
            Level::Trace => FFI_PROBE_LOG_LEVEL_TRACE,
        }
    }
}

/// Log record handed to a host callback.
///
/// Every string pointer is borrowed for the duration of the callback only.
/// `module_path` and `file` may be null; `line` is 0 when unknown.
#[repr(C)]
pub struct ffi_probe_log_record_t {
    pub level: ffi_probe_log_level_t,
    pub target: *const c_char,
    pub message: *const c_char,
    pub module_path: *const c_char,
    pub file: *const c_char,
    pub line: u32,
}

/// Host callback receiving probe log records. Null selects stderr output.
#[allow(non_camel_case_types)]
pub type ffi_probe_log_callback_t =
    Option<extern "C" fn(record: *const ffi_probe_log_record_t, user_data: *mut c_void)>;

/// Logging configuration passed to `ffi_probe_log_init`.
///
/// A `RUST_LOG` environment value naming a plain level takes precedence over
/// `level`. `user_data` is forwarded to `callback` unchanged.
#[repr(C)]
pub struct ffi_probe_log_config_t {
    pub level: ffi_probe_log_level_t,
    pub callback: ffi_probe_log_callback_t,
    pub user_data: *mut c_void,
}

#[derive(Clone, Copy)]
struct Sink {
    level: LevelFilter,
    callback: ffi_probe_log_callback_t,
    user_data: usize,
}

impl Default for Sink {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            callback: None,
            user_data: 0,
        }
    }
}

#[derive(Default)]
struct ProbeLogger {
    sink: Mutex<Sink>,
}

impl ProbeLogger {
    fn sink(&self) -> Sink {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reconfigure(&self, sink: Sink) {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = sink;
    }
}

impl Log for ProbeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("ffi_probe")
            && metadata.level().to_level_filter() <= self.sink().level
    }

    fn log(&self, record: &Record) {
        let sink = self.sink();
        if !record.target().starts_with("ffi_probe")
            || record.level().to_level_filter() > sink.level
        {
            return;
        }
        match sink.callback {
            Some(callback) => deliver(record, callback, sink.user_data as *mut c_void),
            None => eprintln!("[{}] {}: {}", record.level(), record.target(), record.args()),
        }
    }

    fn flush(&self) {}
}

fn deliver(
    record: &Record,
    callback: extern "C" fn(*const ffi_probe_log_record_t, *mut c_void),
    user_data: *mut c_void,
) {
    let target = c_text(record.target());
    let message = c_text(&record.args().to_string());
    let module_path = record.module_path().map(c_text);
    let file = record.file().map(c_text);
    let out = ffi_probe_log_record_t {
        level: ffi_probe_log_level_t::of(record.level()),
        target: target.as_ptr(),
        message: message.as_ptr(),
        module_path: module_path.as_deref().map_or(ptr::null(), |p| p.as_ptr()),
        file: file.as_deref().map_or(ptr::null(), |p| p.as_ptr()),
        line: record.line().unwrap_or(0),
    };
    callback(&out, user_data);
}

fn requested_level(config: Option<&ffi_probe_log_config_t>) -> Result<LevelFilter, String> {
    if let Ok(value) = std::env::var("RUST_LOG") {
        return value
            .trim()
            .parse()
            .map_err(|_| format!("invalid RUST_LOG level `{value}`"));
    }
    Ok(config.map_or(LevelFilter::Info, |config| config.level.as_filter()))
}

/// Fills `config` with the defaults: INFO level, stderr output.
#[unsafe(no_mangle)]
pub extern "C" fn ffi_probe_log_config_init(config: *mut ffi_probe_log_config_t) {
    if config.is_null() {
        return;
    }
    // Safety: caller passed a writable config pointer.
    unsafe {
        *config = ffi_probe_log_config_t {
            level: ffi_probe_log_level_t::FFI_PROBE_LOG_LEVEL_INFO,
            callback: None,
            user_data: ptr::null_mut(),
        };
    }
}

/// Installs or reconfigures probe logging.
///
/// A null `config` selects the defaults. Returns false and reports through
/// `out_error` when `RUST_LOG` names an unknown level or when another
/// logger already claimed the process-wide `log` facade.
#[unsafe(no_mangle)]
pub extern "C" fn ffi_probe_log_init(
    config: *const ffi_probe_log_config_t,
    out_error: *mut *mut ffi_probe_error_t,
) -> bool {
    reset(out_error);

    // Safety: config is either null or a valid pointer provided by the caller.
    let config = unsafe { config.as_ref() };
    let level = match requested_level(config) {
        Ok(level) => level,
        Err(message) => {
            report(out_error, message);
            return false;
        }
    };

    if !*LOGGER_CLAIMED {
        report(out_error, "the global logger was already claimed elsewhere");
        return false;
    }

    LOGGER.reconfigure(Sink {
        level,
        callback: config.and_then(|config| config.callback),
        user_data: config.map_or(0, |config| config.user_data as usize),
    });
    log::set_max_level(level);
    true
}
