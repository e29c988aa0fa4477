//! Runtime Error Handling
//!
//! Thread-local error state for the exported functions. A panic across an
//! `extern "C"` boundary aborts the host process, so contract violations the
//! boundary can detect are recorded here instead.
//!
//! # Usage
//!
//! Exported functions set an error and return early:
//! ```ignore
//! let Some(sum) = (unsafe { out.as_mut() }) else {
//!     set_runtime_error("compute_sum: null output pointer");
//!     return;
//! };
//! ```
//!
//! Foreign callers poll after the call:
//! ```c
//! compute_sum(NULL);
//! if (loopbench_has_error()) {
//!     fprintf(stderr, "%s\n", loopbench_take_error());
//! }
//! ```

use std::cell::RefCell;
use std::ffi::{CString, c_char};
use std::ptr;

thread_local! {
    /// Last runtime error message on this thread
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };

    /// C string handed out by the accessors; owns the memory behind the pointer
    static ERROR_CSTRING: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last runtime error message
///
/// Clears any cached C string so no stale pointer outlives the old message.
pub fn set_runtime_error(msg: impl Into<String>) {
    let msg = msg.into();
    #[cfg(feature = "diagnostics")]
    tracing::warn!(error = %msg, "runtime error recorded");
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg));
}

/// Take (and clear) the last runtime error message
pub fn take_runtime_error() -> Option<String> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Check if there's a pending runtime error
pub fn has_runtime_error() -> bool {
    LAST_ERROR.with(|e| e.borrow().is_some())
}

/// Clear any pending runtime error
pub fn clear_runtime_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
}

/// Cache `msg` as a C string and return a pointer into the cache
///
/// Interior NUL bytes become '?' so the message survives intact otherwise.
fn cache_cstring(msg: &str) -> *const c_char {
    let bytes: Vec<u8> = msg
        .bytes()
        .map(|b| if b == 0 { b'?' } else { b })
        .collect();
    let cstring = CString::new(bytes).unwrap_or_default();
    ERROR_CSTRING.with(|cs| {
        let ptr = cstring.as_ptr();
        *cs.borrow_mut() = Some(cstring);
        ptr
    })
}

// FFI-safe error access functions

/// Check if there's a pending runtime error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn loopbench_has_error() -> bool {
    has_runtime_error()
}

/// Get the last error message as a C string pointer (FFI-safe)
///
/// Returns null if no error is pending. The error stays pending.
///
/// # WARNING: Pointer Lifetime
/// The pointer is valid until the next call to any error function on the
/// same thread. Copy the string if it must outlive that.
#[unsafe(no_mangle)]
pub extern "C" fn loopbench_get_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(msg) => cache_cstring(msg),
        None => ptr::null(),
    })
}

/// Take (and clear) the last error, returning it as a C string (FFI-safe)
///
/// Returns null if no error is pending.
///
/// # WARNING: Pointer Lifetime
/// Same as `loopbench_get_error`.
#[unsafe(no_mangle)]
pub extern "C" fn loopbench_take_error() -> *const c_char {
    match take_runtime_error() {
        Some(msg) => cache_cstring(&msg),
        None => ptr::null(),
    }
}

/// Clear any pending error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn loopbench_clear_error() {
    clear_runtime_error();
}
