//! loopbench runtime: a loop accumulation benchmark subject
//!
//! Key design principles:
//! - The loop is the workload: 1,000,000 sequential additions, never folded
//!   into a closed-form sum
//! - Output goes through a caller-owned `i64`, never a return value
//! - Every export uses the C ABI under a flat symbol name, so any language
//!   with a C FFI can link the staticlib and time the call

pub mod accumulate;
pub mod error;

// Accumulation (exported for foreign linking)
pub use accumulate::{LOOP_BOUND, SUM_INCREMENT, accumulate, accumulate_with, compute_sum};

// Error handling
pub use error::{clear_runtime_error, has_runtime_error, set_runtime_error, take_runtime_error};
