//! Loop accumulation exported with C ABI
//!
//! `compute_sum` is the benchmark subject: it adds every integer in
//! `0..LOOP_BOUND` onto a caller-owned `i64`, one addition per index, in
//! ascending order.
//!
//! # Loop Form
//!
//! The sum has a closed form, and LLVM will happily find it. Each index is
//! routed through [`std::hint::black_box`] so the optimizer has to emit the
//! loop; the point of the function is the iteration cost, not the result.
//!
//! # Overflow Behavior
//!
//! Additions wrap (`i64::wrapping_add`). A fresh accumulator never gets close
//! to the limit; one pre-loaded within `SUM_INCREMENT` of `i64::MAX` wraps
//! instead of panicking across the C boundary. Callers should not rely on
//! the wrapped value.

use std::hint::black_box;

use crate::error::set_runtime_error;

/// Exclusive upper bound of the summed range
pub const LOOP_BOUND: i64 = 1_000_000;

/// Amount one call adds to the accumulator: the sum of `0..LOOP_BOUND`
///
/// For verification only. The loop never uses it.
pub const SUM_INCREMENT: i64 = LOOP_BOUND * (LOOP_BOUND - 1) / 2;

/// Run the accumulation loop with an injected step
///
/// Calls `step(i)` exactly once for every `i` in `0..LOOP_BOUND`, in
/// ascending order, on the caller's thread.
#[inline]
pub fn accumulate_with<F: FnMut(i64)>(mut step: F) {
    for i in 0..LOOP_BOUND {
        step(black_box(i));
    }
}

/// Add every integer in `0..LOOP_BOUND` onto `sum`
///
/// The previous value is kept: two calls starting from 0 leave
/// `2 * SUM_INCREMENT`.
#[inline]
pub fn accumulate(sum: &mut i64) {
    accumulate_with(|i| *sum = sum.wrapping_add(i));
}

/// Add every integer in `0..LOOP_BOUND` onto `*out` (for foreign callers)
///
/// C signature: `void compute_sum(int64_t *out);`
///
/// # Error Handling
/// - Null `out`: sets runtime error, leaves memory untouched
///
/// # Safety
/// `out` must be null or point to a writable, aligned `i64` that nothing else
/// accesses for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn compute_sum(out: *mut i64) {
    // SAFETY: the caller guarantees `out` is null or valid and exclusive
    let Some(sum) = (unsafe { out.as_mut() }) else {
        set_runtime_error("compute_sum: null output pointer");
        return;
    };
    accumulate(sum);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{clear_runtime_error, has_runtime_error, take_runtime_error};

    #[test]
    fn test_sum_increment_value() {
        assert_eq!(SUM_INCREMENT, 499_999_500_000);
    }

    #[test]
    fn test_accumulate_from_zero() {
        let mut sum = 0i64;
        accumulate(&mut sum);
        assert_eq!(sum, 499_999_500_000);
    }

    #[test]
    fn test_accumulate_is_additive() {
        for start in [1i64, -7, 42_000, -499_999_500_000] {
            let mut sum = start;
            accumulate(&mut sum);
            assert_eq!(sum, start + 499_999_500_000);
        }
    }

    #[test]
    fn test_accumulate_twice() {
        let mut sum = 0i64;
        accumulate(&mut sum);
        accumulate(&mut sum);
        assert_eq!(sum, 999_999_000_000);
    }

    #[test]
    fn test_accumulate_at_i64_limits() {
        let mut low = i64::MIN;
        accumulate(&mut low);
        assert_eq!(low, i64::MIN + SUM_INCREMENT);

        let mut high = i64::MAX - SUM_INCREMENT;
        accumulate(&mut high);
        assert_eq!(high, i64::MAX);
    }

    #[test]
    fn test_accumulate_with_counts_additions() {
        let mut calls = 0u64;
        accumulate_with(|_| calls += 1);
        assert_eq!(calls, 1_000_000);
    }

    #[test]
    fn test_accumulate_with_ascending_order() {
        let mut expected = 0i64;
        accumulate_with(|i| {
            assert_eq!(i, expected, "indices must arrive in ascending order");
            expected += 1;
        });
        assert_eq!(expected, LOOP_BOUND);
    }

    #[test]
    fn test_compute_sum() {
        clear_runtime_error();
        let mut sum = 0i64;
        unsafe { compute_sum(&mut sum) };
        assert_eq!(sum, 499_999_500_000);
        assert!(!has_runtime_error());
    }

    #[test]
    fn test_compute_sum_null_pointer() {
        clear_runtime_error();
        unsafe { compute_sum(std::ptr::null_mut()) };
        assert_eq!(
            take_runtime_error(),
            Some("compute_sum: null output pointer".to_string())
        );
    }
}
