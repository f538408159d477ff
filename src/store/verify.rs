//! Iteration Verification Module
//!
//! Snapshot-and-compare guard used around store iteration to catch callers
//! that modify the store while it is being walked.

/// Default for new stores: on in debug builds or with the
/// `verify-iteration` feature, off otherwise.
pub const VERIFY_BY_DEFAULT: bool = cfg!(any(debug_assertions, feature = "verify-iteration"));

/// Returns true if the `verify-iteration` feature forces checking on.
pub fn forced() -> bool {
    cfg!(feature = "verify-iteration")
}

// == Assert Unmodified ==
/// Runs `body`, then panics if `observe` returns something different from
/// what it returned before `body` ran.
pub fn assert_unmodified<T, R>(observe: impl Fn() -> T, body: impl FnOnce() -> R) -> R
where
    T: PartialEq,
{
    let before = observe();
    let result = body();
    assert!(
        observe() == before,
        "Expected iterate to not modify the underlying store."
    );
    result
}
