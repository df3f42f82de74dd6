//! Utility helpers shared across integration tests.

/// Join source lines with `\n` into one document.
///
/// Keeps multi-line TWiki fixtures readable without embedding escape
/// sequences in long string literals.
#[allow(unused_macros, reason = "not every test file builds multi-line fixtures")]
macro_rules! doc {
    ($($line:expr),+ $(,)?) => {
        [$($line),+].join("\n")
    };
}

/// Assert that `haystack` contains `needle`, printing both on failure.
#[allow(dead_code, reason = "shared helper; unused in some test files")]
#[track_caller]
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "expected output to contain {needle:?}\noutput: {haystack:?}"
    );
}

/// Assert that `haystack` does not contain `needle`, printing both on failure.
#[allow(dead_code, reason = "shared helper; unused in some test files")]
#[track_caller]
pub fn assert_lacks(haystack: &str, needle: &str) {
    assert!(
        !haystack.contains(needle),
        "expected output not to contain {needle:?}\noutput: {haystack:?}"
    );
}
