/// Asserts that two floats agree to within an absolute tolerance.
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tol:expr) => {
        let (actual, expected): (f64, f64) = ($actual, $expected);
        assert!(
            (actual - expected).abs() <= $tol,
            "{} = {} is not within {} of {}",
            stringify!($actual),
            actual,
            $tol,
            expected
        );
    };
}

/// Asserts that two slices agree element-wise to within an absolute tolerance.
#[macro_export]
macro_rules! assert_fields_close {
    ($actual:expr, $expected:expr, $tol:expr) => {
        let (actual, expected): (&[f64], &[f64]) = (&$actual[..], &$expected[..]);
        assert_eq!(actual.len(), expected.len(), "Field length mismatch");
        for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() <= $tol,
                "cell {}: {} is not within {} of {}",
                idx,
                a,
                $tol,
                e
            );
        }
    };
}

/// Asserts that the total population of `$state` still matches `$initial`.
#[macro_export]
macro_rules! assert_population_conserved {
    ($state:expr, $initial:expr) => {
        let total = $state.total_population();
        let initial: f64 = $initial;
        assert!(
            (total - initial).abs() <= 1e-9 * initial.abs().max(1.0),
            "Population not conserved: {} -> {}",
            initial,
            total
        );
    };
}
