/**
Calculates the arithmetic mean of a slice of f64 values.

## Arguments
- `values`: A slice of f64 values.

## Returns
The mean, or `None` for an empty slice.
 */
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/**
Percentage change from `first` to `last`.

## Returns
`(last - first) / first * 100`, or `None` when the change is undefined:
a zero `first`, a NaN input, or a result that overflows to infinity.
 */
pub fn percent_change(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0).filter(|change| change.is_finite())
}
