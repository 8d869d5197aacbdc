/// Arithmetic mean of a slice, `0.0` for an empty slice
#[inline]
pub fn mean(slice: &[f64]) -> f64 {
    if slice.is_empty() {
        return 0.0;
    }
    slice.iter().sum::<f64>() / slice.len() as f64
}

/// Largest value of an iterator, `0.0` if it is empty
#[inline]
pub fn max<I: IntoIterator<Item = f64>>(iter: I) -> f64 {
    iter.into_iter().fold(0.0f64, f64::max)
}
