/// `linear_interp(y0, y1, frac)` is linear interpolation of `y0` and `y1` with fraction `frac`
///
/// # Arguments:
///
/// * `y0`, `y1` - The two y-values, a straight line can be drawn through these with an x-distance of 1.0
///
/// * `frac` - The fractional x-distance, in `[0.0, 1.0]`
pub fn linear_interp(y0: f32, y1: f32, frac: f32) -> f32 {
    y0 + ((y1 - y0) * frac)
}

/// `fraction_between(v, lo, hi)` is how far `v` has travelled from `lo` towards `hi`, clamped to `[0.0, 1.0]`
///
/// `hi` must be greater than `lo`
pub fn fraction_between(val: u16, lo: u16, hi: u16) -> f32 {
    let val = val.max(lo).min(hi);
    (val - lo) as f32 / (hi - lo) as f32
}

#[cfg(test)]
/// `is_almost(v1, v2, e)` is true iff `v1` is within `e` of `v2`
pub fn is_almost(v1: f32, v2: f32, eps: f32) -> bool {
    fabs(v1 - v2) <= eps
}

#[cfg(test)]
/// `fabs(v)` is the absolute value of `v`
pub fn fabs(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}
