//! The butterfly layer: twiddle-multiplies a stage's sub-transform outputs
//! and combines them with a radix kernel, either a fixed straight-line
//! kernel (radix 2, 3, 4) or a stored inner complex sub-plan (radix > 4).

use crate::kernel::{radix1, radix2, radix3, radix4};
use crate::numeric::{twiddle, Direction, DftFloat};
use num_complex::Complex;

/// Radices at or below this threshold use a specialized fixed kernel;
/// radices above it are delegated to a dedicated inner complex sub-plan of
/// that length (see `CooleyTukeyState::sub_plans`). Fixed at 4, which
/// exactly matches the set of specialized kernels this crate implements
/// (1, 2, 3, 4) — there is no public API to change it.
pub const SUB_TRANSFORM_THRESHOLD: usize = 4;

/// Builds the length-`(r-1)*m` per-stage twiddle table in row-major `(i, k)`
/// order: entry for `(i, k)`, `k` in `1..r`, holds `twiddle(i*k, r*m, dir)`.
/// The zeroth block (`k == 0`) is never multiplied and so is not stored.
pub fn build_stage_twiddles<T: DftFloat>(m: usize, r: usize, dir: Direction) -> Vec<Complex<T>> {
    let n = m * r;
    let mut table = Vec::with_capacity((r - 1) * m);
    for i in 0..m {
        for k in 1..r {
            table.push(twiddle(i * k, n, dir));
        }
    }
    table
}

/// Applies the fixed kernel for radix 1, 2, 3, or 4 in place over `buf`
/// (exactly `r` elements, already twiddle-multiplied). Panics if
/// `buf.len()` exceeds [`SUB_TRANSFORM_THRESHOLD`]; callers must route
/// larger radices through a sub-plan instead.
pub fn apply_fixed_kernel<T: DftFloat>(buf: &mut [Complex<T>], dir: Direction) {
    match buf.len() {
        1 => {
            let y = radix1([buf[0]]);
            buf[0] = y[0];
        }
        2 => {
            let y = radix2([buf[0], buf[1]]);
            buf.copy_from_slice(&y);
        }
        3 => {
            let y = radix3([buf[0], buf[1], buf[2]], dir);
            buf.copy_from_slice(&y);
        }
        4 => {
            let y = radix4([buf[0], buf[1], buf[2], buf[3]], dir);
            buf.copy_from_slice(&y);
        }
        n => unreachable!(
            "apply_fixed_kernel called with radix {n} > SUB_TRANSFORM_THRESHOLD"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_twiddle_table_size() {
        let t: Vec<Complex<f64>> = build_stage_twiddles(5, 3, Direction::Forward);
        assert_eq!(t.len(), (3 - 1) * 5);
    }

    #[test]
    fn stage_twiddle_zero_block_implicit() {
        // i=0, k=0 (the untouched block) isn't stored; i=0, k=1 should be 1+0j
        // only when m*r == the base period makes angle zero — generic sanity
        // check instead: magnitude is always 1.
        let t: Vec<Complex<f64>> = build_stage_twiddles(4, 3, Direction::Forward);
        for w in &t {
            assert!((w.norm() - 1.0).abs() < 1e-12);
        }
    }
}
