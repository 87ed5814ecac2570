//! Sample I/O helpers: halfcomplex sizing and mirroring, array products, and
//! the scale/normalise helpers a caller applies after a backward transform.
//!
//! A real-format transform only ever produces or consumes the non-redundant
//! half of a conjugate-symmetric spectrum (the "halfcomplex" layout); these
//! functions convert between that packed layout and a full `Complex<T>`
//! buffer.

use crate::numeric::DftFloat;
use num_complex::Complex;

/// Number of complex bins in the halfcomplex layout of a length-`n` real
/// signal: `n/2 + 1`.
#[inline]
pub fn halfcomplex_size(n: usize) -> usize {
    n / 2 + 1
}

/// Halfcomplex size of an N-dimensional real transform: every axis but the
/// last is full-length (its own size), the last axis is halved as above.
pub fn nd_halfcomplex_size(dims: &[usize]) -> usize {
    match dims.split_last() {
        None => 0,
        Some((&last, rest)) => int_array_product(rest) * halfcomplex_size(last),
    }
}

/// Product of an array of dimensions; `1` for an empty slice (the identity
/// for the axis-by-axis size computations N-D plans build from).
pub fn int_array_product(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Expands a length-`halfcomplex_size(n)` packed spectrum into a
/// full length-`n` complex buffer by mirroring `X[n-k] = conj(X[k])`.
pub fn halfcomplex_to_complex<T: DftFloat>(half: &[Complex<T>], n: usize, out: &mut [Complex<T>]) {
    halfcomplex_to_complex_stride(half, 1, n, out, 1)
}

/// Strided variant of [`halfcomplex_to_complex`].
pub fn halfcomplex_to_complex_stride<T: DftFloat>(
    half: &[Complex<T>],
    half_stride: usize,
    n: usize,
    out: &mut [Complex<T>],
    out_stride: usize,
) {
    let hc = halfcomplex_size(n);
    for k in 0..hc {
        out[k * out_stride] = half[k * half_stride];
    }
    for k in hc..n {
        out[k * out_stride] = half[(n - k) * half_stride].conj();
    }
}

/// Packs a full length-`n` conjugate-symmetric complex buffer down to its
/// non-redundant halfcomplex prefix, discarding the mirrored tail.
pub fn complex_to_halfcomplex<T: DftFloat>(full: &[Complex<T>], n: usize, out: &mut [Complex<T>]) {
    let hc = halfcomplex_size(n);
    for k in 0..hc {
        out[k] = full[k];
    }
}

/// Multiplies every element of `buf` by `s`, in place.
pub fn scale_complex<T: DftFloat>(buf: &mut [Complex<T>], s: T) {
    for v in buf.iter_mut() {
        *v = *v * s;
    }
}

/// Multiplies every real sample in `buf` by `s`, in place.
pub fn scale_real<T: DftFloat>(buf: &mut [T], s: T) {
    for v in buf.iter_mut() {
        *v = *v * s;
    }
}

/// Divides every element by `n`, the normalisation a backward transform
/// never applies on its own: backward transforms are left unnormalized so
/// a forward/backward round trip needs exactly one `normalise_complex`
/// call.
pub fn normalise_complex<T: DftFloat>(buf: &mut [Complex<T>], n: usize) {
    scale_complex(buf, T::one() / T::from(n).unwrap());
}

/// Real-buffer counterpart of [`normalise_complex`].
pub fn normalise_real<T: DftFloat>(buf: &mut [T], n: usize) {
    scale_real(buf, T::one() / T::from(n).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{twiddle, Direction};

    #[test]
    fn halfcomplex_sizes() {
        assert_eq!(halfcomplex_size(1), 1);
        assert_eq!(halfcomplex_size(2), 2);
        assert_eq!(halfcomplex_size(7), 4);
        assert_eq!(halfcomplex_size(8), 5);
    }

    #[test]
    fn nd_halfcomplex_matches_axis_product() {
        assert_eq!(nd_halfcomplex_size(&[3, 4, 8]), 3 * 4 * halfcomplex_size(8));
        assert_eq!(nd_halfcomplex_size(&[]), 0);
    }

    #[test]
    fn mirror_round_trip() {
        let n = 8;
        let full: Vec<Complex<f64>> = (0..n).map(|k| twiddle(k, n, Direction::Forward)).collect();
        let mut half = vec![Complex::default(); halfcomplex_size(n)];
        complex_to_halfcomplex(&full, n, &mut half);
        let mut back = vec![Complex::default(); n];
        halfcomplex_to_complex(&half, n, &mut back);
        for k in 0..n {
            assert!((back[k] - full[k]).norm() < 1e-12, "k={k}");
        }
    }

    #[test]
    fn normalise_undoes_n_scaling() {
        let mut buf = vec![Complex::new(4.0, -4.0); 4];
        normalise_complex(&mut buf, 4);
        for v in &buf {
            assert!((v - Complex::new(1.0, -1.0)).norm() < 1e-12);
        }
    }
}
