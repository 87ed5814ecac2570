//! Rader's algorithm (C5): reduces a prime-length DFT to a cyclic
//! convolution of length `p - 1`, realized as a linear convolution embedded
//! in a power-of-two length `M` so the inner DFT can always be Cooley-Tukey
//! friendly.
//!
//! The "forward twice with a conjugate sandwiched in between" trick lets a
//! forward-only inner plan emulate the inverse transform the convolution
//! needs, generalized from a fixed-length-`p-1` inner transform to a
//! power-of-two-`M` embedding. DC bookkeeping adds `x[0]` once to `y[0]`
//! (via the inner DFT's DC bin) and once to every other output bin, rather
//! than folding it into a cross-term correction on the inner spectrum.

use crate::numeric::{
    is_power_of_two, mult_inverse_mod, next_power_of_two, primitive_root, twiddle, Direction,
    DftFloat,
};
use crate::plan::{Dft, Format};
use num_complex::Complex;
use std::cell::RefCell;

pub struct RaderState<T: DftFloat> {
    p: usize,
    g: usize,
    g_inv: usize,
    /// `DFT_M` of the reordered, zero/replicate-padded twiddle sequence,
    /// already divided by `m` so the convolution comes out pre-normalized.
    w: Vec<Complex<T>>,
    inner: Box<Dft<T>>,
    scratch_a: RefCell<Vec<Complex<T>>>,
    scratch_b: RefCell<Vec<Complex<T>>>,
}

impl<T: DftFloat> RaderState<T> {
    /// Builds Rader state for prime `p >= 3`.
    pub fn new(p: usize, direction: Direction) -> Self {
        debug_assert!(p >= 3, "Rader requires an odd prime size");
        let g = primitive_root(p);
        let g_inv = mult_inverse_mod(g as i64, p as i64).unwrap() as usize;

        let n1 = p - 1;
        let m = if is_power_of_two(n1) {
            n1
        } else {
            next_power_of_two(2 * n1 - 1)
        };

        // w[n] = twiddle(g^{-n} mod p, p, dir) / m, for n in [0, n1).
        let mut w = vec![Complex::<T>::default(); m];
        let m_t = T::from(m).unwrap();
        let mut gp = 1usize;
        for slot in w.iter_mut().take(n1) {
            *slot = twiddle::<T>(gp, p, direction) / m_t;
            gp = (gp * g_inv) % p;
        }

        // Embed the length-n1 cyclic convolution kernel into a length-m
        // buffer: a linear-convolution solver only sees the correct wrapped
        // value at negative shifts if the tail of the buffer repeats the
        // (non-DC) head of the kernel, offset so it lands exactly at the
        // wraparound point. See the module derivation above.
        if m > n1 {
            for s in 1..n1 {
                w[m - n1 + s] = w[s];
            }
        }

        let inner = Box::new(
            Dft::new(m, Direction::Forward, Format::Complex)
                .expect("inner Rader convolution plan for a power-of-two length cannot fail"),
        );
        inner.transform_complex_inplace(&mut w);

        Self {
            p,
            g,
            g_inv,
            w,
            inner,
            scratch_a: RefCell::new(vec![Complex::default(); m]),
            scratch_b: RefCell::new(vec![Complex::default(); m]),
        }
    }

    pub fn size(&self) -> usize {
        self.p
    }

    pub fn transform(
        &self,
        input: &[Complex<T>],
        in_stride: usize,
        output: &mut [Complex<T>],
        out_stride: usize,
    ) {
        let n1 = self.p - 1;
        let x0 = input[0];

        let mut a = self.scratch_a.borrow_mut();
        let mut b = self.scratch_b.borrow_mut();

        for v in a.iter_mut() {
            *v = Complex::default();
        }
        let mut gp = 1usize;
        for slot in a.iter_mut().take(n1) {
            *slot = input[gp * in_stride];
            gp = (gp * self.g) % self.p;
        }

        // A = DFT_M(a)
        self.inner.transform_complex(&a, &mut b);
        let dc = x0 + b[0];

        // conj(A .* W): the conjugate half of the "forward, conjugate,
        // forward, conjugate" trick that emulates an inverse DFT using only
        // a forward-only inner plan.
        for (bv, wv) in b.iter_mut().zip(self.w.iter()) {
            *bv = (*bv * *wv).conj();
        }

        // R = DFT_M(conj(A .* W)); conv = conj(R) gives the true linear
        // convolution of `a` with the original (undivided) twiddle kernel,
        // whose first p-1 entries equal the desired cyclic convolution.
        self.inner.transform_complex(&b, &mut a);

        output[0] = dc;
        let mut gp = 1usize;
        for k in 0..n1 {
            let conv_k = a[k].conj();
            output[gp * out_stride] = x0 + conv_k;
            gp = (gp * self.g_inv) % self.p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::twiddle as tw;

    fn naive_dft(x: &[Complex<f64>], dir: Direction) -> Vec<Complex<f64>> {
        let n = x.len();
        (0..n)
            .map(|k| {
                (0..n)
                    .map(|j| x[j] * tw::<f64>(j * k % n, n, dir))
                    .fold(Complex::new(0.0, 0.0), |acc, v| acc + v)
            })
            .collect()
    }

    #[test]
    fn matches_naive_for_primes() {
        for &p in &[3usize, 5, 7, 11, 13, 17, 23, 29, 31] {
            for dir in [Direction::Forward, Direction::Backward] {
                let state = RaderState::<f64>::new(p, dir);
                let x: Vec<Complex<f64>> = (0..p)
                    .map(|i| Complex::new((i as f64).sin(), (i as f64 * 1.7).cos()))
                    .collect();
                let mut out = vec![Complex::default(); p];
                state.transform(&x, 1, &mut out, 1);
                let want = naive_dft(&x, dir);
                for k in 0..p {
                    assert!(
                        (out[k] - want[k]).norm() < 1e-6,
                        "p={p} dir={dir:?} k={k}: {:?} != {:?}",
                        out[k],
                        want[k]
                    );
                }
            }
        }
    }

    #[test]
    fn dc_bin_is_sum_of_input() {
        let p = 23;
        let state = RaderState::<f64>::new(p, Direction::Forward);
        let x: Vec<Complex<f64>> = (0..p).map(|i| Complex::new(i as f64, 0.0)).collect();
        let mut out = vec![Complex::default(); p];
        state.transform(&x, 1, &mut out, 1);
        let sum: Complex<f64> = x.iter().fold(Complex::default(), |a, &b| a + b);
        assert!((out[0] - sum).norm() < 1e-9);
    }
}
