//! Bluestein's chirp z-transform (C6): reduces an arbitrary-length DFT to a
//! power-of-two-length convolution via chirp multiplication.
//!
//! Generalized to the generic float parameter and to a caller-chosen
//! [`Direction`] (a fixed-direction chirp only covers the forward case).
//! The inner convolution DFT is always forward, the same invariant Rader's
//! algorithm relies on: the chirp absorbs the direction instead, so a
//! forward-only inner plan can still realize either transform direction.

use crate::numeric::{next_power_of_two, twiddle, Direction, DftFloat};
use crate::plan::{Dft, Format};
use num_complex::Complex;
use std::cell::RefCell;

pub struct BluesteinState<T: DftFloat> {
    n: usize,
    /// `a[k] = e^{s*j*pi*k^2/n}`, the chirp multiplied into the input and,
    /// conjugated-and-reapplied, into the output.
    chirp: Vec<Complex<T>>,
    /// `DFT_M` of the mirror-padded chirp, pre-divided by `m`.
    w: Vec<Complex<T>>,
    inner: Box<Dft<T>>,
    scratch_a: RefCell<Vec<Complex<T>>>,
    scratch_b: RefCell<Vec<Complex<T>>>,
}

impl<T: DftFloat> BluesteinState<T> {
    /// Builds Bluestein state for any size `n >= 1`, with convolution length
    /// `m` = next power of two `>= 2n - 1` (or `n` itself if already a
    /// power of two).
    pub fn new(n: usize, direction: Direction) -> Self {
        let m = if crate::numeric::is_power_of_two(n) {
            n
        } else {
            next_power_of_two(2 * n - 1)
        };

        let mut chirp = Vec::with_capacity(n);
        for k in 0..n {
            chirp.push(twiddle::<T>(k * k, 2 * n, direction));
        }

        let mut w = vec![Complex::<T>::default(); m];
        let m_t = T::from(m).unwrap();
        for k in 0..n {
            w[k] = chirp[k] / m_t;
        }
        for k in 1..n {
            w[m - k] = w[k];
        }

        let inner = Box::new(
            Dft::new(m, Direction::Forward, Format::Complex)
                .expect("inner Bluestein convolution plan for a power-of-two length cannot fail"),
        );
        inner.transform_complex_inplace(&mut w);

        Self {
            n,
            chirp,
            w,
            inner,
            scratch_a: RefCell::new(vec![Complex::default(); m]),
            scratch_b: RefCell::new(vec![Complex::default(); m]),
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn transform(
        &self,
        input: &[Complex<T>],
        in_stride: usize,
        output: &mut [Complex<T>],
        out_stride: usize,
    ) {
        let mut a = self.scratch_a.borrow_mut();
        let mut b = self.scratch_b.borrow_mut();

        for v in a.iter_mut() {
            *v = Complex::default();
        }
        for k in 0..self.n {
            a[k] = input[k * in_stride] * self.chirp[k];
        }

        self.inner.transform_complex(&a, &mut b);

        for (bv, wv) in b.iter_mut().zip(self.w.iter()) {
            *bv = bv.conj() * *wv;
        }

        self.inner.transform_complex(&b, &mut a);

        for k in 0..self.n {
            output[k * out_stride] = a[k].conj() * self.chirp[k];
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
    fn matches_naive_for_various_sizes() {
        for &n in &[1usize, 2, 3, 5, 7, 11, 13, 17, 23, 29, 31, 37] {
            for dir in [Direction::Forward, Direction::Backward] {
                let state = BluesteinState::<f64>::new(n, dir);
                let x: Vec<Complex<f64>> = (0..n)
                    .map(|i| Complex::new((i as f64 * 0.3).sin(), (i as f64 * 0.9).cos()))
                    .collect();
                let mut out = vec![Complex::default(); n];
                state.transform(&x, 1, &mut out, 1);
                let want = naive_dft(&x, dir);
                for k in 0..n {
                    assert!(
                        (out[k] - want[k]).norm() < 1e-6,
                        "n={n} dir={dir:?} k={k}: {:?} != {:?}",
                        out[k],
                        want[k]
                    );
                }
            }
        }
    }
}
