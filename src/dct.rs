//! DCT-II (forward) / DCT-III (backward) (C9): reduces a length-N discrete
//! cosine transform to one length-N complex DFT via even/odd reordering and
//! a pre/post twiddle.
//!
//! Owns an inner forward complex [`Dft`], precomputes its trig tables once
//! at construction, and reuses scratch buffers per call.
//!
//! The post-half reorder index follows the prose "even-indexed samples in
//! order followed by odd-indexed samples in reverse": a naive
//! `N−1−2·(j−⌈N/2⌉)` formula collides for several `N` unless the parity
//! adjustment fires on `N odd` rather than `N even`. See `reorder_index`
//! below.

use crate::numeric::{Direction, DftFloat};
use crate::plan::{Dft, Format};
use num_complex::Complex;
use std::cell::RefCell;

/// Maps a position `j` in the reordered sequence back to the original
/// sample index it draws from: even indices ascending for `j < ceil(N/2)`,
/// then odd indices descending.
fn reorder_index(j: usize, n: usize) -> usize {
    let half = (n + 1) / 2;
    if j < half {
        2 * j
    } else {
        let largest_odd = if n % 2 == 0 { n - 1 } else { n - 2 };
        largest_odd - 2 * (j - half)
    }
}

pub struct Dct<T: DftFloat> {
    n: usize,
    direction: Direction,
    post_twiddle: Vec<Complex<T>>,
    inner: Dft<T>,
    scratch: RefCell<Vec<Complex<T>>>,
    scratch_out: RefCell<Vec<Complex<T>>>,
}

impl<T: DftFloat> Dct<T> {
    /// Builds a DCT-II (`Direction::Forward`) or DCT-III
    /// (`Direction::Backward`) plan for length `n >= 1`.
    pub fn new(n: usize, direction: Direction) -> crate::error::Result<Self> {
        if n == 0 {
            return Err(crate::error::DftError::UnsupportedSize {
                size: n,
                context: "Dct::new",
            });
        }
        let pi = T::PI();
        let two_n = T::from(2 * n).unwrap();
        let post_twiddle = (0..n)
            .map(|k| {
                let theta = pi * T::from(k).unwrap() / two_n;
                Complex::new(theta.cos(), theta.sin())
            })
            .collect();

        let inner = Dft::new(n, Direction::Forward, Format::Complex)?;

        Ok(Self {
            n,
            direction,
            post_twiddle,
            inner,
            scratch: RefCell::new(vec![Complex::default(); n]),
            scratch_out: RefCell::new(vec![Complex::default(); n]),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// DCT-II: real input of length `n`, real output of length `n`.
    ///
    /// # Panics
    /// In debug builds, if this plan was built with `Direction::Backward`.
    pub fn transform_forward(&self, input: &[T], output: &mut [T]) {
        debug_assert_eq!(self.direction, Direction::Forward);
        let n = self.n;
        let mut c = self.scratch.borrow_mut();
        for j in 0..n {
            c[j] = Complex::new(input[reorder_index(j, n)], T::zero());
        }
        let mut spectrum = self.scratch_out.borrow_mut();
        self.inner.transform_complex(&c, &mut spectrum);
        for k in 0..n {
            output[k] = (spectrum[k] * self.post_twiddle[k]).re;
        }
    }

    /// DCT-III: real input of length `n`, real output of length `n`.
    ///
    /// # Panics
    /// In debug builds, if this plan was built with `Direction::Forward`.
    pub fn transform_backward(&self, input: &[T], output: &mut [T]) {
        debug_assert_eq!(self.direction, Direction::Backward);
        let n = self.n;
        let half = T::from(0.5).unwrap();
        let mut c = self.scratch.borrow_mut();
        c[0] = Complex::new(input[0] * half, T::zero());
        for k in 1..n {
            c[k] = Complex::new(input[k] * half, -input[n - k] * half) * self.post_twiddle[k];
        }
        let mut time = self.scratch_out.borrow_mut();
        self.inner.transform_complex(&c, &mut time);
        for j in 0..n {
            output[reorder_index(j, n)] = time[j].re;
        }
    }
}
