//! Top-level DFT planner (C7): classifies a requested size, builds the
//! matching inner engine, and exposes the complex and real transform entry
//! points.
//!
//! Sizes at or below [`crate::butterfly::SUB_TRANSFORM_THRESHOLD`] become
//! [`Algorithm::Base`]; composite sizes become [`Algorithm::CooleyTukey`]
//! over the full radix list; prime sizes split into Rader (when `p - 1` is
//! a power of two) or Bluestein (otherwise). Real transforms wrap an inner
//! complex plan: even-length forward transforms use a fast packed path,
//! everything else falls back through a halfcomplex embed/extract.

use crate::bluestein::BluesteinState;
use crate::butterfly::{apply_fixed_kernel, SUB_TRANSFORM_THRESHOLD};
use crate::cooley_tukey::CooleyTukeyState;
use crate::error::{DftError, Result};
use crate::numeric::{is_power_of_two, is_prime, twiddle, Direction, DftFloat};
pub use crate::numeric::Format;
use crate::rader::RaderState;
use crate::util::halfcomplex_to_complex;
use num_complex::Complex;
use std::cell::RefCell;

/// The inner engine a plan was built with, picked once at construction by
/// [`Dft::new`] and never changed.
pub enum Algorithm<T: DftFloat> {
    Base,
    CooleyTukey(CooleyTukeyState<T>),
    Rader(RaderState<T>),
    Bluestein(BluesteinState<T>),
}

/// Scratch state for the REAL format: the inner complex plan doing the real
/// work and the buffers its packed/unpacked view needs.
struct RealState<T: DftFloat> {
    inner_size: usize,
    even_real: bool,
    post_twiddle: Vec<Complex<T>>,
    scratch_a: RefCell<Vec<Complex<T>>>,
    scratch_b: RefCell<Vec<Complex<T>>>,
    /// Gathered halfcomplex input for `transform_real_backward`, pre-sized
    /// so the strided gather never allocates per call.
    scratch_hc: RefCell<Vec<Complex<T>>>,
}

/// An opaque, reusable transform plan for one size/direction/format. Build
/// once with [`Dft::new`], then call `transform_*` many times.
pub struct Dft<T: DftFloat> {
    size: usize,
    direction: Direction,
    format: Format,
    algorithm: Algorithm<T>,
    real_state: Option<RealState<T>>,
}

impl<T: DftFloat> Dft<T> {
    /// Builds a plan for `size` samples in the given direction and format.
    /// `size == 0` is always rejected; REAL additionally requires
    /// `size >= 2` — a length-1 real signal has no non-trivial spectrum.
    pub fn new(size: usize, direction: Direction, format: Format) -> Result<Self> {
        if size == 0 || (format == Format::Real && size < 2) {
            return Err(DftError::UnsupportedSize {
                size,
                context: "Dft::new",
            });
        }

        let real_state = if format == Format::Real {
            let even_real = direction == Direction::Forward && size % 2 == 0;
            let inner_size = if even_real { size / 2 } else { size };
            let inner_direction = direction;

            log::debug!(
                "dft plan: real size={size} dir={direction:?} even_real={even_real} inner_size={inner_size}"
            );

            let post_twiddle = if even_real {
                (1..size / 2)
                    .map(|k| twiddle::<T>(k, size, Direction::Forward))
                    .collect()
            } else {
                Vec::new()
            };

            Some((inner_size, inner_direction, even_real, post_twiddle))
        } else {
            None
        };

        let (algo_size, algo_direction) = match &real_state {
            Some((inner_size, inner_direction, _, _)) => (*inner_size, *inner_direction),
            None => (size, direction),
        };

        let algorithm = Self::build_algorithm(algo_size, algo_direction)?;

        let real_state = real_state.map(|(inner_size, _, even_real, post_twiddle)| RealState {
            inner_size,
            even_real,
            post_twiddle,
            scratch_a: RefCell::new(vec![Complex::default(); inner_size]),
            scratch_b: RefCell::new(vec![Complex::default(); inner_size]),
            scratch_hc: RefCell::new(vec![Complex::default(); crate::util::halfcomplex_size(size)]),
        });

        Ok(Self {
            size,
            direction,
            format,
            algorithm,
            real_state,
        })
    }

    fn build_algorithm(n: usize, direction: Direction) -> Result<Algorithm<T>> {
        if n <= SUB_TRANSFORM_THRESHOLD {
            log::trace!("dft plan: size {n} uses a fixed base kernel");
            Ok(Algorithm::Base)
        } else if is_prime(n) && is_power_of_two(n - 1) {
            log::trace!("dft plan: size {n} is prime with p-1 a power of two, using Rader");
            Ok(Algorithm::Rader(RaderState::new(n, direction)))
        } else if is_prime(n) {
            log::trace!("dft plan: size {n} is prime, using Bluestein");
            Ok(Algorithm::Bluestein(BluesteinState::new(n, direction)))
        } else {
            log::trace!("dft plan: size {n} is composite, using Cooley-Tukey");
            Ok(Algorithm::CooleyTukey(CooleyTukeyState::new(n, direction)))
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn dispatch(&self, input: &[Complex<T>], in_stride: usize, output: &mut [Complex<T>], out_stride: usize) {
        match &self.algorithm {
            Algorithm::Base => {
                let n = self.size;
                let mut local = [Complex::<T>::default(); SUB_TRANSFORM_THRESHOLD];
                for k in 0..n {
                    local[k] = input[k * in_stride];
                }
                apply_fixed_kernel(&mut local[..n], self.direction);
                for k in 0..n {
                    output[k * out_stride] = local[k];
                }
            }
            Algorithm::CooleyTukey(state) => state.transform(input, in_stride, output, out_stride),
            Algorithm::Rader(state) => state.transform(input, in_stride, output, out_stride),
            Algorithm::Bluestein(state) => state.transform(input, in_stride, output, out_stride),
        }
    }

    /// Transforms a length-`size()` complex signal.
    ///
    /// # Panics
    /// In debug builds, if `self.format() != Format::Complex`.
    pub fn transform_complex(&self, input: &[Complex<T>], output: &mut [Complex<T>]) {
        self.transform_complex_stride(input, 1, output, 1)
    }

    /// Strided variant of [`Dft::transform_complex`].
    pub fn transform_complex_stride(
        &self,
        input: &[Complex<T>],
        in_stride: usize,
        output: &mut [Complex<T>],
        out_stride: usize,
    ) {
        debug_assert_eq!(self.format, Format::Complex, "transform_complex on a REAL plan");
        self.dispatch(input, in_stride, output, out_stride);
    }

    /// In-place complex transform via a throwaway copy of the input. Only
    /// used by Rader/Bluestein during their own construction (transforming
    /// the fixed twiddle/chirp kernel once); plan construction is the one
    /// place this crate allows an incidental allocation.
    pub(crate) fn transform_complex_inplace(&self, buf: &mut [Complex<T>]) {
        let copy = buf.to_vec();
        self.transform_complex(&copy, buf);
    }

    /// Transforms a length-`size()` real signal into its
    /// `halfcomplex_size(size())`-length packed spectrum.
    ///
    /// # Panics
    /// In debug builds, if this plan isn't `(Format::Real, Direction::Forward)`.
    pub fn transform_real_forward(&self, input: &[T], output: &mut [Complex<T>]) {
        self.transform_real_forward_stride(input, 1, output, 1)
    }

    /// Strided variant of [`Dft::transform_real_forward`].
    pub fn transform_real_forward_stride(
        &self,
        input: &[T],
        in_stride: usize,
        output: &mut [Complex<T>],
        out_stride: usize,
    ) {
        debug_assert_eq!(self.format, Format::Real);
        debug_assert_eq!(self.direction, Direction::Forward);
        let rs = self
            .real_state
            .as_ref()
            .expect("REAL plan always carries RealState");

        let n = self.size;
        let mut a = rs.scratch_a.borrow_mut();

        if rs.even_real {
            let nc = rs.inner_size;
            for i in 0..nc {
                a[i] = Complex::new(input[2 * i * in_stride], input[(2 * i + 1) * in_stride]);
            }
            let mut c = rs.scratch_b.borrow_mut();
            self.dispatch(&a, 1, &mut c, 1);

            output[0] = Complex::new(c[0].re + c[0].im, T::zero());
            output[nc * out_stride] = Complex::new(c[0].re - c[0].im, T::zero());

            let half = T::from(0.5).unwrap();
            for k in 1..nc {
                let e = (c[k] + c[nc - k].conj()) * half;
                let o = Complex::new(
                    (c[k].im + c[nc - k].im) * half,
                    (c[nc - k].re - c[k].re) * half,
                );
                output[k * out_stride] = e + rs.post_twiddle[k - 1] * o;
            }
        } else {
            for i in 0..n {
                a[i] = Complex::new(input[i * in_stride], T::zero());
            }
            let mut c = rs.scratch_b.borrow_mut();
            self.dispatch(&a, 1, &mut c, 1);
            let hc = crate::util::halfcomplex_size(n);
            for k in 0..hc {
                output[k * out_stride] = c[k];
            }
        }
    }

    /// Transforms a `halfcomplex_size(size())`-length packed spectrum back
    /// into a length-`size()` real signal.
    ///
    /// # Panics
    /// In debug builds, if this plan isn't `(Format::Real, Direction::Backward)`.
    pub fn transform_real_backward(&self, input: &[Complex<T>], output: &mut [T]) {
        self.transform_real_backward_stride(input, 1, output, 1)
    }

    /// Strided variant of [`Dft::transform_real_backward`].
    pub fn transform_real_backward_stride(
        &self,
        input: &[Complex<T>],
        in_stride: usize,
        output: &mut [T],
        out_stride: usize,
    ) {
        debug_assert_eq!(self.format, Format::Real);
        debug_assert_eq!(self.direction, Direction::Backward);
        let rs = self
            .real_state
            .as_ref()
            .expect("REAL plan always carries RealState");
        debug_assert!(!rs.even_real, "real backward never uses the even-length fast path");

        let n = self.size;
        let mut full = rs.scratch_a.borrow_mut();
        let mut hc = rs.scratch_hc.borrow_mut();
        for (k, slot) in hc.iter_mut().enumerate() {
            *slot = input[k * in_stride];
        }
        halfcomplex_to_complex(&hc, n, &mut full);

        let mut out_complex = rs.scratch_b.borrow_mut();
        self.dispatch(&full, 1, &mut out_complex, 1);
        for k in 0..n {
            output[k * out_stride] = out_complex[k].re;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::normalise_complex;

    fn init_logging() {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .is_test(true)
            .try_init();
    }

    fn naive_dft(x: &[Complex<f64>], dir: Direction) -> Vec<Complex<f64>> {
        let n = x.len();
        (0..n)
            .map(|k| {
                (0..n)
                    .map(|j| x[j] * twiddle::<f64>(j * k % n, n, dir))
                    .fold(Complex::new(0.0, 0.0), |acc, v| acc + v)
            })
            .collect()
    }

    const STRESS_SIZES: &[usize] = &[1, 2, 3, 4, 17, 23, 31, 64, 81, 120];

    #[test]
    fn complex_forward_matches_naive() {
        init_logging();
        for &n in STRESS_SIZES {
            let plan = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
            let x: Vec<Complex<f64>> = (0..n)
                .map(|i| Complex::new((i as f64 * 0.41).sin(), (i as f64 * 0.23).cos()))
                .collect();
            let mut out = vec![Complex::default(); n];
            plan.transform_complex(&x, &mut out);
            let want = naive_dft(&x, Direction::Forward);
            for k in 0..n {
                assert!((out[k] - want[k]).norm() < 1e-6, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn complex_round_trip_with_normalisation() {
        for &n in STRESS_SIZES {
            let fwd = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
            let bwd = Dft::<f64>::new(n, Direction::Backward, Format::Complex).unwrap();
            let x: Vec<Complex<f64>> = (0..n)
                .map(|i| Complex::new((i as f64 * 0.7).sin(), (i as f64 * 1.3).cos()))
                .collect();
            let mut freq = vec![Complex::default(); n];
            fwd.transform_complex(&x, &mut freq);
            let mut back = vec![Complex::default(); n];
            bwd.transform_complex(&freq, &mut back);
            normalise_complex(&mut back, n);
            for k in 0..n {
                assert!((back[k] - x[k]).norm() < 1e-6, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn linearity_holds() {
        let n = 24;
        let plan = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
        let a: Vec<Complex<f64>> = (0..n).map(|i| Complex::new(i as f64, 0.0)).collect();
        let b: Vec<Complex<f64>> = (0..n).map(|i| Complex::new(0.0, (i as f64).cos())).collect();
        let sum: Vec<Complex<f64>> = a.iter().zip(&b).map(|(x, y)| x + y).collect();

        let mut fa = vec![Complex::default(); n];
        let mut fb = vec![Complex::default(); n];
        let mut fsum = vec![Complex::default(); n];
        plan.transform_complex(&a, &mut fa);
        plan.transform_complex(&b, &mut fb);
        plan.transform_complex(&sum, &mut fsum);

        for k in 0..n {
            assert!((fsum[k] - (fa[k] + fb[k])).norm() < 1e-6);
        }
    }

    #[test]
    fn dc_bin_is_input_sum() {
        for &n in STRESS_SIZES {
            let plan = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
            let x: Vec<Complex<f64>> = (0..n).map(|i| Complex::new(i as f64 + 1.0, 0.0)).collect();
            let mut out = vec![Complex::default(); n];
            plan.transform_complex(&x, &mut out);
            let sum: Complex<f64> = x.iter().fold(Complex::default(), |acc, v| acc + v);
            assert!((out[0] - sum).norm() < 1e-6, "n={n}");
        }
    }

    #[test]
    fn impulse_is_flat_spectrum() {
        for &n in STRESS_SIZES {
            let plan = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
            let mut x = vec![Complex::default(); n];
            x[0] = Complex::new(1.0, 0.0);
            let mut out = vec![Complex::default(); n];
            plan.transform_complex(&x, &mut out);
            for k in 0..n {
                assert!((out[k] - Complex::new(1.0, 0.0)).norm() < 1e-6, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn real_even_forward_matches_complex_reference() {
        for &n in &[2usize, 4, 8, 16, 24, 64] {
            let real_plan = Dft::<f64>::new(n, Direction::Forward, Format::Real).unwrap();
            let complex_plan = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
            let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.33).sin()).collect();
            let xc: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();

            let hc = crate::util::halfcomplex_size(n);
            let mut half = vec![Complex::default(); hc];
            real_plan.transform_real_forward(&x, &mut half);

            let mut full = vec![Complex::default(); n];
            complex_plan.transform_complex(&xc, &mut full);

            for k in 0..hc {
                assert!((half[k] - full[k]).norm() < 1e-6, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn real_odd_forward_matches_complex_reference() {
        for &n in &[3usize, 5, 7, 9, 17] {
            let real_plan = Dft::<f64>::new(n, Direction::Forward, Format::Real).unwrap();
            let complex_plan = Dft::<f64>::new(n, Direction::Forward, Format::Complex).unwrap();
            let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.33).sin()).collect();
            let xc: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();

            let hc = crate::util::halfcomplex_size(n);
            let mut half = vec![Complex::default(); hc];
            real_plan.transform_real_forward(&x, &mut half);

            let mut full = vec![Complex::default(); n];
            complex_plan.transform_complex(&xc, &mut full);

            for k in 0..hc {
                assert!((half[k] - full[k]).norm() < 1e-6, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn real_round_trip() {
        for &n in &[2usize, 3, 4, 5, 8, 17, 31, 64] {
            let fwd = Dft::<f64>::new(n, Direction::Forward, Format::Real).unwrap();
            let bwd = Dft::<f64>::new(n, Direction::Backward, Format::Real).unwrap();
            let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.59).cos()).collect();

            let hc = crate::util::halfcomplex_size(n);
            let mut half = vec![Complex::default(); hc];
            fwd.transform_real_forward(&x, &mut half);

            let mut back = vec![0.0; n];
            bwd.transform_real_backward(&half, &mut back);
            crate::util::normalise_real(&mut back, n);

            for k in 0..n {
                assert!((back[k] - x[k]).abs() < 1e-6, "n={n} k={k}: {} != {}", back[k], x[k]);
            }
        }
    }

    #[test]
    fn rejects_zero_size() {
        assert!(Dft::<f64>::new(0, Direction::Forward, Format::Complex).is_err());
        assert!(Dft::<f64>::new(1, Direction::Forward, Format::Real).is_err());
    }
}
