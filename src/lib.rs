//! Mixed-radix discrete Fourier and cosine transforms: Cooley-Tukey,
//! Rader's algorithm, and Bluestein's chirp z-transform, for arbitrary
//! 1-D/N-D, real/complex sizes.
//!
//! Build a [`Dft`] (or [`NdDft`], [`Dct`]) once for a given size/direction/
//! format, then reuse it to transform as many signals of that shape as you
//! like; construction allocates, transforms do not.

mod bluestein;
mod butterfly;
mod cooley_tukey;
mod dct;
mod error;
mod kernel;
mod ndim;
mod numeric;
mod plan;
mod rader;
mod util;
mod window;

pub use dct::Dct;
pub use error::{DftError, Result};
pub use ndim::NdDft;
pub use numeric::{
    is_even, is_odd, is_power_of_two, next_power_of_two, Direction, DftFloat, Format,
};
pub use plan::Dft;
pub use util::{
    complex_to_halfcomplex, halfcomplex_size, halfcomplex_to_complex, halfcomplex_to_complex_stride,
    int_array_product, nd_halfcomplex_size, normalise_complex, normalise_real, scale_complex,
    scale_real,
};
pub use window::{bartlett, blackman, hamming, hann, WindowSymmetry};

pub use num_complex::Complex;
