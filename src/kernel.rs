//! Fixed-radix straight-line complex DFT kernels for N = 1, 2, 3, 4.
//!
//! Each kernel takes the radix's input values already gathered (by the
//! butterfly layer) into a small local array and returns the transformed
//! values in natural order; no branches in the hot path beyond the
//! loop-invariant direction selector radix-4 needs.

use crate::numeric::Direction;
use num_complex::Complex;
use num_traits::Float;

/// Rotates a complex value by +90 degrees: multiply by `j`.
#[inline(always)]
fn rot90<T: Float>(c: Complex<T>) -> Complex<T> {
    Complex::new(-c.im, c.re)
}

/// Size-1 DFT: identity.
#[inline(always)]
pub fn radix1<T: Float>(x: [Complex<T>; 1]) -> [Complex<T>; 1] {
    x
}

/// Size-2 DFT: `{A,B} <- {A+B, A-B}`. Direction-independent.
#[inline(always)]
pub fn radix2<T: Float>(x: [Complex<T>; 2]) -> [Complex<T>; 2] {
    let (a, b) = (x[0], x[1]);
    [a + b, a - b]
}

/// Size-3 DFT using the real constant `c = -/+ sin(2*pi/3)` (sign set by
/// `dir`).
#[inline(always)]
pub fn radix3<T: Float>(x: [Complex<T>; 3], dir: Direction) -> [Complex<T>; 3] {
    let (a, b, c_val) = (x[0], x[1], x[2]);
    let two_thirds_sin = (T::from(2.0).unwrap() * T::from(std::f64::consts::PI).unwrap()
        / T::from(3.0).unwrap())
    .sin();
    let sign = T::from(dir.sign()).unwrap();
    let c = sign * two_thirds_sin;

    let t0 = b + c_val;
    let t1 = a - t0 * T::from(0.5).unwrap();
    let t2 = rot90(b - c_val) * c;

    [a + t0, t1 - t2, t1 + t2]
}

/// Size-4 DFT. `dir` selects `B - D` (forward) or `D - B` (backward).
#[inline(always)]
pub fn radix4<T: Float>(x: [Complex<T>; 4], dir: Direction) -> [Complex<T>; 4] {
    let (a, b, c, d) = (x[0], x[1], x[2], x[3]);
    let t0 = a + c;
    let t1 = b + d;
    let t2 = a - c;
    let t3 = match dir {
        Direction::Forward => b - d,
        Direction::Backward => d - b,
    };
    let jt3 = rot90(t3);

    [t0 + t1, t2 + jt3, t0 - t1, t2 - jt3]
}
