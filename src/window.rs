//! Window-function generators (Bartlett, Hann, Hamming, Blackman), each
//! available in symmetric (endpoints included, classic analysis window) or
//! periodic (endpoint implicitly shared with the next frame, classic for
//! overlap-add synthesis) form.

use crate::numeric::DftFloat;

/// Whether a window's last sample repeats its first (symmetric, the
/// standard choice for one-shot spectral analysis) or is dropped so the
/// window tiles cleanly across overlapping frames (periodic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSymmetry {
    Symmetric,
    Periodic,
}

/// Denominator to divide by so the window's argument runs `0..=1` for
/// `Symmetric` or `0..1` for `Periodic`.
fn divisor(len: usize, symmetry: WindowSymmetry) -> usize {
    match symmetry {
        WindowSymmetry::Symmetric => len.saturating_sub(1).max(1),
        WindowSymmetry::Periodic => len,
    }
}

pub fn bartlett<T: DftFloat>(len: usize, symmetry: WindowSymmetry) -> Vec<T> {
    if len <= 1 {
        return vec![T::one(); len];
    }
    let m = T::from(divisor(len, symmetry)).unwrap();
    let half = m / T::from(2.0).unwrap();
    (0..len)
        .map(|n| {
            let n = T::from(n).unwrap();
            T::one() - (n - half).abs() / half
        })
        .collect()
}

pub fn hann<T: DftFloat>(len: usize, symmetry: WindowSymmetry) -> Vec<T> {
    raised_cosine(len, symmetry, T::from(0.5).unwrap(), T::from(0.5).unwrap())
}

pub fn hamming<T: DftFloat>(len: usize, symmetry: WindowSymmetry) -> Vec<T> {
    raised_cosine(
        len,
        symmetry,
        T::from(0.54).unwrap(),
        T::from(0.46).unwrap(),
    )
}

fn raised_cosine<T: DftFloat>(len: usize, symmetry: WindowSymmetry, a0: T, a1: T) -> Vec<T> {
    if len <= 1 {
        return vec![T::one(); len];
    }
    let two_pi = T::from(2.0).unwrap() * T::PI();
    let m = T::from(divisor(len, symmetry)).unwrap();
    (0..len)
        .map(|n| {
            let theta = two_pi * T::from(n).unwrap() / m;
            a0 - a1 * theta.cos()
        })
        .collect()
}

pub fn blackman<T: DftFloat>(len: usize, symmetry: WindowSymmetry) -> Vec<T> {
    if len <= 1 {
        return vec![T::one(); len];
    }
    let a0 = T::from(0.42).unwrap();
    let a1 = T::from(0.5).unwrap();
    let a2 = T::from(0.08).unwrap();
    let two_pi = T::from(2.0).unwrap() * T::PI();
    let four_pi = T::from(4.0).unwrap() * T::PI();
    let m = T::from(divisor(len, symmetry)).unwrap();
    (0..len)
        .map(|n| {
            let n = T::from(n).unwrap();
            a0 - a1 * (two_pi * n / m).cos() + a2 * (four_pi * n / m).cos()
        })
        .collect()
}
