//! Number-theoretic primitives and twiddle-factor generation shared by every
//! transform engine: gcd, modular inverse, primality, radix factorization,
//! and the twiddle tables the butterfly layer multiplies into stage outputs.

use num_complex::Complex;
use num_traits::{Float, FloatConst};

/// Floating-point element type a plan can be built over. Blanket-implemented
/// for any `Float + FloatConst`, so `Dft<f32>` and `Dft<f64>` both work with
/// no per-width boilerplate (the precision choice is a generic parameter
/// rather than a process-wide compile flag).
pub trait DftFloat: Float + FloatConst + std::fmt::Debug + Default + 'static {}
impl<T: Float + FloatConst + std::fmt::Debug + Default + 'static> DftFloat for T {}

/// Transform direction. Forward uses twiddle exponent sign -j, backward +j.
/// The library never normalizes backward transforms by 1/N; see
/// [`crate::util::normalise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Sign used in the twiddle exponent: -1 for forward, +1 for backward.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Backward => 1.0,
        }
    }

    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Sample format a plan accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Complex,
    Real,
}

#[inline]
pub fn is_even(n: usize) -> bool {
    n % 2 == 0
}

#[inline]
pub fn is_odd(n: usize) -> bool {
    !is_even(n)
}

#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Smallest 2^k > x for x > 0; 0 for x == 0 (there is no power of two
/// strictly greater than every non-negative integer below zero to fall back
/// on, and x == 0 never arises from a real transform length).
pub fn next_power_of_two(x: usize) -> usize {
    if x == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= x {
        p <<= 1;
    }
    p
}

/// Canonical non-negative remainder of `a` modulo `n`.
#[inline]
pub fn modulo(a: i64, n: i64) -> i64 {
    ((a % n) + n) % n
}

/// Extended Euclidean algorithm: returns (g, x, y) with `a*x + b*y == g`.
pub fn gcd_ext(a: i64, b: i64) -> (i64, i64, i64) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x1, y1) = gcd_ext(b, a % b);
        (g, y1, x1 - (a / b) * y1)
    }
}

/// Modular multiplicative inverse of `a` mod `n`, or `None` if `gcd(a,n) != 1`.
pub fn mult_inverse_mod(a: i64, n: i64) -> Option<i64> {
    let (g, x, _) = gcd_ext(a, n);
    if g != 1 {
        None
    } else {
        Some(modulo(x, n))
    }
}

/// Trial-division primality test. `n < 2` is not prime.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut p = 3usize;
    while p.saturating_mul(p) <= n {
        if n % p == 0 {
            return false;
        }
        p += 2;
    }
    true
}

/// Smallest-factor-first prime factorization, e.g. `prime_factors(12) == [2,2,3]`.
pub fn prime_factors(mut n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    let mut p = 2usize;
    while p.saturating_mul(p) <= n {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Finds a primitive root mod the prime `p`, given the prime factorization of
/// `p - 1`. `g` is a primitive root iff `g^((p-1)/q) != 1 (mod p)` for every
/// distinct prime factor `q` of `p - 1`.
pub fn primitive_root(p: usize) -> usize {
    if p == 2 {
        return 1;
    }
    let mut distinct: Vec<usize> = prime_factors(p - 1);
    distinct.dedup();
    let mut g = 2usize;
    loop {
        let is_generator = distinct
            .iter()
            .all(|&q| powmod(g, (p - 1) / q, p) != 1);
        if is_generator {
            return g;
        }
        g += 1;
    }
}

/// Modular exponentiation by squaring.
pub fn powmod(mut base: usize, mut exp: usize, modulus: usize) -> usize {
    let mut result = 1usize % modulus.max(1);
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * base) % modulus;
        }
        base = (base * base) % modulus;
        exp >>= 1;
    }
    result
}

/// Generates the ordered radix list (r_1, ..., r_k) with product N:
/// repeatedly factor out 4, then 2, then 3, then odd factors 5, 7, 9, ...;
/// any factor exceeding sqrt(remaining) is taken whole.
/// The first radix listed is outermost (largest sub-transform), the last is
/// innermost. Returns an empty list for N == 1.
pub fn radix_list(mut n: usize) -> Vec<usize> {
    let mut radices = Vec::new();
    if n <= 1 {
        return radices;
    }
    while n % 4 == 0 {
        radices.push(4);
        n /= 4;
    }
    while n % 2 == 0 {
        radices.push(2);
        n /= 2;
    }
    while n % 3 == 0 {
        radices.push(3);
        n /= 3;
    }
    let mut f = 5usize;
    while n > 1 {
        if f * f > n {
            radices.push(n);
            n = 1;
            break;
        }
        if n % f == 0 {
            radices.push(f);
            n /= f;
        } else {
            f += 2;
        }
    }
    radices
}

/// `e^{s * 2*pi*j*k/n}` with `s = -1` for forward, `+1` for backward.
pub fn twiddle<T: DftFloat>(k: usize, n: usize, dir: Direction) -> Complex<T> {
    let two_pi = T::from(2.0).unwrap() * T::PI();
    let sign = T::from(dir.sign()).unwrap();
    let theta = sign * two_pi * T::from(k).unwrap() / T::from(n).unwrap();
    Complex::new(theta.cos(), theta.sin())
}

/// `twiddle(k, n, dir)` scaled by `1/s` in both components, used by Rader to
/// fold a convolution-length normalization into the twiddle table.
pub fn scaled_twiddle<T: DftFloat>(k: usize, n: usize, dir: Direction, s: T) -> Complex<T> {
    twiddle(k, n, dir) / s
}
