//! N-dimensional DFT (C8): separable row/column decomposition over the
//! same 1-D [`Dft`] plans the top-level planner builds.
//!
//! Applies each axis's 1-D transform independently over the caller's fixed
//! row-major layout (stride computed from the static dimension list)
//! rather than physically transposing between axis passes — mathematically
//! equivalent, since a separable N-D DFT commutes across axes, and it
//! avoids the extra ping-pong buffer bookkeeping a transpose-per-axis
//! approach would need for the same result.

use crate::error::{DftError, Result};
use crate::numeric::{Direction, DftFloat};
use crate::plan::{Dft, Format};
use crate::util::{halfcomplex_size, int_array_product};
use num_complex::Complex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub struct NdDft<T: DftFloat> {
    dims: Vec<usize>,
    format: Format,
    /// One sub-plan per complex axis: all axes for COMPLEX, all but the
    /// last for REAL.
    complex_plans: Vec<Rc<Dft<T>>>,
    /// The REAL-only sub-plan pinned to the last axis.
    real_plan: Option<Dft<T>>,
    /// `dims[..n-1]` followed by `halfcomplex_size(dims[n-1])`, precomputed
    /// once since it never changes for the life of a REAL plan. Empty for
    /// COMPLEX plans, which pass `self.dims` directly instead.
    effective_real_dims: Vec<usize>,
    /// Element count of the all-complex working buffer: `prod(dims)` for
    /// COMPLEX, `prod(dims[..n-1]) * halfcomplex_size(dims[n-1])` for REAL.
    total_complex: usize,
    work: RefCell<Vec<Complex<T>>>,
    line_in: RefCell<Vec<Complex<T>>>,
    line_out: RefCell<Vec<Complex<T>>>,
    real_line: RefCell<Vec<T>>,
}

impl<T: DftFloat> NdDft<T> {
    pub fn new(dims: &[usize], direction: Direction, format: Format) -> Result<Self> {
        if dims.is_empty() || dims.iter().any(|&d| d == 0) {
            return Err(DftError::InvalidDimensions(dims.to_vec()));
        }
        let n = dims.len();
        let complex_axis_count = if format == Format::Complex { n } else { n - 1 };

        let mut dedup: HashMap<usize, Rc<Dft<T>>> = HashMap::new();
        let mut complex_plans = Vec::with_capacity(complex_axis_count);
        for &d in &dims[..complex_axis_count] {
            let plan = match dedup.get(&d) {
                Some(p) => p.clone(),
                None => {
                    let p = Rc::new(Dft::new(d, direction, Format::Complex)?);
                    dedup.insert(d, p.clone());
                    p
                }
            };
            complex_plans.push(plan);
        }

        let (real_plan, hc_last, total_complex, effective_real_dims) = if format == Format::Real {
            let d_last = dims[n - 1];
            let rp = Dft::new(d_last, direction, Format::Real)?;
            let hc = halfcomplex_size(d_last);
            let total = int_array_product(&dims[..n - 1]) * hc;
            let mut effective = dims[..n - 1].to_vec();
            effective.push(hc);
            (Some(rp), hc, total, effective)
        } else {
            (None, 0, int_array_product(dims), Vec::new())
        };

        let max_dim = dims.iter().copied().max().unwrap().max(hc_last);

        Ok(Self {
            dims: dims.to_vec(),
            format,
            complex_plans,
            real_plan,
            effective_real_dims,
            total_complex,
            work: RefCell::new(vec![Complex::default(); total_complex]),
            line_in: RefCell::new(vec![Complex::default(); max_dim]),
            line_out: RefCell::new(vec![Complex::default(); max_dim]),
            real_line: RefCell::new(vec![T::zero(); max_dim]),
        })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Runs every complex axis's 1-D transform in place over `work`, using
    /// `effective_dims` (the last entry replaced by `hc_last` for REAL
    /// plans, since the complex working buffer's last axis is the packed
    /// halfcomplex size rather than the original real length).
    fn run_complex_axes(&self, effective_dims: &[usize]) {
        let total = self.total_complex;
        let mut work = self.work.borrow_mut();
        let mut line_in = self.line_in.borrow_mut();
        let mut line_out = self.line_out.borrow_mut();

        for (axis, plan) in self.complex_plans.iter().enumerate() {
            let d = effective_dims[axis];
            let stride = int_array_product(&effective_dims[axis + 1..]);
            let outer = total / (d * stride);

            for block in 0..outer {
                for pos in 0..stride {
                    let base = block * d * stride + pos;
                    for k in 0..d {
                        line_in[k] = work[base + k * stride];
                    }
                    plan.transform_complex(&line_in[..d], &mut line_out[..d]);
                    for k in 0..d {
                        work[base + k * stride] = line_out[k];
                    }
                }
            }
        }
    }

    /// Transforms a length-`prod(dims)` complex signal in place between the
    /// caller's buffers.
    ///
    /// # Panics
    /// In debug builds, if `self.format() != Format::Complex`.
    pub fn transform_complex(&self, input: &[Complex<T>], output: &mut [Complex<T>]) {
        debug_assert_eq!(self.format, Format::Complex);
        self.work.borrow_mut().copy_from_slice(input);
        self.run_complex_axes(&self.dims);
        output.copy_from_slice(&self.work.borrow());
    }

    /// Transforms a length-`prod(dims)` real signal into its N-D
    /// halfcomplex layout (size [`nd_halfcomplex_size`](crate::util::nd_halfcomplex_size)).
    ///
    /// # Panics
    /// In debug builds, if this plan isn't `(Format::Real, Direction::Forward)`.
    pub fn transform_real_forward(&self, input: &[T], output: &mut [Complex<T>]) {
        debug_assert_eq!(self.format, Format::Real);
        let n = self.dims.len();
        let d_last = self.dims[n - 1];
        let hc_last = halfcomplex_size(d_last);
        let lines = int_array_product(&self.dims[..n - 1]);

        let real_plan = self
            .real_plan
            .as_ref()
            .expect("REAL NdDft always carries a real_plan");
        let mut work = self.work.borrow_mut();
        let mut real_line = self.real_line.borrow_mut();

        for line in 0..lines {
            real_line[..d_last].copy_from_slice(&input[line * d_last..(line + 1) * d_last]);
            let out_slice = &mut work[line * hc_last..(line + 1) * hc_last];
            real_plan.transform_real_forward(&real_line[..d_last], out_slice);
        }
        drop(work);

        self.run_complex_axes(&self.effective_real_dims);

        output.copy_from_slice(&self.work.borrow());
    }

    /// Transforms an N-D halfcomplex spectrum back into a length-`prod(dims)`
    /// real signal.
    ///
    /// # Panics
    /// In debug builds, if this plan isn't `(Format::Real, Direction::Backward)`.
    pub fn transform_real_backward(&self, input: &[Complex<T>], output: &mut [T]) {
        debug_assert_eq!(self.format, Format::Real);
        let n = self.dims.len();
        let d_last = self.dims[n - 1];
        let hc_last = halfcomplex_size(d_last);
        let lines = int_array_product(&self.dims[..n - 1]);

        self.work.borrow_mut().copy_from_slice(input);

        self.run_complex_axes(&self.effective_real_dims);

        let real_plan = self
            .real_plan
            .as_ref()
            .expect("REAL NdDft always carries a real_plan");
        let work = self.work.borrow();
        for line in 0..lines {
            let in_slice = &work[line * hc_last..(line + 1) * hc_last];
            let out_slice = &mut output[line * d_last..(line + 1) * d_last];
            real_plan.transform_real_backward(in_slice, out_slice);
        }
    }
}
