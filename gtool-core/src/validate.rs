//! Input normalisation shared by vectors, matrices, triangles and borders.
//!
//! Every public operation that accepts "array-like" input funnels it through
//! [`VectorLike`] or [`MatrixLike`] first, so the whole input is checked
//! before a single component is adopted.

use crate::error::{GeometryError, Result};

/// Compile-time dimension marker.
pub struct Dim<const N: usize>;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Dim<2> {}
    impl Sealed for super::Dim<3> {}
    impl Sealed for super::Dim<4> {}
}

/// Implemented for the dimensions vectors and matrices come in: 2, 3 and 4.
pub trait SupportedDim: sealed::Sealed {}

impl SupportedDim for Dim<2> {}
impl SupportedDim for Dim<3> {}
impl SupportedDim for Dim<4> {}

/// Anything that can stand in for an N-component vector.
pub trait VectorLike<const N: usize> {
    /// The first N components, validated.
    fn to_components(&self) -> Result<[f64; N]>;

    /// How many components the input actually carries.
    fn arity(&self) -> usize;
}

/// Anything that can stand in for an N x N matrix.
pub trait MatrixLike<const N: usize> {
    /// The leading N x N block, validated, row-major.
    fn to_grid(&self) -> Result<[[f64; N]; N]>;
}

/// Require `value` to be a finite number.
pub fn check_number(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::type_error(format!(
            "expected a finite number, got {value}"
        )))
    }
}

/// Require a non-zero, finite divisor.
pub fn check_divisor(divisor: f64) -> Result<f64> {
    let divisor = check_number(divisor)?;
    if divisor == 0.0 {
        return Err(GeometryError::Division);
    }
    Ok(divisor)
}

/// Require `index < len`.
pub fn check_index(index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(GeometryError::Index { index, len })
    }
}

/// The first N entries of `values`; extra entries are ignored.
pub fn components<const N: usize>(values: &[f64]) -> Result<[f64; N]> {
    if values.len() < N {
        return Err(GeometryError::Length {
            expected: N,
            found: values.len(),
        });
    }

    let mut out = [0.0; N];
    for (slot, &value) in out.iter_mut().zip(values) {
        *slot = check_number(value)?;
    }
    Ok(out)
}

/// The leading N x N block of `rows`.
///
/// Fails with `Length` when there are fewer than N rows or a row is shorter
/// than N, and with `Type` on a non-finite entry.
pub fn grid<const N: usize, R: AsRef<[f64]>>(rows: &[R]) -> Result<[[f64; N]; N]> {
    if rows.len() < N {
        return Err(GeometryError::Length {
            expected: N,
            found: rows.len(),
        });
    }

    let mut out = [[0.0; N]; N];
    for (slot, row) in out.iter_mut().zip(rows) {
        *slot = components(row.as_ref())?;
    }
    Ok(out)
}

impl<const N: usize> VectorLike<N> for [f64] {
    fn to_components(&self) -> Result<[f64; N]> {
        components(self)
    }

    fn arity(&self) -> usize {
        self.len()
    }
}

impl<const N: usize, const M: usize> VectorLike<N> for [f64; M] {
    fn to_components(&self) -> Result<[f64; N]> {
        components(self)
    }

    fn arity(&self) -> usize {
        M
    }
}

impl<const N: usize> VectorLike<N> for Vec<f64> {
    fn to_components(&self) -> Result<[f64; N]> {
        components(self)
    }

    fn arity(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> VectorLike<N> for [i32] {
    fn to_components(&self) -> Result<[f64; N]> {
        let widened: Vec<f64> = self.iter().map(|&v| f64::from(v)).collect();
        components(&widened)
    }

    fn arity(&self) -> usize {
        self.len()
    }
}

impl<const N: usize, const M: usize> VectorLike<N> for [i32; M] {
    fn to_components(&self) -> Result<[f64; N]> {
        VectorLike::<N>::to_components(self.as_slice())
    }

    fn arity(&self) -> usize {
        M
    }
}

impl<const N: usize, T: VectorLike<N> + ?Sized> VectorLike<N> for &T {
    fn to_components(&self) -> Result<[f64; N]> {
        (**self).to_components()
    }

    fn arity(&self) -> usize {
        (**self).arity()
    }
}

impl<const N: usize, R: AsRef<[f64]>> MatrixLike<N> for [R] {
    fn to_grid(&self) -> Result<[[f64; N]; N]> {
        grid(self)
    }
}

impl<const N: usize, const M: usize, R: AsRef<[f64]>> MatrixLike<N> for [R; M] {
    fn to_grid(&self) -> Result<[[f64; N]; N]> {
        grid(self)
    }
}

impl<const N: usize, R: AsRef<[f64]>> MatrixLike<N> for Vec<R> {
    fn to_grid(&self) -> Result<[[f64; N]; N]> {
        grid(self)
    }
}

impl<const N: usize, T: MatrixLike<N> + ?Sized> MatrixLike<N> for &T {
    fn to_grid(&self) -> Result<[[f64; N]; N]> {
        (**self).to_grid()
    }
}
