//! Square matrices of size 2, 3 and 4.
use std::ops::{Add, Index, Mul, Neg, Sub};

use nalgebra::SMatrix;

use crate::error::Result;
use crate::validate::{self, Dim, MatrixLike, SupportedDim, VectorLike};

/// An N x N real matrix.
///
/// Entries are only ever adopted after the whole input passed
/// [`MatrixLike::to_grid`], so a matrix never holds a partial grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    entries: SMatrix<f64, N, N>,
}

pub type Matrix2 = Matrix<2>;
pub type Matrix3 = Matrix<3>;
pub type Matrix4 = Matrix<4>;

impl<const N: usize> Matrix<N>
where
    Dim<N>: SupportedDim,
{
    pub fn new(grid: impl MatrixLike<N>) -> Result<Self> {
        Ok(Self::from_grid(grid.to_grid()?))
    }

    /// All entries 0.
    pub fn zero() -> Self {
        Self {
            entries: SMatrix::zeros(),
        }
    }

    /// 1 on the diagonal, 0 elsewhere.
    pub fn identity() -> Self {
        Self {
            entries: SMatrix::identity(),
        }
    }
}

impl<const N: usize> Matrix<N> {
    pub(crate) fn from_grid(grid: [[f64; N]; N]) -> Self {
        Self {
            entries: SMatrix::from_fn(|r, c| grid[r][c]),
        }
    }

    pub(crate) fn entries(&self) -> SMatrix<f64, N, N> {
        self.entries
    }

    /// Row-major copy of every entry.
    pub fn grid(&self) -> [[f64; N]; N] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.entries[(r, c)]))
    }

    pub fn set_grid(&mut self, grid: impl MatrixLike<N>) -> Result<()> {
        *self = Self::from_grid(grid.to_grid()?);
        Ok(())
    }

    pub fn get(&self, row: usize, column: usize) -> Result<f64> {
        validate::check_index(row, N)?;
        validate::check_index(column, N)?;
        Ok(self.entries[(row, column)])
    }

    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        validate::check_index(row, N)?;
        validate::check_index(column, N)?;
        self.entries[(row, column)] = validate::check_number(value)?;
        Ok(())
    }

    pub fn row(&self, index: usize) -> Result<[f64; N]> {
        validate::check_index(index, N)?;
        Ok(std::array::from_fn(|c| self.entries[(index, c)]))
    }

    pub fn set_row(&mut self, index: usize, values: impl VectorLike<N>) -> Result<()> {
        validate::check_index(index, N)?;
        let values = values.to_components()?;
        for (c, value) in values.into_iter().enumerate() {
            self.entries[(index, c)] = value;
        }
        Ok(())
    }

    pub fn column(&self, index: usize) -> Result<[f64; N]> {
        validate::check_index(index, N)?;
        Ok(std::array::from_fn(|r| self.entries[(r, index)]))
    }

    pub fn set_column(&mut self, index: usize, values: impl VectorLike<N>) -> Result<()> {
        validate::check_index(index, N)?;
        let values = values.to_components()?;
        for (r, value) in values.into_iter().enumerate() {
            self.entries[(r, index)] = value;
        }
        Ok(())
    }

    /// Entrywise comparison against any accepted grid shape. Malformed
    /// input compares unequal.
    pub fn eq_grid(&self, other: impl MatrixLike<N>) -> bool {
        other
            .to_grid()
            .map(|grid| grid == self.grid())
            .unwrap_or(false)
    }

    pub fn transposed(&self) -> Self {
        Self {
            entries: self.entries.transpose(),
        }
    }

    pub fn transpose(&mut self) -> &mut Self {
        self.entries.transpose_mut();
        self
    }

    pub fn try_add(&self, other: impl MatrixLike<N>) -> Result<Self> {
        let mut sum = *self;
        sum.add_in_place(other)?;
        Ok(sum)
    }

    pub fn try_sub(&self, other: impl MatrixLike<N>) -> Result<Self> {
        let mut diff = *self;
        diff.sub_in_place(other)?;
        Ok(diff)
    }

    /// Row-by-column product `self * other`.
    pub fn try_mul(&self, other: impl MatrixLike<N>) -> Result<Self> {
        let mut product = *self;
        product.mul_in_place(other)?;
        Ok(product)
    }

    pub fn div_scalar(&self, divisor: f64) -> Result<Self> {
        let mut quotient = *self;
        quotient.div_in_place(divisor)?;
        Ok(quotient)
    }

    pub fn add_in_place(&mut self, other: impl MatrixLike<N>) -> Result<&mut Self> {
        let other = Self::from_grid(other.to_grid()?);
        self.entries += other.entries;
        Ok(self)
    }

    pub fn sub_in_place(&mut self, other: impl MatrixLike<N>) -> Result<&mut Self> {
        let other = Self::from_grid(other.to_grid()?);
        self.entries -= other.entries;
        Ok(self)
    }

    /// `self = self * other`. The product is computed in full before any
    /// entry is overwritten.
    pub fn mul_in_place(&mut self, other: impl MatrixLike<N>) -> Result<&mut Self> {
        let other = Self::from_grid(other.to_grid()?);
        self.entries = self.entries * other.entries;
        Ok(self)
    }

    pub fn scale_in_place(&mut self, factor: f64) -> &mut Self {
        self.entries *= factor;
        self
    }

    pub fn div_in_place(&mut self, divisor: f64) -> Result<&mut Self> {
        let divisor = validate::check_divisor(divisor)?;
        self.entries /= divisor;
        Ok(self)
    }

    pub fn negate_in_place(&mut self) -> &mut Self {
        self.entries = -self.entries;
        self
    }
}

impl<const N: usize> Default for Matrix<N>
where
    Dim<N>: SupportedDim,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> MatrixLike<N> for Matrix<N> {
    fn to_grid(&self) -> Result<[[f64; N]; N]> {
        Ok(self.grid())
    }
}

impl<const N: usize> Index<(usize, usize)> for Matrix<N> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.entries[index]
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            entries: self.entries + rhs.entries,
        }
    }
}

impl<const N: usize> Sub for Matrix<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            entries: self.entries - rhs.entries,
        }
    }
}

impl<const N: usize> Neg for Matrix<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            entries: -self.entries,
        }
    }
}

impl<const N: usize> Mul<f64> for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            entries: self.entries * rhs,
        }
    }
}

impl<const N: usize> Mul<Matrix<N>> for f64 {
    type Output = Matrix<N>;

    fn mul(self, rhs: Matrix<N>) -> Matrix<N> {
        rhs * self
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            entries: self.entries * rhs.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;

    fn sample3() -> Matrix3 {
        Matrix3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(Matrix2::zero().grid(), [[0.0, 0.0], [0.0, 0.0]]);
        assert_eq!(
            Matrix3::identity().grid(),
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
        assert_eq!(Matrix4::default(), Matrix4::zero());
    }

    #[test]
    fn test_new_rejects_malformed_grid() {
        assert!(matches!(
            Matrix2::new(vec![vec![1.0, 2.0]]),
            Err(GeometryError::Length { expected: 2, found: 1 })
        ));
        assert!(matches!(
            Matrix2::new(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(GeometryError::Length { expected: 2, found: 1 })
        ));
        assert!(matches!(
            Matrix2::new([[1.0, f64::NAN], [3.0, 4.0]]),
            Err(GeometryError::Type { .. })
        ));
    }

    #[test]
    fn test_extra_entries_are_ignored() {
        let m = Matrix2::new([[1.0, 2.0, 9.0], [3.0, 4.0, 9.0], [9.0, 9.0, 9.0]]).unwrap();
        assert_eq!(m.grid(), [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_product_is_row_by_column() {
        let a = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix2::new([[5.0, 6.0], [7.0, 8.0]]).unwrap();
        assert_eq!((a * b).grid(), [[19.0, 22.0], [43.0, 50.0]]);
        assert_eq!((b * a).grid(), [[23.0, 34.0], [31.0, 46.0]]);
        assert_eq!(a.try_mul([[5.0, 6.0], [7.0, 8.0]]).unwrap(), a * b);
    }

    #[test]
    fn test_mul_in_place_uses_original_entries() {
        let mut a = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]).unwrap();
        a.mul_in_place([[5.0, 6.0], [7.0, 8.0]]).unwrap();
        assert_eq!(a.grid(), [[19.0, 22.0], [43.0, 50.0]]);
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample3();
        assert_eq!(m * Matrix3::identity(), m);
        assert_eq!(Matrix3::identity() * m, m);
    }

    #[test]
    fn test_add_sub_neg_scale() {
        let m = sample3();
        assert_eq!(m + m, m * 2.0);
        assert_eq!(m - m, Matrix3::zero());
        assert_eq!(-m, -1.0 * m);
        assert_eq!(m.try_add(Matrix3::identity()).unwrap().get(0, 0).unwrap(), 2.0);
        assert_eq!(m.try_sub(Matrix3::identity()).unwrap()[(2, 2)], 8.0);

        let mut n = m;
        n.negate_in_place().scale_in_place(-2.0);
        assert_eq!(n, m * 2.0);
    }

    #[test]
    fn test_division() {
        let m = sample3();
        assert_eq!(m.div_scalar(2.0).unwrap()[(1, 1)], 2.5);
        for size_check in [
            Matrix2::identity().div_scalar(0.0).map(|_| ()),
            Matrix3::identity().div_scalar(0.0).map(|_| ()),
            Matrix4::identity().div_scalar(0.0).map(|_| ()),
        ] {
            assert!(matches!(size_check, Err(GeometryError::Division)));
        }
        assert_eq!(
            Matrix2::identity().div_scalar(4.0).unwrap().grid(),
            [[0.25, 0.0], [0.0, 0.25]]
        );
    }

    #[test]
    fn test_transpose() {
        let m = sample3();
        let t = m.transposed();
        assert_eq!(t.row(0).unwrap(), [1.0, 4.0, 7.0]);
        assert_eq!(t.transposed(), m);

        let mut n = m;
        n.transpose();
        assert_eq!(n, t);
    }

    #[test]
    fn test_rows_and_columns() {
        let mut m = sample3();
        assert_eq!(m.row(1).unwrap(), [4.0, 5.0, 6.0]);
        assert_eq!(m.column(1).unwrap(), [2.0, 5.0, 8.0]);

        m.set_row(0, [0.0, 0.0, 0.0]).unwrap();
        m.set_column(2, vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(
            m.grid(),
            [[0.0, 0.0, 1.0], [4.0, 5.0, 1.0], [7.0, 8.0, 1.0]]
        );

        assert!(matches!(m.row(3), Err(GeometryError::Index { index: 3, len: 3 })));
        assert!(matches!(
            m.set_column(0, [1.0, 2.0]),
            Err(GeometryError::Length { .. })
        ));
    }

    #[test]
    fn test_failed_setters_keep_state() {
        let mut m = sample3();
        assert!(m.set_grid(vec![vec![1.0, 2.0, 3.0]]).is_err());
        assert!(m.set_row(1, [1.0, f64::NAN, 1.0]).is_err());
        assert!(m.set(0, 0, f64::INFINITY).is_err());
        assert!(m.add_in_place([[1.0, 2.0]]).is_err());
        assert_eq!(m, sample3());
    }

    #[test]
    fn test_eq_grid() {
        let m = sample3();
        assert!(m.eq_grid([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]));
        assert!(!m.eq_grid([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 0.0]]));
        assert!(!m.eq_grid([[1.0, 2.0, 3.0]]));
    }
}
