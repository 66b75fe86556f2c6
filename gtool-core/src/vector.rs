//! Fixed-dimension vectors with a cached Euclidean length.
use std::ops::{Add, AddAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use log::warn;
use nalgebra::SVector;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::validate::{self, Dim, MatrixLike, SupportedDim, VectorLike};

/// An N-component real vector, N in {2, 3, 4}.
///
/// `length` always holds the Euclidean norm of the current components;
/// every method that changes the components refreshes it before returning.
#[derive(Debug, Clone, Copy)]
pub struct Vector<const N: usize> {
    coords: SVector<f64, N>,
    length: f64,
}

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;
pub type Vector4 = Vector<4>;

/// Lengths within this distance of 1 count as unit.
const UNIT_TOLERANCE: f64 = 16.0 * f64::EPSILON;

impl<const N: usize> Vector<N>
where
    Dim<N>: SupportedDim,
{
    /// Unchecked: components are taken as given, NaN and infinities
    /// included. Use [`Vector::from_like`] for untrusted input.
    pub fn new(components: [f64; N]) -> Self {
        Self::from_coords(SVector::from_fn(|i, _| components[i]))
    }

    pub fn zeros() -> Self {
        Self::from_coords(SVector::zeros())
    }

    /// Build a vector from any accepted input shape, rejecting non-finite
    /// components.
    pub fn from_like(value: impl VectorLike<N>) -> Result<Self> {
        Ok(Self::new(value.to_components()?))
    }
}

impl<const N: usize> Vector<N> {
    pub(crate) fn from_coords(coords: SVector<f64, N>) -> Self {
        let length = coords.norm();
        Self { coords, length }
    }

    fn replace(&mut self, coords: SVector<f64, N>) -> &mut Self {
        self.coords = coords;
        self.length = coords.norm();
        self
    }

    /// Euclidean norm of the components.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// All components, in order.
    pub fn get_tuple(&self) -> [f64; N] {
        std::array::from_fn(|i| self.coords[i])
    }

    /// Replace all components at once.
    ///
    /// Nothing changes unless the whole input is valid.
    pub fn set_tuple(&mut self, value: impl VectorLike<N>) -> Result<()> {
        let components = value.to_components()?;
        self.replace(SVector::from_fn(|i, _| components[i]));
        Ok(())
    }

    pub fn component(&self, index: usize) -> Result<f64> {
        validate::check_index(index, N)?;
        Ok(self.coords[index])
    }

    /// Compare against an array-like of at least N numbers; extra elements
    /// are ignored and a shorter input never matches.
    pub fn eq_components(&self, other: &[f64]) -> bool {
        other.len() >= N && (0..N).all(|i| self.coords[i] == other[i])
    }

    pub fn try_add(&self, other: impl VectorLike<N>) -> Result<Self> {
        let mut sum = *self;
        sum.add_in_place(other)?;
        Ok(sum)
    }

    pub fn try_sub(&self, other: impl VectorLike<N>) -> Result<Self> {
        let mut diff = *self;
        diff.sub_in_place(other)?;
        Ok(diff)
    }

    pub fn div_scalar(&self, divisor: f64) -> Result<Self> {
        let mut quotient = *self;
        quotient.div_in_place(divisor)?;
        Ok(quotient)
    }

    /// Pre-multiply by an N x N matrix: `m * self`.
    pub fn transform(&self, m: impl MatrixLike<N>) -> Result<Self> {
        let mut out = *self;
        out.transform_in_place(m)?;
        Ok(out)
    }

    pub fn add_in_place(&mut self, other: impl VectorLike<N>) -> Result<&mut Self> {
        let other = other.to_components()?;
        let coords = self.coords + SVector::<f64, N>::from_fn(|i, _| other[i]);
        Ok(self.replace(coords))
    }

    pub fn sub_in_place(&mut self, other: impl VectorLike<N>) -> Result<&mut Self> {
        let other = other.to_components()?;
        let coords = self.coords - SVector::<f64, N>::from_fn(|i, _| other[i]);
        Ok(self.replace(coords))
    }

    pub fn scale_in_place(&mut self, factor: f64) -> &mut Self {
        let coords = self.coords * factor;
        self.replace(coords)
    }

    pub fn div_in_place(&mut self, divisor: f64) -> Result<&mut Self> {
        let divisor = validate::check_divisor(divisor)?;
        let coords = self.coords / divisor;
        Ok(self.replace(coords))
    }

    pub fn negate_in_place(&mut self) -> &mut Self {
        let coords = -self.coords;
        self.replace(coords)
    }

    pub fn transform_in_place(&mut self, m: impl MatrixLike<N>) -> Result<&mut Self> {
        let grid = m.to_grid()?;
        let coords: SVector<f64, N> =
            SVector::from_fn(|r, _| (0..N).map(|c| grid[r][c] * self.coords[c]).sum::<f64>());
        Ok(self.replace(coords))
    }

    /// Scale to unit length in place. Zero and unit vectors are left alone,
    /// so a second call never moves the components again.
    pub fn normalise(&mut self) -> &mut Self {
        if self.length == 0.0 || self.is_unit() {
            return self;
        }
        let coords = self.coords / self.length;
        self.replace(coords)
    }

    /// Whether the length is 1, up to rounding.
    pub fn is_unit(&self) -> bool {
        (self.length - 1.0).abs() <= UNIT_TOLERANCE
    }

    /// A unit-length copy (the vector itself when zero or already unit).
    pub fn normalised(&self) -> Self {
        let mut unit = *self;
        unit.normalise();
        unit
    }
}

// The per-dimension helpers below are unchecked like `new`.

impl Vector<2> {
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new([x, y])
    }
}

impl Vector<3> {
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new([x, y, z])
    }

    pub fn z(&self) -> f64 {
        self.coords[2]
    }
}

impl Vector<4> {
    pub fn xyzw(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::new([x, y, z, w])
    }

    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    pub fn w(&self) -> f64 {
        self.coords[3]
    }
}

impl<const N: usize> Vector<N> {
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    pub fn y(&self) -> f64 {
        self.coords[1]
    }
}

impl<const N: usize> Default for Vector<N>
where
    Dim<N>: SupportedDim,
{
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> PartialEq for Vector<N> {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl<const N: usize> VectorLike<N> for Vector<N> {
    fn to_components(&self) -> Result<[f64; N]> {
        Ok(self.get_tuple())
    }

    fn arity(&self) -> usize {
        N
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coords[index]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_coords(self.coords + rhs.coords)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_coords(self.coords - rhs.coords)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_coords(-self.coords)
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::from_coords(self.coords * rhs)
    }
}

impl<const N: usize> Mul<Vector<N>> for f64 {
    type Output = Vector<N>;

    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        rhs * self
    }
}

impl<const N: usize> Mul<Vector<N>> for Matrix<N> {
    type Output = Vector<N>;

    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        Vector::from_coords(self.entries() * rhs.coords)
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        let coords = self.coords + rhs.coords;
        self.replace(coords);
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, rhs: Self) {
        let coords = self.coords - rhs.coords;
        self.replace(coords);
    }
}

impl<const N: usize> MulAssign<f64> for Vector<N> {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_in_place(rhs);
    }
}

/// Dot product of two vectors of the same dimension.
pub fn dot_product<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> f64 {
    a.coords.dot(&b.coords)
}

/// Cross product; only defined for 3D vectors.
pub fn cross_product(a: &Vector3, b: &Vector3) -> Vector3 {
    Vector::from_coords(a.coords.cross(&b.coords))
}

/// Euclidean distance between two points.
pub fn distance<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> f64 {
    (a.coords - b.coords).norm()
}

/// Unit normal of the plane spanned by `a` and `b`, or the zero vector when
/// they are parallel.
pub(crate) fn unit_cross(a: &Vector3, b: &Vector3) -> Vector3 {
    let normal = cross_product(a, b).normalised();
    if normal.length() == 0.0 {
        warn!("cross product of parallel vectors has no direction");
    }
    normal
}
