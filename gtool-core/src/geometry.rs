//! Geometry primitives: triangles and triangle meshes
use std::ops::{Add, AddAssign, Index};
use std::path::Path;

use log::debug;

use crate::error::{GeometryError, Result};
use crate::matrix::Matrix4;
use crate::obj;
use crate::transform::Transform;
use crate::validate::{self, VectorLike};
use crate::vector::{self, Vector3};

/// A triangle in 3D space defined by three ordered vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector3; 3],
}

impl Triangle {
    pub fn new(v1: Vector3, v2: Vector3, v3: Vector3) -> Self {
        Self {
            vertices: [v1, v2, v3],
        }
    }

    /// Build a triangle from three points of exactly three finite numbers
    /// each. Points may be float or integer arrays, slices, or `Vector3`s.
    pub fn from_points(
        p1: impl VectorLike<3>,
        p2: impl VectorLike<3>,
        p3: impl VectorLike<3>,
    ) -> Result<Self> {
        Ok(Self::new(point(p1)?, point(p2)?, point(p3)?))
    }

    pub fn vertex(&self, index: usize) -> Result<&Vector3> {
        validate::check_index(index, 3)?;
        Ok(&self.vertices[index])
    }

    /// Directed edge from vertex `k` to vertex `k mod 3 + 1`, for `k` in 1..=3.
    /// `reversed` flips its direction.
    pub fn line(&self, k: usize, reversed: bool) -> Result<Vector3> {
        if !(1..=3).contains(&k) {
            return Err(GeometryError::Index { index: k, len: 3 });
        }
        let from = self.vertices[k - 1];
        let to = self.vertices[k % 3];
        Ok(if reversed { from - to } else { to - from })
    }

    /// Unit normal: `line(3) x -line(1)`, normalised.
    ///
    /// Degenerate (collinear or coincident) triangles yield the zero vector.
    pub fn normal(&self) -> Vector3 {
        let [a, b, c] = self.vertices;
        vector::unit_cross(&(a - c), &(a - b))
    }

    /// Centroid of the three vertices
    pub fn middle(&self) -> Vector3 {
        let [a, b, c] = self.vertices;
        (a + b + c) * (1.0 / 3.0)
    }
}

impl Index<usize> for Triangle {
    type Output = Vector3;

    fn index(&self, index: usize) -> &Vector3 {
        &self.vertices[index]
    }
}

fn point(value: impl VectorLike<3>) -> Result<Vector3> {
    if value.arity() != 3 {
        return Err(GeometryError::type_error(format!(
            "a triangle vertex needs exactly 3 components, got {}",
            value.arity()
        )));
    }
    Vector3::from_like(value)
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_triangle_list(&mut self, triangles: impl IntoIterator<Item = Triangle>) {
        self.triangles.extend(triangles);
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Remove every triangle
    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    /// Translate every vertex of every triangle by `offset`.
    pub fn offset(&mut self, offset: &Vector3) {
        if offset.length() == 0.0 {
            return;
        }
        for vertex in self.triangles.iter_mut().flat_map(|t| t.vertices.iter_mut()) {
            *vertex += *offset;
        }
    }

    /// Apply a 4x4 transformation to every vertex.
    pub fn transform(&mut self, matrix: &Matrix4) {
        for vertex in self.triangles.iter_mut().flat_map(|t| t.vertices.iter_mut()) {
            *vertex = Transform::apply_point(matrix, vertex);
        }
    }

    /// Append the triangles described by a `.obj` file.
    ///
    /// The extension is checked before the file is opened, and the mesh is
    /// only extended once the whole file parsed.
    pub fn load_object_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some(obj::EXTENSION) {
            return Err(GeometryError::Extension {
                path: path.to_path_buf(),
                expected: obj::EXTENSION,
            });
        }

        let source = std::fs::read_to_string(path)?;
        let triangles = obj::parse_obj(&source)?;
        debug!(
            "loaded {} triangles from {}",
            triangles.len(),
            path.display()
        );
        self.triangles.extend(triangles);
        Ok(())
    }

    /// Create a simple cube mesh for testing
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let corner = |x: f64, y: f64, z: f64| Vector3::xyz(x * h, y * h, z * h);
        let quad = |a: Vector3, b: Vector3, c: Vector3, d: Vector3| {
            [Triangle::new(a, b, c), Triangle::new(a, c, d)]
        };

        let mut mesh = Self::with_capacity(12);
        let faces = [
            // Front
            quad(corner(-1.0, -1.0, 1.0), corner(1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0), corner(-1.0, 1.0, 1.0)),
            // Back
            quad(corner(-1.0, -1.0, -1.0), corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, -1.0, -1.0)),
            // Top
            quad(corner(-1.0, 1.0, -1.0), corner(-1.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), corner(1.0, 1.0, -1.0)),
            // Bottom
            quad(corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0), corner(-1.0, -1.0, 1.0)),
            // Right
            quad(corner(1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0), corner(1.0, -1.0, 1.0)),
            // Left
            quad(corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0, 1.0), corner(-1.0, 1.0, 1.0), corner(-1.0, 1.0, -1.0)),
        ];
        for face in faces {
            mesh.add_triangle_list(face);
        }

        mesh
    }
}

impl Add for Mesh {
    type Output = Mesh;

    fn add(mut self, rhs: Mesh) -> Mesh {
        self += rhs;
        self
    }
}

impl AddAssign for Mesh {
    fn add_assign(&mut self, rhs: Mesh) {
        self.triangles.extend(rhs.triangles);
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Triangle {
        Triangle::from_points(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap()
    }

    #[test]
    fn test_from_points_validation() {
        assert!(matches!(
            Triangle::from_points(&[0.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]),
            Err(GeometryError::Type { .. })
        ));
        assert!(matches!(
            Triangle::from_points(&[0.0, 0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]),
            Err(GeometryError::Type { .. })
        ));
        assert!(matches!(
            Triangle::from_points(&[0.0, 0.0, 0.0], &[f64::NAN, 0.0, 0.0], &[0.0, 1.0, 0.0]),
            Err(GeometryError::Type { .. })
        ));
    }

    #[test]
    fn test_from_points_accepts_integers_and_vectors() {
        let from_ints = Triangle::from_points([0, 0, 0], [1, 0, 0], [0, 1, 0]).unwrap();
        assert_eq!(from_ints, unit_triangle());

        let [a, b, c] = unit_triangle().vertices;
        assert_eq!(Triangle::from_points(a, b, c).unwrap(), unit_triangle());
        assert_eq!(Triangle::from_points(&a, &b, vec![0.0, 1.0, 0.0]).unwrap(), unit_triangle());

        assert!(matches!(
            Triangle::from_points([0, 0], [1, 0, 0], [0, 1, 0]),
            Err(GeometryError::Type { .. })
        ));
        assert!(matches!(
            Triangle::from_points([0, 0, 0], [1, 0, 0], [0, 1, 0, 7]),
            Err(GeometryError::Type { .. })
        ));
    }

    #[test]
    fn test_lines() {
        let t = unit_triangle();
        assert_eq!(t.line(1, false).unwrap(), Vector3::xyz(1.0, 0.0, 0.0));
        assert_eq!(t.line(2, false).unwrap(), Vector3::xyz(-1.0, 1.0, 0.0));
        assert_eq!(t.line(3, false).unwrap(), Vector3::xyz(0.0, -1.0, 0.0));
        assert_eq!(t.line(1, true).unwrap(), Vector3::xyz(-1.0, 0.0, 0.0));
        assert!(matches!(t.line(0, false), Err(GeometryError::Index { .. })));
        assert!(matches!(t.line(4, false), Err(GeometryError::Index { .. })));
    }

    #[test]
    fn test_calculate_normal() {
        let normal = unit_triangle().normal();
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(normal.z().abs(), 1.0, epsilon = 1e-12);
        assert_eq!(normal.x(), 0.0);
        assert_eq!(normal.y(), 0.0);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let t = Triangle::from_points(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0]).unwrap();
        assert_eq!(t.normal(), Vector3::zeros());
    }

    #[test]
    fn test_middle() {
        let t = Triangle::from_points(&[0.0, 0.0, 0.0], &[3.0, 0.0, 0.0], &[0.0, 3.0, 3.0]).unwrap();
        let m = t.middle();
        assert_relative_eq!(m.x(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.y(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.z(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_access() {
        let t = unit_triangle();
        assert_eq!(*t.vertex(1).unwrap(), Vector3::xyz(1.0, 0.0, 0.0));
        assert_eq!(t[2], Vector3::xyz(0.0, 1.0, 0.0));
        assert!(matches!(t.vertex(3), Err(GeometryError::Index { index: 3, len: 3 })));
    }

    #[test]
    fn test_mesh_building() {
        let mut mesh = Mesh::new();
        assert!(mesh.is_empty());

        mesh.add_triangle(unit_triangle());
        mesh.add_triangle_list(vec![unit_triangle(); 2]);
        assert_eq!(mesh.len(), 3);

        mesh.clear();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_concatenation_keeps_order() {
        let a = Mesh::from_triangles(vec![unit_triangle()]);
        let shifted = Triangle::from_points(&[1.0, 1.0, 1.0], &[2.0, 1.0, 1.0], &[1.0, 2.0, 1.0]).unwrap();
        let b = Mesh::from_triangles(vec![shifted]);

        let joined = a.clone() + b.clone();
        assert_eq!(joined.triangles, vec![unit_triangle(), shifted]);

        let mut c = b;
        c += a;
        assert_eq!(c.triangles, vec![shifted, unit_triangle()]);
        assert_ne!(joined, c);
    }

    #[test]
    fn test_offset() {
        let mut mesh = Mesh::from_triangles(vec![unit_triangle()]);
        mesh.offset(&Vector3::xyz(1.0, 1.0, 1.0));
        let expected = Triangle::from_points(&[1.0, 1.0, 1.0], &[2.0, 1.0, 1.0], &[1.0, 2.0, 1.0]).unwrap();
        assert_eq!(mesh.triangles[0], expected);

        mesh.offset(&Vector3::zeros());
        assert_eq!(mesh.triangles[0], expected);
    }

    #[test]
    fn test_transform() {
        let mut mesh = Mesh::from_triangles(vec![unit_triangle()]);
        mesh.transform(&Transform::translation_matrix(0.0, 0.0, 5.0));
        assert_eq!(mesh.triangles[0][0], Vector3::xyz(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.len(), 12);
        for triangle in &cube {
            assert_relative_eq!(triangle.normal().length(), 1.0, epsilon = 1e-12);
            for vertex in &triangle.vertices {
                assert_eq!(vertex.get_tuple().map(f64::abs), [1.0, 1.0, 1.0]);
            }
        }
    }

    #[test]
    fn test_load_rejects_extension_before_io() {
        let mut mesh = Mesh::new();
        let err = mesh.load_object_file("does/not/exist.stl").unwrap_err();
        assert!(matches!(err, GeometryError::Extension { .. }));
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let mut mesh = Mesh::new();
        let err = mesh.load_object_file("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, GeometryError::Io(_)));
    }
}
