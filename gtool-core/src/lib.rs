//! gtool core library - fixed-size linear algebra and 2D/3D geometry
//!
//! This library provides vectors and matrices of dimension 2 to 4,
//! transformation matrices, triangle meshes with an `.obj` loader, and
//! rounded-rectangle borders drawn through a [`Surface`].

pub mod border;
pub mod color;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod obj;
pub mod surface;
pub mod transform;
pub mod validate;
pub mod vector;

// Re-export commonly used types
pub use border::{Border, CornerRadii};
pub use color::{ColorSpec, Rgb};
pub use error::{GeometryError, Result};
pub use geometry::{Mesh, Triangle};
pub use matrix::{Matrix, Matrix2, Matrix3, Matrix4};
pub use surface::{Rect, Surface};
pub use transform::{RotationState, Transform};
pub use validate::{MatrixLike, VectorLike};
pub use vector::{cross_product, distance, dot_product, Vector, Vector2, Vector3, Vector4};
