use approx::assert_relative_eq;
use gtool_core::{
    cross_product, Border, GeometryError, Matrix2, Matrix3, Matrix4, Mesh, Triangle, Vector2,
    Vector3, Vector4,
};
use std::io::Write;

fn sample_vectors() -> Vec<(Vector3, Vector3)> {
    vec![
        (Vector3::xyz(1.0, 2.0, 3.0), Vector3::xyz(-4.0, 0.5, 2.0)),
        (Vector3::xyz(0.0, 0.0, 0.0), Vector3::xyz(7.0, -7.0, 1e-3)),
        (Vector3::xyz(1e6, -2e6, 3.5), Vector3::xyz(-1e6, 2e6, -3.5)),
        (Vector3::xyz(0.1, 0.2, 0.3), Vector3::xyz(0.1, 0.2, 0.3)),
    ]
}

#[test]
fn test_add_then_sub_returns_original() {
    for (a, b) in sample_vectors() {
        let back = a + b - b;
        for i in 0..3 {
            assert_relative_eq!(back[i], a[i], epsilon = 1e-6);
        }
    }

    let a = Vector2::xy(3.0, -1.0);
    let b = Vector2::xy(0.25, 8.0);
    assert_eq!(a + b - b, a);
}

#[test]
fn test_triangle_inequality() {
    for (a, b) in sample_vectors() {
        assert!((a + b).length() <= a.length() + b.length() + 1e-9);
    }

    let a = Vector4::xyzw(1.0, 0.0, -2.0, 4.0);
    let b = Vector4::xyzw(-3.0, 5.0, 0.0, 1.0);
    assert!((a + b).length() <= a.length() + b.length());
}

#[test]
fn test_identity_is_neutral() {
    let m2 = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(m2 * Matrix2::identity(), m2);
    assert_eq!(Matrix2::identity() * m2, m2);

    let m3 = Matrix3::new([[1.0, -2.0, 0.5], [3.0, 4.0, 9.0], [0.0, 7.0, -1.0]]).unwrap();
    assert_eq!(m3 * Matrix3::identity(), m3);
    assert_eq!(Matrix3::identity() * m3, m3);

    let m4 = Matrix4::new(vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
        vec![9.0, 10.0, 11.0, 12.0],
        vec![13.0, 14.0, 15.0, 16.0],
    ])
    .unwrap();
    assert_eq!(m4 * Matrix4::identity(), m4);
    assert_eq!(Matrix4::identity() * m4, m4);
}

#[test]
fn test_transpose_round_trip() {
    let m3 = Matrix3::new([[1.0, -2.0, 0.5], [3.0, 4.0, 9.0], [0.0, 7.0, -1.0]]).unwrap();
    assert_eq!(m3.transposed().transposed(), m3);
    assert_ne!(m3.transposed(), m3);

    let mut m2 = Matrix2::new([[0.0, 1.0], [2.0, 3.0]]).unwrap();
    m2.transpose();
    m2.transpose();
    assert_eq!(m2, Matrix2::new([[0.0, 1.0], [2.0, 3.0]]).unwrap());
}

#[test]
fn test_normalised_is_unit_and_parallel() {
    for (a, b) in sample_vectors() {
        for v in [a, b] {
            if v.length() == 0.0 || v.length() == 1.0 {
                continue;
            }
            let unit = v.normalised();
            assert_relative_eq!(unit.length(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(cross_product(&v, &unit).length(), 0.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_normalise_is_idempotent() {
    let mut v = Vector3::xyz(3.0, 4.0, 12.0);
    v.normalise();
    let once = v;
    v.normalise();
    assert_eq!(v, once);
    assert_relative_eq!(v.length(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_normalise_twice_matches_once_across_grid() {
    for i in 0..59 {
        for j in 0..59 {
            let v = Vector3::xyz(f64::from(i) * 0.37, f64::from(j) * 1.3, 0.7);
            let once = v.normalised();
            let mut twice = once;
            twice.normalise();
            assert_eq!(twice, once, "({i}, {j})");
        }
    }

    let once = Vector2::xy(1.0, 1.0).normalised();
    assert_eq!(once.normalised(), once);
}

#[test]
fn test_border_edges_are_outside() {
    let border = Border::new([0, 0], [100, 50], "white", 0, 1).unwrap();
    assert!(!border.is_in([0, 0]).unwrap());
    assert!(!border.is_in([100, 25]).unwrap());
    assert!(border.is_in([99, 49]).unwrap());
}

#[test]
fn test_obj_file_round_trip() {
    let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
    writeln!(file, "v 0 0 0").unwrap();
    writeln!(file, "v 1 0 0").unwrap();
    writeln!(file, "v 0 1 0").unwrap();
    writeln!(file, "f 1 2 3").unwrap();
    file.flush().unwrap();

    let mut mesh = Mesh::new();
    mesh.load_object_file(file.path()).unwrap();
    assert_eq!(mesh.len(), 1);
    assert_eq!(
        mesh.triangles[0].vertices,
        [
            Vector3::xyz(0.0, 0.0, 0.0),
            Vector3::xyz(1.0, 0.0, 0.0),
            Vector3::xyz(0.0, 1.0, 0.0),
        ]
    );

    // Loading appends
    mesh.load_object_file(file.path()).unwrap();
    assert_eq!(mesh.len(), 2);
}

#[test]
fn test_failed_load_leaves_mesh_unchanged() {
    let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
    writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9").unwrap();
    file.flush().unwrap();

    let mut mesh = Mesh::cube(1.0);
    let err = mesh.load_object_file(file.path()).unwrap_err();
    assert!(matches!(err, GeometryError::Record { line: 5, .. }));
    assert_eq!(mesh, Mesh::cube(1.0));
}

#[test]
fn test_wrong_extension_is_rejected() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let err = Mesh::new().load_object_file(file.path()).unwrap_err();
    assert!(matches!(err, GeometryError::Extension { expected: "obj", .. }));
}

#[test]
fn test_border_radius_boundary() {
    assert!(Border::new([0, 0], [100, 50], "white", 25, 1).is_ok());
    assert!(matches!(
        Border::new([0, 0], [100, 50], "white", 26, 1),
        Err(GeometryError::Value { .. })
    ));
}

#[test]
fn test_border_containment_scenario() {
    let border = Border::new([0, 0], [100, 50], "white", 0, 1).unwrap();
    assert!(border.is_in([50, 25]).unwrap());
    assert!(!border.is_in([-1, 25]).unwrap());
}

#[test]
fn test_triangle_normal_scenario() {
    let triangle =
        Triangle::from_points(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
    let normal = triangle.normal();
    assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(cross_product(&normal, &Vector3::xyz(0.0, 0.0, 1.0)).length(), 0.0);
}
