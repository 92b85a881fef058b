use gradnet::matrix;
use gradnet::{Error, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_matrix_creation() {
    let m = Matrix::new(2, 3).unwrap();
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.len(), 6);
    assert!(m.data().iter().all(|&v| v == 0.0));
}

#[test]
fn test_zero_extent_is_an_allocation_error() {
    assert_eq!(
        Matrix::new(0, 4).unwrap_err(),
        Error::Allocation { rows: 0, columns: 4 }
    );
    assert!(Matrix::new(4, 0).is_err());
    assert!(Matrix::from_vec(0, 1, vec![]).is_err());
}

#[test]
fn test_from_vec_length_mismatch() {
    let err = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err,
        Error::DataLength {
            rows: 2,
            columns: 2,
            len: 3
        }
    );
}

#[test]
fn test_matrix_macro() {
    let m = matrix!([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_multiply_known_values() {
    let a = matrix!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let b = matrix!([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);

    let c = a.multiply(&b).unwrap();
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_multiply_dimension_mismatch_leaves_operands_unmodified() {
    let a = matrix!([[1.0, 2.0], [3.0, 4.0]]);
    let b = matrix!([[1.0, 2.0, 3.0]]);

    let err = a.multiply(&b).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { op: "multiply", .. }));
    assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(b.data(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_transpose_values() {
    let m = matrix!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

#[test]
fn test_transpose_involution() {
    let m = matrix!([[1.0, -2.0, 0.5], [7.0, 9.0, -3.25]]);
    assert_eq!(m.transpose().transpose(), m);
}

#[test]
fn test_clone_is_a_deep_copy() {
    let original = matrix!([[1.0, 2.0], [3.0, 4.0]]);
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy[(0, 0)] = 99.0;
    assert_eq!(original[(0, 0)], 1.0);
}

#[test]
fn test_add_mutates_in_place_subtract_returns_new() {
    let mut a = matrix!([[1.0, 2.0]]);
    let b = matrix!([[10.0, 20.0]]);

    a.add(&b).unwrap();
    assert_eq!(a.data(), &[11.0, 22.0]);

    let d = a.subtract(&b).unwrap();
    assert_eq!(d.data(), &[1.0, 2.0]);
    // subtract must not touch either operand
    assert_eq!(a.data(), &[11.0, 22.0]);
    assert_eq!(b.data(), &[10.0, 20.0]);
}

#[test]
fn test_add_shape_mismatch_leaves_receiver_unmodified() {
    let mut a = matrix!([[1.0, 2.0]]);
    let b = matrix!([[1.0], [2.0]]);
    assert!(a.add(&b).is_err());
    assert!(a.subtract(&b).is_err());
    assert!(a.add_scaled(&b, 2.0).is_err());
    assert_eq!(a.data(), &[1.0, 2.0]);
}

#[test]
fn test_add_scaled_applies_fused_update() {
    let mut w = matrix!([[1.0, 2.0]]);
    let dw = matrix!([[0.5, -0.5]]);
    w.add_scaled(&dw, -0.1).unwrap();
    assert_eq!(w.data(), &[0.95, 2.05]);
}

#[test]
fn test_scalar_ops() {
    let mut m = matrix!([[1.0, -2.0], [3.0, 4.0]]);
    m.scale(2.0);
    assert_eq!(m.data(), &[2.0, -4.0, 6.0, 8.0]);
    m.add_scalar(1.0);
    assert_eq!(m.data(), &[3.0, -3.0, 7.0, 9.0]);
    m.subtract_scalar(3.0);
    assert_eq!(m.data(), &[0.0, -6.0, 4.0, 6.0]);
    m.zero();
    assert_eq!(m.data(), &[0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_randomize_draws_from_unit_interval() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut m = Matrix::new(8, 8).unwrap();
    m.randomize(&mut rng);
    assert!(m.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    // 64 independent uniform draws cannot all stay at zero
    assert!(m.data().iter().any(|&v| v != 0.0));
}

#[test]
fn test_argmax_first_occurrence_wins_ties() {
    let m = matrix!([[1.0, 7.0], [7.0, 0.0]]);
    assert_eq!(m.argmax(), 1);

    let single = matrix!([[-3.0, -1.0, -2.0]]);
    assert_eq!(single.argmax(), 1);
}

#[test]
fn test_element_access() {
    let mut m = matrix!([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(m[(1, 0)], 3.0);
    assert_eq!(m.get(1, 1), Some(4.0));
    assert_eq!(m.get(2, 0), None);

    m[(0, 1)] = -2.0;
    assert_eq!(m.data(), &[1.0, -2.0, 3.0, 4.0]);
}
