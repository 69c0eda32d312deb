use super::*;

#[test]
fn test_new_accepts_odd_square_kernel() {
    let filter = Filter::new(3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
    assert_eq!(filter.dimension(), 3);
    assert_eq!(filter.radius(), 1);
    assert_eq!(filter.coefficient(0, 2), 3);
    assert_eq!(filter.coefficient(2, 0), 7);
    assert_eq!(filter.coefficient_row(1), &[4, 5, 6]);
}

#[test]
fn test_new_rejects_even_dimension() {
    assert_eq!(
        Filter::new(2, vec![0; 4]),
        Err(StencilError::InvalidFilterDimension(2))
    );
}

#[test]
fn test_new_rejects_zero_dimension() {
    assert_eq!(
        Filter::new(0, vec![]),
        Err(StencilError::InvalidFilterDimension(0))
    );
}

#[test]
fn test_new_rejects_wrong_coefficient_count() {
    assert_eq!(
        Filter::new(3, vec![0; 8]),
        Err(StencilError::CoefficientCount {
            dimension: 3,
            expected: 9,
            actual: 8
        })
    );
}

#[test]
fn test_builtin_dimensions() {
    let dims: Vec<usize> = BuiltinFilter::ALL
        .iter()
        .map(|b| b.filter().dimension())
        .collect();
    assert_eq!(dims, vec![3, 5, 9, 1]);
}

#[test]
fn test_builtin_laplacians_sum_to_zero() {
    for builtin in [
        BuiltinFilter::Laplacian3,
        BuiltinFilter::Laplacian5,
        BuiltinFilter::LaplacianOfGaussian9,
    ] {
        let sum: i32 = builtin.filter().coefficients().iter().sum();
        assert_eq!(sum, 0, "{builtin} coefficients should sum to zero");
    }
}

#[test]
fn test_builtin_log_is_symmetric() {
    let filter = BuiltinFilter::LaplacianOfGaussian9.filter();
    let n = filter.dimension();
    for row in 0..n {
        for col in 0..n {
            assert_eq!(filter.coefficient(row, col), filter.coefficient(col, row));
            assert_eq!(
                filter.coefficient(row, col),
                filter.coefficient(n - 1 - row, n - 1 - col)
            );
        }
    }
    assert_eq!(filter.coefficient(4, 4), -40);
}

#[test]
fn test_builtin_names_match_serde() {
    for builtin in BuiltinFilter::ALL {
        let parsed: BuiltinFilter = serde_yml::from_str(builtin.name()).unwrap();
        assert_eq!(parsed, builtin);
    }
}
