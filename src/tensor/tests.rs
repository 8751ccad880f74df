use super::Tensor;
use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_tensor_new_and_shape() {
    let t = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.dimension(), 2);
    assert_eq!(t.size(), 6);
    assert_eq!(t.data_as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_tensor_zeros_ones_full() {
    assert!(Tensor::zeros(&[3, 2]).data_as_slice().iter().all(|&v| v == 0.0));
    assert!(Tensor::ones(&[4]).data_as_slice().iter().all(|&v| v == 1.0));
    assert!(Tensor::full(0.5, &[2, 2]).data_as_slice().iter().all(|&v| v == 0.5));
}

#[test]
fn test_tensor_uniform_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let t = Tensor::uniform_with_rng(-0.25, 0.25, &[100], &mut rng);
    assert!(t.data_as_slice().iter().all(|&v| (-0.25..=0.25).contains(&v)));
}

#[test]
fn test_tensor_seeded_reproducibility() {
    // 同种子两次采样应逐元素一致
    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);
    let a = Tensor::normal_with_rng(0.0, 1.0, &[32], &mut rng_a);
    let b = Tensor::normal_with_rng(0.0, 1.0, &[32], &mut rng_b);
    for (x, y) in a.data_as_slice().iter().zip(b.data_as_slice()) {
        assert_relative_eq!(*x, *y);
    }
}
