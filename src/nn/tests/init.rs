use crate::nn::{GraphInner, Init};
use approx::assert_relative_eq;

#[test]
fn test_glorot_uniform_bounds() {
    // Glorot 均匀界：|w| ≤ √(6/(fan_in+fan_out))
    let limit = Init::glorot_limit(&[784, 1200]);
    assert_relative_eq!(limit, (6.0f32 / 1984.0).sqrt());

    let tensor = Init::GlorotUniform.generate(&[784, 1200]);
    assert_eq!(tensor.shape(), &[784, 1200]);
    assert!(
        tensor
            .data_as_slice()
            .iter()
            .all(|&v| v.abs() <= limit)
    );
}

#[test]
fn test_glorot_limit_for_bias_vector() {
    // 一维形状（偏置）按 fan_out = 1 处理
    assert_relative_eq!(Init::glorot_limit(&[300]), (6.0f32 / 301.0).sqrt());
}

#[test]
fn test_constant_and_zero_init() {
    let zeros = Init::Zeros.generate(&[3, 2]);
    assert!(zeros.data_as_slice().iter().all(|&v| v == 0.0));

    let halves = Init::Constant(0.5).generate(&[4]);
    assert!(halves.data_as_slice().iter().all(|&v| v == 0.5));
}

#[test]
fn test_seeded_variable_init_is_deterministic() {
    // 同种子的两张图生成的变量初始值逐元素一致
    let build = || {
        let mut g = GraphInner::with_name_and_seed("seeded", 7);
        let w = g
            .new_variable_node(&[6, 4], &Init::GlorotUniform, Some("w"))
            .unwrap();
        g.get_node(w).unwrap().value().unwrap().clone()
    };

    let (a, b) = (build(), build());
    for (x, y) in a.data_as_slice().iter().zip(b.data_as_slice()) {
        assert_relative_eq!(*x, *y);
    }
}

#[test]
fn test_unseeded_variable_init_differs() {
    // 无种子时两次装配的初始值几乎必然不同（形状与结构仍然一致）
    let build = || {
        let mut g = GraphInner::new();
        let w = g
            .new_variable_node(&[8, 8], &Init::GlorotUniform, Some("w"))
            .unwrap();
        g.get_node(w).unwrap().value().unwrap().clone()
    };

    let (a, b) = (build(), build());
    assert_eq!(a.shape(), b.shape());
    assert_ne!(a.data_as_slice(), b.data_as_slice());
}
