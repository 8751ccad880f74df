/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : DynamicShape: 支持动态维度的形状系统
 *
 * 类似 Keras/TensorFlow 的 (None, 128) 设计，允许某些维度在装配时未知。
 * 例如 batch 维度通常是动态的，消费方执行时才确定实际大小。
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// 维度值：Some(n) 表示固定值 n，None 表示动态（任意值）
pub type Dim = Option<usize>;

/// 动态形状：支持动态维度的形状表示
///
/// 与 `Vec<usize>` 的区别：
/// - `Vec<usize>`: 所有维度必须是确定的数值
/// - `DynamicShape`: 某些维度可以是 None，表示"任意值"
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DynamicShape {
    dims: Vec<Dim>,
}

impl DynamicShape {
    /// 创建一个动态形状
    pub fn new(dims: &[Dim]) -> Self {
        Self {
            dims: dims.to_vec(),
        }
    }

    /// 从固定形状创建（所有维度都是确定的）
    pub fn fixed(dims: &[usize]) -> Self {
        Self {
            dims: dims.iter().map(|&d| Some(d)).collect(),
        }
    }

    /// 标量形状（零维）
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    /// 创建首维动态的形状：[?, f1, f2, ...]
    pub fn with_dynamic_batch(feature_dims: &[usize]) -> Self {
        let mut dims = vec![None];
        dims.extend(feature_dims.iter().map(|&d| Some(d)));
        Self { dims }
    }

    /// 维度数（阶数）
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// 是否为标量
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// 所有维度
    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// 第 i 维（越界返回 None，与动态维不可区分，调用方需先核对 ndim）
    pub fn dim(&self, i: usize) -> Dim {
        self.dims.get(i).copied().flatten()
    }

    /// 是否存在动态维度
    pub fn has_dynamic_dims(&self) -> bool {
        self.dims.iter().any(Option::is_none)
    }

    /// 所有维度均固定时返回元素总数
    pub fn size_if_fixed(&self) -> Option<usize> {
        self.dims.iter().copied().collect::<Option<Vec<_>>>().map(|v| v.iter().product())
    }

    /// 两个形状是否兼容：阶数相同，且双方均固定的维度必须相等
    pub fn compatible_with(&self, other: &Self) -> bool {
        self.ndim() == other.ndim()
            && self
                .dims
                .iter()
                .zip(&other.dims)
                .all(|(a, b)| match (a, b) {
                    (Some(x), Some(y)) => x == y,
                    _ => true,
                })
    }

    /// 是否能容纳给定的固定形状：阶数相同，固定维度逐一相等，动态维度任意
    pub fn matches_fixed(&self, shape: &[usize]) -> bool {
        self.ndim() == shape.len()
            && self
                .dims
                .iter()
                .zip(shape)
                .all(|(d, &s)| d.is_none_or(|x| x == s))
    }

    /// 两个兼容形状的逐维合并：任一方固定则取固定值
    pub fn merge(&self, other: &Self) -> Self {
        let dims = self
            .dims
            .iter()
            .zip(&other.dims)
            .map(|(a, b)| a.or(*b))
            .collect::<Vec<_>>();
        Self { dims }
    }
}

impl fmt::Display for DynamicShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .dims
            .iter()
            .map(|d| d.map_or_else(|| "?".to_string(), |v| v.to_string()))
            .collect::<Vec<_>>();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicShape;

    #[test]
    fn test_display() {
        assert_eq!(DynamicShape::fixed(&[32, 128]).to_string(), "[32, 128]");
        assert_eq!(DynamicShape::with_dynamic_batch(&[128]).to_string(), "[?, 128]");
        assert_eq!(DynamicShape::scalar().to_string(), "[]");
    }

    #[test]
    fn test_compatibility_and_merge() {
        let dynamic = DynamicShape::with_dynamic_batch(&[10]);
        let fixed = DynamicShape::fixed(&[32, 10]);

        assert!(dynamic.compatible_with(&fixed));
        assert!(!dynamic.compatible_with(&DynamicShape::fixed(&[32, 11])));
        assert!(!dynamic.compatible_with(&DynamicShape::fixed(&[10])));

        // 合并取双方中已固定的维度
        assert_eq!(dynamic.merge(&fixed), fixed);
    }

    #[test]
    fn test_matches_fixed() {
        let shape = DynamicShape::with_dynamic_batch(&[10]);
        assert!(shape.matches_fixed(&[1, 10]));
        assert!(shape.matches_fixed(&[256, 10]));
        assert!(!shape.matches_fixed(&[256, 9]));
        assert!(!shape.matches_fixed(&[10]));
    }

    #[test]
    fn test_size_if_fixed() {
        assert_eq!(DynamicShape::fixed(&[3, 4]).size_if_fixed(), Some(12));
        assert_eq!(DynamicShape::scalar().size_if_fixed(), Some(1));
        assert_eq!(DynamicShape::with_dynamic_batch(&[4]).size_if_fixed(), None);
    }
}
