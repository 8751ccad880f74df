/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 轻量张量：仅承载参数初始值等少量数据载荷
 *
 * 本 crate 的图是符号图，装配期不做任何数值计算；
 * Tensor 只在两处出现：变量节点的初始值、测试中的取值断言。
 */

use ndarray::{Array, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// 定义张量的结构体。可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通过Tensor初始化的都是张量（即使标量也是张量）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。`data`的长度必须和`shape`中所有元素的乘积相等。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap();
        Self { data }
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个全一张量
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// 创建一个所有元素均为`v`的张量
    pub fn full(v: f32, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), v),
        }
    }

    /// 创建一个随机张量，其值在[low, high]的闭区间（使用全局RNG）
    pub fn uniform(low: f32, high: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        let dist = Uniform::from(low..=high);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(&mut rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 创建一个随机张量，其值在[low, high]的闭区间（使用指定RNG，可复现）
    pub fn uniform_with_rng(low: f32, high: f32, shape: &[usize], rng: &mut StdRng) -> Self {
        let dist = Uniform::from(low..=high);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 创建一个服从正态分布的随机张量（使用全局RNG）
    pub fn normal(mean: f32, std_dev: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        Self::normal_impl(mean, std_dev, shape, &mut rng)
    }

    /// 创建一个服从正态分布的随机张量（使用指定RNG，可复现）
    pub fn normal_with_rng(mean: f32, std_dev: f32, shape: &[usize], rng: &mut StdRng) -> Self {
        Self::normal_impl(mean, std_dev, shape, rng)
    }

    // Box-Muller 变换；u1 下界取 EPSILON 以避开 ln(0)
    fn normal_impl<R: rand::Rng>(mean: f32, std_dev: f32, shape: &[usize], rng: &mut R) -> Self {
        let dist = Uniform::from(f32::EPSILON..=1.0f32);
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = dist.sample(rng);
            let u2: f32 = dist.sample(rng);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }

    /// 返回张量的形状
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 返回张量的维度（阶数）
    pub fn dimension(&self) -> usize {
        self.data.ndim()
    }

    /// 返回张量的元素个数
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 以切片形式返回底层数据（行优先）
    pub fn data_as_slice(&self) -> &[f32] {
        self.data.as_slice().unwrap()
    }
}

#[cfg(test)]
mod tests;
