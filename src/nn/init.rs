/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 参数初始化策略
 *
 * 初始化只影响训练动力学，不影响图的结构正确性，因此设计为可插拔枚举。
 */

use crate::tensor::Tensor;
use rand::rngs::StdRng;

/// 参数初始化策略
#[derive(Debug, Clone)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Glorot/Xavier 均匀初始化：U(-limit, limit)，limit = √(6/(fan_in+fan_out))
    GlorotUniform,
}

impl Init {
    /// 生成初始化后的 Tensor（使用全局 RNG）
    pub fn generate(&self, shape: &[usize]) -> Tensor {
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal(*mean, *std, shape),
            Self::GlorotUniform => {
                let limit = Self::glorot_limit(shape);
                Tensor::uniform(-limit, limit, shape)
            }
        }
    }

    /// 生成初始化后的 Tensor（使用指定的 RNG，可复现）
    pub fn generate_with_rng(&self, shape: &[usize], rng: &mut StdRng) -> Tensor {
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal_with_rng(*mean, *std, shape, rng),
            Self::GlorotUniform => {
                let limit = Self::glorot_limit(shape);
                Tensor::uniform_with_rng(-limit, limit, shape, rng)
            }
        }
    }

    /// Glorot 均匀界：一维形状（偏置向量）按 fan_out = 1 处理
    pub fn glorot_limit(shape: &[usize]) -> f32 {
        let fan_in = shape.first().copied().unwrap_or(1);
        let fan_out = shape.get(1).copied().unwrap_or(1);
        (6.0 / (fan_in + fan_out) as f32).sqrt()
    }
}
