/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 算子种类（OpKind）：符号图支持的全部算子
 *
 * 带类型参数的变体（轴、裁剪阈值等）直接随描述符序列化，
 * 消费方据此重建算子语义。
 */

use super::DType;
use crate::nn::shape::DynamicShape;
use serde::{Deserialize, Serialize};

/// 算子种类（含类型特定参数）
///
/// 注意：保持 serde 缺省的外部标签编码——工件的二进制编码（bincode）
/// 不是自描述格式，内部标签枚举无法从中反序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpKind {
    // ========== 数据节点 ==========
    /// 外部输入占位符（执行时喂入）
    Placeholder,
    /// 可训练/可赋值变量（带初始值载荷）
    Variable,
    /// 标量常量
    Constant { value: f32 },
    /// 标量整数常量（索引运算用）
    IndexConstant { value: i32 },

    // ========== 结构/算术 ==========
    Reshape { target: DynamicShape },
    MatMul,
    Add,
    Subtract,

    // ========== 激活 ==========
    /// alpha = 0 时退化为标准 ReLU
    LeakyRelu { alpha: f32 },
    Sigmoid,
    Tanh,
    Softmax,
    Identity,
    /// 以 keep 概率保留元素（仅训练图中出现）
    Dropout,

    // ========== 度量/归约 ==========
    ArgMax { axis: usize },
    Equal,
    Cast { to: DType },
    /// axis 为 None 时归约到标量
    ReduceMax { axis: Option<usize> },
    ReduceMin { axis: Option<usize> },
    ReduceMean { axis: Option<usize> },
    /// 变参逐元素最大（用于聚合各梯度的标量极值）
    Maximum,
    Minimum,

    // ========== 损失 ==========
    /// 逐行交叉熵（输入为 logits 与 one-hot 目标）
    SoftmaxCrossEntropy,
    /// 逐元素 sigmoid 交叉熵（输入为 logits 与目标）
    SigmoidCrossEntropy,
    /// 逐元素平方误差
    MseLoss,

    // ========== 训练 ==========
    /// d(cost)/d(variable)，形状同变量
    Gradient,
    /// 所有梯度的全局 L2 范数（标量）
    GlobalNorm,
    /// 按全局范数把梯度整体缩放到 clip_norm 以内
    ClipByNorm { clip_norm: f32 },
    ApplySgd,
    ApplyAdam { beta1: f32, beta2: f32, epsilon: f32 },

    // ========== 控制 ==========
    /// 用占位符的值覆写变量
    Assign,
    /// 把若干控制算子聚合为单个可驱动目标
    Group,
    /// 把一组变量重置为初始值
    VariablesInitializer,

    // ========== 通用算子（system 图） ==========
    Concat { axis: usize },
    Gather { axis: usize },
    /// [start, limit) 的整数序列
    Range,
    /// 取某一维的长度（标量 i32）
    DimSize { axis: usize },
}

impl OpKind {
    /// 算子的短标签，用于自动命名（如 "mat_mul_3"）与展示
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Variable => "variable",
            Self::Constant { .. } => "constant",
            Self::IndexConstant { .. } => "index_constant",
            Self::Reshape { .. } => "reshape",
            Self::MatMul => "mat_mul",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::LeakyRelu { .. } => "leaky_relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Softmax => "softmax",
            Self::Identity => "identity",
            Self::Dropout => "dropout",
            Self::ArgMax { .. } => "arg_max",
            Self::Equal => "equal",
            Self::Cast { .. } => "cast",
            Self::ReduceMax { .. } => "reduce_max",
            Self::ReduceMin { .. } => "reduce_min",
            Self::ReduceMean { .. } => "reduce_mean",
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::SoftmaxCrossEntropy => "softmax_ce",
            Self::SigmoidCrossEntropy => "sigmoid_ce",
            Self::MseLoss => "mse_loss",
            Self::Gradient => "gradient",
            Self::GlobalNorm => "global_norm",
            Self::ClipByNorm { .. } => "clip_by_norm",
            Self::ApplySgd => "apply_sgd",
            Self::ApplyAdam { .. } => "apply_adam",
            Self::Assign => "assign",
            Self::Group => "group",
            Self::VariablesInitializer => "variables_init",
            Self::Concat { .. } => "concat",
            Self::Gather { .. } => "gather",
            Self::Range => "range",
            Self::DimSize { .. } => "dim_size",
        }
    }
}
