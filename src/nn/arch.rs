/*
 * @Author       : 老董
 * @Date         : 2026-02-13
 * @Description  : 结构描述（ArchitectureSpec）与命令行参数的受控解析
 *
 * 模式/任务/宽度/层列表全部在解析期校验完毕（ConfigError），
 * 不合法的描述在创建任何图节点之前就被拒绝；
 * 描述一旦构造完成即不可变，完全决定图的拓扑。
 */

use thiserror::Error;

/// 参数解析/校验错误（装配开始前即被拒绝）
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("未知的模式：{0}（可选 PREDICT/EVAL/TRAIN）")]
    UnknownMode(String),

    #[error("未知的任务标签：{0}")]
    UnknownTaskTag(String),

    #[error("{name}必须是正整数，实际为{got}")]
    InvalidWidth { name: &'static str, got: String },

    #[error("层列表字面量非法：{0}（应形如 [1200,600,300]）")]
    MalformedLayerList(String),

    #[error("裁剪阈值必须为正，实际为{0}")]
    InvalidClipNorm(String),
}

/// 执行模式：决定图在共享前向路径之外附加哪条尾部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Predict,
    Eval,
    Train,
}

impl Mode {
    /// 解析命令行模式记号
    pub fn from_token(token: &str) -> Result<Self, ConfigError> {
        match token {
            "PREDICT" => Ok(Self::Predict),
            "EVAL" => Ok(Self::Eval),
            "TRAIN" => Ok(Self::Train),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }

    /// 工件文件名的模式后缀
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Predict => "-predict",
            Self::Eval => "-eval",
            Self::Train => "-train",
        }
    }
}

/// 任务类型：唯一影响图语义（输出激活与损失）的维度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// 多分类：softmax 输出 + softmax 交叉熵
    Classification,
    /// 二元概率：sigmoid 输出 + sigmoid 交叉熵
    Binary,
    /// 回归：bounded 时 tanh 输出，否则恒等；均方误差
    Regression { bounded: bool },
}

/// 解析 qnet 系的任务标签：含 'p' 为分类（概率头），否则为有界回归（价值头）
pub fn parse_task_tag(tag: &str) -> Result<TaskKind, ConfigError> {
    if tag.is_empty() {
        return Err(ConfigError::UnknownTaskTag(tag.to_string()));
    }
    if !tag.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::UnknownTaskTag(tag.to_string()));
    }
    if tag.contains('p') {
        Ok(TaskKind::Classification)
    } else {
        Ok(TaskKind::Regression { bounded: true })
    }
}

/// 隐藏层激活函数
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Relu,
    LeakyRelu { alpha: f32 },
    Sigmoid,
    Tanh,
}

/// 优化器选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerKind {
    Sgd,
    Adam,
}

/// 结构描述：不可变，完全决定图拓扑
#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureSpec {
    /// 输入宽度
    pub input_width: usize,
    /// 输出宽度
    pub output_width: usize,
    /// 隐藏层宽度（可为空：退化为仅输出头的恒等栈）
    pub hidden_widths: Vec<usize>,
    /// 任务类型
    pub task_kind: TaskKind,
    /// 执行模式
    pub mode: Mode,
    /// 隐藏层激活
    pub hidden_activation: Activation,
    /// 优化器
    pub optimizer: OptimizerKind,
    /// 梯度全局范数裁剪阈值
    pub clip_norm: f32,
    /// 是否声明 dropout 率占位符（TRAIN 图中在各隐藏层后插入 dropout）
    pub dropout: bool,
    /// 参数初始化种子（Some 时装配结果可复现）
    pub seed: Option<u64>,
}

impl ArchitectureSpec {
    /// 缺省：ReLU 隐藏激活、Adam、裁剪阈值 1.0、无 dropout、无种子
    pub fn new(
        input_width: usize,
        output_width: usize,
        hidden_widths: Vec<usize>,
        task_kind: TaskKind,
        mode: Mode,
    ) -> Self {
        Self {
            input_width,
            output_width,
            hidden_widths,
            task_kind,
            mode,
            hidden_activation: Activation::Relu,
            optimizer: OptimizerKind::Adam,
            clip_norm: 1.0,
            dropout: false,
            seed: None,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.hidden_activation = activation;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_clip_norm(mut self, clip_norm: f32) -> Self {
        self.clip_norm = clip_norm;
        self
    }

    pub fn with_dropout(mut self, dropout: bool) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 校验描述自身的合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_width == 0 {
            return Err(ConfigError::InvalidWidth {
                name: "输入宽度",
                got: "0".to_string(),
            });
        }
        if self.output_width == 0 {
            return Err(ConfigError::InvalidWidth {
                name: "输出宽度",
                got: "0".to_string(),
            });
        }
        if let Some(w) = self.hidden_widths.iter().find(|&&w| w == 0) {
            return Err(ConfigError::InvalidWidth {
                name: "隐藏层宽度",
                got: w.to_string(),
            });
        }
        if !(self.clip_norm > 0.0) {
            return Err(ConfigError::InvalidClipNorm(self.clip_norm.to_string()));
        }
        Ok(())
    }

    /// 参数对总数：每个隐藏层一对 + 输出头一对
    pub fn layer_pair_count(&self) -> usize {
        self.hidden_widths.len() + 1
    }

    /// 第 i 对参数的 (fan_in, fan_out)；i == hidden 数时为输出头
    pub fn fan_dims(&self, i: usize) -> (usize, usize) {
        let fan_in = if i == 0 {
            self.input_width
        } else {
            self.hidden_widths[i - 1]
        };
        let fan_out = if i == self.hidden_widths.len() {
            self.output_width
        } else {
            self.hidden_widths[i]
        };
        (fan_in, fan_out)
    }
}

/// 解析正整数宽度参数
pub fn parse_width(name: &'static str, token: &str) -> Result<usize, ConfigError> {
    let width: usize = token.parse().map_err(|_| ConfigError::InvalidWidth {
        name,
        got: token.to_string(),
    })?;
    if width == 0 {
        return Err(ConfigError::InvalidWidth {
            name,
            got: token.to_string(),
        });
    }
    Ok(width)
}

/// 解析层列表字面量（如 "[1200,600,300]"、"[1200, 600, 300]"、"[]"）
///
/// 这是对"动态求值外部字符串"的受控替代：只接受方括号包裹的
/// 十进制正整数序列，其余一律 MalformedLayerList。
pub fn parse_layer_list(literal: &str) -> Result<Vec<usize>, ConfigError> {
    let trimmed = literal.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ConfigError::MalformedLayerList(literal.to_string()))?;

    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::MalformedLayerList(literal.to_string()))
                .and_then(|w| {
                    if w == 0 {
                        Err(ConfigError::MalformedLayerList(literal.to_string()))
                    } else {
                        Ok(w)
                    }
                })
        })
        .collect()
}

/// 把层列表编码进工件名（如 "[1200,600,300]"）
pub fn encode_layer_list(widths: &[usize]) -> String {
    let parts = widths.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("[{}]", parts.join(","))
}
