/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : Builder 模块：从结构描述到完整符号图的装配流水线
 *
 * 装配顺序（与各构建器的纯函数契约一致）：
 *   占位符 → 隐藏层栈 → 输出头 → 模式尾部 → 全局初始化器 → 权重注入
 * 每一步只向图追加节点，不修改已有节点。
 */

mod composer;
mod head;
mod injection;
mod stack;

pub use composer::{ModeComposer, TailContext};
pub use head::{HeadOutput, build_head};
pub use injection::wire_injection;
pub use stack::{LayerParams, build_stack};

use composer::TailBuilder;

use crate::nn::DType;
use crate::nn::arch::{ArchitectureSpec, Mode};
use crate::nn::graph::{Graph, GraphError};
use crate::nn::init::Init;
use crate::nn::shape::DynamicShape;

/// 对外入口的固定符号名：与模式无关，消费方用同一张查找表
/// 驱动任意模式的工件
pub mod names {
    pub const INPUT: &str = "nnet_input";
    pub const TARGET: &str = "nnet_target";
    pub const OUTPUT: &str = "nnet_output";
    pub const LEARNING_RATE: &str = "nnet_learning_rate";
    pub const DROPOUT_RATE: &str = "nnet_dropout_rate";
    pub const OUTPUT_MAX: &str = "nnet_output_max";
    pub const ACCURACY: &str = "nnet_accuracy";
    pub const COST: &str = "nnet_cost";
    pub const TRAIN: &str = "train";
    pub const INIT: &str = "init";
    pub const WEIGHTS_INIT: &str = "nnet_init";
    pub const GRADIENTS_MAX: &str = "nnet_gradients_max";
    pub const GRADIENTS_MIN: &str = "nnet_gradients_min";
    pub const OPTIMIZER_INIT: &str = "nnet_optimizer_init";

    /// 第 i 层权重变量名
    pub fn weight(i: usize) -> String {
        format!("nnet_ws_{i}")
    }

    /// 第 i 层偏置变量名
    pub fn bias(i: usize) -> String {
        format!("nnet_bs_{i}")
    }

    /// 第 i 层权重注入占位符名
    pub fn weight_init(i: usize) -> String {
        format!("nnet_ws_{i}_init")
    }

    /// 第 i 层偏置注入占位符名
    pub fn bias_init(i: usize) -> String {
        format!("nnet_bs_{i}_init")
    }
}

/// 按结构描述装配一张完整的符号图
///
/// `name` 为图名（即不含模式后缀的工件基名）。
/// 描述先整体校验（非法描述在创建任何节点之前被拒绝），
/// 随后依次经过 隐藏层栈 → 输出头 → 模式尾部 → 注入接线。
pub fn assemble(spec: &ArchitectureSpec, name: &str) -> Result<Graph, GraphError> {
    spec.validate()
        .map_err(|e| GraphError::InvalidArchitecture(e.to_string()))?;

    let mut graph = match spec.seed {
        Some(seed) => Graph::with_name_and_seed(name, seed),
        None => Graph::with_name(name),
    };
    let g = graph.inner_mut();
    let init = Init::GlorotUniform;

    // ---- 与模式无关的公共头部 ----
    let learning_rate =
        g.new_placeholder_node(DType::F32, &DynamicShape::scalar(), Some(names::LEARNING_RATE))?;
    g.bind_entry(names::LEARNING_RATE, learning_rate)?;

    // dropout 率占位符与 keep 概率在各模式下都声明（保持图形对称），
    // dropout 节点本身只进 TRAIN 图
    let dropout_keep = if spec.dropout {
        let rate = g.new_placeholder_node(
            DType::F32,
            &DynamicShape::scalar(),
            Some(names::DROPOUT_RATE),
        )?;
        g.bind_entry(names::DROPOUT_RATE, rate)?;
        let one = g.new_constant_node(1.0, None)?;
        Some(g.new_subtract_node(one, rate, None)?)
    } else {
        None
    };

    let input = g.new_placeholder_node(
        DType::F32,
        &DynamicShape::with_dynamic_batch(&[spec.input_width]),
        Some(names::INPUT),
    )?;
    g.bind_entry(names::INPUT, input)?;

    // 目标占位符在 PREDICT 模式下同样声明（对外名字集保持对称）
    let target = g.new_placeholder_node(
        DType::F32,
        &DynamicShape::with_dynamic_batch(&[spec.output_width]),
        Some(names::TARGET),
    )?;
    g.bind_entry(names::TARGET, target)?;

    let reshaped = g.new_reshape_node(
        input,
        &DynamicShape::with_dynamic_batch(&[spec.input_width]),
        None,
    )?;

    // ---- 隐藏层栈 + 输出头 ----
    let stack_dropout = if spec.mode == Mode::Train {
        dropout_keep
    } else {
        None
    };
    let (representation, mut params) = build_stack(
        g,
        reshaped,
        spec.input_width,
        &spec.hidden_widths,
        spec.hidden_activation,
        &init,
        stack_dropout,
    )?;

    let head_fan_in = spec
        .hidden_widths
        .last()
        .copied()
        .unwrap_or(spec.input_width);
    let head = build_head(
        g,
        representation,
        head_fan_in,
        spec.output_width,
        spec.task_kind,
        &init,
        spec.hidden_widths.len(),
    )?;
    g.bind_entry(names::OUTPUT, head.output)?;
    params.push(head.params);

    // ---- 模式尾部（三选一） ----
    let ctx = TailContext {
        spec,
        logits: head.logits,
        output: head.output,
        target,
        learning_rate,
        params: &params,
    };
    ModeComposer::from(spec.mode).attach(g, &ctx)?;

    // ---- 全局初始化器：覆盖包括优化器槽在内的全部变量 ----
    let variables = g.variable_nodes();
    let global_init = g.new_variables_initializer_node(&variables, Some(names::INIT))?;
    g.bind_entry(names::INIT, global_init)?;

    // ---- 权重注入接线 ----
    wire_injection(g, &params)?;

    Ok(graph)
}
