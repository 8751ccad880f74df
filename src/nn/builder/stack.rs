/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 隐藏层栈构建器
 *
 * 把有序的隐藏层宽度列表展开为严格串行的 仿射变换+激活 链：
 * 第 0 层消费（已 reshape 的）原始输入，之后每层只消费前一层的
 * 激活输出——没有跳连/残差拓扑。hidden_widths 为空时退化为恒等，
 * 最终表示就是原始输入本身，参数列表为空。
 */

use super::names;
use crate::nn::NodeId;
use crate::nn::arch::Activation;
use crate::nn::graph::{GraphError, GraphInner};
use crate::nn::init::Init;

/// 单层的 (权重, 偏置) 参数对
///
/// 权重形状 [fan_in, fan_out]，偏置形状 [fan_out]；
/// 由图独占所有权，注入接线器按创建顺序引用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerParams {
    pub weight: NodeId,
    pub bias: NodeId,
}

/// 构建隐藏层栈
///
/// 返回 (最终隐藏表示, 按创建顺序的参数对列表)。
/// `dropout_keep` 为 Some 时在每个隐藏激活后插入 dropout 节点
/// （仅 TRAIN 图传入）。
pub fn build_stack(
    graph: &mut GraphInner,
    input: NodeId,
    input_width: usize,
    hidden_widths: &[usize],
    activation: Activation,
    init: &Init,
    dropout_keep: Option<NodeId>,
) -> Result<(NodeId, Vec<LayerParams>), GraphError> {
    if input_width == 0 {
        return Err(GraphError::InvalidArchitecture(
            "输入宽度必须为正".to_string(),
        ));
    }
    if let Some(&w) = hidden_widths.iter().find(|&&w| w == 0) {
        return Err(GraphError::InvalidArchitecture(format!(
            "隐藏层宽度必须为正，实际含{w}"
        )));
    }

    let mut params = Vec::with_capacity(hidden_widths.len());
    let mut representation = input;
    let mut fan_in = input_width;

    for (i, &width) in hidden_widths.iter().enumerate() {
        let weight =
            graph.new_variable_node(&[fan_in, width], init, Some(names::weight(i).as_str()))?;
        let bias = graph.new_variable_node(&[width], init, Some(names::bias(i).as_str()))?;

        let product = graph.new_mat_mul_node(representation, weight, None)?;
        let pre_activation = graph.new_add_node(product, bias, None)?;
        let mut activated = apply_activation(graph, pre_activation, activation)?;

        if let Some(keep) = dropout_keep {
            activated = graph.new_dropout_node(activated, keep, None)?;
        }

        params.push(LayerParams { weight, bias });
        representation = activated;
        fan_in = width;
    }

    Ok((representation, params))
}

fn apply_activation(
    graph: &mut GraphInner,
    input: NodeId,
    activation: Activation,
) -> Result<NodeId, GraphError> {
    match activation {
        Activation::Relu => graph.new_relu_node(input, None),
        Activation::LeakyRelu { alpha } => graph.new_leaky_relu_node(input, alpha, None),
        Activation::Sigmoid => graph.new_sigmoid_node(input, None),
        Activation::Tanh => graph.new_tanh_node(input, None),
    }
}
