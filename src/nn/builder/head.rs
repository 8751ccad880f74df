/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 输出头构建器
 *
 * 在最终隐藏表示之后追加唯一一层无激活的仿射变换得到 logits，
 * 再按任务类型施加输出激活得到对外的 nnet_output。
 * 这是任务语义（而非结构）影响图的唯一接缝。
 */

use super::names;
use super::stack::LayerParams;
use crate::nn::NodeId;
use crate::nn::arch::TaskKind;
use crate::nn::graph::{GraphError, GraphInner};
use crate::nn::init::Init;

/// 输出头构建结果
pub struct HeadOutput {
    /// 未归一化的原始得分 [batch, output_width]
    pub logits: NodeId,
    /// 对外公开的输出节点（已施加输出激活）
    pub output: NodeId,
    /// 输出头自己的参数对
    pub params: LayerParams,
}

/// 构建输出头
///
/// `layer_index` 是输出头参数在全网参数序列中的序号
/// （即隐藏层数），用于延续 nnet_ws_<i>/nnet_bs_<i> 命名。
pub fn build_head(
    graph: &mut GraphInner,
    representation: NodeId,
    fan_in: usize,
    output_width: usize,
    task_kind: TaskKind,
    init: &Init,
    layer_index: usize,
) -> Result<HeadOutput, GraphError> {
    if output_width == 0 {
        return Err(GraphError::InvalidArchitecture(
            "输出宽度必须为正".to_string(),
        ));
    }

    let weight = graph.new_variable_node(
        &[fan_in, output_width],
        init,
        Some(names::weight(layer_index).as_str()),
    )?;
    let bias =
        graph.new_variable_node(&[output_width], init, Some(names::bias(layer_index).as_str()))?;

    let product = graph.new_mat_mul_node(representation, weight, None)?;
    let logits = graph.new_add_node(product, bias, None)?;

    let output = match task_kind {
        TaskKind::Classification => graph.new_softmax_node(logits, Some(names::OUTPUT))?,
        TaskKind::Binary => graph.new_sigmoid_node(logits, Some(names::OUTPUT))?,
        TaskKind::Regression { bounded: true } => graph.new_tanh_node(logits, Some(names::OUTPUT))?,
        TaskKind::Regression { bounded: false } => {
            graph.new_identity_node(logits, Some(names::OUTPUT))?
        }
    };

    Ok(HeadOutput {
        logits,
        output,
        params: LayerParams { weight, bias },
    })
}
