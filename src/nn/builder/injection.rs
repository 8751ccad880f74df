/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 权重注入接线器
 *
 * 为每个参数对声明形状精确匹配的外部输入占位符与覆写赋值节点，
 * 全部赋值聚合在 nnet_init 组算子之下：消费方一次调用、按位置
 * 喂入全部权重/偏置，即可把另一份（通常是训练所得的）参数移植进
 * 新装配的图——共享的是数值，不是图本身。
 */

use super::names;
use super::stack::LayerParams;
use crate::nn::DType;
use crate::nn::NodeId;
use crate::nn::graph::{GraphError, GraphInner};

/// 接线权重注入路径，返回聚合后的 nnet_init 组算子
///
/// 占位符与赋值的顺序严格等于 `params` 的创建顺序
/// （w0, b0, w1, b1, ...），消费方按同一约定按位置匹配。
pub fn wire_injection(
    graph: &mut GraphInner,
    params: &[LayerParams],
) -> Result<NodeId, GraphError> {
    let mut assign_ops = Vec::with_capacity(params.len() * 2);

    for (i, pair) in params.iter().enumerate() {
        for (variable, entry_name) in [
            (pair.weight, names::weight_init(i)),
            (pair.bias, names::bias_init(i)),
        ] {
            // 占位符形状精确取自变量声明，错配由消费方在喂入时发现
            let shape = graph.get_node(variable)?.shape().clone();
            let placeholder =
                graph.new_placeholder_node(DType::F32, &shape, Some(entry_name.as_str()))?;
            graph.bind_entry(&entry_name, placeholder)?;
            assign_ops.push(graph.new_assign_node(variable, placeholder, None)?);
        }
    }

    let group = graph.new_group_node(&assign_ops, Some(names::WEIGHTS_INIT))?;
    graph.bind_entry(names::WEIGHTS_INIT, group)?;
    Ok(group)
}
