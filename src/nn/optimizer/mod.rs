/*
 * @Author       : 老董
 * @Date         : 2026-02-13
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-15
 * @Description  : 优化器模块：在 TRAIN 图尾部生成参数更新节点
 *
 * 与执行式框架不同，这里的优化器不做数值更新，而是向符号图
 * 发射"更新算子 + 自身槽变量"。槽变量归优化器私有，
 * 其初始化器（nnet_optimizer_init）重置优化器状态而不触碰模型权重。
 */

mod adam;
mod sgd;

pub use adam::Adam;
pub use sgd::SGD;

use crate::nn::NodeId;
use crate::nn::graph::{GraphError, GraphInner};

/// 一次优化器接线的产物
pub struct OptimizerOps {
    /// 逐参数的更新算子（按参数顺序）
    pub apply_ops: Vec<NodeId>,
    /// 优化器私有的槽变量（m/v 累积量、β 幂次等；SGD 为空）
    pub slot_variables: Vec<NodeId>,
}

/// 图发射式优化器接口
pub trait Optimizer {
    /// 为每个 (变量, 裁剪后梯度) 对生成更新节点
    ///
    /// `params` 与 `grads` 必须等长且按同一顺序排列。
    fn attach_updates(
        &self,
        graph: &mut GraphInner,
        params: &[NodeId],
        grads: &[NodeId],
        learning_rate: NodeId,
    ) -> Result<OptimizerOps, GraphError>;
}
