/*
 * @Author       : 老董
 * @Date         : 2026-02-13
 * @Description  : 梯度下降优化器：θ ← θ − lr·g，无内部状态
 */

use super::{Optimizer, OptimizerOps};
use crate::nn::NodeId;
use crate::nn::graph::{GraphError, GraphInner};

/// SGD (随机梯度下降) 优化器
pub struct SGD;

impl SGD {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for SGD {
    fn attach_updates(
        &self,
        graph: &mut GraphInner,
        params: &[NodeId],
        grads: &[NodeId],
        learning_rate: NodeId,
    ) -> Result<OptimizerOps, GraphError> {
        debug_assert_eq!(params.len(), grads.len());

        let mut apply_ops = Vec::with_capacity(params.len());
        for (&param, &grad) in params.iter().zip(grads) {
            apply_ops.push(graph.new_apply_sgd_node(param, grad, learning_rate, None)?);
        }

        Ok(OptimizerOps {
            apply_ops,
            slot_variables: Vec::new(),
        })
    }
}
