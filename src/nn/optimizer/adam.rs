/*
 * @Author       : 老董
 * @Date         : 2026-02-13
 * @Description  : Adam 优化器：逐参数 m/v 累积槽 + 共享 β 幂次变量
 */

use super::{Optimizer, OptimizerOps};
use crate::nn::NodeId;
use crate::nn::graph::{GraphError, GraphInner};
use crate::nn::init::Init;

/// Adam 优化器
pub struct Adam {
    beta1: f32,
    beta2: f32,
    epsilon: f32,
}

impl Adam {
    /// 常用缺省超参：β1=0.9，β2=0.999，ε=1e-8
    pub const fn new() -> Self {
        Self {
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }

    pub const fn with_betas(beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            beta1,
            beta2,
            epsilon,
        }
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for Adam {
    fn attach_updates(
        &self,
        graph: &mut GraphInner,
        params: &[NodeId],
        grads: &[NodeId],
        learning_rate: NodeId,
    ) -> Result<OptimizerOps, GraphError> {
        debug_assert_eq!(params.len(), grads.len());

        // β 幂次为全体参数共享的标量槽
        let beta1_power =
            graph.new_variable_node(&[], &Init::Constant(self.beta1), Some("adam_beta1_power"))?;
        let beta2_power =
            graph.new_variable_node(&[], &Init::Constant(self.beta2), Some("adam_beta2_power"))?;

        let mut apply_ops = Vec::with_capacity(params.len());
        let mut slot_variables = vec![beta1_power, beta2_power];

        for (&param, &grad) in params.iter().zip(grads) {
            let param_name = graph.get_node_name(param)?.to_string();
            let shape = graph.get_node(param)?.shape().clone();
            let fixed: Vec<usize> = shape
                .dims()
                .iter()
                .copied()
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    GraphError::InvalidOperation(format!(
                        "Adam槽要求固定形状的参数变量，实际为{shape}"
                    ))
                })?;

            let m = graph.new_variable_node(
                &fixed,
                &Init::Zeros,
                Some(format!("{param_name}_adam_m").as_str()),
            )?;
            let v = graph.new_variable_node(
                &fixed,
                &Init::Zeros,
                Some(format!("{param_name}_adam_v").as_str()),
            )?;

            apply_ops.push(graph.new_apply_adam_node(
                param,
                grad,
                learning_rate,
                m,
                v,
                beta1_power,
                beta2_power,
                self.beta1,
                self.beta2,
                self.epsilon,
                None,
            )?);

            slot_variables.push(m);
            slot_variables.push(v);
        }

        Ok(OptimizerOps {
            apply_ops,
            slot_variables,
        })
    }
}
