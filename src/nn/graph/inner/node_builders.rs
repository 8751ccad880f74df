/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : GraphInner 节点构建方法（new_*_node）
 *
 * 每个构建方法负责：校验父节点数量与数据类型、推断输出形状、入图。
 * 形状推断失败一律视为装配器缺陷，以 ShapeMismatch/InvalidOperation
 * 响亮失败，绝不产出畸形图。
 */

use super::GraphInner;
use crate::nn::graph::error::GraphError;
use crate::nn::init::Init;
use crate::nn::nodes::{DType, NodeHandle, OpKind};
use crate::nn::shape::DynamicShape;
use crate::nn::NodeId;

impl GraphInner {
    /// 添加节点到图：分配 ID、定名、登记双向边
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_id = self.generate_valid_node_id();
        let node_name =
            self.generate_valid_new_node_name(name.unwrap_or(""), node_handle.op().kind_label())?;

        for &parent_id in parents {
            self.forward_edges
                .entry(parent_id)
                .or_default()
                .push(node_id);
        }
        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    // ========== 校验辅助 ==========

    fn require_dtype(&self, id: NodeId, expected: DType, ctx: &str) -> Result<(), GraphError> {
        let node = self.get_node(id)?;
        if node.dtype() != expected {
            return Err(GraphError::InvalidOperation(format!(
                "{ctx}要求{expected}类型的输入，但{node}是{}类型",
                node.dtype()
            )));
        }
        Ok(())
    }

    fn require_variable(&self, id: NodeId, ctx: &str) -> Result<(), GraphError> {
        let node = self.get_node(id)?;
        if !node.is_variable() {
            return Err(GraphError::InvalidOperation(format!(
                "{ctx}要求变量节点，但{node}不是变量"
            )));
        }
        Ok(())
    }

    fn require_scalar(&self, id: NodeId, ctx: &str) -> Result<(), GraphError> {
        let node = self.get_node(id)?;
        if !node.shape().is_scalar() {
            return Err(GraphError::ShapeMismatch {
                expected: DynamicShape::scalar(),
                got: node.shape().clone(),
                message: format!("{ctx}要求标量输入"),
            });
        }
        Ok(())
    }

    // ========== 数据节点 ==========

    /// 创建外部输入占位符
    pub fn new_placeholder_node(
        &mut self,
        dtype: DType,
        shape: &DynamicShape,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(OpKind::Placeholder, dtype, shape.clone());
        self.add_node_to_list(node, name, &[])
    }

    /// 创建变量节点并按初始化策略生成初始值
    pub fn new_variable_node(
        &mut self,
        shape: &[usize],
        init: &Init,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if shape.iter().any(|&d| d == 0) {
            return Err(GraphError::InvalidArchitecture(format!(
                "变量形状{shape:?}含零维"
            )));
        }
        let value = if let Some(ref mut rng) = self.rng {
            init.generate_with_rng(shape, rng)
        } else {
            init.generate(shape)
        };
        let node = NodeHandle::with_value(
            OpKind::Variable,
            DType::F32,
            DynamicShape::fixed(shape),
            value,
        );
        self.add_node_to_list(node, name, &[])
    }

    /// 创建标量常量节点
    pub fn new_constant_node(&mut self, value: f32, name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(OpKind::Constant { value }, DType::F32, DynamicShape::scalar());
        self.add_node_to_list(node, name, &[])
    }

    /// 创建标量整数常量节点（索引运算用）
    pub fn new_index_constant_node(
        &mut self,
        value: i32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new(
            OpKind::IndexConstant { value },
            DType::I32,
            DynamicShape::scalar(),
        );
        self.add_node_to_list(node, name, &[])
    }

    // ========== 结构/算术 ==========

    pub fn new_reshape_node(
        &mut self,
        parent_id: NodeId,
        target: &DynamicShape,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parent = self.get_node(parent_id)?;
        // 双方元素数均已知时必须一致
        if let (Some(from), Some(to)) = (parent.shape().size_if_fixed(), target.size_if_fixed())
            && from != to
        {
            return Err(GraphError::ShapeMismatch {
                expected: target.clone(),
                got: parent.shape().clone(),
                message: format!("无法把{from}个元素重排为{to}个元素"),
            });
        }
        let dtype = parent.dtype();
        let node = NodeHandle::new(
            OpKind::Reshape {
                target: target.clone(),
            },
            dtype,
            target.clone(),
        );
        self.add_node_to_list(node, name, &[parent_id])
    }

    pub fn new_mat_mul_node(
        &mut self,
        left_id: NodeId,
        right_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(left_id, DType::F32, "MatMul")?;
        self.require_dtype(right_id, DType::F32, "MatMul")?;
        let left = self.get_node(left_id)?;
        let right = self.get_node(right_id)?;
        let (ls, rs) = (left.shape(), right.shape());
        if ls.ndim() != 2 || rs.ndim() != 2 {
            return Err(GraphError::InvalidOperation(format!(
                "MatMul要求两个2维输入，实际为{ls}与{rs}"
            )));
        }
        // 内侧维度必须可对齐
        if let (Some(k1), Some(k2)) = (ls.dim(1), rs.dim(0))
            && k1 != k2
        {
            return Err(GraphError::ShapeMismatch {
                expected: DynamicShape::new(&[ls.dim(1), rs.dim(1)]),
                got: rs.clone(),
                message: format!("MatMul内侧维度不匹配：{k1} vs {k2}"),
            });
        }
        let out = DynamicShape::new(&[ls.dim(0), rs.dim(1)]);
        let node = NodeHandle::new(OpKind::MatMul, DType::F32, out);
        self.add_node_to_list(node, name, &[left_id, right_id])
    }

    /// 加法；支持同型数值输入，以及 [batch, n] + [n] 的偏置广播
    pub fn new_add_node(
        &mut self,
        left_id: NodeId,
        right_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let dtype = self.same_numeric_dtype(left_id, right_id, "Add")?;
        let out = self.elementwise_or_bias_shape(left_id, right_id, "Add")?;
        let node = NodeHandle::new(OpKind::Add, dtype, out);
        self.add_node_to_list(node, name, &[left_id, right_id])
    }

    pub fn new_subtract_node(
        &mut self,
        left_id: NodeId,
        right_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let dtype = self.same_numeric_dtype(left_id, right_id, "Subtract")?;
        let out = self.elementwise_or_bias_shape(left_id, right_id, "Subtract")?;
        let node = NodeHandle::new(OpKind::Subtract, dtype, out);
        self.add_node_to_list(node, name, &[left_id, right_id])
    }

    /// 两个输入必须是同一种数值类型（f32 或 i32），返回该类型
    fn same_numeric_dtype(
        &self,
        left_id: NodeId,
        right_id: NodeId,
        ctx: &str,
    ) -> Result<DType, GraphError> {
        let (lt, rt) = (self.get_node(left_id)?.dtype(), self.get_node(right_id)?.dtype());
        if lt != rt || !matches!(lt, DType::F32 | DType::I32) {
            return Err(GraphError::InvalidOperation(format!(
                "{ctx}要求两个同型数值输入，实际为{lt}与{rt}"
            )));
        }
        Ok(lt)
    }

    fn elementwise_or_bias_shape(
        &self,
        left_id: NodeId,
        right_id: NodeId,
        ctx: &str,
    ) -> Result<DynamicShape, GraphError> {
        let (ls, rs) = (
            self.get_node(left_id)?.shape().clone(),
            self.get_node(right_id)?.shape().clone(),
        );
        if ls.ndim() == rs.ndim() {
            if !ls.compatible_with(&rs) {
                return Err(GraphError::ShapeMismatch {
                    expected: ls,
                    got: rs,
                    message: format!("{ctx}的两个输入形状不兼容"),
                });
            }
            return Ok(ls.merge(&rs));
        }
        // [batch, n] ⊕ [n] 广播
        if ls.ndim() == 2 && rs.ndim() == 1 {
            if let (Some(n1), Some(n2)) = (ls.dim(1), rs.dim(0))
                && n1 != n2
            {
                return Err(GraphError::ShapeMismatch {
                    expected: DynamicShape::new(&[ls.dim(0), ls.dim(1)]),
                    got: rs,
                    message: format!("{ctx}广播时末维不匹配：{n1} vs {n2}"),
                });
            }
            return Ok(ls);
        }
        Err(GraphError::InvalidOperation(format!(
            "{ctx}不支持{ls}与{rs}的组合"
        )))
    }

    // ========== 激活 ==========

    pub fn new_leaky_relu_node(
        &mut self,
        parent_id: NodeId,
        alpha: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_unary_f32_node(parent_id, OpKind::LeakyRelu { alpha }, name)
    }

    pub fn new_relu_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_leaky_relu_node(parent_id, 0.0, name)
    }

    pub fn new_sigmoid_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_f32_node(parent_id, OpKind::Sigmoid, name)
    }

    pub fn new_tanh_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_f32_node(parent_id, OpKind::Tanh, name)
    }

    pub fn new_identity_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_f32_node(parent_id, OpKind::Identity, name)
    }

    pub fn new_softmax_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let shape = self.get_node(parent_id)?.shape();
        if shape.ndim() != 2 {
            return Err(GraphError::InvalidOperation(format!(
                "Softmax要求2维输入[batch, num_classes]，实际为{shape}"
            )));
        }
        self.new_unary_f32_node(parent_id, OpKind::Softmax, name)
    }

    /// 逐元素一元算子的公共路径：输出形状与父节点相同
    fn new_unary_f32_node(
        &mut self,
        parent_id: NodeId,
        op: OpKind,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(parent_id, DType::F32, op.kind_label())?;
        let shape = self.get_node(parent_id)?.shape().clone();
        let node = NodeHandle::new(op, DType::F32, shape);
        self.add_node_to_list(node, name, &[parent_id])
    }

    /// Dropout：keep 概率来自标量节点，输出形状同输入
    pub fn new_dropout_node(
        &mut self,
        parent_id: NodeId,
        keep_prob_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(parent_id, DType::F32, "Dropout")?;
        self.require_dtype(keep_prob_id, DType::F32, "Dropout")?;
        self.require_scalar(keep_prob_id, "Dropout的keep概率")?;
        let shape = self.get_node(parent_id)?.shape().clone();
        let node = NodeHandle::new(OpKind::Dropout, DType::F32, shape);
        self.add_node_to_list(node, name, &[parent_id, keep_prob_id])
    }

    // ========== 度量/归约 ==========

    pub fn new_arg_max_node(
        &mut self,
        parent_id: NodeId,
        axis: usize,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.get_node(parent_id)?.shape().clone();
        let out = Self::reduced_shape(&shape, Some(axis), "ArgMax")?;
        let node = NodeHandle::new(OpKind::ArgMax { axis }, DType::I32, out);
        self.add_node_to_list(node, name, &[parent_id])
    }

    pub fn new_equal_node(
        &mut self,
        left_id: NodeId,
        right_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left, right) = (self.get_node(left_id)?, self.get_node(right_id)?);
        if left.dtype() != right.dtype() {
            return Err(GraphError::InvalidOperation(format!(
                "Equal的两个输入类型不一致：{} vs {}",
                left.dtype(),
                right.dtype()
            )));
        }
        if !left.shape().compatible_with(right.shape()) {
            return Err(GraphError::ShapeMismatch {
                expected: left.shape().clone(),
                got: right.shape().clone(),
                message: "Equal的两个输入形状不兼容".to_string(),
            });
        }
        let out = left.shape().merge(right.shape());
        let node = NodeHandle::new(OpKind::Equal, DType::Bool, out);
        self.add_node_to_list(node, name, &[left_id, right_id])
    }

    pub fn new_cast_node(
        &mut self,
        parent_id: NodeId,
        to: DType,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.get_node(parent_id)?.shape().clone();
        let node = NodeHandle::new(OpKind::Cast { to }, to, shape);
        self.add_node_to_list(node, name, &[parent_id])
    }

    pub fn new_reduce_max_node(
        &mut self,
        parent_id: NodeId,
        axis: Option<usize>,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_reduce_node(parent_id, OpKind::ReduceMax { axis }, axis, name)
    }

    pub fn new_reduce_min_node(
        &mut self,
        parent_id: NodeId,
        axis: Option<usize>,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_reduce_node(parent_id, OpKind::ReduceMin { axis }, axis, name)
    }

    pub fn new_reduce_mean_node(
        &mut self,
        parent_id: NodeId,
        axis: Option<usize>,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_reduce_node(parent_id, OpKind::ReduceMean { axis }, axis, name)
    }

    fn new_reduce_node(
        &mut self,
        parent_id: NodeId,
        op: OpKind,
        axis: Option<usize>,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(parent_id, DType::F32, op.kind_label())?;
        let shape = self.get_node(parent_id)?.shape().clone();
        let out = Self::reduced_shape(&shape, axis, op.kind_label())?;
        let node = NodeHandle::new(op, DType::F32, out);
        self.add_node_to_list(node, name, &[parent_id])
    }

    /// 归约后的形状：axis 为 None 归约到标量，否则去掉该维
    fn reduced_shape(
        shape: &DynamicShape,
        axis: Option<usize>,
        ctx: &str,
    ) -> Result<DynamicShape, GraphError> {
        match axis {
            None => Ok(DynamicShape::scalar()),
            Some(axis) => {
                if axis >= shape.ndim() {
                    return Err(GraphError::InvalidOperation(format!(
                        "{ctx}的轴{axis}超出输入形状{shape}的阶数"
                    )));
                }
                let dims: Vec<_> = shape
                    .dims()
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != axis)
                    .map(|(_, &d)| d)
                    .collect();
                Ok(DynamicShape::new(&dims))
            }
        }
    }

    /// 变参逐元素最大；所有输入形状一致（用于聚合梯度极值标量）
    pub fn new_maximum_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let out = self.variadic_uniform_shape(parents, "Maximum")?;
        let node = NodeHandle::new(OpKind::Maximum, DType::F32, out);
        self.add_node_to_list(node, name, parents)
    }

    pub fn new_minimum_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let out = self.variadic_uniform_shape(parents, "Minimum")?;
        let node = NodeHandle::new(OpKind::Minimum, DType::F32, out);
        self.add_node_to_list(node, name, parents)
    }

    fn variadic_uniform_shape(
        &self,
        parents: &[NodeId],
        ctx: &str,
    ) -> Result<DynamicShape, GraphError> {
        if parents.is_empty() {
            return Err(GraphError::InvalidOperation(format!(
                "{ctx}至少需要1个输入"
            )));
        }
        let mut shape = self.get_node(parents[0])?.shape().clone();
        for &id in parents {
            self.require_dtype(id, DType::F32, ctx)?;
            let s = self.get_node(id)?.shape();
            if !shape.compatible_with(s) {
                return Err(GraphError::ShapeMismatch {
                    expected: shape,
                    got: s.clone(),
                    message: format!("{ctx}的输入形状不一致"),
                });
            }
            shape = shape.merge(s);
        }
        Ok(shape)
    }

    // ========== 损失 ==========

    /// 逐行 softmax 交叉熵：输出形状 [batch]
    pub fn new_softmax_cross_entropy_node(
        &mut self,
        logits_id: NodeId,
        target_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let merged = self.paired_loss_shape(logits_id, target_id, "SoftmaxCrossEntropy")?;
        let out = DynamicShape::new(&[merged.dims()[0]]);
        let node = NodeHandle::new(OpKind::SoftmaxCrossEntropy, DType::F32, out);
        self.add_node_to_list(node, name, &[logits_id, target_id])
    }

    /// 逐元素 sigmoid 交叉熵：输出形状同输入
    pub fn new_sigmoid_cross_entropy_node(
        &mut self,
        logits_id: NodeId,
        target_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let out = self.paired_loss_shape(logits_id, target_id, "SigmoidCrossEntropy")?;
        let node = NodeHandle::new(OpKind::SigmoidCrossEntropy, DType::F32, out);
        self.add_node_to_list(node, name, &[logits_id, target_id])
    }

    /// 逐元素平方误差：输出形状同输入
    pub fn new_mse_loss_node(
        &mut self,
        prediction_id: NodeId,
        target_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let out = self.paired_loss_shape(prediction_id, target_id, "MseLoss")?;
        let node = NodeHandle::new(OpKind::MseLoss, DType::F32, out);
        self.add_node_to_list(node, name, &[prediction_id, target_id])
    }

    fn paired_loss_shape(
        &self,
        left_id: NodeId,
        right_id: NodeId,
        ctx: &str,
    ) -> Result<DynamicShape, GraphError> {
        self.require_dtype(left_id, DType::F32, ctx)?;
        self.require_dtype(right_id, DType::F32, ctx)?;
        let (ls, rs) = (self.get_node(left_id)?.shape(), self.get_node(right_id)?.shape());
        if ls.ndim() != 2 || !ls.compatible_with(rs) {
            return Err(GraphError::ShapeMismatch {
                expected: ls.clone(),
                got: rs.clone(),
                message: format!("{ctx}要求形状一致的2维输入"),
            });
        }
        Ok(ls.merge(rs))
    }

    // ========== 训练 ==========

    /// d(cost)/d(variable)；cost 必须是标量
    pub fn new_gradient_node(
        &mut self,
        cost_id: NodeId,
        variable_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(cost_id, DType::F32, "Gradient")?;
        self.require_scalar(cost_id, "Gradient的cost")?;
        self.require_variable(variable_id, "Gradient")?;
        let shape = self.get_node(variable_id)?.shape().clone();
        let node = NodeHandle::new(OpKind::Gradient, DType::F32, shape);
        self.add_node_to_list(node, name, &[cost_id, variable_id])
    }

    /// 所有梯度的全局 L2 范数（标量）
    pub fn new_global_norm_node(
        &mut self,
        gradient_ids: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if gradient_ids.is_empty() {
            return Err(GraphError::InvalidOperation(
                "GlobalNorm至少需要1个梯度输入".to_string(),
            ));
        }
        for &id in gradient_ids {
            self.require_dtype(id, DType::F32, "GlobalNorm")?;
        }
        let node = NodeHandle::new(OpKind::GlobalNorm, DType::F32, DynamicShape::scalar());
        self.add_node_to_list(node, name, gradient_ids)
    }

    /// 按全局范数裁剪单个梯度
    pub fn new_clip_by_norm_node(
        &mut self,
        gradient_id: NodeId,
        global_norm_id: NodeId,
        clip_norm: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(gradient_id, DType::F32, "ClipByNorm")?;
        self.require_scalar(global_norm_id, "ClipByNorm的全局范数")?;
        let shape = self.get_node(gradient_id)?.shape().clone();
        let node = NodeHandle::new(OpKind::ClipByNorm { clip_norm }, DType::F32, shape);
        self.add_node_to_list(node, name, &[gradient_id, global_norm_id])
    }

    /// SGD 更新：θ ← θ − lr·g
    pub fn new_apply_sgd_node(
        &mut self,
        variable_id: NodeId,
        gradient_id: NodeId,
        learning_rate_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_variable(variable_id, "ApplySgd")?;
        self.check_update_shapes(variable_id, gradient_id, "ApplySgd")?;
        self.require_scalar(learning_rate_id, "ApplySgd的学习率")?;
        let node = NodeHandle::new(OpKind::ApplySgd, DType::Unit, DynamicShape::scalar());
        self.add_node_to_list(node, name, &[variable_id, gradient_id, learning_rate_id])
    }

    /// Adam 更新：输入为变量、梯度、学习率及 m/v/β 幂次槽变量
    #[allow(clippy::too_many_arguments)]
    pub fn new_apply_adam_node(
        &mut self,
        variable_id: NodeId,
        gradient_id: NodeId,
        learning_rate_id: NodeId,
        m_id: NodeId,
        v_id: NodeId,
        beta1_power_id: NodeId,
        beta2_power_id: NodeId,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_variable(variable_id, "ApplyAdam")?;
        self.check_update_shapes(variable_id, gradient_id, "ApplyAdam")?;
        self.require_scalar(learning_rate_id, "ApplyAdam的学习率")?;
        for (slot, ctx) in [(m_id, "m槽"), (v_id, "v槽")] {
            self.require_variable(slot, ctx)?;
            self.check_update_shapes(variable_id, slot, ctx)?;
        }
        for power in [beta1_power_id, beta2_power_id] {
            self.require_variable(power, "β幂次")?;
            self.require_scalar(power, "β幂次")?;
        }
        let node = NodeHandle::new(
            OpKind::ApplyAdam {
                beta1,
                beta2,
                epsilon,
            },
            DType::Unit,
            DynamicShape::scalar(),
        );
        self.add_node_to_list(
            node,
            name,
            &[
                variable_id,
                gradient_id,
                learning_rate_id,
                m_id,
                v_id,
                beta1_power_id,
                beta2_power_id,
            ],
        )
    }

    fn check_update_shapes(
        &self,
        variable_id: NodeId,
        other_id: NodeId,
        ctx: &str,
    ) -> Result<(), GraphError> {
        let (vs, os) = (
            self.get_node(variable_id)?.shape(),
            self.get_node(other_id)?.shape(),
        );
        if !vs.compatible_with(os) {
            return Err(GraphError::ShapeMismatch {
                expected: vs.clone(),
                got: os.clone(),
                message: format!("{ctx}与变量形状不一致"),
            });
        }
        Ok(())
    }

    // ========== 控制 ==========

    /// 用来源节点（通常为占位符）的值覆写变量；形状必须精确一致
    pub fn new_assign_node(
        &mut self,
        variable_id: NodeId,
        source_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_variable(variable_id, "Assign")?;
        let (vs, ss) = (
            self.get_node(variable_id)?.shape().clone(),
            self.get_node(source_id)?.shape().clone(),
        );
        if vs != ss {
            return Err(GraphError::ShapeMismatch {
                expected: vs,
                got: ss,
                message: "Assign的来源形状必须与变量声明完全一致".to_string(),
            });
        }
        let node = NodeHandle::new(OpKind::Assign, DType::Unit, DynamicShape::scalar());
        self.add_node_to_list(node, name, &[variable_id, source_id])
    }

    /// 把若干控制算子聚合为一个可整体驱动的目标
    pub fn new_group_node(
        &mut self,
        op_ids: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if op_ids.is_empty() {
            return Err(GraphError::InvalidOperation(
                "Group至少需要1个成员".to_string(),
            ));
        }
        for &id in op_ids {
            let _ = self.get_node(id)?;
        }
        let node = NodeHandle::new(OpKind::Group, DType::Unit, DynamicShape::scalar());
        self.add_node_to_list(node, name, op_ids)
    }

    /// 变量初始化器；成员可为空（如 SGD 无内部状态）
    pub fn new_variables_initializer_node(
        &mut self,
        variable_ids: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        for &id in variable_ids {
            self.require_variable(id, "VariablesInitializer")?;
        }
        let node = NodeHandle::new(
            OpKind::VariablesInitializer,
            DType::Unit,
            DynamicShape::scalar(),
        );
        self.add_node_to_list(node, name, variable_ids)
    }

    // ========== 通用算子（system 图） ==========

    pub fn new_concat_node(
        &mut self,
        left_id: NodeId,
        right_id: NodeId,
        axis: usize,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left, right) = (self.get_node(left_id)?, self.get_node(right_id)?);
        if left.dtype() != right.dtype() {
            return Err(GraphError::InvalidOperation(format!(
                "Concat的两个输入类型不一致：{} vs {}",
                left.dtype(),
                right.dtype()
            )));
        }
        let (ls, rs) = (left.shape(), right.shape());
        if ls.ndim() != rs.ndim() || axis >= ls.ndim() {
            return Err(GraphError::InvalidOperation(format!(
                "Concat要求同阶输入且轴{axis}在范围内，实际为{ls}与{rs}"
            )));
        }
        // 非拼接维必须兼容
        for (i, (a, b)) in ls.dims().iter().zip(rs.dims()).enumerate() {
            if i != axis
                && let (Some(x), Some(y)) = (a, b)
                && x != y
            {
                return Err(GraphError::ShapeMismatch {
                    expected: ls.clone(),
                    got: rs.clone(),
                    message: format!("Concat非拼接维{i}不匹配"),
                });
            }
        }
        let dims: Vec<_> = ls
            .dims()
            .iter()
            .zip(rs.dims())
            .enumerate()
            .map(|(i, (&a, &b))| {
                if i == axis {
                    match (a, b) {
                        (Some(x), Some(y)) => Some(x + y),
                        _ => None,
                    }
                } else {
                    a.or(b)
                }
            })
            .collect();
        let dtype = left.dtype();
        let node = NodeHandle::new(OpKind::Concat { axis }, dtype, DynamicShape::new(&dims));
        self.add_node_to_list(node, name, &[left_id, right_id])
    }

    pub fn new_gather_node(
        &mut self,
        data_id: NodeId,
        indices_id: NodeId,
        axis: usize,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.require_dtype(indices_id, DType::I32, "Gather的索引")?;
        let indices = self.get_node(indices_id)?;
        if indices.shape().ndim() != 1 {
            return Err(GraphError::InvalidOperation(format!(
                "Gather要求1维索引，实际为{}",
                indices.shape()
            )));
        }
        let taken = indices.shape().dim(0);
        let data = self.get_node(data_id)?;
        let ds = data.shape();
        if axis >= ds.ndim() {
            return Err(GraphError::InvalidOperation(format!(
                "Gather的轴{axis}超出输入形状{ds}的阶数"
            )));
        }
        let dims: Vec<_> = ds
            .dims()
            .iter()
            .enumerate()
            .map(|(i, &d)| if i == axis { taken } else { d })
            .collect();
        let dtype = data.dtype();
        let node = NodeHandle::new(OpKind::Gather { axis }, dtype, DynamicShape::new(&dims));
        self.add_node_to_list(node, name, &[data_id, indices_id])
    }

    /// [start, limit) 的整数序列；长度装配期未知
    pub fn new_range_node(
        &mut self,
        start_id: NodeId,
        limit_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        for id in [start_id, limit_id] {
            self.require_dtype(id, DType::I32, "Range")?;
            self.require_scalar(id, "Range的端点")?;
        }
        let node = NodeHandle::new(OpKind::Range, DType::I32, DynamicShape::new(&[None]));
        self.add_node_to_list(node, name, &[start_id, limit_id])
    }

    /// 取输入某一维的长度（标量 i32）
    pub fn new_dim_size_node(
        &mut self,
        parent_id: NodeId,
        axis: usize,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.get_node(parent_id)?.shape();
        if axis >= shape.ndim() {
            return Err(GraphError::InvalidOperation(format!(
                "DimSize的轴{axis}超出输入形状{shape}的阶数"
            )));
        }
        let node = NodeHandle::new(OpKind::DimSize { axis }, DType::I32, DynamicShape::scalar());
        self.add_node_to_list(node, name, &[parent_id])
    }
}
