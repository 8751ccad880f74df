/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 模式合成器：PREDICT/EVAL/TRAIN 三种互斥的图尾部
 *
 * 三个尾部构建器各自是 (logits, output, target) → 附加命名节点的
 * 纯函数，用 enum_dispatch 做带标签的变体分发；模式在装配时
 * 选定一次，单份工件内不存在模式切换——换模式必须重新装配导出。
 */

use enum_dispatch::enum_dispatch;

use super::names;
use super::stack::LayerParams;
use crate::nn::NodeId;
use crate::nn::arch::{ArchitectureSpec, Mode, OptimizerKind, TaskKind};
use crate::nn::graph::{GraphError, GraphInner};
use crate::nn::optimizer::{Adam, Optimizer, SGD};

/// 尾部构建所需的全部上游节点
pub struct TailContext<'a> {
    pub spec: &'a ArchitectureSpec,
    pub logits: NodeId,
    pub output: NodeId,
    pub target: NodeId,
    pub learning_rate: NodeId,
    /// 按创建顺序的全部参数对（隐藏层 + 输出头）
    pub params: &'a [LayerParams],
}

#[enum_dispatch]
pub(crate) trait TailBuilder {
    /// 把本模式的尾部节点附加到图上并登记入口
    fn attach(&self, graph: &mut GraphInner, ctx: &TailContext) -> Result<(), GraphError>;
}

/// 模式合成器：三个互斥状态的带标签联合
#[enum_dispatch(TailBuilder)]
pub enum ModeComposer {
    Predict(PredictTail),
    Eval(EvalTail),
    Train(TrainTail),
}

impl From<Mode> for ModeComposer {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Predict => Self::Predict(PredictTail),
            Mode::Eval => Self::Eval(EvalTail),
            Mode::Train => Self::Train(TrainTail),
        }
    }
}

// ==================== PREDICT ====================

/// PREDICT 尾部：只追加对输出的逐行最大值归约
pub struct PredictTail;

impl TailBuilder for PredictTail {
    fn attach(&self, graph: &mut GraphInner, ctx: &TailContext) -> Result<(), GraphError> {
        let output_max =
            graph.new_reduce_max_node(ctx.output, Some(1), Some(names::OUTPUT_MAX))?;
        graph.bind_entry(names::OUTPUT_MAX, output_max)
    }
}

// ==================== EVAL ====================

/// EVAL 尾部：分类任务度量准确率，其余任务在同名节点下度量平均损失
pub struct EvalTail;

impl TailBuilder for EvalTail {
    fn attach(&self, graph: &mut GraphInner, ctx: &TailContext) -> Result<(), GraphError> {
        let accuracy = match ctx.spec.task_kind {
            TaskKind::Classification => {
                let predicted = graph.new_arg_max_node(ctx.output, 1, None)?;
                let expected = graph.new_arg_max_node(ctx.target, 1, None)?;
                let is_correct = graph.new_equal_node(predicted, expected, None)?;
                let as_f32 = graph.new_cast_node(is_correct, crate::nn::DType::F32, None)?;
                graph.new_reduce_mean_node(as_f32, None, Some(names::ACCURACY))?
            }
            TaskKind::Binary | TaskKind::Regression { .. } => {
                let loss = build_loss(graph, ctx)?;
                graph.new_reduce_mean_node(loss, None, Some(names::ACCURACY))?
            }
        };
        graph.bind_entry(names::ACCURACY, accuracy)
    }
}

// ==================== TRAIN ====================

/// TRAIN 尾部：损失 → 标量代价 → 梯度（全局范数裁剪 + 极值诊断）
/// → 优化器更新 → 优化器私有状态的初始化器
pub struct TrainTail;

impl TailBuilder for TrainTail {
    fn attach(&self, graph: &mut GraphInner, ctx: &TailContext) -> Result<(), GraphError> {
        let loss = build_loss(graph, ctx)?;
        let cost = graph.new_reduce_mean_node(loss, None, Some(names::COST))?;
        graph.bind_entry(names::COST, cost)?;

        // 逐参数梯度，展开顺序与参数对一致：w0, b0, w1, b1, ...
        let variables: Vec<NodeId> = ctx
            .params
            .iter()
            .flat_map(|pair| [pair.weight, pair.bias])
            .collect();
        let mut gradients = Vec::with_capacity(variables.len());
        for &variable in &variables {
            gradients.push(graph.new_gradient_node(cost, variable, None)?);
        }

        // 全局范数裁剪，约束单步更新幅度
        let global_norm = graph.new_global_norm_node(&gradients, None)?;
        let mut clipped = Vec::with_capacity(gradients.len());
        for &gradient in &gradients {
            clipped.push(graph.new_clip_by_norm_node(
                gradient,
                global_norm,
                ctx.spec.clip_norm,
                None,
            )?);
        }

        // 每次调用的梯度极值诊断
        let mut maxima = Vec::with_capacity(clipped.len());
        let mut minima = Vec::with_capacity(clipped.len());
        for &gradient in &clipped {
            maxima.push(graph.new_reduce_max_node(gradient, None, None)?);
            minima.push(graph.new_reduce_min_node(gradient, None, None)?);
        }
        let gradients_max = graph.new_maximum_node(&maxima, Some(names::GRADIENTS_MAX))?;
        graph.bind_entry(names::GRADIENTS_MAX, gradients_max)?;
        let gradients_min = graph.new_minimum_node(&minima, Some(names::GRADIENTS_MIN))?;
        graph.bind_entry(names::GRADIENTS_MIN, gradients_min)?;

        // 优化器更新节点与私有槽变量
        let ops = match ctx.spec.optimizer {
            OptimizerKind::Sgd => {
                SGD::new().attach_updates(graph, &variables, &clipped, ctx.learning_rate)?
            }
            OptimizerKind::Adam => {
                Adam::new().attach_updates(graph, &variables, &clipped, ctx.learning_rate)?
            }
        };

        let train = graph.new_group_node(&ops.apply_ops, Some(names::TRAIN))?;
        graph.bind_entry(names::TRAIN, train)?;

        // 只重置优化器自身状态，不触碰模型权重
        let optimizer_init =
            graph.new_variables_initializer_node(&ops.slot_variables, Some(names::OPTIMIZER_INIT))?;
        graph.bind_entry(names::OPTIMIZER_INIT, optimizer_init)
    }
}

/// 按任务类型构建损失节点：分类/二元用交叉熵（输入 logits），回归用均方误差
fn build_loss(graph: &mut GraphInner, ctx: &TailContext) -> Result<NodeId, GraphError> {
    match ctx.spec.task_kind {
        TaskKind::Classification => {
            graph.new_softmax_cross_entropy_node(ctx.logits, ctx.target, None)
        }
        TaskKind::Binary => graph.new_sigmoid_cross_entropy_node(ctx.logits, ctx.target, None),
        TaskKind::Regression { .. } => graph.new_mse_loss_node(ctx.output, ctx.target, None),
    }
}
