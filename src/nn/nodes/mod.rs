/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 节点模块：NodeId、数据类型、算子种类与节点句柄
 *
 * 节点是纯符号的：只携带算子种类、数据类型、（可能动态的）形状与名字；
 * 仅变量/常量节点带有数据载荷（初始值）。装配期不发生任何数值计算。
 */

mod op;

pub use op::OpKind;

use crate::nn::shape::DynamicShape;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点的唯一标识（图内单调递增分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 节点输出的数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    /// 32 位浮点
    F32,
    /// 32 位整数（索引、范围等）
    I32,
    /// 布尔（比较结果）
    Bool,
    /// 无张量输出的控制算子（赋值、分组、初始化器等）
    Unit,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::F32 => "f32",
            Self::I32 => "i32",
            Self::Bool => "bool",
            Self::Unit => "unit",
        };
        write!(f, "{s}")
    }
}

/// 节点句柄：图中单个节点的全部静态信息
///
/// id 与名字在节点加入图时由 `GraphInner` 统一分配/校验
/// （见 `add_node_to_list`），句柄自身不保证唯一性。
#[derive(Debug, Clone)]
pub struct NodeHandle {
    id: NodeId,
    name: String,
    op: OpKind,
    dtype: DType,
    shape: DynamicShape,
    /// 仅变量/常量节点携带：初始值载荷
    value: Option<Tensor>,
}

impl NodeHandle {
    /// 创建一个未入图的节点句柄（id/名字待绑定）
    pub(in crate::nn) fn new(op: OpKind, dtype: DType, shape: DynamicShape) -> Self {
        Self {
            id: NodeId(0),
            name: String::new(),
            op,
            dtype,
            shape,
            value: None,
        }
    }

    /// 创建一个带初始值载荷的节点句柄（变量节点用）
    pub(in crate::nn) fn with_value(
        op: OpKind,
        dtype: DType,
        shape: DynamicShape,
        value: Tensor,
    ) -> Self {
        Self {
            id: NodeId(0),
            name: String::new(),
            op,
            dtype,
            shape,
            value: Some(value),
        }
    }

    /// 入图时绑定最终的 id 与名字
    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.id = id;
        self.name = name.to_string();
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn op(&self) -> &OpKind {
        &self.op
    }

    pub const fn dtype(&self) -> DType {
        self.dtype
    }

    pub const fn shape(&self) -> &DynamicShape {
        &self.shape
    }

    pub const fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    /// 是否为可被初始化器管理的变量节点
    pub const fn is_variable(&self) -> bool {
        matches!(self.op, OpKind::Variable)
    }

    /// 变量节点的参数量（非变量节点返回 None）
    pub fn param_count(&self) -> Option<usize> {
        if self.is_variable() {
            self.shape.size_if_fixed()
        } else {
            None
        }
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "节点[id={}, name={}, op={}, shape={}]",
            self.id,
            self.name,
            self.op.kind_label(),
            self.shape
        )
    }
}
