/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : 图描述符（Graph Descriptor）
 *                 统一的中间表示（IR），同一描述符序列化出工件的两种等价编码：
 *                 可读 JSON（{base}.json）与紧凑二进制（{base}.bin，bincode）
 */

use crate::nn::nodes::{DType, OpKind};
use crate::nn::shape::Dim;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 图的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// 格式版本（用于向后兼容）
    pub version: String,
    /// 图名称（即不含模式后缀的工件基名）
    pub name: String,
    /// 所有节点描述（按创建顺序）
    pub nodes: Vec<NodeDescriptor>,
    /// 入口注册表：对外符号名 → 节点 ID（有序，便于逐项比对）
    pub entry_points: BTreeMap<String, u64>,
}

/// 节点描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// 节点 ID
    pub id: u64,
    /// 节点名称
    pub name: String,
    /// 算子种类（含类型特定参数）
    pub op: OpKind,
    /// 输出数据类型
    pub dtype: DType,
    /// 输出形状（None 维表示动态）
    pub output_shape: Vec<Dim>,
    /// 父节点 ID 列表（定义拓扑，顺序即输入顺序）
    pub parents: Vec<u64>,
    /// 参数数量（仅变量节点有意义）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_count: Option<usize>,
    /// 初始值载荷（仅变量节点携带，行优先）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_value: Option<Vec<f32>>,
}

impl GraphDescriptor {
    /// 创建新的图描述符
    pub fn new(name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            nodes: Vec::new(),
            entry_points: BTreeMap::new(),
        }
    }

    /// 添加节点描述
    pub fn add_node(&mut self, node: NodeDescriptor) {
        self.nodes.push(node);
    }

    /// 获取总参数量
    pub fn total_params(&self) -> usize {
        self.nodes.iter().filter_map(|n| n.param_count).sum()
    }

    /// 入口名集合（升序）
    pub fn entry_names(&self) -> Vec<&str> {
        self.entry_points.keys().map(String::as_str).collect()
    }

    /// 按入口名取节点描述
    pub fn entry_node(&self, name: &str) -> Option<&NodeDescriptor> {
        let id = *self.entry_points.get(name)?;
        self.nodes.iter().find(|n| n.id == id)
    }

    /// 拓扑是否一致：忽略变量初始值，逐节点比较其余全部字段
    pub fn same_topology(&self, other: &Self) -> bool {
        self.entry_points == other.entry_points
            && self.nodes.len() == other.nodes.len()
            && self.nodes.iter().zip(&other.nodes).all(|(a, b)| {
                a.id == b.id
                    && a.name == b.name
                    && a.op == b.op
                    && a.dtype == b.dtype
                    && a.output_shape == b.output_shape
                    && a.parents == b.parents
                    && a.param_count == b.param_count
            })
    }

    /// 转换为 JSON 字符串（可读编码）
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 转换为紧凑二进制（bincode 编码）
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// 从紧凑二进制解析
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
