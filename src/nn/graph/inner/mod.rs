/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : GraphInner：符号图的底层实现
 *
 * 职责划分：
 * - core.rs          创建、节点/入口访问、ID 与名称分配
 * - node_builders.rs 节点构建方法（new_*_node），含形状推断
 * - describe.rs      生成 GraphDescriptor（导出用中间表示）
 * - export.rs        工件导出（{base}.json + {base}.bin）
 */

mod core;
mod describe;
mod export;
mod node_builders;

pub use export::ArtifactPaths;

use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// 符号计算图的底层实现
///
/// 单线程使用；一次装配调用独占一张图，装配结束后随所有者一起释放。
#[derive(Debug)]
pub struct GraphInner {
    /// 图名称
    pub(in crate::nn::graph) name: String,
    /// 节点仓库
    pub(in crate::nn::graph) nodes: HashMap<NodeId, NodeHandle>,
    /// 父 → 子 边
    pub(in crate::nn::graph) forward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 子 → 父 边（定义拓扑，顺序即算子的输入顺序）
    pub(in crate::nn::graph) backward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 已分配的最大节点 ID
    pub(in crate::nn::graph) next_id: u64,
    /// 入口注册表：对外符号名 → 节点（显式、唯一、可测试）
    pub(in crate::nn::graph) entries: HashMap<String, NodeId>,
    /// 参数初始化用 RNG（Some 时装配结果可复现）
    pub(in crate::nn::graph) rng: Option<StdRng>,
}
