/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : Graph 句柄（用户级 API）
 *
 * 装配完成的图 + 其入口注册表的所有者。一次装配产出一个 Graph，
 * 导出后即可释放；句柄不提供任何执行能力。
 */

use super::error::GraphError;
use super::inner::{ArtifactPaths, GraphInner};
use crate::nn::NodeId;
use crate::nn::descriptor::GraphDescriptor;
use std::path::Path;

/// Graph - 装配结果的句柄
#[derive(Debug)]
pub struct Graph {
    inner: GraphInner,
}

impl Graph {
    /// 创建新图
    pub fn new() -> Self {
        Self {
            inner: GraphInner::new(),
        }
    }

    /// 创建带名称的图
    pub fn with_name(name: &str) -> Self {
        Self {
            inner: GraphInner::with_name(name),
        }
    }

    /// 创建带名称和固定种子的图（参数初始值可复现）
    pub fn with_name_and_seed(name: &str, seed: u64) -> Self {
        Self {
            inner: GraphInner::with_name_and_seed(name, seed),
        }
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> &GraphInner {
        &self.inner
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&mut self) -> &mut GraphInner {
        &mut self.inner
    }

    /// 图名称
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// 节点总数
    pub fn nodes_count(&self) -> usize {
        self.inner.nodes_count()
    }

    /// 按入口名查找节点
    pub fn entry(&self, name: &str) -> Option<NodeId> {
        self.inner.entry(name)
    }

    /// 所有入口名（升序）
    pub fn entry_names(&self) -> Vec<String> {
        self.inner.entry_names()
    }

    /// 生成图的完整描述符
    pub fn describe(&self) -> GraphDescriptor {
        self.inner.describe()
    }

    /// 导出工件对（{base}.json + {base}.bin）
    pub fn export_artifact<P: AsRef<Path>>(
        &self,
        dir: P,
        base: &str,
    ) -> Result<ArtifactPaths, GraphError> {
        self.inner.export_artifact(dir, base)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
