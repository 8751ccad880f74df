/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : GraphInner → GraphDescriptor 的转换
 */

use super::GraphInner;
use crate::nn::descriptor::{GraphDescriptor, NodeDescriptor};

impl GraphInner {
    /// 生成图的完整描述符（节点按创建顺序排列）
    pub fn describe(&self) -> GraphDescriptor {
        let mut descriptor = GraphDescriptor::new(self.name());

        for id in self.node_ids() {
            // node_ids 来自 nodes 的键集合，取值必然成功
            let node = &self.nodes[&id];
            let parents = self
                .backward_edges
                .get(&id)
                .map(|ps| ps.iter().map(|p| p.0).collect())
                .unwrap_or_default();

            descriptor.add_node(NodeDescriptor {
                id: id.0,
                name: node.name().to_string(),
                op: node.op().clone(),
                dtype: node.dtype(),
                output_shape: node.shape().dims().to_vec(),
                parents,
                param_count: node.param_count(),
                init_value: node.value().map(|t| t.data_as_slice().to_vec()),
            });
        }

        for (name, id) in &self.entries {
            descriptor.entry_points.insert(name.clone(), id.0);
        }

        descriptor
    }
}
