/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-16
 * @Description  : 负责神经网络计算图的装配、描述与导出
 */

mod arch;
mod builder;
mod descriptor;
mod graph;
mod init;
mod nodes;
pub mod optimizer;
mod shape;

pub use arch::{
    Activation, ArchitectureSpec, ConfigError, Mode, OptimizerKind, TaskKind, encode_layer_list,
    parse_layer_list, parse_task_tag, parse_width,
};
pub use builder::{
    HeadOutput, LayerParams, ModeComposer, TailContext, assemble, build_head, build_stack, names,
    wire_injection,
};
pub use descriptor::{GraphDescriptor, NodeDescriptor};
pub use graph::{ArtifactPaths, Graph, GraphError, GraphInner};
pub use init::Init;
pub use nodes::{DType, NodeHandle, NodeId, OpKind};
pub use shape::{Dim, DynamicShape};

#[cfg(test)]
mod tests;
