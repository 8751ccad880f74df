/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : Graph 模块：符号计算图的核心实现
 *
 * 公开 API：
 * - `Graph`: 装配结果的用户级句柄
 * - `GraphInner`: 底层实现（节点构建/描述/导出）
 * - `GraphError`: 错误类型
 */

mod error;
mod handle;
mod inner;

pub use error::GraphError;
pub use handle::Graph;
pub use inner::{ArtifactPaths, GraphInner};
