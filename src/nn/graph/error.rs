/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Graph 模块的错误类型
 *
 * 分类对应三层：结构描述非法（InvalidArchitecture）、
 * 装配期结构性错误（ShapeMismatch/InvalidOperation —— 按契约应不可达，
 * 一旦出现即为装配器自身缺陷，必须响亮失败）、导出 I/O 失败（ExportError）。
 */

use crate::nn::NodeId;
use crate::nn::shape::DynamicShape;
use thiserror::Error;

/// Graph 操作错误类型
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("节点{0}不存在")]
    NodeNotFound(NodeId),

    #[error("{0}")]
    DuplicateNodeName(String),

    #[error("入口名{0}已被绑定")]
    DuplicateEntryName(String),

    #[error("非法的结构描述：{0}")]
    InvalidArchitecture(String),

    #[error("形状不匹配：预期{expected}，实际{got}。{message}")]
    ShapeMismatch {
        expected: DynamicShape,
        got: DynamicShape,
        message: String,
    },

    #[error("{0}")]
    InvalidOperation(String),

    #[error("导出失败：{0}")]
    ExportError(String),
}
