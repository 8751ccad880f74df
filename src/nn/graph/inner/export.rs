/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @Description  : 工件导出：同一描述符写出 {base}.json + {base}.bin
 *
 * 导出是单个同步步骤；图本身随装配调用的所有者释放，
 * 无论导出成败都不会在此之外残留资源。
 */

use super::GraphInner;
use crate::nn::graph::error::GraphError;
use std::path::{Path, PathBuf};

/// 一次导出产生的工件路径对
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// 可读 JSON 编码
    pub json: PathBuf,
    /// 紧凑二进制编码
    pub bin: PathBuf,
}

impl GraphInner {
    /// 把图导出为 `{dir}/{base}.json` 与 `{dir}/{base}.bin`
    ///
    /// 两个文件编码同一份 `GraphDescriptor`；模式只体现在 `base` 的
    /// 文件名后缀里，描述符内部不含模式字段。
    pub fn export_artifact<P: AsRef<Path>>(
        &self,
        dir: P,
        base: &str,
    ) -> Result<ArtifactPaths, GraphError> {
        let dir = dir.as_ref();
        let json_path = dir.join(format!("{base}.json"));
        let bin_path = dir.join(format!("{base}.bin"));

        let descriptor = self.describe();

        let json = descriptor
            .to_json()
            .map_err(|e| GraphError::ExportError(format!("序列化JSON失败: {e}")))?;
        let bytes = descriptor
            .to_bytes()
            .map_err(|e| GraphError::ExportError(format!("序列化二进制失败: {e}")))?;

        std::fs::write(&json_path, json)
            .map_err(|e| GraphError::ExportError(format!("写入{}失败: {e}", json_path.display())))?;
        std::fs::write(&bin_path, bytes)
            .map_err(|e| GraphError::ExportError(format!("写入{}失败: {e}", bin_path.display())))?;

        Ok(ArtifactPaths {
            json: json_path,
            bin: bin_path,
        })
    }
}
