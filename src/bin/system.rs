/*
 * @Author       : 老董
 * @Date         : 2026-02-15
 * @Description  : system 图装配脚本：一组通用张量算子的演示图
 *                 用法: system
 *
 * 导出四个命名域（concat/gather/reduce_max/row_set），消费方把它们
 * 当作可反复喂入的张量工具函数使用。本图与模式无关，不带模式后缀。
 */

use nnet_graphs::nn::{ArtifactPaths, DType, DynamicShape, Graph, GraphError};
use std::process;

fn main() {
    env_logger::init();

    match run() {
        Ok(paths) => {
            log::info!("已导出 {} 与 {}", paths.json.display(), paths.bin.display());
        }
        Err(e) => {
            eprintln!("system: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<ArtifactPaths, GraphError> {
    let mut graph = Graph::with_name("system");
    let g = graph.inner_mut();
    let matrix = DynamicShape::new(&[None, None]);

    // ---- concat 域：沿第 0 维拼接两个矩阵 ----
    let xs = g.new_placeholder_node(DType::F32, &matrix, Some("concat/xs"))?;
    g.bind_entry("concat/xs", xs)?;
    let ys = g.new_placeholder_node(DType::F32, &matrix, Some("concat/ys"))?;
    g.bind_entry("concat/ys", ys)?;
    let zs = g.new_concat_node(xs, ys, 0, Some("concat/zs"))?;
    g.bind_entry("concat/zs", zs)?;

    // ---- gather 域：按索引取行 ----
    let xs = g.new_placeholder_node(DType::F32, &matrix, Some("gather/xs"))?;
    g.bind_entry("gather/xs", xs)?;
    let indices =
        g.new_placeholder_node(DType::I32, &DynamicShape::new(&[None]), Some("gather/indices"))?;
    g.bind_entry("gather/indices", indices)?;
    let zs = g.new_gather_node(xs, indices, 0, Some("gather/zs"))?;
    g.bind_entry("gather/zs", zs)?;

    // ---- reduce_max 域：逐行最大值 ----
    let xs = g.new_placeholder_node(DType::F32, &matrix, Some("reduce_max/xs"))?;
    g.bind_entry("reduce_max/xs", xs)?;
    let zs = g.new_reduce_max_node(xs, Some(1), Some("reduce_max/zs"))?;
    g.bind_entry("reduce_max/zs", zs)?;

    // ---- row_set 域：把第 i 行整体替换为 x ----
    let xs = g.new_placeholder_node(DType::F32, &matrix, Some("row_set/xs"))?;
    g.bind_entry("row_set/xs", xs)?;
    let i = g.new_placeholder_node(DType::I32, &DynamicShape::scalar(), Some("row_set/i"))?;
    g.bind_entry("row_set/i", i)?;
    let x = g.new_placeholder_node(DType::F32, &matrix, Some("row_set/x"))?;
    g.bind_entry("row_set/x", x)?;

    // 前段 [0, i) 行
    let zero = g.new_index_constant_node(0, None)?;
    let head_idxs = g.new_range_node(zero, i, None)?;
    let head = g.new_gather_node(xs, head_idxs, 0, None)?;

    // 后段 [i+1, 总行数) 行
    let one = g.new_index_constant_node(1, None)?;
    let after = g.new_add_node(i, one, None)?;
    let rows = g.new_dim_size_node(xs, 0, None)?;
    let tail_idxs = g.new_range_node(after, rows, None)?;
    let tail = g.new_gather_node(xs, tail_idxs, 0, None)?;

    let upper = g.new_concat_node(head, x, 0, None)?;
    let zs = g.new_concat_node(upper, tail, 0, Some("row_set/zs"))?;
    g.bind_entry("row_set/zs", zs)?;

    graph.export_artifact(".", "system")
}
