/*
 * @Author       : 老董
 * @Date         : 2026-02-15
 * @Description  : mnist 图装配脚本
 *                 用法: mnist <PREDICT|EVAL|TRAIN>
 *
 * 固定结构：784 → [1200, 600, 300] → 10 的分类网络，ReLU 隐藏层，Adam。
 */

use nnet_graphs::nn::{ArchitectureSpec, ArtifactPaths, Mode, TaskKind, assemble};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("用法: {} <PREDICT|EVAL|TRAIN>", args[0]);
        process::exit(1);
    }

    match run(&args[1..]) {
        Ok(paths) => {
            log::info!("已导出 {} 与 {}", paths.json.display(), paths.bin.display());
        }
        Err(e) => {
            eprintln!("mnist: {e}");
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<ArtifactPaths, Box<dyn std::error::Error>> {
    let mode = Mode::from_token(&args[0])?;

    let spec = ArchitectureSpec::new(
        784,
        10,
        vec![1200, 600, 300],
        TaskKind::Classification,
        mode,
    );

    let graph = assemble(&spec, "mnist")?;
    let paths = graph.export_artifact(".", &format!("mnist{}", mode.suffix()))?;
    Ok(paths)
}
