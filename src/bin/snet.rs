/*
 * @Author       : 老董
 * @Date         : 2026-02-15
 * @Description  : snet 图装配脚本
 *                 用法: snet <PREDICT|EVAL|TRAIN> <输入宽度> <层列表>
 *                 例如: snet TRAIN 38 [512,256]
 *
 * 二元概率网络：输出宽度固定为 1（sigmoid 头），隐藏层 ReLU，
 * 优化器 Adam，训练图带 dropout。
 */

use nnet_graphs::nn::{
    ArchitectureSpec, ArtifactPaths, Mode, TaskKind, assemble, encode_layer_list,
    parse_layer_list, parse_width,
};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("用法: {} <PREDICT|EVAL|TRAIN> <输入宽度> <层列表>", args[0]);
        process::exit(1);
    }

    match run(&args[1..]) {
        Ok(paths) => {
            log::info!("已导出 {} 与 {}", paths.json.display(), paths.bin.display());
        }
        Err(e) => {
            eprintln!("snet: {e}");
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<ArtifactPaths, Box<dyn std::error::Error>> {
    let mode = Mode::from_token(&args[0])?;
    let inputs = parse_width("输入宽度", &args[1])?;
    let layers = parse_layer_list(&args[2])?;

    let spec = ArchitectureSpec::new(inputs, 1, layers.clone(), TaskKind::Binary, mode)
        .with_dropout(true);

    let base = format!("snet-{}-{}", inputs, encode_layer_list(&layers));
    let graph = assemble(&spec, &base)?;
    let paths = graph.export_artifact(".", &format!("{base}{}", mode.suffix()))?;
    Ok(paths)
}
