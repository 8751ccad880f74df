/*
 * @Author       : 老董
 * @Date         : 2026-02-15
 * @Description  : qnet 图装配脚本
 *                 用法: qnet <PREDICT|EVAL|TRAIN> <任务标签> <输入宽度> <输出宽度> <层列表>
 *                 例如: qnet TRAIN p 64 3 [256,128]
 *
 * 任务标签含 'p' 时装配概率头（softmax），否则装配有界价值头（tanh）。
 * 隐藏层用 LeakyReLU，优化器为带全局范数裁剪的 SGD。
 */

use nnet_graphs::nn::{
    Activation, ArchitectureSpec, ArtifactPaths, Mode, OptimizerKind, assemble, encode_layer_list,
    parse_layer_list, parse_task_tag, parse_width,
};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 6 {
        eprintln!("用法: {} <PREDICT|EVAL|TRAIN> <任务标签> <输入宽度> <输出宽度> <层列表>", args[0]);
        process::exit(1);
    }

    match run(&args[1..]) {
        Ok(paths) => {
            log::info!("已导出 {} 与 {}", paths.json.display(), paths.bin.display());
        }
        Err(e) => {
            eprintln!("qnet: {e}");
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<ArtifactPaths, Box<dyn std::error::Error>> {
    // 所有参数在创建任何图节点之前解析并校验完毕
    let mode = Mode::from_token(&args[0])?;
    let task = parse_task_tag(&args[1])?;
    let inputs = parse_width("输入宽度", &args[2])?;
    let outputs = parse_width("输出宽度", &args[3])?;
    let layers = parse_layer_list(&args[4])?;

    let spec = ArchitectureSpec::new(inputs, outputs, layers.clone(), task, mode)
        .with_activation(Activation::LeakyRelu { alpha: 0.2 })
        .with_optimizer(OptimizerKind::Sgd)
        .with_dropout(true);

    let base = format!(
        "qnet-{}-{}-{}-{}",
        args[1],
        inputs,
        encode_layer_list(&layers),
        outputs
    );
    let graph = assemble(&spec, &base)?;
    let paths = graph.export_artifact(".", &format!("{base}{}", mode.suffix()))?;
    Ok(paths)
}
