use crate::nn::{
    DType, DynamicShape, GraphInner, Init, OpKind, TaskKind, build_head,
};

fn representation_of(graph: &mut GraphInner, width: usize) -> crate::nn::NodeId {
    graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[width]), None)
        .unwrap()
}

#[test]
fn test_head_appends_exactly_one_affine_pair() {
    let mut graph = GraphInner::new();
    let rep = representation_of(&mut graph, 300);

    let head = build_head(
        &mut graph,
        rep,
        300,
        10,
        TaskKind::Classification,
        &Init::GlorotUniform,
        3,
    )
    .unwrap();

    assert_eq!(
        graph.get_node(head.params.weight).unwrap().shape(),
        &DynamicShape::fixed(&[300, 10])
    );
    assert_eq!(
        graph.get_node(head.params.bias).unwrap().shape(),
        &DynamicShape::fixed(&[10])
    );
    // 输出头延续参数序号命名
    assert_eq!(graph.get_node_name(head.params.weight).unwrap(), "nnet_ws_3");
    assert_eq!(graph.get_node_name(head.params.bias).unwrap(), "nnet_bs_3");

    // logits 是无激活的仿射输出 [?, 10]
    let logits = graph.get_node(head.logits).unwrap();
    assert_eq!(logits.op(), &OpKind::Add);
    assert_eq!(logits.shape(), &DynamicShape::new(&[None, Some(10)]));
}

#[test]
fn test_head_output_activation_by_task() {
    // 任务类型是唯一影响输出激活的维度
    let cases = [
        (TaskKind::Classification, OpKind::Softmax),
        (TaskKind::Binary, OpKind::Sigmoid),
        (TaskKind::Regression { bounded: true }, OpKind::Tanh),
        (TaskKind::Regression { bounded: false }, OpKind::Identity),
    ];

    for (task, expected_op) in cases {
        let mut graph = GraphInner::new();
        let rep = representation_of(&mut graph, 7);
        let head = build_head(&mut graph, rep, 7, 4, task, &Init::GlorotUniform, 0).unwrap();

        let output = graph.get_node(head.output).unwrap();
        assert_eq!(output.op(), &expected_op, "任务{task:?}的输出激活不符");
        assert_eq!(output.name(), "nnet_output");
        assert_eq!(graph.get_node_parents(head.output).unwrap(), vec![head.logits]);
    }
}

#[test]
fn test_binary_head_width_one() {
    let mut graph = GraphInner::new();
    let rep = representation_of(&mut graph, 5);
    let head = build_head(&mut graph, rep, 5, 1, TaskKind::Binary, &Init::GlorotUniform, 0).unwrap();

    assert_eq!(
        graph.get_node(head.params.weight).unwrap().shape(),
        &DynamicShape::fixed(&[5, 1])
    );
    assert_eq!(
        graph.get_node(head.output).unwrap().shape(),
        &DynamicShape::new(&[None, Some(1)])
    );
}
