use crate::assert_err;
use crate::nn::{
    Activation, DType, DynamicShape, GraphError, GraphInner, Init, OpKind, build_stack,
};

fn input_of(graph: &mut GraphInner, width: usize) -> crate::nn::NodeId {
    graph
        .new_placeholder_node(
            DType::F32,
            &DynamicShape::with_dynamic_batch(&[width]),
            Some("nnet_input"),
        )
        .unwrap()
}

#[test]
fn test_stack_layer_count_and_shapes() {
    let mut graph = GraphInner::new();
    let input = input_of(&mut graph, 6);

    let (representation, params) = build_stack(
        &mut graph,
        input,
        6,
        &[4, 3],
        Activation::Relu,
        &Init::GlorotUniform,
        None,
    )
    .unwrap();

    // 每个隐藏层一对参数，形状服从 fan_in/fan_out 规则
    assert_eq!(params.len(), 2);
    assert_eq!(
        graph.get_node(params[0].weight).unwrap().shape(),
        &DynamicShape::fixed(&[6, 4])
    );
    assert_eq!(
        graph.get_node(params[0].bias).unwrap().shape(),
        &DynamicShape::fixed(&[4])
    );
    assert_eq!(
        graph.get_node(params[1].weight).unwrap().shape(),
        &DynamicShape::fixed(&[4, 3])
    );
    assert_eq!(
        graph.get_node(params[1].bias).unwrap().shape(),
        &DynamicShape::fixed(&[3])
    );

    // 最终表示为 [?, 3] 的激活输出
    let rep = graph.get_node(representation).unwrap();
    assert_eq!(rep.shape(), &DynamicShape::new(&[None, Some(3)]));
    assert_eq!(rep.op(), &OpKind::LeakyRelu { alpha: 0.0 });

    // 变量沿用 nnet_ws_<i>/nnet_bs_<i> 命名
    assert_eq!(graph.get_node_name(params[0].weight).unwrap(), "nnet_ws_0");
    assert_eq!(graph.get_node_name(params[1].bias).unwrap(), "nnet_bs_1");
}

#[test]
fn test_stack_is_strictly_sequential() {
    let mut graph = GraphInner::new();
    let input = input_of(&mut graph, 6);

    let (representation, params) = build_stack(
        &mut graph,
        input,
        6,
        &[4, 3],
        Activation::Tanh,
        &Init::GlorotUniform,
        None,
    )
    .unwrap();

    // 第 0 层的 MatMul 消费原始输入
    let first_matmul = graph.get_node_children(input).unwrap()[0];
    assert_eq!(graph.get_node(first_matmul).unwrap().op(), &OpKind::MatMul);
    assert_eq!(
        graph.get_node_parents(first_matmul).unwrap(),
        vec![input, params[0].weight]
    );

    // 第 1 层的 MatMul 消费第 0 层的激活输出，而非原始输入
    let second_matmul = graph
        .get_node_children(params[1].weight)
        .unwrap()
        .into_iter()
        .find(|&id| graph.get_node(id).unwrap().op() == &OpKind::MatMul)
        .unwrap();
    let second_parents = graph.get_node_parents(second_matmul).unwrap();
    assert_ne!(second_parents[0], input);
    assert_eq!(
        graph.get_node(second_parents[0]).unwrap().op(),
        &OpKind::Tanh
    );

    // 链尾就是最终表示
    let rep_children = graph.get_node_children(representation).unwrap();
    assert!(rep_children.is_empty());
}

#[test]
fn test_empty_stack_degenerates_to_identity() {
    let mut graph = GraphInner::new();
    let input = input_of(&mut graph, 5);

    let (representation, params) = build_stack(
        &mut graph,
        input,
        5,
        &[],
        Activation::Relu,
        &Init::GlorotUniform,
        None,
    )
    .unwrap();

    // 恒等栈：表示就是输入本身，参数列表为空，未创建任何新节点
    assert_eq!(representation, input);
    assert!(params.is_empty());
    assert_eq!(graph.nodes_count(), 1);
}

#[test]
fn test_stack_rejects_zero_widths() {
    let mut graph = GraphInner::new();
    let input = input_of(&mut graph, 5);

    assert_err!(
        build_stack(
            &mut graph,
            input,
            0,
            &[4],
            Activation::Relu,
            &Init::GlorotUniform,
            None
        ),
        GraphError::InvalidArchitecture(_)
    );
    assert_err!(
        build_stack(
            &mut graph,
            input,
            5,
            &[4, 0, 3],
            Activation::Relu,
            &Init::GlorotUniform,
            None
        ),
        GraphError::InvalidArchitecture(_)
    );
}

#[test]
fn test_stack_inserts_dropout_when_requested() {
    let mut graph = GraphInner::new();
    let input = input_of(&mut graph, 6);
    let keep = graph.new_constant_node(0.8, None).unwrap();

    let (representation, _) = build_stack(
        &mut graph,
        input,
        6,
        &[4, 3],
        Activation::Relu,
        &Init::GlorotUniform,
        Some(keep),
    )
    .unwrap();

    // 每个隐藏激活之后各有一个 dropout，链尾是 dropout 节点
    let dropout_count = graph
        .node_ids()
        .iter()
        .filter(|&&id| graph.get_node(id).unwrap().op() == &OpKind::Dropout)
        .count();
    assert_eq!(dropout_count, 2);
    assert_eq!(graph.get_node(representation).unwrap().op(), &OpKind::Dropout);
}
