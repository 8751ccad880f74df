use crate::nn::{
    ArchitectureSpec, DynamicShape, Mode, OpKind, TaskKind, assemble, names,
};

#[test]
fn test_injection_declares_exact_shapes() {
    // 784 → [1200, 600, 300] → 10：4 对参数
    let spec = ArchitectureSpec::new(
        784,
        10,
        vec![1200, 600, 300],
        TaskKind::Classification,
        Mode::Predict,
    );
    let graph = assemble(&spec, "nnet").unwrap();
    let g = graph.inner();

    let expected_shapes: [(&[usize], &[usize]); 4] = [
        (&[784, 1200], &[1200]),
        (&[1200, 600], &[600]),
        (&[600, 300], &[300]),
        (&[300, 10], &[10]),
    ];

    for (i, (w_shape, b_shape)) in expected_shapes.iter().enumerate() {
        // 占位符形状精确匹配参数声明，而非只约定秩
        let ws = graph.entry(&names::weight_init(i)).unwrap();
        let ws_node = g.get_node(ws).unwrap();
        assert_eq!(ws_node.op(), &OpKind::Placeholder);
        assert_eq!(ws_node.shape(), &DynamicShape::fixed(w_shape));

        let bs = graph.entry(&names::bias_init(i)).unwrap();
        assert_eq!(g.get_node(bs).unwrap().shape(), &DynamicShape::fixed(b_shape));
    }
}

#[test]
fn test_injection_batched_group_covers_all_pairs_in_order() {
    // 3 个隐藏层 → 4 对参数 → 一个组算子下 8 个赋值，一次调用全部生效
    let spec = ArchitectureSpec::new(
        8,
        3,
        vec![6, 5, 4],
        TaskKind::Classification,
        Mode::Predict,
    );
    let graph = assemble(&spec, "nnet").unwrap();
    let g = graph.inner();

    let group = graph.entry(names::WEIGHTS_INIT).unwrap();
    assert_eq!(g.get_node(group).unwrap().op(), &OpKind::Group);

    let assigns = g.get_node_parents(group).unwrap();
    assert_eq!(assigns.len(), 8);

    // 赋值按参数创建顺序排列：w0, b0, w1, b1, ...
    for (i, chunk) in assigns.chunks(2).enumerate() {
        let w_assign_parents = g.get_node_parents(chunk[0]).unwrap();
        assert_eq!(g.get_node(chunk[0]).unwrap().op(), &OpKind::Assign);
        assert_eq!(
            g.get_node_name(w_assign_parents[0]).unwrap(),
            names::weight(i)
        );
        assert_eq!(w_assign_parents[1], graph.entry(&names::weight_init(i)).unwrap());

        let b_assign_parents = g.get_node_parents(chunk[1]).unwrap();
        assert_eq!(
            g.get_node_name(b_assign_parents[0]).unwrap(),
            names::bias(i)
        );
        assert_eq!(b_assign_parents[1], graph.entry(&names::bias_init(i)).unwrap());
    }
}

#[test]
fn test_injection_for_identity_stack() {
    // 无隐藏层时只有输出头一对
    let spec = ArchitectureSpec::new(5, 1, vec![], TaskKind::Binary, Mode::Predict);
    let graph = assemble(&spec, "nnet").unwrap();
    let g = graph.inner();

    let group = graph.entry(names::WEIGHTS_INIT).unwrap();
    assert_eq!(g.get_node_parents(group).unwrap().len(), 2);

    assert!(graph.entry(&names::weight_init(0)).is_some());
    assert!(graph.entry(&names::bias_init(0)).is_some());
    assert!(graph.entry(&names::weight_init(1)).is_none());
}
