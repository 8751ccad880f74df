use crate::nn::optimizer::{Adam, Optimizer, SGD};
use crate::nn::{DType, DynamicShape, GraphInner, Init, OpKind};

struct TrainFixture {
    graph: GraphInner,
    params: Vec<crate::nn::NodeId>,
    grads: Vec<crate::nn::NodeId>,
    learning_rate: crate::nn::NodeId,
}

fn fixture() -> TrainFixture {
    let mut graph = GraphInner::new();
    let learning_rate = graph
        .new_placeholder_node(DType::F32, &DynamicShape::scalar(), Some("nnet_learning_rate"))
        .unwrap();
    let cost_src = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[2]), None)
        .unwrap();
    let cost = graph.new_reduce_mean_node(cost_src, None, Some("cost")).unwrap();

    let mut params = Vec::new();
    let mut grads = Vec::new();
    for (name, shape) in [("w", &[3usize, 2][..]), ("b", &[2][..])] {
        let var = graph.new_variable_node(shape, &Init::GlorotUniform, Some(name)).unwrap();
        params.push(var);
        grads.push(graph.new_gradient_node(cost, var, None).unwrap());
    }

    TrainFixture {
        graph,
        params,
        grads,
        learning_rate,
    }
}

#[test]
fn test_sgd_emits_one_apply_per_param_and_no_slots() {
    let mut f = fixture();
    let ops = SGD::new()
        .attach_updates(&mut f.graph, &f.params, &f.grads, f.learning_rate)
        .unwrap();

    assert_eq!(ops.apply_ops.len(), 2);
    assert!(ops.slot_variables.is_empty());

    for (i, &apply) in ops.apply_ops.iter().enumerate() {
        let node = f.graph.get_node(apply).unwrap();
        assert_eq!(node.op(), &OpKind::ApplySgd);
        assert_eq!(node.dtype(), DType::Unit);
        // 更新算子按 [变量, 梯度, 学习率] 接线
        assert_eq!(
            f.graph.get_node_parents(apply).unwrap(),
            vec![f.params[i], f.grads[i], f.learning_rate]
        );
    }
}

#[test]
fn test_adam_emits_zero_initialized_slots() {
    let mut f = fixture();
    let ops = Adam::new()
        .attach_updates(&mut f.graph, &f.params, &f.grads, f.learning_rate)
        .unwrap();

    assert_eq!(ops.apply_ops.len(), 2);
    // 2 个 β 幂次 + 每参数 m/v
    assert_eq!(ops.slot_variables.len(), 6);

    // m/v 槽形状同参数且零初始化
    let m = f.graph.find_node_by_name("w_adam_m").unwrap();
    let m_node = f.graph.get_node(m).unwrap();
    assert_eq!(m_node.shape(), &DynamicShape::fixed(&[3, 2]));
    assert!(m_node.value().unwrap().data_as_slice().iter().all(|&v| v == 0.0));

    // β 幂次为标量变量，初值为对应 β
    let b1 = f.graph.find_node_by_name("adam_beta1_power").unwrap();
    let b1_node = f.graph.get_node(b1).unwrap();
    assert!(b1_node.shape().is_scalar());
    assert_eq!(b1_node.value().unwrap().data_as_slice(), &[0.9]);

    // 更新算子接线：[变量, 梯度, 学习率, m, v, β1幂, β2幂]
    let parents = f.graph.get_node_parents(ops.apply_ops[0]).unwrap();
    assert_eq!(parents.len(), 7);
    assert_eq!(parents[0], f.params[0]);
    assert_eq!(parents[1], f.grads[0]);
    assert_eq!(parents[2], f.learning_rate);

    match f.graph.get_node(ops.apply_ops[0]).unwrap().op() {
        OpKind::ApplyAdam { beta1, beta2, epsilon } => {
            assert_eq!(*beta1, 0.9);
            assert_eq!(*beta2, 0.999);
            assert_eq!(*epsilon, 1e-8);
        }
        other => panic!("预期 ApplyAdam，实际得到 {other:?}"),
    }
}
