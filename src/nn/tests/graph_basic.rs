use crate::assert_err;
use crate::nn::{DType, DynamicShape, GraphError, GraphInner, Init, NodeId, OpKind};

#[test]
fn test_graph_creation() {
    // 测试默认创建
    let graph = GraphInner::new();
    assert_eq!(graph.name(), "default_graph");
    assert_eq!(graph.nodes_count(), 0);
    assert_eq!(graph.entries_count(), 0);

    // 测试指定名称创建
    let named_graph = GraphInner::with_name("custom_graph");
    assert_eq!(named_graph.name(), "custom_graph");
    assert_eq!(named_graph.nodes_count(), 0);
}

#[test]
fn test_node_id_and_auto_naming() {
    let mut graph = GraphInner::new();

    let a = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[4]), None)
        .unwrap();
    let b = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[4]), None)
        .unwrap();

    // ID 从 1 起单调递增
    assert_eq!(a, NodeId(1));
    assert_eq!(b, NodeId(2));

    // 未指定名称时按算子类型自动编号
    assert_eq!(graph.get_node_name(a).unwrap(), "placeholder_1");
    assert_eq!(graph.get_node_name(b).unwrap(), "placeholder_2");
}

#[test]
fn test_node_error_handling() {
    let mut graph = GraphInner::new();

    // 1. 测试节点未找到错误
    let invalid_id = NodeId(999);
    assert_err!(
        graph.get_node(invalid_id),
        GraphError::NodeNotFound(id) if *id == invalid_id
    );

    // 2. 测试重复节点名称错误
    let _ = graph
        .new_variable_node(&[2, 2], &Init::Zeros, Some("duplicate"))
        .unwrap();
    assert_err!(
        graph.new_variable_node(&[2, 2], &Init::Zeros, Some("duplicate")),
        GraphError::DuplicateNodeName("节点duplicate在图default_graph中重复")
    );
}

#[test]
fn test_entry_registry() {
    let mut graph = GraphInner::new();
    let input = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[8]), Some("in"))
        .unwrap();

    graph.bind_entry("nnet_input", input).unwrap();
    assert_eq!(graph.entry("nnet_input"), Some(input));
    assert_eq!(graph.entry_names(), vec!["nnet_input".to_string()]);

    // 入口名在一张图内必须唯一
    assert_err!(
        graph.bind_entry("nnet_input", input),
        GraphError::DuplicateEntryName("nnet_input")
    );

    // 绑定不存在的节点同样报错
    assert_err!(
        graph.bind_entry("ghost", NodeId(42)),
        GraphError::NodeNotFound(_)
    );
}

#[test]
fn test_mat_mul_shape_inference() {
    let mut graph = GraphInner::new();
    let x = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[4]), None)
        .unwrap();
    let w = graph.new_variable_node(&[4, 3], &Init::Zeros, None).unwrap();

    let y = graph.new_mat_mul_node(x, w, None).unwrap();
    assert_eq!(
        graph.get_node(y).unwrap().shape(),
        &DynamicShape::new(&[None, Some(3)])
    );

    // 内侧维度不匹配是装配器缺陷，必须响亮失败
    let bad = graph.new_variable_node(&[5, 3], &Init::Zeros, None).unwrap();
    assert_err!(
        graph.new_mat_mul_node(x, bad, None),
        GraphError::ShapeMismatch { .. }
    );
}

#[test]
fn test_add_bias_broadcast() {
    let mut graph = GraphInner::new();
    let x = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[3]), None)
        .unwrap();
    let b = graph.new_variable_node(&[3], &Init::Zeros, None).unwrap();

    let y = graph.new_add_node(x, b, None).unwrap();
    assert_eq!(
        graph.get_node(y).unwrap().shape(),
        &DynamicShape::new(&[None, Some(3)])
    );

    // 末维不匹配的广播被拒绝
    let bad = graph.new_variable_node(&[4], &Init::Zeros, None).unwrap();
    assert_err!(
        graph.new_add_node(x, bad, None),
        GraphError::ShapeMismatch { .. }
    );

    // 布尔输入不是数值类型
    let eq = graph.new_equal_node(x, x, None).unwrap();
    assert_err!(
        graph.new_add_node(eq, eq, None),
        GraphError::InvalidOperation(_)
    );
}

#[test]
fn test_reshape_element_count_check() {
    let mut graph = GraphInner::new();
    let x = graph
        .new_placeholder_node(DType::F32, &DynamicShape::fixed(&[2, 6]), None)
        .unwrap();

    // 元素数一致时允许
    let y = graph
        .new_reshape_node(x, &DynamicShape::fixed(&[3, 4]), None)
        .unwrap();
    assert_eq!(graph.get_node(y).unwrap().shape(), &DynamicShape::fixed(&[3, 4]));

    // 元素数不一致被拒绝
    assert_err!(
        graph.new_reshape_node(x, &DynamicShape::fixed(&[5, 2]), None),
        GraphError::ShapeMismatch { .. }
    );
}

#[test]
fn test_reduce_and_arg_max_axis_check() {
    let mut graph = GraphInner::new();
    let x = graph
        .new_placeholder_node(DType::F32, &DynamicShape::with_dynamic_batch(&[10]), None)
        .unwrap();

    let m = graph.new_reduce_max_node(x, Some(1), None).unwrap();
    assert_eq!(graph.get_node(m).unwrap().shape(), &DynamicShape::new(&[None]));

    let s = graph.new_reduce_mean_node(x, None, None).unwrap();
    assert!(graph.get_node(s).unwrap().shape().is_scalar());

    let a = graph.new_arg_max_node(x, 1, None).unwrap();
    assert_eq!(graph.get_node(a).unwrap().dtype(), DType::I32);

    assert_err!(
        graph.new_reduce_max_node(x, Some(2), None),
        GraphError::InvalidOperation(_)
    );
    assert_err!(graph.new_arg_max_node(x, 5, None), GraphError::InvalidOperation(_));
}

#[test]
fn test_assign_requires_exact_shape() {
    let mut graph = GraphInner::new();
    let var = graph.new_variable_node(&[4, 3], &Init::Zeros, None).unwrap();

    // 形状完全一致的占位符可以赋值
    let ok_ph = graph
        .new_placeholder_node(DType::F32, &DynamicShape::fixed(&[4, 3]), None)
        .unwrap();
    let assign = graph.new_assign_node(var, ok_ph, None).unwrap();
    assert_eq!(graph.get_node(assign).unwrap().dtype(), DType::Unit);

    // 秩相同但带动态维的占位符也不行：注入形状必须精确声明
    let dyn_ph = graph
        .new_placeholder_node(DType::F32, &DynamicShape::new(&[None, None]), None)
        .unwrap();
    assert_err!(
        graph.new_assign_node(var, dyn_ph, None),
        GraphError::ShapeMismatch { .. }
    );

    // 目标必须是变量
    assert_err!(
        graph.new_assign_node(ok_ph, ok_ph, None),
        GraphError::InvalidOperation(_)
    );
}

#[test]
fn test_variables_initializer_members() {
    let mut graph = GraphInner::new();
    let v1 = graph.new_variable_node(&[2], &Init::Zeros, None).unwrap();
    let v2 = graph.new_variable_node(&[3], &Init::Zeros, None).unwrap();

    let init = graph.new_variables_initializer_node(&[v1, v2], Some("init")).unwrap();
    assert_eq!(graph.get_node_parents(init).unwrap(), vec![v1, v2]);

    // 空成员合法（如 SGD 无内部状态）
    let empty = graph.new_variables_initializer_node(&[], None).unwrap();
    assert_eq!(graph.get_node_parents(empty).unwrap(), Vec::<NodeId>::new());

    // 非变量成员被拒绝
    let ph = graph
        .new_placeholder_node(DType::F32, &DynamicShape::fixed(&[2]), None)
        .unwrap();
    assert_err!(
        graph.new_variables_initializer_node(&[ph], None),
        GraphError::InvalidOperation(_)
    );
}

#[test]
fn test_group_membership() {
    let mut graph = GraphInner::new();
    let var = graph.new_variable_node(&[2], &Init::Zeros, None).unwrap();
    let ph = graph
        .new_placeholder_node(DType::F32, &DynamicShape::fixed(&[2]), None)
        .unwrap();
    let assign = graph.new_assign_node(var, ph, None).unwrap();

    let group = graph.new_group_node(&[assign], Some("batch")).unwrap();
    let node = graph.get_node(group).unwrap();
    assert_eq!(node.op(), &OpKind::Group);
    assert_eq!(node.dtype(), DType::Unit);

    assert_err!(graph.new_group_node(&[], None), GraphError::InvalidOperation(_));
}
