//! # Nnet Graphs
//!
//! `nnet_graphs`项目是一个前馈神经网络计算图的**装配与导出**工具：
//! 给定一份紧凑的结构描述（输入/输出宽度、隐藏层宽度列表、激活函数、
//! 损失/优化器选择以及执行模式 PREDICT/EVAL/TRAIN），确定性地装配出
//! 一张带固定命名入口的符号计算图，并将其序列化为可移植的、
//! 带模式后缀的工件对（可读 JSON + 紧凑二进制）。
//!
//! 本 crate 只负责"装配 + 导出"：不含训练循环、数据管道与推理运行时，
//! 真正执行图的是外部消费方（通过固定入口名定位并驱动各节点）。
//!

pub mod nn;
pub mod tensor;
pub mod utils;
