//! # 常用接口模块
//!
//! 本模块提供测试中使用的断言宏
