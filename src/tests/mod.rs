//! 单元测试模块
//! 覆盖样式解析、物化、选择器查询、加载流程

pub mod style_tests;
pub mod materializer_tests;
