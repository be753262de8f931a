//! 核心模块 - 配置与错误分类
//!
//! # 模块结构
//!
//! - [`Config`] - 会话配置
//! - [`ErrorKind`] - 各组件共享的错误类别

pub mod config;
pub mod error;

pub use config::Config;
pub use error::ErrorKind;
