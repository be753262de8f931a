//! 工具模块
//!
//! - 日志初始化
//! - 金额取整

pub mod logger;
pub mod money;

pub use logger::{init_logger, init_logger_with_file};
