//! 服务层
//!
//! # 服务列表
//!
//! - [`CatalogService`] - 菜单目录只读查询（含内存缓存）

pub mod catalog_service;

pub use catalog_service::{CatalogLookup, CatalogService};
