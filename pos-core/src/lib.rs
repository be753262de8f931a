//! POS Core - 餐厅点单会话核心
//!
//! # 架构概述
//!
//! 单个收银终端会话内的订单与桌台状态：
//!
//! - **订单账本** (`orders`): 订单生命周期、购物车、付款绑桌、归档
//! - **桌台平面图** (`tables`): 布局、桌台状态机、并桌
//! - **计价** (`pricing`): 规格/加料/修饰计价，折扣
//! - **上菜顺序** (`coursing`): 分道上菜、增量送厨
//! - **菜单目录** (`services`): 只读菜单查询
//!
//! # 模块结构
//!
//! ```text
//! pos-core/src/
//! ├── core/          # 配置、错误分类
//! ├── coursing/      # CoursingCoordinator
//! ├── orders/        # OrderLedger、投影 (小票/厨房单)
//! ├── pricing/       # 单品计价
//! ├── services/      # 菜单目录缓存
//! ├── tables/        # TableFloorPlan
//! └── utils/         # 日志、金额取整
//! ```

pub mod core;
pub mod coursing;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod tables;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, ErrorKind};
pub use coursing::CoursingCoordinator;
pub use orders::{OrderError, OrderLedger, OrderResult};
pub use pricing::{PricingError, PricingResult};
pub use services::{CatalogLookup, CatalogService};
pub use tables::{FloorPlanError, FloorPlanResult, TableFloorPlan};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
