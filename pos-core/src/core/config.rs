/// 会话核心配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | TERMINAL_ID | terminal-1 | 终端/会话标识 (日志用) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (unset) | 日志目录，存在时按天滚动写文件 |
/// | TAKEAWAY_AUTO_CLOSE | true | 外带订单出餐后自动关单 |
/// | ENFORCE_TABLE_CAPACITY | false | 人数超过桌台容量时拒绝开单 |
///
/// # 示例
///
/// ```ignore
/// TAKEAWAY_AUTO_CLOSE=false LOG_LEVEL=debug cargo run -p pos-core
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 终端标识
    pub terminal_id: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 外带订单 Ready 后自动 Closed
    pub takeaway_auto_close: bool,
    /// 开单人数超过容量时拒绝 (否则仅告警)
    pub enforce_table_capacity: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            terminal_id: std::env::var("TERMINAL_ID").unwrap_or(defaults.terminal_id),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().or(defaults.log_dir),
            takeaway_auto_close: std::env::var("TAKEAWAY_AUTO_CLOSE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.takeaway_auto_close),
            enforce_table_capacity: std::env::var("ENFORCE_TABLE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enforce_table_capacity),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal_id: "terminal-1".into(),
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            takeaway_auto_close: true,
            enforce_table_capacity: false,
        }
    }
}
