use std::path::PathBuf;

use chrono_tz::Tz;
use shared::models::ReminderChannel;

use crate::utils::time::parse_timezone;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | <WORK_DIR>/gym.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | production 下为 true | JSON 日志 |
/// | LOG_RETENTION_DAYS | 14 | 应用日志保留天数 |
/// | BUSINESS_TIMEZONE | UTC | 业务时区，决定 "今天" |
/// | PLAN_CATALOG_PATH | - | 替换内置套餐目录的 JSON 文件 |
/// | REMINDER_CHANNELS | sms,whatsapp,business_whatsapp | 可用的提醒渠道 |
///
/// 无法解析的值回退到默认值。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/gym HTTP_PORT=8080 BUSINESS_TIMEZONE=Asia/Kolkata cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 显式指定的数据库路径
    pub database_path: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_retention_days: i64,
    /// 业务时区
    pub timezone: Tz,
    /// 套餐目录文件 (未设置时使用内置目录)
    pub plan_catalog_path: Option<String>,
    /// 启用的提醒渠道
    pub reminder_channels: Vec<ReminderChannel>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置 (测试用)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        Self {
            work_dir: non_empty("WORK_DIR").unwrap_or_else(|| "./data".into()),
            http_port: non_empty("HTTP_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(3000),
            database_path: non_empty("DATABASE_PATH"),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_empty("LOG_JSON")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(is_production),
            log_retention_days: non_empty("LOG_RETENTION_DAYS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(14),
            timezone: non_empty("BUSINESS_TIMEZONE")
                .map(|tz| parse_timezone(&tz))
                .unwrap_or(Tz::UTC),
            plan_catalog_path: non_empty("PLAN_CATALOG_PATH"),
            reminder_channels: non_empty("REMINDER_CHANNELS")
                .map(|v| parse_channels(&v))
                .unwrap_or_else(|| ReminderChannel::ALL.to_vec()),
            environment,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.work_dir).join("gym.db"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Comma separated channel names; unknown names are skipped with a warning
fn parse_channels(value: &str) -> Vec<ReminderChannel> {
    let mut channels = Vec::new();
    for name in value.split(',').filter(|s| !s.trim().is_empty()) {
        match name.parse::<ReminderChannel>() {
            Ok(channel) if !channels.contains(&channel) => channels.push(channel),
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring REMINDER_CHANNELS entry: {}", e),
        }
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.work_dir, "./data");
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert!(!config.log_json);
        assert_eq!(config.log_retention_days, 14);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.plan_catalog_path, None);
        assert_eq!(config.reminder_channels, ReminderChannel::ALL.to_vec());
        assert_eq!(config.database_path(), PathBuf::from("./data/gym.db"));
        assert_eq!(config.log_dir(), PathBuf::from("./data/logs"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WORK_DIR", "/srv/gym"),
            ("HTTP_PORT", "8080"),
            ("DATABASE_PATH", "/tmp/members.db"),
            ("ENVIRONMENT", "production"),
            ("BUSINESS_TIMEZONE", "Asia/Kolkata"),
            ("REMINDER_CHANNELS", "sms, whatsapp ,sms"),
        ]);
        assert_eq!(config.http_port, 8080);
        assert!(config.is_production());
        assert!(config.log_json);
        assert_eq!(config.timezone, chrono_tz::Asia::Kolkata);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/members.db"));
        assert_eq!(
            config.reminder_channels,
            vec![ReminderChannel::Sms, ReminderChannel::WhatsApp]
        );
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("HTTP_PORT", "eighty"),
            ("LOG_JSON", "maybe"),
            ("LOG_RETENTION_DAYS", "-3"),
            ("BUSINESS_TIMEZONE", "Mars/Olympus"),
            ("REMINDER_CHANNELS", "pigeon,sms"),
        ]);
        assert_eq!(config.http_port, 3000);
        assert!(!config.log_json);
        assert_eq!(config.log_retention_days, 14);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.reminder_channels, vec![ReminderChannel::Sms]);
    }
}
