//! 配置基础设施
//!
//! 所有配置都来自环境变量（启动时会先尝试加载 `.env`），每一项都有默认值。

use std::env;
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// 数据库连接参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub host: String,
    pub name: String,
    pub password: String,
    pub port: u16,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// 用于日志输出的连接描述，不包含密码
    pub fn masked(&self) -> String {
        format!(
            "postgres://{}:****@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub port: u16,
    pub log_level: String,
}

impl AppConfig {
    /// 从进程环境加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过任意查找函数加载配置，缺失的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            user: text("DB_USER", "postgres"),
            host: text("DB_HOST", "localhost"),
            name: text("DB_NAME", "users_db"),
            password: text("DB_PASSWORD", "postgres"),
            port: parse(&lookup, "DB_PORT", 5432)?,
            max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 10)?,
        };

        Ok(Self {
            database,
            port: parse(&lookup, "PORT", 3000)?,
            log_level: text("RUST_LOG", "info"),
        })
    }
}

fn parse<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
