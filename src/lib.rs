//! # 用户 CRUD 服务
//!
//! 基于 Axum + SQLx 的最小 HTTP 服务，对单张 `users` 表提供增删改查：
//! - `infrastructure`：配置、数据库连接池、日志
//! - `core`：错误类型与请求日志中间件
//! - `app`：用户模型、存储、服务、处理器与路由

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{create_routes, AppState};
pub use crate::core::error::CoreError;
