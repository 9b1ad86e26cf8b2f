//! 数据库基础设施
//!
//! 对连接池的薄封装：执行一条参数化语句并返回结果行和行数，不包含业务逻辑。

use futures_util::TryStreamExt;
use sqlx::{
    postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow},
    Either, Executor,
};
use std::{fmt, time::Duration};
use thiserror::Error;
use tracing::info;

use super::config::DatabaseConfig;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        age INTEGER NOT NULL
    )
"#;

/// 数据库错误
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("statement execution failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// 语句参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

/// 一条语句的执行结果
#[derive(Default)]
pub struct QueryResult {
    pub rows: Vec<PgRow>,
    /// 写语句为受影响行数，读语句为返回行数
    pub row_count: u64,
}

// PgRow 没有实现 Debug，只输出行数
impl fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("rows", &self.rows.len())
            .field("row_count", &self.row_count)
            .finish()
    }
}

#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Connecting to database: {}", config.masked());

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(8))
            .connect_with(options)
            .await
            .map_err(DatabaseError::Connection)?;

        Ok(Self { pool })
    }

    /// 使用已有连接池（测试或外部管理的池）
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 执行一条参数化语句，不做重试
    pub async fn execute(
        &self,
        statement: &str,
        params: &[SqlParam],
    ) -> Result<QueryResult, DatabaseError> {
        let mut query = sqlx::query(statement);
        for param in params {
            query = match param {
                SqlParam::Int(value) => query.bind(*value),
                SqlParam::Text(value) => query.bind(value.clone()),
            };
        }

        let mut result = QueryResult::default();
        let mut affected = 0;
        let mut stream = (&self.pool).fetch_many(query);
        while let Some(step) = stream.try_next().await? {
            match step {
                Either::Left(done) => affected += done.rows_affected(),
                Either::Right(row) => result.rows.push(row),
            }
        }

        result.row_count = if result.rows.is_empty() {
            affected
        } else {
            result.rows.len() as u64
        };
        Ok(result)
    }

    /// 创建 users 表（幂等）
    pub async fn init_schema(&self) -> Result<(), DatabaseError> {
        info!("Ensuring users table exists...");
        self.execute(CREATE_USERS_TABLE, &[]).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.execute("SELECT 1", &[]).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
