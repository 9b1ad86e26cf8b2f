//! 用户数据访问

use async_trait::async_trait;
use sqlx::FromRow;

use super::model::{NewUser, User};
use crate::infrastructure::{DatabaseError, DatabaseManager, QueryResult, SqlParam};

const SELECT_ALL: &str = "SELECT id, name, email, age FROM users";
const SELECT_BY_ID: &str = "SELECT id, name, email, age FROM users WHERE id = $1";
const INSERT: &str =
    "INSERT INTO users (name, email, age) VALUES ($1, $2, $3) RETURNING id, name, email, age";
const UPDATE: &str = "UPDATE users SET name = $1, email = $2, age = $3 WHERE id = $4 \
                      RETURNING id, name, email, age";
const DELETE: &str = "DELETE FROM users WHERE id = $1";

/// 用户存储接口，每个方法恰好对应一条语句
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DatabaseError>;

    async fn find(&self, id: i32) -> Result<Option<User>, DatabaseError>;

    async fn insert(&self, user: &NewUser) -> Result<User, DatabaseError>;

    /// 覆盖全部三个字段；ID 不存在时返回 `None`
    async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, DatabaseError>;

    /// 有行被删除时返回 `true`
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseManager,
}

impl PgUserRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

fn user_params(user: &NewUser) -> Vec<SqlParam> {
    vec![
        SqlParam::from(user.name.as_str()),
        SqlParam::from(user.email.as_str()),
        SqlParam::from(user.age),
    ]
}

fn decode_users(result: QueryResult) -> Result<Vec<User>, DatabaseError> {
    result
        .rows
        .iter()
        .map(|row| User::from_row(row).map_err(DatabaseError::from))
        .collect()
}

fn decode_first(result: QueryResult) -> Result<Option<User>, DatabaseError> {
    Ok(decode_users(result)?.into_iter().next())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        decode_users(self.db.execute(SELECT_ALL, &[]).await?)
    }

    async fn find(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        decode_first(self.db.execute(SELECT_BY_ID, &[id.into()]).await?)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let result = self.db.execute(INSERT, &user_params(user)).await?;
        decode_first(result)?.ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, DatabaseError> {
        let mut params = user_params(user);
        params.push(id.into());
        decode_first(self.db.execute(UPDATE, &params).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = self.db.execute(DELETE, &[id.into()]).await?;
        Ok(result.row_count > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.db.ping().await
    }
}
