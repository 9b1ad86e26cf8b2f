//! 集成测试公共工具：内存存储与请求辅助函数

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use user_crud_service::{
    app::user::{NewUser, User, UserRepository},
    create_routes,
    infrastructure::DatabaseError,
    AppState,
};

/// 内存中的 users 表，邮箱唯一约束与数据库一致
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    rows: Vec<User>,
    last_id: i32,
}

fn unique_violation(email: &str) -> DatabaseError {
    DatabaseError::Query(sqlx::Error::Protocol(format!(
        "duplicate key value violates unique constraint \"users_email_key\": {}",
        email
    )))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.inner.lock().await.rows.clone())
    }

    async fn find(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let table = self.inner.lock().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let mut table = self.inner.lock().await;
        if table.rows.iter().any(|u| u.email == user.email) {
            return Err(unique_violation(&user.email));
        }
        table.last_id += 1;
        let created = User {
            id: table.last_id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, DatabaseError> {
        let mut table = self.inner.lock().await;
        if table.rows.iter().any(|u| u.email == user.email && u.id != id) {
            return Err(unique_violation(&user.email));
        }
        Ok(table.rows.iter_mut().find(|u| u.id == id).map(|row| {
            row.name = user.name.clone();
            row.email = user.email.clone();
            row.age = user.age;
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut table = self.inner.lock().await;
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        Ok(table.rows.len() < before)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// 每次调用都失败的存储，模拟数据库不可用
pub struct UnavailableRepository;

fn unavailable() -> DatabaseError {
    DatabaseError::Query(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl UserRepository for UnavailableRepository {
    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        Err(unavailable())
    }

    async fn find(&self, _id: i32) -> Result<Option<User>, DatabaseError> {
        Err(unavailable())
    }

    async fn insert(&self, _user: &NewUser) -> Result<User, DatabaseError> {
        Err(unavailable())
    }

    async fn update(&self, _id: i32, _user: &NewUser) -> Result<Option<User>, DatabaseError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, DatabaseError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(unavailable())
    }
}

pub fn memory_app() -> Router {
    create_routes(AppState::new(Arc::new(MemoryUserRepository::default())))
}

pub fn unavailable_app() -> Router {
    create_routes(AppState::new(Arc::new(UnavailableRepository)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub text: String,
}

impl TestResponse {
    /// 空响应体解析为 `Value::Null`
    pub fn json(&self) -> Value {
        if self.text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.text).expect("response body is not JSON")
        }
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
