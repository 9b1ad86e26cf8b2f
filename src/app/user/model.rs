//! 用户数据模型

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::core::error::CoreError;

/// users 表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// 创建 / 更新请求体
///
/// 字段全部为 `Option`，缺失与 `null` 都由校验统一报告为 400。
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 100, message = "name must be 1 to 100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "email is required"),
        length(min = 1, max = 100, message = "email must be 1 to 100 characters")
    )]
    pub email: Option<String>,

    #[validate(required(message = "age is required"))]
    pub age: Option<i32>,
}

/// 通过校验的用户字段，创建与更新共用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl TryFrom<UserPayload> for NewUser {
    type Error = CoreError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        payload.validate().map_err(validation_message)?;

        match (payload.name, payload.email, payload.age) {
            (Some(name), Some(email), Some(age)) => Ok(NewUser { name, email, age }),
            _ => Err(CoreError::Validation(
                "name, email and age are required".to_string(),
            )),
        }
    }
}

/// 路径中的用户 ID，必须是正的 32 位整数
pub fn parse_user_id(raw: &str) -> Result<i32, CoreError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("Invalid user id: {}", raw))),
    }
}

fn validation_message(err: ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = err
        .field_errors()
        .into_iter()
        .flat_map(|(_, errors)| {
            errors.iter().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| "Validation error".to_string())
            })
        })
        .collect();
    messages.sort();

    CoreError::Validation(messages.join(", "))
}
