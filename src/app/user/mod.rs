//! 用户资源：模型、存储、服务与处理器

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub use model::{NewUser, User, UserPayload};
pub use repository::{PgUserRepository, UserRepository};
pub use service::UserService;
