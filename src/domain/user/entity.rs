// src/domain/user/entity.rs
use crate::domain::user::value_objects::UserId;
use chrono::{DateTime, Utc};

/// Users are an external collaborator entity; the core only reads them to
/// check existence and ownership. Mutation lives outside this crate.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
