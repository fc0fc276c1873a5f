// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod service;
mod update;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::{HardDeleteArticleCommand, RestoreArticleCommand, SoftDeleteArticleCommand};
pub use service::{ArticleCommandService, ImageInput};
pub use update::UpdateArticleCommand;
