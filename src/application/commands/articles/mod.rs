// src/application/commands/articles/mod.rs
mod capability;
mod create;
mod publish;
mod review;
mod schedule;
mod service;
mod submit;
mod update;

pub use create::CreateArticleCommand;
pub use publish::PublishArticleCommand;
pub use review::{ApproveArticleCommand, RequestRevisionsCommand};
pub use schedule::ScheduleArticleCommand;
pub use service::ArticleCommandService;
pub use submit::SubmitForReviewCommand;
pub use update::UpdateArticleCommand;
