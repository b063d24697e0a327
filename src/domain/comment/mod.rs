pub mod entity;
pub mod repository;

pub use entity::{CommentBody, CommentId, EditorialComment, NewEditorialComment};
pub use repository::EditorialCommentRepository;
