pub mod articles;
pub mod auth;
pub mod comments;
pub mod pagination;

pub use articles::ArticleDto;
pub use auth::AuthenticatedUser;
pub use comments::EditorialCommentDto;
pub use pagination::CursorPage;
