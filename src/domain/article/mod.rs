pub mod entity;
pub mod events;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod status;
pub mod value_objects;

pub use entity::{Article, ArticleUpdate, NewArticle, WorkflowStateUpdate};
pub use events::ArticleEvent;
pub use repository::{ArticleListFilter, ArticleReadRepository, ArticleWriteRepository};
pub use status::ArticleStatus;
pub use value_objects::{
    ArticleBody, ArticleId, ArticleListCursor, ArticleSlug, ArticleTitle, SectionId,
};
