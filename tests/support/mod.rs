// tests/support/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mocks;

pub use builders::{ArticleBuilder, actor};
pub use mocks::repos::{InMemoryArticleRepo, InMemoryCommentRepo};
pub use mocks::time::{FixedClock, fixed_now};
