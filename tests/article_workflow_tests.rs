use std::sync::Arc;

mod support;

use docket_core::application::commands::articles::{
    ApproveArticleCommand, ArticleCommandService, PublishArticleCommand, RequestRevisionsCommand,
    ScheduleArticleCommand, SubmitForReviewCommand, UpdateArticleCommand,
};
use docket_core::application::error::ApplicationError;
use docket_core::application::events::EventBus;
use docket_core::domain::article::services::ArticleSlugService;
use docket_core::domain::article::{ArticleReadRepository, ArticleStatus, ArticleWriteRepository};
use docket_core::domain::errors::DomainError;
use docket_core::domain::user::Role;
use docket_core::infrastructure::util::DefaultSlugGenerator;

use support::{ArticleBuilder, FixedClock, InMemoryArticleRepo, actor, fixed_now};

fn command_service(repo: &Arc<InMemoryArticleRepo>) -> ArticleCommandService {
    let read: Arc<dyn ArticleReadRepository> = Arc::clone(repo) as _;
    let write: Arc<dyn ArticleWriteRepository> = Arc::clone(repo) as _;
    let slug_service = Arc::new(ArticleSlugService::new(
        Arc::clone(&read),
        Arc::new(DefaultSlugGenerator),
    ));
    ArticleCommandService::new(
        write,
        read,
        slug_service,
        Arc::new(FixedClock::at(fixed_now())),
        Arc::new(EventBus::default()),
    )
}

#[tokio::test]
async fn contributor_cannot_publish_a_draft() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new().id(1).author_id(1).build(),
    ]));
    let service = command_service(&repo);
    let contributor = actor(1, Role::Contributor);

    let err = service
        .publish_article(&contributor, PublishArticleCommand { id: 1 })
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Forbidden(_)));
    assert_eq!(repo.get(1).unwrap().status, ArticleStatus::Draft);
}

#[tokio::test]
async fn even_editors_cannot_shortcut_a_draft_to_published() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new().id(1).author_id(1).build(),
    ]));
    let service = command_service(&repo);
    let editor = actor(2, Role::Editor);

    let err = service
        .publish_article(&editor, PublishArticleCommand { id: 1 })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(_))
    ));
    assert_eq!(repo.get(1).unwrap().status, ArticleStatus::Draft);
}

#[tokio::test]
async fn the_full_editorial_path_reaches_published() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new().id(1).author_id(1).build(),
    ]));
    let service = command_service(&repo);
    let author = actor(1, Role::Contributor);
    let editor = actor(2, Role::Editor);

    let dto = service
        .submit_for_review(&author, SubmitForReviewCommand { id: 1 })
        .await
        .unwrap();
    assert_eq!(dto.status, ArticleStatus::InReview);

    let dto = service
        .approve_article(&editor, ApproveArticleCommand { id: 1 })
        .await
        .unwrap();
    assert_eq!(dto.status, ArticleStatus::Approved);

    let dto = service
        .publish_article(&editor, PublishArticleCommand { id: 1 })
        .await
        .unwrap();
    assert_eq!(dto.status, ArticleStatus::Published);
    assert_eq!(dto.published_at, Some(fixed_now()));
}

#[tokio::test]
async fn review_decisions_are_editor_only() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new()
            .id(1)
            .author_id(1)
            .status(ArticleStatus::InReview)
            .build(),
    ]));
    let service = command_service(&repo);
    let contributor = actor(1, Role::Contributor);

    let err = service
        .approve_article(&contributor, ApproveArticleCommand { id: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let err = service
        .request_revisions(&contributor, RequestRevisionsCommand { id: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    assert_eq!(repo.get(1).unwrap().status, ArticleStatus::InReview);
}

#[tokio::test]
async fn authors_resubmit_after_revisions_but_strangers_do_not() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new()
            .id(1)
            .author_id(1)
            .status(ArticleStatus::NeedsRevisions)
            .build(),
    ]));
    let service = command_service(&repo);

    let stranger = actor(3, Role::Contributor);
    let err = service
        .submit_for_review(&stranger, SubmitForReviewCommand { id: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let author = actor(1, Role::Contributor);
    let dto = service
        .submit_for_review(&author, SubmitForReviewCommand { id: 1 })
        .await
        .unwrap();
    assert_eq!(dto.status, ArticleStatus::InReview);
}

#[tokio::test]
async fn scheduling_requires_an_approved_article() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new()
            .id(1)
            .author_id(1)
            .status(ArticleStatus::InReview)
            .build(),
    ]));
    let service = command_service(&repo);
    let editor = actor(2, Role::Editor);

    let err = service
        .schedule_article(
            &editor,
            ScheduleArticleCommand {
                id: 1,
                publish_at: fixed_now() + chrono::Duration::hours(1),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(_))
    ));

    service
        .approve_article(&editor, ApproveArticleCommand { id: 1 })
        .await
        .unwrap();
    let publish_at = fixed_now() + chrono::Duration::hours(1);
    let dto = service
        .schedule_article(&editor, ScheduleArticleCommand { id: 1, publish_at })
        .await
        .unwrap();
    assert_eq!(dto.status, ArticleStatus::Scheduled);
    assert_eq!(dto.scheduled_at, Some(publish_at));
}

#[tokio::test]
async fn scheduled_articles_are_out_of_user_reach() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new()
            .id(1)
            .author_id(1)
            .scheduled_at(fixed_now() + chrono::Duration::hours(1))
            .build(),
    ]));
    let service = command_service(&repo);
    let editor = actor(2, Role::Editor);

    // No resubmission, no re-approval, no content edits: the sweep owns it.
    let err = service
        .submit_for_review(&editor, SubmitForReviewCommand { id: 1 })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(_))
    ));

    let err = service
        .update_article(
            &editor,
            UpdateArticleCommand {
                id: 1,
                title: None,
                body: Some("late edit".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(_))
    ));

    assert_eq!(repo.get(1).unwrap().status, ArticleStatus::Scheduled);
}

#[tokio::test]
async fn author_edits_are_limited_to_draft_and_revision_states() {
    let repo = Arc::new(InMemoryArticleRepo::with_articles(vec![
        ArticleBuilder::new()
            .id(1)
            .author_id(1)
            .status(ArticleStatus::InReview)
            .build(),
    ]));
    let service = command_service(&repo);
    let author = actor(1, Role::Contributor);

    let err = service
        .update_article(
            &author,
            UpdateArticleCommand {
                id: 1,
                title: None,
                body: Some("tweak while in review".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));

    // An editor may still polish copy on the desk.
    let editor = actor(2, Role::Editor);
    let dto = service
        .update_article(
            &editor,
            UpdateArticleCommand {
                id: 1,
                title: None,
                body: Some("desk edit".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(dto.body, "desk edit");
}
