mod support;

use nusacms::application::commands::articles::{CreateArticleCommand, SoftDeleteArticleCommand};
use nusacms::application::commands::reactions::ToggleReactionCommand;
use nusacms::application::error::ApplicationError;
use nusacms::application::queries::reactions::ReactionStatusQuery;
use nusacms::domain::reaction::ReactionKind;
use support::{AUTHOR_ID, READER_ID, TestHarness, harness};

async fn seed_article(h: &TestHarness) -> i64 {
    let command = CreateArticleCommand::builder()
        .title("Reactable")
        .content_html("<p>body</p>")
        .author_id(AUTHOR_ID)
        .build()
        .unwrap();
    h.services
        .article_commands
        .create_article(command)
        .await
        .expect("create article failed")
        .id
}

#[tokio::test]
async fn double_toggle_returns_to_the_original_state() {
    let h = harness();
    let article = seed_article(&h).await;

    let on = h
        .services
        .reaction_commands
        .toggle(ToggleReactionCommand {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();
    assert!(on.reacted);
    assert_eq!(on.total, 1);

    let off = h
        .services
        .reaction_commands
        .toggle(ToggleReactionCommand {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();
    assert!(!off.reacted);
    assert_eq!(off.total, 0);
}

#[tokio::test]
async fn simultaneous_toggles_settle_without_error() {
    let h = harness();
    let article = seed_article(&h).await;

    let first = h.services.reaction_commands.toggle(ToggleReactionCommand {
        kind: ReactionKind::Like,
        article_id: article,
        user_id: READER_ID,
    });
    let second = h.services.reaction_commands.toggle(ToggleReactionCommand {
        kind: ReactionKind::Like,
        article_id: article,
        user_id: READER_ID,
    });
    let (first, second) = tokio::join!(first, second);
    first.unwrap();
    second.unwrap();

    // Two toggles by the same user net out to no reaction, whichever
    // interleaving wins.
    let status = h
        .services
        .reaction_queries
        .status(ReactionStatusQuery {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();
    assert!(!status.reacted);
    assert_eq!(status.total, 0);
}

#[tokio::test]
async fn totals_aggregate_across_users() {
    let h = harness();
    let article = seed_article(&h).await;

    for user in [AUTHOR_ID, READER_ID] {
        h.services
            .reaction_commands
            .toggle(ToggleReactionCommand {
                kind: ReactionKind::Like,
                article_id: article,
                user_id: user,
            })
            .await
            .unwrap();
    }

    let status = h
        .services
        .reaction_queries
        .status(ReactionStatusQuery {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();
    assert!(status.reacted);
    assert_eq!(status.total, 2);
}

#[tokio::test]
async fn like_and_save_are_independent() {
    let h = harness();
    let article = seed_article(&h).await;

    h.services
        .reaction_commands
        .toggle(ToggleReactionCommand {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();

    let saved = h
        .services
        .reaction_queries
        .status(ReactionStatusQuery {
            kind: ReactionKind::Save,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();
    assert!(!saved.reacted);
    assert_eq!(saved.total, 0);

    let liked = h
        .services
        .reaction_queries
        .status(ReactionStatusQuery {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap();
    assert!(liked.reacted);
    assert_eq!(liked.total, 1);
}

#[tokio::test]
async fn toggling_on_an_inactive_article_fails() {
    let h = harness();
    let article = seed_article(&h).await;
    h.services
        .article_commands
        .soft_delete_article(SoftDeleteArticleCommand { id: article })
        .await
        .unwrap();

    let err = h
        .services
        .reaction_commands
        .toggle(ToggleReactionCommand {
            kind: ReactionKind::Save,
            article_id: article,
            user_id: READER_ID,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn unknown_user_cannot_react() {
    let h = harness();
    let article = seed_article(&h).await;

    let err = h
        .services
        .reaction_commands
        .toggle(ToggleReactionCommand {
            kind: ReactionKind::Like,
            article_id: article,
            user_id: 404,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}
