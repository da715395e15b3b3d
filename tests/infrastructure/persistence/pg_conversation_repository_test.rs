use std::time::Duration;

use chat_relay::application::ports::{ConversationRepository, RepositoryError};
use chat_relay::domain::{Conversation, ConversationId, Message};

use crate::helpers::TestPostgres;

fn conversation(title: &str, messages: Vec<Message>) -> Conversation {
    Conversation::new(Some(title.to_string()), "sonar".to_string(), messages)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_conversation_with_messages_when_round_tripping_then_messages_are_intact() {
    let db = TestPostgres::new().await;
    let messages = vec![
        Message::user(
            "What is this?".to_string(),
            Some("https://cdn/cat.png".to_string()),
            "sonar".to_string(),
        ),
        Message::assistant(
            "A cat.".to_string(),
            Some(vec!["https://img/1.png".to_string()]),
            "sonar".to_string(),
        ),
    ];
    let created = conversation("Cats", messages.clone());

    db.conversation_repository
        .create_conversation(&created)
        .await
        .unwrap();
    let fetched = db
        .conversation_repository
        .get_conversation(created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "Cats");
    assert_eq!(fetched.messages, messages);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_several_conversations_when_listing_then_newest_first() {
    let db = TestPostgres::new().await;
    let older = conversation("older", vec![]);
    db.conversation_repository.create_conversation(&older).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let newer = conversation("newer", vec![]);
    db.conversation_repository.create_conversation(&newer).await.unwrap();

    let listed = db.conversation_repository.list_conversations().await.unwrap();

    let ids: Vec<ConversationId> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_appended_messages_when_fetching_then_history_grows_in_order() {
    let db = TestPostgres::new().await;
    let created = conversation("chat", vec![]);
    db.conversation_repository.create_conversation(&created).await.unwrap();

    let updated = db
        .conversation_repository
        .append_messages(
            created,
            vec![Message::user("one".to_string(), None, "sonar".to_string())],
        )
        .await
        .unwrap();
    db.conversation_repository
        .append_messages(
            updated.clone(),
            vec![Message::assistant("two".to_string(), None, "sonar".to_string())],
        )
        .await
        .unwrap();

    let fetched = db
        .conversation_repository
        .get_conversation(updated.id)
        .await
        .unwrap()
        .unwrap();
    let texts: Vec<&str> = fetched.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two"]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_existing_conversation_when_renaming_then_returns_renamed_row() {
    let db = TestPostgres::new().await;
    let created = conversation("before", vec![]);
    db.conversation_repository.create_conversation(&created).await.unwrap();

    let renamed = db
        .conversation_repository
        .rename_conversation(created.id, "after")
        .await
        .unwrap();

    assert_eq!(renamed.title, "after");
    assert_eq!(renamed.id, created.id);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_unknown_id_when_mutating_then_returns_not_found() {
    let db = TestPostgres::new().await;
    let ghost = conversation("ghost", vec![]);

    assert!(matches!(
        db.conversation_repository.rename_conversation(ghost.id, "x").await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        db.conversation_repository.delete_conversation(ghost.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        db.conversation_repository.save_messages(&ghost).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_deleted_conversation_when_counting_rows_then_it_is_gone() {
    let db = TestPostgres::new().await;
    let created = conversation(
        "doomed",
        vec![Message::user("bye".to_string(), None, "sonar".to_string())],
    );
    db.conversation_repository.create_conversation(&created).await.unwrap();

    db.conversation_repository
        .delete_conversation(created.id)
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM conversations")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
