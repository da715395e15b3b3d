use chat_relay::application::ports::{ConversationRepository, RepositoryError};
use chat_relay::domain::{Conversation, ConversationId, Message};
use chat_relay::infrastructure::persistence::InMemoryConversationRepository;

fn conversation(title: &str) -> Conversation {
    Conversation::new(Some(title.to_string()), "sonar".to_string(), vec![])
}

#[tokio::test]
async fn given_created_conversation_when_getting_then_returns_it() {
    let repository = InMemoryConversationRepository::new();
    let created = conversation("First");
    repository.create_conversation(&created).await.unwrap();

    let fetched = repository.get_conversation(created.id).await.unwrap();

    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn given_duplicate_id_when_creating_then_fails() {
    let repository = InMemoryConversationRepository::new();
    let created = conversation("First");
    repository.create_conversation(&created).await.unwrap();

    let result = repository.create_conversation(&created).await;

    assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
}

#[tokio::test]
async fn given_messages_when_appending_then_they_are_persisted_in_order() {
    let repository = InMemoryConversationRepository::new();
    let created = conversation("Chat");
    repository.create_conversation(&created).await.unwrap();

    repository
        .append_messages(
            created.clone(),
            vec![
                Message::user("q".to_string(), None, "sonar".to_string()),
                Message::assistant("a".to_string(), None, "sonar".to_string()),
            ],
        )
        .await
        .unwrap();

    let stored = repository.get_conversation(created.id).await.unwrap().unwrap();
    let texts: Vec<&str> = stored.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["q", "a"]);
    assert_eq!(stored.title, "Chat");
}

#[tokio::test]
async fn given_unknown_id_when_saving_messages_then_returns_not_found() {
    let repository = InMemoryConversationRepository::new();

    let result = repository.save_messages(&conversation("ghost")).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn given_unknown_id_when_renaming_or_deleting_then_returns_not_found() {
    let repository = InMemoryConversationRepository::new();
    let id = ConversationId::new();

    assert!(matches!(
        repository.rename_conversation(id, "x").await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repository.delete_conversation(id).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_existing_conversation_when_deleting_then_only_it_is_removed() {
    let repository = InMemoryConversationRepository::new();
    let keep = conversation("keep");
    let removed = conversation("removed");
    repository.create_conversation(&keep).await.unwrap();
    repository.create_conversation(&removed).await.unwrap();

    repository.delete_conversation(removed.id).await.unwrap();

    assert_eq!(repository.len().await, 1);
    assert!(repository.get_conversation(keep.id).await.unwrap().is_some());
    assert!(repository.get_conversation(removed.id).await.unwrap().is_none());
}
