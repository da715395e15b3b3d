use chat_relay::domain::{Message, MessageRole};

#[test]
fn given_user_message_when_inspecting_role_then_is_user() {
    let message = Message::user("Hi".to_string(), None, "sonar".to_string());

    assert!(message.is_user);
    assert_eq!(message.role(), MessageRole::User);
    assert_eq!(message.role().as_str(), "user");
}

#[test]
fn given_assistant_message_with_empty_images_when_created_then_images_are_absent() {
    let message = Message::assistant("Hello!".to_string(), Some(vec![]), "sonar".to_string());

    assert_eq!(message.role(), MessageRole::Assistant);
    assert_eq!(message.images, None);
    assert_eq!(message.image_url, None);
}

#[test]
fn given_message_without_images_when_serializing_then_omits_image_fields() {
    let message = Message::user("Hi".to_string(), None, "sonar".to_string());

    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["text"], "Hi");
    assert_eq!(json["isUser"], true);
    assert_eq!(json["modelUsed"], "sonar");
    assert!(json.get("imageUrl").is_none());
    assert!(json.get("images").is_none());
}

#[test]
fn given_stored_document_without_timestamp_when_deserializing_then_fills_defaults() {
    let json = r#"{"isUser": false, "modelUsed": "sonar", "images": ["https://a/1.png"]}"#;

    let message: Message = serde_json::from_str(json).unwrap();

    assert_eq!(message.text, "");
    assert_eq!(message.images, Some(vec!["https://a/1.png".to_string()]));
    assert!(!message.has_content());
}

#[test]
fn given_image_only_message_when_checking_content_then_has_content() {
    let message = Message::user(
        String::new(),
        Some("https://cdn/x.png".to_string()),
        "sonar".to_string(),
    );

    assert!(message.has_content());
}
