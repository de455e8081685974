use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Result;
use test_utils::chat_history_fixture;

use super::ChatStatus;
use super::Conversation;
use super::Settlement;
use crate::domain::models::GenerationFailure;
use crate::domain::models::Message;
use crate::domain::models::ReasoningMode;
use crate::domain::models::Role;
use crate::domain::models::CHAT_STORAGE_KEY;
use crate::infrastructure::storage::memory::MemoryStorage;
use crate::infrastructure::storage::none::NoStorage;
use crate::infrastructure::storage::StorageBox;

const WELCOME: &str = "Hello! Ask me anything.";

async fn storage_with_history(value: Option<&str>) -> Result<StorageBox> {
    let storage: StorageBox = Arc::new(MemoryStorage::default());
    if let Some(history) = value {
        storage.set_item(CHAT_STORAGE_KEY, history).await?;
    }
    return Ok(storage);
}

async fn stored_history(storage: &StorageBox) -> Result<Vec<Message>> {
    let raw = storage.get_item(CHAT_STORAGE_KEY).await?.unwrap_or_default();
    return Ok(serde_json::from_str::<Vec<Message>>(&raw)?);
}

#[tokio::test]
async fn it_starts_with_a_welcome_message() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let conversation = Conversation::load(storage.clone(), WELCOME, "Be helpful.").await;

    assert_eq!(conversation.messages().len(), 1);
    assert!(conversation.messages()[0].is_welcome());
    assert_eq!(conversation.messages()[0].text, WELCOME);
    assert_eq!(conversation.status(), ChatStatus::Idle);
    assert_eq!(stored_history(&storage).await?.len(), 1);

    return Ok(());
}

#[tokio::test]
async fn it_restores_history_with_millisecond_timestamps() -> Result<()> {
    let storage = storage_with_history(Some(chat_history_fixture())).await?;
    let conversation = Conversation::load(storage.clone(), WELCOME, "").await;

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[2].deep_reasoning, Some(false));
    assert_eq!(messages[2].timestamp.timestamp_millis(), 1714557661250);

    let raw = storage.get_item(CHAT_STORAGE_KEY).await?.unwrap_or_default();
    assert_eq!(raw, chat_history_fixture());

    return Ok(());
}

#[tokio::test]
async fn it_recovers_from_malformed_history() -> Result<()> {
    let storage = storage_with_history(Some("{not json")).await?;
    let conversation = Conversation::load(storage.clone(), WELCOME, "").await;

    assert_eq!(conversation.messages().len(), 1);
    assert!(conversation.messages()[0].is_welcome());

    let stored = stored_history(&storage).await?;
    assert_eq!(stored.len(), 1);
    assert!(stored[0].is_welcome());

    return Ok(());
}

#[tokio::test]
async fn it_recovers_from_empty_history() -> Result<()> {
    let storage = storage_with_history(Some("[]")).await?;
    let conversation = Conversation::load(storage, WELCOME, "").await;

    assert_eq!(conversation.messages().len(), 1);
    assert!(conversation.messages()[0].is_welcome());

    return Ok(());
}

#[tokio::test]
async fn it_recovers_from_bad_timestamps() -> Result<()> {
    let storage = storage_with_history(Some(
        r#"[{"id":"1","role":"user","text":"Hi","timestamp":"last tuesday"}]"#,
    ))
    .await?;
    let conversation = Conversation::load(storage, WELCOME, "").await;

    assert_eq!(conversation.messages().len(), 1);
    assert!(conversation.messages()[0].is_welcome());

    return Ok(());
}

#[tokio::test]
async fn it_counts_two_messages_per_successful_turn() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage.clone(), WELCOME, "").await;

    for idx in 0..3 {
        let prompt = conversation
            .send(&format!("question {idx}"), ReasoningMode::Standard)
            .await;
        assert!(prompt.is_some());
        conversation.settle(Ok(format!("answer {idx}"))).await;
    }

    assert_eq!(conversation.messages().len(), 7);
    assert_eq!(stored_history(&storage).await?.len(), 7);

    let ids = conversation
        .messages()
        .iter()
        .skip(1)
        .map(|message| return message.id.parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()?;
    assert!(ids.windows(2).all(|pair| return pair[0] < pair[1]));

    return Ok(());
}

#[tokio::test]
async fn it_builds_prompts_without_the_welcome_message() -> Result<()> {
    let storage = storage_with_history(Some(chat_history_fixture())).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "Be helpful.").await;

    let prompt = conversation
        .send("Since when?", ReasoningMode::Deep)
        .await
        .ok_or_else(|| return anyhow!("send was rejected"))?;

    assert_eq!(prompt.system_instruction, "Be helpful.");
    assert_eq!(prompt.text, "Since when?");
    assert_eq!(prompt.mode, ReasoningMode::Deep);
    assert_eq!(prompt.history.len(), 2);
    assert_eq!(prompt.history[0].text, "Where do you work?");

    assert_eq!(conversation.messages()[3].text, "Since when?");
    assert_eq!(
        conversation.status(),
        ChatStatus::AwaitingResponse(ReasoningMode::Deep)
    );

    return Ok(());
}

#[tokio::test]
async fn it_keeps_the_text_as_typed() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage.clone(), WELCOME, "").await;

    let text = "Why does this fail?\n    fn main() {}\n";
    let prompt = conversation
        .send(text, ReasoningMode::Standard)
        .await
        .ok_or_else(|| return anyhow!("send was rejected"))?;

    assert_eq!(prompt.text, text);
    assert_eq!(conversation.messages()[1].text, text);
    assert_eq!(stored_history(&storage).await?[1].text, text);

    return Ok(());
}

#[tokio::test]
async fn it_sends_after_a_stored_id_at_the_numeric_limit() -> Result<()> {
    let history = format!(
        r#"[{{"id":"{}","role":"user","text":"Hi","timestamp":"2024-05-01T10:01:01.250Z"}}]"#,
        i64::MAX
    );
    let storage = storage_with_history(Some(&history)).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;
    assert_eq!(conversation.messages().len(), 1);

    assert!(conversation
        .send("next question", ReasoningMode::Standard)
        .await
        .is_some());
    let settlement = conversation.settle(Ok("answer".to_string())).await;
    assert!(matches!(settlement, Settlement::Replied(_)));
    assert_eq!(conversation.messages().len(), 3);
    assert_eq!(conversation.messages()[0].id, i64::MAX.to_string());

    return Ok(());
}

#[tokio::test]
async fn it_ignores_blank_sends() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    assert!(conversation.send("   \n", ReasoningMode::Standard).await.is_none());
    assert_eq!(conversation.messages().len(), 1);
    assert!(!conversation.is_waiting());

    return Ok(());
}

#[tokio::test]
async fn it_rejects_sends_while_waiting() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    assert!(conversation.send("a", ReasoningMode::Standard).await.is_some());
    assert!(conversation.send("b", ReasoningMode::Standard).await.is_none());

    let user_messages = conversation
        .messages()
        .iter()
        .filter(|message| return message.role == Role::User)
        .collect::<Vec<&Message>>();
    assert_eq!(user_messages.len(), 1);
    assert_eq!(user_messages[0].text, "a");

    return Ok(());
}

#[tokio::test]
async fn it_marks_deep_replies() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    conversation.send("Explain", ReasoningMode::Deep).await;
    let settlement = conversation.settle(Ok("Because.".to_string())).await;

    match settlement {
        Settlement::Replied(message) => {
            assert_eq!(message.role, Role::Assistant);
            assert!(message.is_deep_reasoning());
        }
        other => panic!("unexpected settlement {other:?}"),
    }
    assert!(!conversation.is_waiting());

    return Ok(());
}

#[tokio::test]
async fn it_reports_quota_failures_without_a_reply() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage.clone(), WELCOME, "").await;

    conversation.send("Explain", ReasoningMode::Deep).await;
    let err = anyhow!(
        "Failed to make completion request to Gemini, 429: RESOURCE_EXHAUSTED. Please retry in 12.5s."
    );
    let failure = GenerationFailure::classify(&err, ReasoningMode::Deep);
    let settlement = conversation.settle(Err(failure.clone())).await;

    assert_eq!(settlement, Settlement::Failed(failure));
    assert_eq!(conversation.messages().len(), 2);
    assert!(conversation
        .messages()
        .iter()
        .all(|message| return message.role == Role::User || message.is_welcome()));
    assert!(!conversation.is_waiting());

    let advisory = conversation.advisory().unwrap_or_default();
    assert!(advisory.contains("Deep Reasoning"));
    assert!(advisory.contains("13 seconds"));
    assert!(!storage
        .get_item(CHAT_STORAGE_KEY)
        .await?
        .unwrap_or_default()
        .contains("Rate Limit"));

    conversation.send("Again", ReasoningMode::Standard).await;
    assert_eq!(conversation.advisory(), None);

    return Ok(());
}

#[tokio::test]
async fn it_reports_generic_failures() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    conversation.send("Explain", ReasoningMode::Standard).await;
    conversation.settle(Err(GenerationFailure::Unavailable)).await;

    insta::assert_snapshot!(conversation.advisory().unwrap_or_default(), @"Sorry, I encountered an error while processing your request. Please try again.");

    return Ok(());
}

#[tokio::test]
async fn it_ignores_outcomes_when_idle() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    let settlement = conversation.settle(Ok("stray".to_string())).await;
    assert_eq!(settlement, Settlement::Ignored);
    assert_eq!(conversation.messages().len(), 1);

    return Ok(());
}

#[tokio::test]
async fn it_clears_idempotently() -> Result<()> {
    let storage = storage_with_history(Some(chat_history_fixture())).await?;
    let mut conversation = Conversation::load(storage.clone(), WELCOME, "").await;

    conversation.clear().await;
    conversation.clear().await;

    assert_eq!(conversation.messages().len(), 1);
    assert!(conversation.messages()[0].is_welcome());
    assert_eq!(conversation.messages()[0].text, WELCOME);

    let stored = stored_history(&storage).await?;
    assert_eq!(stored.len(), 1);
    assert!(stored[0].is_welcome());

    return Ok(());
}

#[tokio::test]
async fn it_appends_late_replies_after_clearing() -> Result<()> {
    let storage = storage_with_history(None).await?;
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    conversation.send("Explain", ReasoningMode::Standard).await;
    conversation.clear().await;
    assert!(conversation.is_waiting());

    conversation.settle(Ok("Late answer.".to_string())).await;

    let messages = conversation.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_welcome());
    assert_eq!(messages[1].text, "Late answer.");

    return Ok(());
}

#[tokio::test]
async fn it_works_without_storage() -> Result<()> {
    let storage: StorageBox = Arc::new(NoStorage::default());
    let mut conversation = Conversation::load(storage, WELCOME, "").await;

    conversation.send("Hello", ReasoningMode::Standard).await;
    conversation.settle(Ok("Hi!".to_string())).await;

    assert_eq!(conversation.messages().len(), 3);

    return Ok(());
}
