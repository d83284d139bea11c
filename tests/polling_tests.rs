//! # Polling Tests
//!
//! Exercises the long-polling reply path with a recording reply sink.

use anyhow::Result;
use async_trait::async_trait;
use medguide::bot::{reply_to_message, ReplySink};
use medguide::dataset::{Dataset, MedicineRecord};
use medguide::localization::t;
use medguide::responder::Responder;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

/// Sink that records every reply instead of calling Telegram
#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(ChatId, String)>>,
    fail: bool,
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_reply(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.sent.lock().await.push((chat_id, text));
        if self.fail {
            anyhow::bail!("telegram unavailable");
        }
        Ok(())
    }
}

fn setup_responder() -> Responder {
    let mut record = MedicineRecord::named("Paracetamol");
    record.class = Some("Analgesic".to_string());
    Responder::new(Arc::new(Dataset::from_records(vec![record])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_message_gets_one_reply() -> Result<()> {
        let sink = RecordingSink::default();
        let responder = setup_responder();

        reply_to_message(&sink, ChatId(42), Some(" paracetamol "), &responder).await?;

        let sent = sink.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, ChatId(42));
        assert!(sent[0].1.contains("Analgesic"));
        Ok(())
    }

    #[tokio::test]
    async fn test_commands_and_unknown_names() -> Result<()> {
        let sink = RecordingSink::default();
        let responder = setup_responder();

        reply_to_message(&sink, ChatId(1), Some("/start"), &responder).await?;
        reply_to_message(&sink, ChatId(1), Some("aspirin"), &responder).await?;
        reply_to_message(&sink, ChatId(1), Some("   "), &responder).await?;

        let replies: Vec<String> = sink.sent.lock().await.iter().map(|(_, r)| r.clone()).collect();
        assert_eq!(
            replies,
            vec![
                t("welcome-message"),
                t("medicine-not-found"),
                t("empty-query")
            ]
        );
        Ok(())
    }

    /// Service messages such as a member joining a group carry no text
    #[tokio::test]
    async fn test_message_without_text_gets_no_reply() -> Result<()> {
        let sink = RecordingSink::default();
        let responder = setup_responder();

        reply_to_message(&sink, ChatId(-100), None, &responder).await?;

        assert!(sink.sent.lock().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_propagate() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let responder = setup_responder();

        let result = reply_to_message(&sink, ChatId(5), Some("paracetamol"), &responder).await;

        assert!(result.is_ok());
        assert_eq!(sink.sent.lock().await.len(), 1);
    }

    /// The dispatcher path goes through a shared trait object as well
    #[tokio::test]
    async fn test_reply_through_trait_object() -> Result<()> {
        let recorder = Arc::new(RecordingSink::default());
        let sink: Arc<dyn ReplySink> = recorder.clone();
        let responder = setup_responder();

        reply_to_message(sink.as_ref(), ChatId(8), Some("PARA"), &responder).await?;

        assert!(recorder.sent.lock().await[0].1.contains("Paracetamol"));
        Ok(())
    }
}
