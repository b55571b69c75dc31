// Scripted question/answer replies.
//
// Admins register exact questions per guild; a message whose whole body matches
// one (ignoring case and surrounding whitespace) gets the stored answer back.

use crate::core::errors::CommandError;
use crate::core::store::{ConfigStore, StoreError};
use std::collections::HashMap;
use thiserror::Error;

/// Normalised question -> answer for one guild.
pub type QaTable = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No answer is registered for `{0}`")]
    UnknownQuestion(String),
}

impl From<ReplyError> for CommandError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Storage(e) => e.into(),
            ReplyError::EmptyQuestion => CommandError::validation(err.to_string()),
            ReplyError::UnknownQuestion(q) => {
                CommandError::not_found(format!("an answer for `{}`", q))
            }
        }
    }
}

/// Lookup key for a question or an incoming message body.
pub fn normalize_question(text: &str) -> String {
    text.trim().to_lowercase()
}

pub struct ReplyService<S: ConfigStore<QaTable>> {
    store: S,
}

impl<S: ConfigStore<QaTable>> ReplyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register or replace an answer. Returns the key it was stored under.
    pub async fn set_answer(
        &self,
        guild_id: u64,
        question: &str,
        answer: &str,
    ) -> Result<String, ReplyError> {
        let key = normalize_question(question);
        if key.is_empty() {
            return Err(ReplyError::EmptyQuestion);
        }

        let answer = answer.to_string();
        self.store
            .update(guild_id, |slot| {
                slot.get_or_insert_with(QaTable::new)
                    .insert(key.clone(), answer);
            })
            .await?;
        Ok(key)
    }

    /// Remove a registered question.
    pub async fn remove_answer(&self, guild_id: u64, question: &str) -> Result<(), ReplyError> {
        let key = normalize_question(question);
        let removed = self
            .store
            .update(guild_id, |slot| {
                slot.as_mut()
                    .is_some_and(|table| table.remove(&key).is_some())
            })
            .await?;
        if !removed {
            return Err(ReplyError::UnknownQuestion(key));
        }
        Ok(())
    }

    /// Exact match of the full message body against the guild's table.
    pub async fn find_answer(
        &self,
        guild_id: u64,
        content: &str,
    ) -> Result<Option<String>, ReplyError> {
        let Some(table) = self.store.get(guild_id).await? else {
            return Ok(None);
        };
        Ok(table.get(&normalize_question(content)).cloned())
    }

    /// All registered pairs, sorted by question.
    pub async fn list(&self, guild_id: u64) -> Result<Vec<(String, String)>, ReplyError> {
        let mut pairs: Vec<(String, String)> = self
            .store
            .get(guild_id)
            .await?
            .unwrap_or_default()
            .into_iter()
            .collect();
        pairs.sort();
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::InMemoryConfigStore;
    use std::sync::Arc;

    fn make_service() -> ReplyService<InMemoryConfigStore<QaTable>> {
        ReplyService::new(InMemoryConfigStore::new())
    }

    #[tokio::test]
    async fn match_ignores_case_and_padding() {
        let service = make_service();
        service.set_answer(1, "hi", "hello there").await.unwrap();

        let answer = service.find_answer(1, " Hi ").await.unwrap();
        assert_eq!(answer.as_deref(), Some("hello there"));
    }

    #[tokio::test]
    async fn stored_question_is_normalised() {
        let service = make_service();
        let key = service
            .set_answer(1, "  What Are The RULES? ", "Be nice.")
            .await
            .unwrap();
        assert_eq!(key, "what are the rules?");

        let answer = service.find_answer(1, "what are the rules?").await.unwrap();
        assert_eq!(answer.as_deref(), Some("Be nice."));
    }

    #[tokio::test]
    async fn no_partial_matches() {
        let service = make_service();
        service.set_answer(1, "hi", "hello there").await.unwrap();

        assert!(service.find_answer(1, "hi everyone").await.unwrap().is_none());
        assert!(service.find_answer(1, "h").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tables_are_per_guild() {
        let service = make_service();
        service.set_answer(1, "hi", "hello from one").await.unwrap();

        assert!(service.find_answer(2, "hi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn setting_again_overwrites() {
        let service = make_service();
        service.set_answer(1, "hi", "first").await.unwrap();
        service.set_answer(1, "HI", "second").await.unwrap();

        let pairs = service.list(1).await.unwrap();
        assert_eq!(pairs, vec![("hi".to_string(), "second".to_string())]);
    }

    #[tokio::test]
    async fn empty_question_is_rejected() {
        let service = make_service();
        assert!(matches!(
            service.set_answer(1, "   ", "x").await,
            Err(ReplyError::EmptyQuestion)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_set_answer_keeps_every_question() {
        let service = Arc::new(make_service());

        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .set_answer(1, &format!("question {}", i), "answer")
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(service.list(1).await.unwrap().len(), 40);
    }

    #[tokio::test]
    async fn remove_answer_reports_unknown_questions() {
        let service = make_service();
        service.set_answer(1, "hi", "hello").await.unwrap();

        service.remove_answer(1, " HI").await.unwrap();
        assert!(service.find_answer(1, "hi").await.unwrap().is_none());

        let err = service.remove_answer(1, "hi").await.unwrap_err();
        assert!(matches!(
            CommandError::from(err),
            CommandError::NotFound(_)
        ));
    }
}
