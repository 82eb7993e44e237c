use super::models::{ConversationSummary, Message};
use super::DataService;
use crate::error::{not_found_error, validation_error, AppResult};
use std::collections::HashMap;

impl DataService {
    /// Send a direct message
    pub async fn send_message(&self, sender_id: &str, receiver_id: &str, content: &str) -> AppResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(validation_error("Message cannot be empty"));
        }
        if sender_id == receiver_id {
            return Err(validation_error("Cannot send a message to yourself"));
        }

        self.messages
            .create(Message::new(sender_id, receiver_id, content))
            .await
    }

    /// Messages exchanged between two users, oldest first
    pub async fn conversation(&self, user_a: &str, user_b: &str) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .list()
            .await?
            .into_iter()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .collect();

        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    pub async fn mark_as_read(&self, message_id: &str) -> AppResult<Message> {
        let mut message = self
            .messages
            .get_by_id(message_id)
            .await?
            .ok_or_else(|| not_found_error("messages", message_id))?;

        message.is_read = true;
        self.messages.update(message_id, message).await
    }

    /// One summary per conversation partner, most recent conversation first
    pub async fn user_conversations(&self, user_id: &str) -> AppResult<Vec<ConversationSummary>> {
        let messages = self.messages.list().await?;
        let mut order: Vec<String> = Vec::new();
        let mut summaries: HashMap<String, ConversationSummary> = HashMap::new();

        for message in &messages {
            let Some(partner_id) = message.partner_of(user_id) else {
                continue;
            };
            let unread = usize::from(message.receiver_id == user_id && !message.is_read);

            match summaries.get_mut(partner_id) {
                Some(summary) => {
                    summary.unread_count += unread;
                    // Later messages win ties, list order is creation order
                    if message.created_at >= summary.last_message_time {
                        summary.last_message = message.content.clone();
                        summary.last_message_time = message.created_at;
                    }
                }
                None => {
                    order.push(partner_id.to_string());
                    summaries.insert(
                        partner_id.to_string(),
                        ConversationSummary {
                            partner_id: partner_id.to_string(),
                            last_message: message.content.clone(),
                            last_message_time: message.created_at,
                            unread_count: unread,
                        },
                    );
                }
            }
        }

        let mut result: Vec<ConversationSummary> = order
            .into_iter()
            .filter_map(|partner| summaries.remove(&partner))
            .collect();
        result.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        Ok(result)
    }
}
