pub mod schema;

use diesel::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Width of the `content` column, counted in characters.
pub const MAX_CONTENT_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMessage {
    #[error("content must be at most {max} characters, got {0}", max = MAX_CONTENT_CHARS)]
    ContentTooLong(usize),
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::message)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct NewMessage {
    content: String,
}

impl NewMessage {
    /// Over-long content is rejected rather than truncated, so whatever is
    /// stored is exactly what the caller sent.
    pub fn new(content: impl Into<String>) -> Result<Self, InvalidMessage> {
        let content = content.into();
        let chars = content.chars().count();
        if chars > MAX_CONTENT_CHARS {
            return Err(InvalidMessage::ContentTooLong(chars));
        }

        Ok(Self { content })
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::message)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Message {
    pub id: u64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_content_up_to_the_column_width() {
        let at_limit = "x".repeat(MAX_CONTENT_CHARS);
        let message = NewMessage::new(at_limit.clone()).unwrap();
        assert_eq!(message.into_content(), at_limit);

        assert!(NewMessage::new("").is_ok());
    }

    #[test]
    fn rejects_content_over_the_column_width() {
        assert_eq!(
            NewMessage::new("x".repeat(MAX_CONTENT_CHARS + 1)).unwrap_err(),
            InvalidMessage::ContentTooLong(MAX_CONTENT_CHARS + 1)
        );
    }

    #[test]
    fn width_is_measured_in_characters_not_bytes() {
        // 255 three-byte characters still fit a VARCHAR(255) column.
        let wide = "€".repeat(MAX_CONTENT_CHARS);
        assert_eq!(wide.len(), 3 * MAX_CONTENT_CHARS);
        assert!(NewMessage::new(wide).is_ok());
    }

    #[test]
    fn serializes_as_id_and_content() {
        let message = Message {
            id: 7,
            content: "hello".into(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({ "id": 7, "content": "hello" })
        );
    }
}
