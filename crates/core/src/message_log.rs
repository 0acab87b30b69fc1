//! In-game message history shown to the player.
//! Consecutive identical texts collapse into one entry with a repeat count.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
    pub count: u32,
}

impl Message {
    /// Text with the repeat suffix, e.g. `That way is blocked. (x3)`.
    pub fn full_text(&self) -> String {
        if self.count > 1 { format!("{} (x{})", self.text, self.count) } else { self.text.clone() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn add(&mut self, text: impl Into<String>, color: Rgb) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut()
            && last.text == text
        {
            last.count += 1;
            return;
        }
        self.messages.push(Message { text, color, count: 1 });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The newest `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb(255, 255, 255);

    #[test]
    fn consecutive_duplicates_coalesce_with_counter() {
        let mut log = MessageLog::default();
        log.add("That way is blocked.", WHITE);
        log.add("That way is blocked.", WHITE);
        log.add("That way is blocked.", WHITE);

        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].full_text(), "That way is blocked. (x3)");
    }

    #[test]
    fn interleaved_messages_are_not_merged() {
        let mut log = MessageLog::default();
        log.add("a", WHITE);
        log.add("b", WHITE);
        log.add("a", WHITE);

        let texts: Vec<_> = log.messages().iter().map(Message::full_text).collect();
        assert_eq!(texts, ["a", "b", "a"]);
    }

    #[test]
    fn recent_returns_tail_in_chronological_order() {
        let mut log = MessageLog::default();
        for text in ["one", "two", "three"] {
            log.add(text, WHITE);
        }
        let tail: Vec<_> = log.recent(2).iter().map(|m| m.text.as_str()).collect();
        assert_eq!(tail, ["two", "three"]);
        assert_eq!(log.recent(10).len(), 3);
    }
}
