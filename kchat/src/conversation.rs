//! Append-only message history owned by a single session.

use kprovider::Message;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a history from earlier messages, e.g. a restored transcript.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
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
}

#[cfg(test)]
mod tests {
    use kprovider::Role;

    use super::*;

    #[test]
    fn appends_preserve_order_and_snapshots_are_detached() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        conversation.append(Message::system("be brief"));
        conversation.append(Message::user("hi"));
        let snapshot = conversation.snapshot();
        conversation.append(Message::assistant("hello"));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.messages()[1], Message::user("hi"));
        assert_eq!(conversation.last().map(|m| m.role), Some(Role::Assistant));
    }
}
