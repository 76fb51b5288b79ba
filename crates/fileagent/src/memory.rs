use serde::{Deserialize, Serialize};

use crate::models::message::Message;

/// One completed turn: what the user said and the agent's final answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub agent: String,
}

/// Prior exchanges of the current session, oldest first.
///
/// Lives only as long as the process. Tool calls made while answering are not kept.
#[derive(Debug, Default, Clone)]
pub struct ConversationMemory {
    exchanges: Vec<Exchange>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<U: Into<String>, A: Into<String>>(&mut self, user: U, agent: A) {
        self.exchanges.push(Exchange {
            user: user.into(),
            agent: agent.into(),
        });
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// History as alternating user and assistant messages
    pub fn as_messages(&self) -> Vec<Message> {
        self.exchanges
            .iter()
            .flat_map(|exchange| {
                [
                    Message::user().with_text(&exchange.user),
                    Message::assistant().with_text(&exchange.agent),
                ]
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;

    #[test]
    fn test_record_keeps_order() {
        let mut memory = ConversationMemory::new();
        assert!(memory.is_empty());

        memory.record("make /tmp/a", "Directory created at /tmp/a");
        memory.record("now delete it", "Deleted directory /tmp/a");

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.exchanges()[1].user, "now delete it");
    }

    #[test]
    fn test_as_messages_alternates_roles() {
        let mut memory = ConversationMemory::new();
        memory.record("hi", "hello");
        memory.record("bye", "goodbye");

        let messages = memory.as_messages();
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(messages[3].text(), "goodbye");
    }

    #[test]
    fn test_clear() {
        let mut memory = ConversationMemory::new();
        memory.record("hi", "hello");
        memory.clear();
        assert!(memory.is_empty());
        assert!(memory.as_messages().is_empty());
    }
}
