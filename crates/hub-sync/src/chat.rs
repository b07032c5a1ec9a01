//! Chat relay between a visitor and an admin persona.
//!
//! The persona's words come from an external text-completion service behind
//! [`TextCompletion`]. This module only keeps the transcript, chooses how
//! much of it to send along, and substitutes a canned reply when the service
//! fails or answers with nothing.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hub_core::admin::AdminProfile;

/// How many prior messages accompany each new one.
pub const HISTORY_WINDOW: usize = 5;

pub const UNSTABLE_LINK_REPLY: &str = "The neural link is unstable. Try again later.";

pub const EMPTY_REPLY: &str = "I am currently analyzing the data. Please standby.";

/// Sender id used for visitor messages.
pub const VISITOR_ID: &str = "user";

// ─── Transcript ──────────────────────────────────────────────────────────────

/// Who said a turn, in the vocabulary of completion services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Model,
}

/// One history entry handed to the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
  pub role: Role,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
  pub id:        Uuid,
  pub sender_id: String,
  pub text:      String,
  pub timestamp: DateTime<Utc>,
  pub is_admin:  bool,
}

impl ChatMessage {
  fn new(sender_id: impl Into<String>, text: impl Into<String>, is_admin: bool) -> Self {
    Self {
      id: Uuid::new_v4(),
      sender_id: sender_id.into(),
      text: text.into(),
      timestamp: Utc::now(),
      is_admin,
    }
  }

  fn turn(&self) -> Turn {
    Turn {
      role: if self.is_admin { Role::Model } else { Role::User },
      text: self.text.clone(),
    }
  }
}

// ─── Completion seam ─────────────────────────────────────────────────────────

/// A text-completion service that can speak as an admin persona.
pub trait TextCompletion: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn complete<'a>(
    &'a self,
    persona: &'a AdminProfile,
    history: &'a [Turn],
    message: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A conversation with one persona.
pub struct ChatSession<T> {
  persona:    AdminProfile,
  completion: T,
  messages:   Vec<ChatMessage>,
}

impl<T: TextCompletion> ChatSession<T> {
  pub fn new(persona: AdminProfile, completion: T) -> Self {
    Self { persona, completion, messages: Vec::new() }
  }

  pub fn persona(&self) -> &AdminProfile { &self.persona }

  pub fn messages(&self) -> &[ChatMessage] { &self.messages }

  /// Send a visitor message and record the persona's reply. Blank input is
  /// ignored and returns `None`.
  pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
    if text.trim().is_empty() {
      return None;
    }

    let history = self.history();
    self.messages.push(ChatMessage::new(VISITOR_ID, text, false));

    let reply = match self.completion.complete(&self.persona, &history, text).await {
      Ok(reply) if !reply.trim().is_empty() => reply,
      Ok(_) => EMPTY_REPLY.to_string(),
      Err(e) => {
        tracing::warn!(persona = %self.persona.id, error = %e, "completion failed");
        UNSTABLE_LINK_REPLY.to_string()
      }
    };

    self.messages.push(ChatMessage::new(self.persona.id.clone(), reply, true));
    self.messages.last()
  }

  /// The most recent messages, oldest first, capped at [`HISTORY_WINDOW`].
  fn history(&self) -> Vec<Turn> {
    let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
    self.messages[start..].iter().map(ChatMessage::turn).collect()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use hub_core::seed;

  use super::*;

  /// Echoes the message back and records what it was sent.
  #[derive(Default)]
  struct Echo {
    seen: Mutex<Vec<(Vec<Turn>, String)>>,
    mode: EchoMode,
  }

  #[derive(Default, Clone, Copy)]
  enum EchoMode {
    #[default]
    Echo,
    Silent,
    Broken,
  }

  impl TextCompletion for Echo {
    type Error = std::io::Error;

    async fn complete(
      &self,
      persona: &AdminProfile,
      history: &[Turn],
      message: &str,
    ) -> Result<String, std::io::Error> {
      self.seen.lock().unwrap().push((history.to_vec(), message.to_string()));
      match self.mode {
        EchoMode::Echo => Ok(format!("{}: {message}", persona.name)),
        EchoMode::Silent => Ok("   ".into()),
        EchoMode::Broken => Err(std::io::Error::other("link down")),
      }
    }
  }

  fn persona() -> AdminProfile { seed::admins()[0].profile() }

  #[tokio::test]
  async fn reply_is_recorded_after_visitor_message() {
    let mut chat = ChatSession::new(persona(), Echo::default());
    let reply = chat.send("hello").await.unwrap().clone();

    assert!(reply.is_admin);
    assert_eq!(reply.sender_id, "admin-1");
    assert_eq!(reply.text, "Brayn Official: hello");
    assert_eq!(chat.messages().len(), 2);
    assert_eq!(chat.messages()[0].sender_id, VISITOR_ID);
  }

  #[tokio::test]
  async fn blank_input_is_ignored() {
    let mut chat = ChatSession::new(persona(), Echo::default());
    assert!(chat.send("  \n").await.is_none());
    assert!(chat.messages().is_empty());
  }

  #[tokio::test]
  async fn history_is_capped_and_excludes_new_message() {
    let mut chat = ChatSession::new(persona(), Echo::default());
    for i in 0..4 {
      chat.send(&format!("m{i}")).await;
    }

    let seen = chat.completion.seen.lock().unwrap();
    let (first_history, _) = &seen[0];
    assert!(first_history.is_empty());

    let (history, message) = seen.last().unwrap();
    assert_eq!(message, "m3");
    assert_eq!(history.len(), HISTORY_WINDOW);
    // Six prior messages exist; the window keeps the last five.
    assert_eq!(history[0].role, Role::Model);
    assert_eq!(history[0].text, "Brayn Official: m0");
    assert_eq!(history.last().unwrap().role, Role::Model);
  }

  #[tokio::test]
  async fn failure_and_empty_replies_are_substituted() {
    let broken = Echo { mode: EchoMode::Broken, ..Default::default() };
    let mut chat = ChatSession::new(persona(), broken);
    assert_eq!(chat.send("hi").await.unwrap().text, UNSTABLE_LINK_REPLY);

    let silent = Echo { mode: EchoMode::Silent, ..Default::default() };
    let mut chat = ChatSession::new(persona(), silent);
    assert_eq!(chat.send("hi").await.unwrap().text, EMPTY_REPLY);
  }
}
