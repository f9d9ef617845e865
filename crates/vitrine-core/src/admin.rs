//! Operational entities: admin accounts, login sessions, and contact-form
//! inquiries. Unlike the editorial types in [`crate::content`], none of these
//! are ever served to anonymous visitors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  document::{Document, require},
};

// ─── AdminUser ───────────────────────────────────────────────────────────────

/// An administrator account. `password_hash` is an argon2 PHC string; the
/// plaintext never touches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
  #[serde(default)]
  pub id:            String,
  pub email:         String,
  pub password_hash: String,
  #[serde(default = "default_role")]
  pub role:          String,
}

fn default_role() -> String {
  "admin".to_string()
}

impl Document for AdminUser {
  const COLLECTION: &'static str = "users";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
    self.email = self.email.trim().to_lowercase();
  }

  fn validate(&self) -> Result<()> {
    require("email", &self.email)?;
    require("passwordHash", &self.password_hash)?;
    Ok(())
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A server-side login session. The document id doubles as the opaque bearer
/// token handed to the browser, so possession of the cookie value is the whole
/// credential and deleting the row revokes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  #[serde(default)]
  pub id:         String,
  pub user_id:    String,
  pub email:      String,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl Session {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }
}

impl Document for Session {
  const COLLECTION: &'static str = "sessions";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn validate(&self) -> Result<()> {
    require("id", &self.id)?;
    require("userId", &self.user_id)?;
    Ok(())
  }
}

// ─── Inquiry ─────────────────────────────────────────────────────────────────

/// Lifecycle state of a contact-form inquiry. New submissions always start as
/// [`InquiryStatus::New`]; the rest are set by an admin working the lead.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
  #[default]
  New,
  Contacted,
  Converted,
  Closed,
}

/// A contact-form submission. `created_at` is server-assigned at intake;
/// client-supplied values for it are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
  #[serde(default)]
  pub id:         String,
  pub name:       String,
  pub email:      String,
  #[serde(default)]
  pub company:    String,
  /// Slug of the service the visitor asked about, if any.
  #[serde(default)]
  pub service:    String,
  #[serde(default)]
  pub budget:     String,
  pub message:    String,
  #[serde(default)]
  pub status:     InquiryStatus,
  pub created_at: DateTime<Utc>,
}

impl Document for Inquiry {
  const COLLECTION: &'static str = "inquiries";

  fn id(&self) -> &str {
    &self.id
  }

  fn set_id(&mut self, id: String) {
    self.id = id;
  }

  fn normalize(&mut self) {
    self.id = self.id.trim().to_string();
    self.email = self.email.trim().to_string();
  }

  fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("email", &self.email)?;
    require("message", &self.message)?;
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::TimeDelta;

  use super::*;

  #[test]
  fn session_expiry_is_inclusive_at_the_boundary() {
    let now = Utc::now();
    let session = Session {
      id:         "tok".into(),
      user_id:    "u1".into(),
      email:      "admin@site".into(),
      created_at: now,
      expires_at: now,
    };
    assert!(session.is_expired(now));
    assert!(!session.is_expired(now - TimeDelta::seconds(1)));
  }

  #[test]
  fn inquiry_status_serialises_lowercase() {
    assert_eq!(
      serde_json::to_value(InquiryStatus::Contacted).unwrap(),
      serde_json::json!("contacted")
    );
    let status: InquiryStatus =
      serde_json::from_value(serde_json::json!("closed")).unwrap();
    assert_eq!(status, InquiryStatus::Closed);
  }

  #[test]
  fn admin_email_is_lowercased() {
    let mut user = AdminUser {
      id:            "u1".into(),
      email:         " Admin@Site ".into(),
      password_hash: "$argon2id$stub".into(),
      role:          "admin".into(),
    };
    user.normalize();
    assert_eq!(user.email, "admin@site");
  }
}
