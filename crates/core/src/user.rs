//! User-facing account types shared by the backend and the client.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Education level assigned when registration does not name one.
pub const DEFAULT_EDUCATION_LEVEL: &str = "middle_school";

/// A user without credentials, safe to return from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: DbId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    pub education_level: String,
}

impl PublicUser {
    /// First and last name joined, falling back to the email.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
    pub message: String,
}
