//! models/user_model.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
}

impl User {
    /// Usuario "real": ni bot ni cuenta borrada.
    pub fn is_active_human(&self) -> bool {
        !self.deleted && !self.is_bot
    }
}

/// users.list (GET). Igual que conversations.list, todo va en el query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersListRequest {
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}
