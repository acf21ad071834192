//! models/operation_model.rs
//! Conjunto cerrado de operaciones remotas contra la API de Slack.
//!
//! Cada variante sabe su método, su verbo, su URL y cómo se serializa. Los GET
//! llevan todo en el query string y nunca body; los POST llevan sus campos como
//! JSON y nunca parámetros en la URL.

use crate::models::{
    call_model::Call,
    channel_model::{
        ArchiveChannelRequest, ChannelListRequest, CreateChannelRequest, InviteRequest,
        SetTopicRequest,
    },
    message_model::PostMessageRequest,
    user_model::UsersListRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateChannel(CreateChannelRequest),
    ListChannels(ChannelListRequest),
    SetTopic(SetTopicRequest),
    ArchiveChannel(ArchiveChannelRequest),
    InviteMembers(InviteRequest),
    PostMessage(PostMessageRequest),
    ListUsers(UsersListRequest),
    AddCall(Call),
}

impl Operation {
    /// Nombre del método tal cual lo expone Slack.
    pub fn method(&self) -> &'static str {
        match self {
            Operation::CreateChannel(_) => "conversations.create",
            Operation::ListChannels(_) => "conversations.list",
            Operation::SetTopic(_) => "conversations.setTopic",
            Operation::ArchiveChannel(_) => "conversations.archive",
            Operation::InviteMembers(_) => "conversations.invite",
            Operation::PostMessage(_) => "chat.postMessage",
            Operation::ListUsers(_) => "users.list",
            Operation::AddCall(_) => "calls.add",
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Operation::ListChannels(_) | Operation::ListUsers(_) => Verb::Get,
            _ => Verb::Post,
        }
    }

    /// URL completa. `base` debe terminar en "/" (p.e. "https://slack.com/api/").
    pub fn url(&self, base: &str) -> String {
        let mut query: Vec<(&str, String)> = Vec::new();
        match self {
            Operation::ListChannels(req) => {
                query.push(("exclude_archived", "true".to_string()));
                query.push(("types", "public_channel".to_string()));
                if let Some(cursor) = req.cursor.as_deref().filter(|c| !c.is_empty()) {
                    query.push(("cursor", cursor.to_string()));
                }
            }
            Operation::ListUsers(req) => {
                if let Some(cursor) = req.cursor.as_deref().filter(|c| !c.is_empty()) {
                    query.push(("cursor", cursor.to_string()));
                }
                if let Some(limit) = req.limit {
                    query.push(("limit", limit.to_string()));
                }
            }
            _ => {}
        }

        let mut url = format!("{}{}", base, self.method());
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }
        url
    }

    /// Body JSON para los POST; `None` para los GET.
    pub fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        let bytes = match self {
            Operation::ListChannels(_) | Operation::ListUsers(_) => return Ok(None),
            Operation::CreateChannel(req) => serde_json::to_vec(req)?,
            Operation::SetTopic(req) => serde_json::to_vec(req)?,
            Operation::ArchiveChannel(req) => serde_json::to_vec(req)?,
            Operation::InviteMembers(req) => serde_json::to_vec(req)?,
            Operation::PostMessage(req) => serde_json::to_vec(req)?,
            Operation::AddCall(call) => serde_json::to_vec(call)?,
        };
        Ok(Some(bytes))
    }
}
