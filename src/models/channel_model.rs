//! models/channel_model.rs
//! Canales y requests de `conversations.*`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// conversations.create. Responde con `ChannelResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateChannelRequest {
    pub name: String,
}

/// conversations.list (GET). Los parámetros van en el query string, nunca en el body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelListRequest {
    pub cursor: Option<String>,
}

/// conversations.setTopic. Responde con `GenericResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetTopicRequest {
    /// ID del canal (Slack lo llama "channel")
    pub channel: String,
    pub topic: String,
}

/// conversations.archive. Responde con `GenericResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveChannelRequest {
    pub channel: String,
}

/// conversations.invite. Responde con `ChannelResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteRequest {
    pub channel: String,
    pub users: Vec<String>,
}
