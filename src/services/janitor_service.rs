//! services/janitor_service.rs
//! Flujos del janitor: rotación del canal diario y publicación de la llamada.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{
    errors::JanitorError,
    models::{
        call_model::{Call, CallResult},
        channel_model::{
            ArchiveChannelRequest, Channel, ChannelListRequest, CreateChannelRequest,
            InviteRequest, SetTopicRequest,
        },
        message_model::{Block, PostMessageRequest},
        operation_model::Operation,
        response_model::{ChannelResult, GenericResult},
        user_model::{User, UsersListRequest},
    },
    services::{
        pagination_service::{collect_pages, find_in_pages},
        slack_client::SlackClient,
    },
};

/// Días entre el canal nuevo y el que se archiva.
const ROTATION_DAYS: i64 = 7;
const CALL_TITLE: &str = "Game Time!";
const CALL_MESSAGE: &str = "Join the Video Call";
const CALL_HOUR: u32 = 18;
const CALL_MINUTE: u32 = 30;

#[derive(Debug, Clone)]
pub struct JanitorSettings {
    /// URL de la videollamada (VC_URL)
    pub vc_url: String,
    /// ID visible de la videollamada (VC_CALL_ID)
    pub vc_call_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelNames {
    pub new_name: String,
    pub old_name: String,
}

/// Texto de progreso que se devuelve al que disparó el flujo.
#[derive(Debug, Default)]
pub struct ProgressReport {
    lines: Vec<String>,
}

impl ProgressReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn into_text(self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSummary {
    pub channel: Channel,
    pub invited: usize,
    pub archived: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSummary {
    pub call_id: String,
    pub channel_id: String,
}

fn channel_name(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Nombres del canal de hoy y del de hace 7 días, en la zona `tz`
/// (nunca en la hora local del servidor).
pub fn channel_names(now: DateTime<Utc>, tz: Tz) -> ChannelNames {
    let today = now.with_timezone(&tz).date_naive();
    ChannelNames {
        new_name: channel_name(today),
        old_name: channel_name(today - Duration::days(ROTATION_DAYS)),
    }
}

/// Hoy a las 18:30 en `tz`, como unix timestamp.
pub fn call_start_time(now: DateTime<Utc>, tz: Tz) -> Result<i64, JanitorError> {
    let today = now.with_timezone(&tz).date_naive();
    let local = today
        .and_hms_opt(CALL_HOUR, CALL_MINUTE, 0)
        .ok_or_else(|| {
            JanitorError::InvalidTime(format!("{} {}:{}", today, CALL_HOUR, CALL_MINUTE))
        })?;
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| JanitorError::InvalidTime(format!("{} no existe en {}", local, tz)))
}

fn list_channels(cursor: Option<String>) -> Operation {
    Operation::ListChannels(ChannelListRequest { cursor })
}

fn list_users(cursor: Option<String>) -> Operation {
    Operation::ListUsers(UsersListRequest {
        cursor,
        limit: None,
    })
}

#[derive(Clone)]
pub struct JanitorService {
    client: SlackClient,
    tz: Tz,
    settings: JanitorSettings,
}

impl JanitorService {
    pub fn new(client: SlackClient, tz: Tz, settings: JanitorSettings) -> Self {
        Self {
            client,
            tz,
            settings,
        }
    }

    /// Busca un canal público (no archivado) por nombre exacto.
    pub async fn find_channel(&self, name: &str) -> Result<Option<Channel>, JanitorError> {
        log::info!("(find_channel) Buscando canal #{}...", name);
        let found =
            find_in_pages(&self.client, list_channels, |c: &Channel| c.name == name).await?;
        if found.is_none() {
            log::info!("(find_channel) No se encontró el canal #{}", name);
        }
        Ok(found)
    }

    /// Usuarios que no son bots ni están borrados, en el orden en que los lista Slack.
    pub async fn active_users(&self) -> Result<Vec<User>, JanitorError> {
        let users = collect_pages(&self.client, list_users, User::is_active_human).await?;
        log::info!("(active_users) {} usuarios activos", users.len());
        Ok(users)
    }

    /// Crea el canal del día, archiva el de la semana pasada y mueve a todos al nuevo.
    pub async fn rotate_channels(
        &self,
        now: DateTime<Utc>,
        report: &mut ProgressReport,
    ) -> Result<RotationSummary, JanitorError> {
        let names = channel_names(now, self.tz);
        log::info!(
            "(rotate_channels) Canal nuevo=#{}, canal viejo=#{}",
            names.new_name,
            names.old_name
        );

        // 1) Canal nuevo (o el existente si ya estaba creado)
        let channel = self.resolve_new_channel(&names.new_name, report).await?;

        // 2) Topic, best-effort
        report.note("Setting topic...");
        let topic = self
            .client
            .execute::<GenericResult>(Operation::SetTopic(SetTopicRequest {
                channel: channel.id.clone(),
                topic: format!("Video Call: {}", self.settings.vc_url),
            }))
            .await?;
        if topic.body.ok {
            report.note("Topic set.");
        } else {
            log::warn!("(rotate_channels) Falló setTopic, se ignora:\n{}", topic.raw);
            report.note(format!(
                "Setting topic failed, ignoring: {}",
                topic.body.error.as_deref().unwrap_or("unknown_error")
            ));
        }

        // 3) Usuarios
        let users = self.active_users().await?;
        report.note(format!("Got {} Users", users.len()));

        // 4) Invitación. Slack falla si todos ya son miembros, así que ok=false se ignora.
        report.note("Sending invitation to new channel...");
        let user_ids: Vec<String> = users.into_iter().map(|u| u.id).collect();
        let invited = user_ids.len();
        let invite = self
            .client
            .execute::<ChannelResult>(Operation::InviteMembers(InviteRequest {
                channel: channel.id.clone(),
                users: user_ids,
            }))
            .await?;
        if !invite.body.ok {
            log::info!("(rotate_channels) Invitación falló, se ignora:\n{}", invite.raw);
            report.note(format!(
                "Invitation failed! Ignoring. ({})",
                invite.body.error.as_deref().unwrap_or("unknown_error")
            ));
        }

        // 5) Bienvenida, best-effort
        let welcome = self
            .client
            .execute::<GenericResult>(Operation::PostMessage(PostMessageRequest {
                channel: channel.id.clone(),
                text: format!(
                    "Hello, welcome to today's channel.\nOur new video call link is {}",
                    self.settings.vc_url
                ),
                blocks: vec![],
            }))
            .await?;
        if welcome.body.ok {
            report.note("Welcome message posted.");
        } else {
            log::warn!(
                "(rotate_channels) Falló el mensaje de bienvenida, se ignora:\n{}",
                welcome.raw
            );
            report.note(format!(
                "Welcome message failed, ignoring: {}",
                welcome.body.error.as_deref().unwrap_or("unknown_error")
            ));
        }

        // 6) Archivar el canal viejo, si existe
        let archived = match self.find_channel(&names.old_name).await? {
            None => {
                report.note(format!("Couldn't find old channel #{}", names.old_name));
                None
            }
            Some(old) => {
                report.note("Attempting to archive old channel.");
                let archive = self
                    .client
                    .execute::<GenericResult>(Operation::ArchiveChannel(ArchiveChannelRequest {
                        channel: old.id.clone(),
                    }))
                    .await?;
                if archive.body.ok {
                    log::info!("(rotate_channels) Canal #{} archivado", old.name);
                    report.note("Archive done.");
                    Some(old.id)
                } else {
                    log::warn!(
                        "(rotate_channels) Falló el archivado, se ignora:\n{}",
                        archive.raw
                    );
                    report.note(format!(
                        "Archive failed, ignoring: {}",
                        archive.body.error.as_deref().unwrap_or("unknown_error")
                    ));
                    None
                }
            }
        };

        Ok(RotationSummary {
            channel,
            invited,
            archived,
        })
    }

    async fn resolve_new_channel(
        &self,
        name: &str,
        report: &mut ProgressReport,
    ) -> Result<Channel, JanitorError> {
        let created = self
            .client
            .execute::<ChannelResult>(Operation::CreateChannel(CreateChannelRequest {
                name: name.to_string(),
            }))
            .await?;

        if created.body.ok {
            let channel = created.body.channel.ok_or_else(|| {
                JanitorError::logical("conversations.create", Some("missing_channel"))
            })?;
            log::info!("(resolve_new_channel) Canal creado: {:?}", channel);
            report.note(format!("Created channel #{} ({})", channel.name, channel.id));
            return Ok(channel);
        }

        log::warn!("(resolve_new_channel) conversations.create falló:\n{}", created.raw);
        match created.body.error.as_deref() {
            // Otra corrida (o un humano) ya lo creó
            Some("name_taken") => {
                report.note("Channel already exists, fetching it...");
                let channel = self
                    .find_channel(name)
                    .await?
                    .ok_or_else(|| JanitorError::ChannelNotFound(name.to_string()))?;
                report.note(format!("Fetched channel #{} ({})", channel.name, channel.id));
                Ok(channel)
            }
            other => Err(JanitorError::logical("conversations.create", other)),
        }
    }

    /// Registra la videollamada del día y la publica en el canal de hoy.
    pub async fn post_call(
        &self,
        now: DateTime<Utc>,
        report: &mut ProgressReport,
    ) -> Result<CallSummary, JanitorError> {
        let names = channel_names(now, self.tz);
        let start_time = call_start_time(now, self.tz)?;

        // El id externo sale del nombre del canal: mismo día, misma llamada lógica.
        let call = Call {
            external_unique_id: names.new_name.clone(),
            join_url: self.settings.vc_url.clone(),
            start_time: Some(start_time),
            external_display_id: Some(self.settings.vc_call_id.clone()),
            title: Some(CALL_TITLE.to_string()),
            ..Default::default()
        };

        report.note("Creating call...");
        let added = self
            .client
            .execute::<CallResult>(Operation::AddCall(call))
            .await?;
        if !added.body.ok {
            log::error!("(post_call) calls.add falló:\n{}", added.raw);
            return Err(JanitorError::logical("calls.add", added.body.error.as_deref()));
        }
        if let Some(warning) = added.body.warning.as_deref() {
            log::warn!("(post_call) calls.add respondió con warning: {}", warning);
            report.note(format!("calls.add warning: {}", warning));
        }
        let call_id = added
            .body
            .call
            .map(|c| c.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| JanitorError::logical("calls.add", Some("missing_call")))?;
        report.note(format!("Created call {}", call_id));

        let channel = self
            .find_channel(&names.new_name)
            .await?
            .ok_or_else(|| JanitorError::ChannelNotFound(names.new_name.clone()))?;

        let posted = self
            .client
            .execute::<GenericResult>(Operation::PostMessage(PostMessageRequest {
                channel: channel.id.clone(),
                text: CALL_MESSAGE.to_string(),
                blocks: vec![Block::Call {
                    call_id: call_id.clone(),
                }],
            }))
            .await?;
        if !posted.body.ok {
            log::error!("(post_call) chat.postMessage falló:\n{}", posted.raw);
            return Err(JanitorError::logical(
                "chat.postMessage",
                posted.body.error.as_deref(),
            ));
        }
        report.note(format!("Posted call to #{}", channel.name));

        Ok(CallSummary {
            call_id,
            channel_id: channel.id,
        })
    }
}
