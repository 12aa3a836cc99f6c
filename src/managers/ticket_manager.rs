use poise::serenity_prelude::{self as serenity, ChannelId, GuildId, Http, Permissions, RoleId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::scheduler::DelayedTasks;
use crate::config::BotSettings;
use crate::error::Result;
use crate::messages;
use crate::state::GuildConfig;

const APPEAL_ROLE_COLOUR: u32 = 0xff0000;

/// Opens and closes moderation tickets
pub struct TicketManager {
    appeal_role_name: String,
    close_delay: Duration,
    deletions: DelayedTasks<ChannelId>,
}

impl TicketManager {
    pub fn new(settings: &BotSettings) -> Self {
        Self {
            appeal_role_name: settings.appeal_role_name.clone(),
            close_delay: settings.ticket_close_delay,
            deletions: DelayedTasks::new(),
        }
    }

    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    /// Restrict the sender and open a private channel about the message
    pub async fn open_ticket(
        &self,
        http: &Http,
        guild_id: GuildId,
        user: &serenity::User,
        content: &str,
        config: &GuildConfig,
    ) -> Result<ChannelId> {
        let appeal_role = self.ensure_appeal_role(http, guild_id).await?;

        let member = guild_id.member(http, user.id).await?;
        member.add_role(http, appeal_role).await?;

        let overwrites = ticket_overwrites(guild_id, appeal_role, user.id, &config.ticket_role_ids());
        let channel = guild_id
            .create_channel(
                http,
                serenity::CreateChannel::new(ticket_channel_name(&user.name))
                    .kind(serenity::ChannelType::Text)
                    .permissions(overwrites),
            )
            .await?;

        channel
            .id
            .send_message(
                http,
                serenity::CreateMessage::new()
                    .content(format!("<@{}>", user.id))
                    .embed(messages::ticket_opened(user.id, content))
                    .components(vec![messages::ticket_close_row(user.id)]),
            )
            .await?;

        info!(
            "Opened ticket {} for {} ({}) in guild {}",
            channel.id, user.name, user.id, guild_id
        );
        Ok(channel.id)
    }

    /// Find the appeal role by name, creating and locking it down if needed
    async fn ensure_appeal_role(&self, http: &Http, guild_id: GuildId) -> Result<RoleId> {
        let roles = guild_id.roles(http).await?;
        if let Some((role_id, _)) = roles.iter().find(|(_, r)| r.name == self.appeal_role_name) {
            debug!("Appeal role already exists: {}", role_id);
            return Ok(*role_id);
        }

        let role = guild_id
            .create_role(
                http,
                serenity::EditRole::new()
                    .name(&self.appeal_role_name)
                    .colour(APPEAL_ROLE_COLOUR)
                    .audit_log_reason("Automatic ticket system"),
            )
            .await?;
        info!("Created appeal role '{}' ({})", self.appeal_role_name, role.id);

        self.restrict_appeal_role(http, guild_id, role.id).await?;
        Ok(role.id)
    }

    /// Hide every text, voice and category channel from the appeal role.
    /// A failing channel is logged and skipped.
    async fn restrict_appeal_role(
        &self,
        http: &Http,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<()> {
        let channels = guild_id.channels(http).await?;
        let mut applied = 0;

        for (channel_id, channel) in &channels {
            if !is_restrictable(channel.kind) {
                continue;
            }

            let overwrite = serenity::PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::CONNECT,
                kind: serenity::PermissionOverwriteType::Role(role_id),
            };

            match channel_id.create_permission(http, overwrite).await {
                Ok(()) => applied += 1,
                Err(e) => warn!(
                    "Failed to restrict appeal role in channel {}: {}",
                    channel.name, e
                ),
            }
        }

        info!(
            "Appeal role restricted in {}/{} channels of guild {}",
            applied,
            channels.len(),
            guild_id
        );
        Ok(())
    }

    /// Take the appeal role away from a member. Returns false when the
    /// member left or never had it.
    pub async fn release_member(&self, http: &Http, guild_id: GuildId, user_id: UserId) -> Result<bool> {
        let member = match guild_id.member(http, user_id).await {
            Ok(member) => member,
            Err(e) => {
                debug!("Ticket owner {} not found in guild {}: {}", user_id, guild_id, e);
                return Ok(false);
            }
        };

        let roles = guild_id.roles(http).await?;
        let Some((role_id, _)) = roles.iter().find(|(_, r)| r.name == self.appeal_role_name) else {
            return Ok(false);
        };

        if !member.roles.contains(role_id) {
            return Ok(false);
        }

        member.remove_role(http, *role_id).await?;
        info!("Removed appeal role from {} in guild {}", user_id, guild_id);
        Ok(true)
    }

    /// Delete the ticket channel after the close delay. Returns false when a
    /// deletion is already pending for it.
    pub fn schedule_deletion(&self, http: Arc<Http>, channel_id: ChannelId) -> bool {
        self.deletions
            .schedule(channel_id, self.close_delay, async move {
                match channel_id.delete(&*http).await {
                    Ok(_) => info!("Deleted closed ticket channel {}", channel_id),
                    Err(e) => error!("Failed to delete ticket channel {}: {}", channel_id, e),
                }
            })
    }

    /// Drop a pending deletion, e.g. when the channel was removed by hand
    pub fn cancel_deletion(&self, channel_id: ChannelId) -> bool {
        self.deletions.cancel(&channel_id)
    }

    pub fn is_deletion_pending(&self, channel_id: ChannelId) -> bool {
        self.deletions.is_pending(&channel_id)
    }

    pub fn shutdown(&self) {
        self.deletions.cancel_all();
    }
}

fn is_restrictable(kind: serenity::ChannelType) -> bool {
    matches!(
        kind,
        serenity::ChannelType::Text
            | serenity::ChannelType::News
            | serenity::ChannelType::Voice
            | serenity::ChannelType::Stage
            | serenity::ChannelType::Forum
            | serenity::ChannelType::Category
    )
}

/// Private to the sender and the ticket roles; hidden from everyone else,
/// including other members under appeal
fn ticket_overwrites(
    guild_id: GuildId,
    appeal_role: RoleId,
    user_id: UserId,
    ticket_roles: &[RoleId],
) -> Vec<serenity::PermissionOverwrite> {
    let mut overwrites = vec![
        serenity::PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: serenity::PermissionOverwriteType::Role(guild_id.everyone_role()),
        },
        serenity::PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: serenity::PermissionOverwriteType::Role(appeal_role),
        },
        serenity::PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::READ_MESSAGE_HISTORY,
            deny: Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(user_id),
        },
    ];

    overwrites.extend(ticket_roles.iter().map(|role_id| serenity::PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL
            | Permissions::SEND_MESSAGES
            | Permissions::MANAGE_MESSAGES
            | Permissions::READ_MESSAGE_HISTORY,
        deny: Permissions::empty(),
        kind: serenity::PermissionOverwriteType::Role(*role_id),
    }));

    overwrites
}

pub fn ticket_channel_name(username: &str) -> String {
    let slug: String = username
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("ticket-{}", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_channel_name() {
        assert_eq!(ticket_channel_name("Alice"), "ticket-alice");
        assert_eq!(ticket_channel_name("big bob"), "ticket-big-bob");
    }

    #[test]
    fn test_ticket_overwrites() {
        let guild = GuildId::new(1);
        let overwrites = ticket_overwrites(
            guild,
            RoleId::new(2),
            UserId::new(3),
            &[RoleId::new(4), RoleId::new(5)],
        );
        assert_eq!(overwrites.len(), 5);

        // @everyone shares the guild id
        assert_eq!(
            overwrites[0].kind,
            serenity::PermissionOverwriteType::Role(RoleId::new(1))
        );
        assert!(overwrites[0].deny.view_channel());
        assert!(overwrites[1].deny.view_channel());
        assert!(overwrites[2].allow.send_messages());
        assert!(!overwrites[2].allow.manage_messages());
        assert!(overwrites[3..].iter().all(|o| o.allow.manage_messages()));
    }

    #[test]
    fn test_restrictable_channel_kinds() {
        assert!(is_restrictable(serenity::ChannelType::Text));
        assert!(is_restrictable(serenity::ChannelType::Category));
        assert!(!is_restrictable(serenity::ChannelType::PublicThread));
    }

    #[tokio::test]
    async fn test_deletion_is_scheduled_once_and_cancellable() {
        let settings = BotSettings {
            ticket_close_delay: Duration::from_secs(60),
            ..BotSettings::default()
        };
        let manager = TicketManager::new(&settings);
        let http = Arc::new(Http::new("token"));
        let channel = ChannelId::new(10);

        assert!(manager.schedule_deletion(http.clone(), channel));
        assert!(!manager.schedule_deletion(http, channel));
        assert!(manager.is_deletion_pending(channel));

        assert!(manager.cancel_deletion(channel));
        assert!(!manager.is_deletion_pending(channel));
    }
}
