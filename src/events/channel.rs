use poise::serenity_prelude as serenity;
use tracing::info;

use crate::Data;

/// A ticket channel removed by hand no longer needs its delayed deletion
pub fn handle_channel_delete(channel: &serenity::GuildChannel, data: &Data) {
    if data.ticket_manager.cancel_deletion(channel.id) {
        info!(
            "Channel {} ({}) deleted externally, cancelled pending ticket deletion",
            channel.name, channel.id
        );
    }
}
