use crate::messages;
use crate::{Context, Error};

/// Configure the moderation system
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "MANAGE_CHANNELS"
)]
pub async fn config(ctx: Context<'_>) -> Result<(), Error> {
    let (embed, components) = messages::config_menu();
    ctx.send(
        poise::CreateReply::default()
            .embed(embed)
            .components(components)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
