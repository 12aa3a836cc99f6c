use crate::messages;
use crate::{Context, Error};

/// Show the minigame menu
#[poise::command(slash_command)]
pub async fn setup(ctx: Context<'_>) -> Result<(), Error> {
    let (embed, components) = messages::game_menu();
    ctx.send(
        poise::CreateReply::default()
            .embed(embed)
            .components(components),
    )
    .await?;
    Ok(())
}
