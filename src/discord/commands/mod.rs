mod brawlers;
mod info;
mod profile;
mod rate;
mod revoke;
mod set;

pub use brawlers::brawlers;
pub use info::info;
pub use profile::profile;
pub use rate::rate;
pub use revoke::revoke;
pub use set::set;

use poise::CreateReply;
use poise::serenity_prelude as serenity;

use crate::db::Profile;
use crate::discord::bot::{Context, ERROR_COLOR};
use crate::error::AppError;

/// Loads the profile of `user`, telling the caller when there is none.
async fn require_profile(ctx: Context<'_>, user: &serenity::User) -> Result<Option<Profile>, AppError> {
    if let Some(profile) = ctx.data().db.get_profile(user.id.get()).await? {
        return Ok(Some(profile));
    }

    let description = if user.id == ctx.author().id {
        "⚠️ · You don't have a profile saved. Use `/set tag` to save your profile and then try again."
            .to_string()
    } else {
        format!("⚠️ · <@{}> does not have a profile saved.", user.id)
    };
    reply_error(ctx, description).await?;

    Ok(None)
}

async fn reply_error(ctx: Context<'_>, description: impl Into<String>) -> Result<(), AppError> {
    ctx.send(
        CreateReply::default().embed(
            serenity::CreateEmbed::new()
                .color(ERROR_COLOR)
                .description(description),
        ),
    )
    .await?;
    Ok(())
}
