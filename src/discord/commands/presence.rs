// Bot presence, set once the gateway reports ready.

use poise::serenity_prelude as serenity;

const DEFAULT_ACTIVITY: &str = "over the server";

/// Resets the bot's status to the default message.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching(DEFAULT_ACTIVITY);
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so we can announce a default presence message
/// without repeating the setup code at every call site.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
