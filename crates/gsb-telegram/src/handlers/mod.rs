//! Telegram update handlers.
//!
//! Only text messages starting with `/` are acted upon; everything else is
//! ignored.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use gsb_core::domain::ChatId;

use crate::router::AppState;
mod commands;

pub use commands::{parse_command, process_command};

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        return Ok(());
    }

    process_command(
        &state.router,
        state.messenger.as_ref(),
        &state.bot_username,
        ChatId(msg.chat.id.0),
        text,
    )
    .await;

    Ok(())
}
