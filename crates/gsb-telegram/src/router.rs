use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use gsb_core::{commands::Router, config::Config, ports::MessagingPort};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub messenger: Arc<dyn MessagingPort>,
    /// Our own username, for matching `/cmd@botname` mentions.
    pub bot_username: String,
}

pub async fn run_polling(cfg: Arc<Config>, router: Arc<Router>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let bot_username = match bot.get_me().await {
        Ok(me) => me.username().to_string(),
        Err(e) => return Err(anyhow::anyhow!("telegram get_me failed: {e}")),
    };
    tracing::info!(username = %bot_username, "bot started");

    // Best-effort: the command menu is cosmetic.
    let menu: Vec<BotCommand> = router
        .commands()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect();
    if let Err(e) = bot.set_my_commands(menu).await {
        tracing::warn!(error = %e, "failed to register command menu");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        router,
        messenger,
        bot_username,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
