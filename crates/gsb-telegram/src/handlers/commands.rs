use gsb_core::{commands::Router, domain::ChatId, ports::MessagingPort};

/// Split `/cmd@botname arg1 arg2 ...` into the command name and its
/// whitespace-separated arguments.
///
/// Command names are case-sensitive. Returns `None` for text that is not a
/// command, or that mentions a bot other than `bot_username` (compared
/// case-insensitively, leading `@` optional).
pub fn parse_command(text: &str, bot_username: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next()?.strip_prefix('/')?;

    let (cmd, mention) = match first.split_once('@') {
        Some((cmd, mention)) => (cmd, Some(mention)),
        None => (first, None),
    };
    if cmd.is_empty() {
        return None;
    }
    if let Some(mention) = mention {
        if !mention.eq_ignore_ascii_case(bot_username.trim_start_matches('@')) {
            return None;
        }
    }

    let args = tokens.map(str::to_string).collect();
    Some((cmd.to_string(), args))
}

/// Run one inbound command and deliver the reply.
///
/// Unknown commands and commands addressed to other bots are ignored. Storage
/// failures are logged and the user gets no reply.
pub async fn process_command(
    router: &Router,
    messenger: &dyn MessagingPort,
    bot_username: &str,
    chat_id: ChatId,
    text: &str,
) {
    let Some((cmd, args)) = parse_command(text, bot_username) else {
        return;
    };

    let reply = match router.dispatch(&cmd, &args).await {
        None => {
            tracing::debug!(command = %cmd, "ignoring unknown command");
            return;
        }
        Some(Ok(reply)) => reply,
        Some(Err(e)) => {
            tracing::error!(command = %cmd, chat_id = chat_id.0, error = %e, "command failed");
            return;
        }
    };

    if let Err(e) = messenger.send_text(chat_id, &reply).await {
        tracing::warn!(command = %cmd, chat_id = chat_id.0, error = %e, "failed to send reply");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gsb_core::{
        domain::GroupEntry, errors::Error, formatting, ports::GroupStore, Result,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeStore {
        rows: Mutex<Vec<GroupEntry>>,
        fail: bool,
    }

    #[async_trait]
    impl GroupStore for FakeStore {
        async fn ensure_schema(&self) -> Result<()> {
            Ok(())
        }

        async fn insert_group(&self, name: &str, link: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Storage("down".to_string()));
            }
            self.rows.lock().unwrap().push(GroupEntry::new(name, link));
            Ok(())
        }

        async fn list_recent(&self, limit: u32) -> Result<Vec<GroupEntry>> {
            if self.fail {
                return Err(Error::Storage("down".to_string()));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().take(limit as usize).cloned().collect())
        }

        async fn search_by_name(&self, _term: &str, _limit: u32) -> Result<Vec<GroupEntry>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct FakeMessenger {
        sent: Mutex<Vec<(ChatId, String)>>,
    }

    impl FakeMessenger {
        fn sent(&self) -> Vec<(ChatId, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    const ME: &str = "group_dir_bot";

    #[test]
    fn parses_name_and_args() {
        let (cmd, args) = parse_command("/add  foo bar\thttp://x.test ", ME).unwrap();
        assert_eq!(cmd, "add");
        assert_eq!(args, vec!["foo", "bar", "http://x.test"]);
    }

    #[test]
    fn strips_bot_mention() {
        let (cmd, args) = parse_command("/list@group_dir_bot", ME).unwrap();
        assert_eq!(cmd, "list");
        assert!(args.is_empty());

        let (cmd, args) = parse_command("/search@Group_Dir_Bot rust", ME).unwrap();
        assert_eq!(cmd, "search");
        assert_eq!(args, vec!["rust"]);
    }

    #[test]
    fn ignores_commands_for_other_bots() {
        assert!(parse_command("/list@some_other_bot", ME).is_none());
        assert!(parse_command("/list@", ME).is_none());
        assert!(parse_command("/list@group_dir_bot_2", ME).is_none());
    }

    #[test]
    fn keeps_command_case() {
        let (cmd, _) = parse_command("/List", ME).unwrap();
        assert_eq!(cmd, "List");
    }

    #[test]
    fn rejects_non_commands() {
        assert!(parse_command("hello /add", ME).is_none());
        assert!(parse_command("   ", ME).is_none());
        assert!(parse_command("/", ME).is_none());
        assert!(parse_command("/@bot", ME).is_none());
    }

    #[tokio::test]
    async fn replies_to_known_commands() {
        let router = Router::new(Arc::new(FakeStore::default()));
        let messenger = FakeMessenger::default();

        process_command(&router, &messenger, ME, ChatId(7), "/add foo bar http://x.test").await;
        process_command(&router, &messenger, ME, ChatId(7), "/list").await;

        let sent = messenger.sent();
        assert_eq!(
            sent,
            vec![
                (ChatId(7), "✅ Group added: foo bar (http://x.test)".to_string()),
                (ChatId(7), "🔹 foo bar → http://x.test".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn only_answers_mentions_of_this_bot() {
        let router = Router::new(Arc::new(FakeStore::default()));
        let messenger = FakeMessenger::default();

        process_command(&router, &messenger, ME, ChatId(1), "/list@some_other_bot").await;
        assert!(messenger.sent().is_empty());

        process_command(&router, &messenger, ME, ChatId(1), "/list@group_dir_bot").await;
        assert_eq!(
            messenger.sent(),
            vec![(ChatId(1), formatting::NO_GROUPS_SAVED.to_string())]
        );
    }

    #[tokio::test]
    async fn usage_errors_are_replied() {
        let router = Router::new(Arc::new(FakeStore::default()));
        let messenger = FakeMessenger::default();

        process_command(&router, &messenger, ME, ChatId(1), "/search").await;
        assert_eq!(
            messenger.sent(),
            vec![(ChatId(1), formatting::SEARCH_USAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn unknown_commands_get_no_reply() {
        let router = Router::new(Arc::new(FakeStore::default()));
        let messenger = FakeMessenger::default();

        process_command(&router, &messenger, ME, ChatId(1), "/delete foo").await;
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn storage_failures_get_no_reply() {
        let store = FakeStore {
            fail: true,
            ..FakeStore::default()
        };
        let router = Router::new(Arc::new(store));
        let messenger = FakeMessenger::default();

        process_command(&router, &messenger, ME, ChatId(1), "/list").await;
        process_command(&router, &messenger, ME, ChatId(1), "/add a http://a.test").await;
        assert!(messenger.sent().is_empty());
    }
}
