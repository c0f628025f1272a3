use crate::config::Config;
use crate::session::StateStore;

pub fn render_status(config: &Config, store: &StateStore) -> String {
    let session = store
        .session_id()
        .map_or_else(|| t!("status.none").into_owned(), ToOwned::to_owned);
    let account = if store.token().is_some() {
        t!("auth.token_stored").into_owned()
    } else {
        t!("auth.not_logged_in").into_owned()
    };

    let lines = vec![
        format!("◆ {}", t!("status.title")),
        String::new(),
        format!("{}   {}", t!("status.version"), env!("CARGO_PKG_VERSION")),
        format!("{}    {}", t!("status.config"), config.config_path.display()),
        format!("{}  {}", t!("status.endpoint"), config.server.ws_url()),
        format!("{}       {}", t!("status.api"), config.server.api_base()),
        format!("{}   {session}", t!("status.session")),
        format!("{}   {account}", t!("status.account")),
    ];

    lines.join("\n")
}
