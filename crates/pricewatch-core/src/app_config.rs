use std::path::PathBuf;

/// Runtime configuration for a single price-check run.
///
/// Built once at startup by [`crate::load_app_config`] and passed by
/// reference into the listing client, the notifier, and the history store.
#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_base: String,
    /// Listing category slug, e.g. `"men_trousers"`.
    pub category: String,
    /// Base of the listing endpoint; the category URL is `{api_base}/{category}.json`.
    pub api_base: String,
    /// Storefront origin prepended to each product's relative URL.
    pub site_origin: String,
    pub history_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Currency label rendered after every price in notification messages.
    pub currency: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_token", &"[redacted]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("category", &self.category)
            .field("api_base", &self.api_base)
            .field("site_origin", &self.site_origin)
            .field("history_path", &self.history_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("accept_language", &self.accept_language)
            .field("currency", &self.currency)
            .field("log_level", &self.log_level)
            .finish()
    }
}
