use url::Url;
use veil::Redact;

use crate::api_key::ApiKey;

#[derive(Clone, PartialEq, Eq, Redact)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,

    pub user_agent: String,

    /// Base URL of the provider REST API, without trailing slash.
    pub api_url: Url,

    /// First segment of every catalog id handed out by the adapter.
    pub namespace: String,

    #[redact]
    pub api_key: ApiKey,
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "https://listen-api.listennotes.com/api/v2";
    pub const DEFAULT_NAMESPACE: &'static str = "podcasts";

    /// Builds the configuration around an explicit credential.
    ///
    /// # Panics
    ///
    /// Panics if the package name or version, or the detected OS name or
    /// version, cannot be used in a `User-Agent` header.
    #[must_use]
    pub fn with_api_key(api_key: ApiKey) -> Self {
        let app_name = env!("CARGO_PKG_NAME").to_owned();
        let app_version = env!("CARGO_PKG_VERSION").to_owned();

        // Additional `User-Agent` string checks on top of `reqwest::HeaderValue`.
        let illegal_chars = |chr| chr == '/' || chr == ';';
        if app_name.is_empty()
            || app_name.contains(illegal_chars)
            || app_version.is_empty()
            || app_version.contains(illegal_chars)
        {
            panic!("application name and/or version invalid (\"{app_name}\"; \"{app_version}\")");
        }

        let os_name = match std::env::consts::OS {
            "macos" => "osx",
            other => other,
        };
        let os_version = sysinfo::System::os_version().unwrap_or_else(|| String::from("0"));
        if os_name.is_empty()
            || os_name.contains(illegal_chars)
            || os_version.is_empty()
            || os_version.contains(illegal_chars)
        {
            panic!("os name and/or version invalid (\"{os_name}\"; \"{os_version}\")");
        }

        let user_agent = format!("{app_name}/{app_version} (Rust; {os_name}/{os_version})");
        trace!("user agent: {user_agent}");

        Self {
            app_name,
            app_version,

            user_agent,

            api_url: Url::parse(Self::DEFAULT_API_URL).expect("invalid default api url"),
            namespace: Self::DEFAULT_NAMESPACE.to_owned(),

            api_key,
        }
    }
}
