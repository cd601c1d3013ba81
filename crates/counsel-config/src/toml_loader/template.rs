//! Default TOML config template with inline documentation comments.

use crate::schema::CONFIG_SCHEMA_VERSION;

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    let header = format!("# counsel configuration\n# Schema version {CONFIG_SCHEMA_VERSION}\n");
    header
        + r##"# Only override what you want to change -- missing fields use defaults.
# COUNSEL_API_URL and COUNSEL_USER_ID override [service] at startup.

[service]
# base_url = "https://chatbotbackend-4ve7.onrender.com"
# user_id = 1234
# connect_timeout_secs = 10    # 1-300
# request_timeout_secs = 60    # 1-3600

[chat]
# page_size = 10               # 1-200
# default_session_title = "New session"

[logging]
# level = "INFO"               # TRACE, DEBUG, INFO, WARNING, ERROR
"##
}
