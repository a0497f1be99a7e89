use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct DbConfig {
    pub location: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct LogConfig {
    /// one of `error`, `warn`, `info`, `debug`, `trace`, or `off`
    pub level: String,
    /// if present, logs are written to this file in addition to stdout
    pub file: Option<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct NotesServerConfig {
    pub database: DbConfig,
    #[serde(rename = "log")]
    pub logging: LogConfig,
}

/// Parses the config file located at ./NotesServer.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> NotesServerConfig {
    parse_config_file("./NotesServer.toml")
}

fn parse_config_file(path: &str) -> NotesServerConfig {
    let settings = match Config::builder()
        .add_source(config::File::with_name(path))
        .build()
    {
        Ok(settings) => settings,
        // some errors are fine, such as not found
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing startup...");
            return NOTES_SERVER_CONFIG_DEFAULT.clone();
        }
        // basically everything else is unrecoverable, though
        Err(e) => {
            log::error!("Failed to parse config file. Exception is {e}");
            panic!("Failed to parse config file. Exception is {e}");
        }
    };
    settings.try_deserialize().unwrap_or_else(|e| {
        log::warn!("Config file is incomplete ({e}), falling back to defaults");
        NOTES_SERVER_CONFIG_DEFAULT.clone()
    })
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static NOTES_SERVER_CONFIG: Lazy<NotesServerConfig> = Lazy::new(parse_config);
static NOTES_SERVER_CONFIG_DEFAULT: Lazy<NotesServerConfig> = Lazy::new(|| NotesServerConfig {
    database: DbConfig {
        location: "./notes.sqlite".to_string(),
    },
    logging: LogConfig {
        level: "info".to_string(),
        file: None,
    },
});
