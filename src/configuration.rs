use std::time::Duration;

use lettre::{Address, address::AddressError, message::Mailbox};
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

/// Port on which SMTP relays speak TLS from the first byte (SMTPS).
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Address shown to visitors instead of the recipient mailbox.
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct EmailClientSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub secure: Option<bool>,
    pub username: String,
    pub password: SecretString,
    pub sender_email: String,
    pub recipient_email: String,
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<Mailbox, AddressError> {
        self.sender_email.parse::<Address>().map(Mailbox::from)
    }

    pub fn recipient(&self) -> Result<Mailbox, AddressError> {
        self.recipient_email.parse::<Address>().map(Mailbox::from)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }

    /// An explicit `secure` flag wins; otherwise derived from the port.
    pub fn is_secure(&self) -> bool {
        self.secure.unwrap_or_else(|| self.port_implies_secure())
    }

    pub fn port_implies_secure(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| config::ConfigError::Foreign(e.into()))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // e.g. `APP_EMAIL_CLIENT__PASSWORD=...` sets `Settings.email_client.password`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
