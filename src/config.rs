use std::{env::var, time::Duration};

use dotenvy::dotenv;
use thiserror::Error;

use crate::infrastructure::{
    email::{
        ProviderConfig, SendgridConfig, SesConfig, SmtpConfig, sendgrid::DEFAULT_SENDGRID_BASE_URL,
        ses::DEFAULT_AWS_REGION, smtp::DEFAULT_SMTP_PORT,
    },
    llm::{
        LlmConfig,
        openai::{DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT},
    },
};

const DEFAULT_FROM_ADDRESS: &str = "noreply@efunnels.local";
const DEFAULT_FROM_NAME: &str = "eFunnels";
const DEFAULT_APP_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("An error occured while getting {0} env param")]
    Missing(&'static str),
    #[error("An error occured while parsing {key} env param: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("unknown EMAIL_PROVIDER {0:?}, expected one of mock, sendgrid, smtp, ses")]
    UnknownProvider(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub database_url: Option<String>,
    pub email_provider: ProviderConfig,
    pub from_address: String,
    pub from_name: String,
    pub llm: LlmConfig,
    pub bulk_concurrency: usize,
    pub app_base_url: String,
    pub reminder_dedupe: bool,
    pub reminder_interval: Duration,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Config {
            port: parse(&required("PORT")?, "PORT")?,
            scheme: required("SCHEME")?,
            host: required("HOST")?,
            database_url: get("DATABASE_URL"),
            email_provider: provider_config(&get)?,
            from_address: get("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: get("EMAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            llm: LlmConfig {
                api_key: get("LLM_API_KEY"),
                base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
                model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout: get("LLM_TIMEOUT_SECS")
                    .map(|value| parse::<u64>(&value, "LLM_TIMEOUT_SECS"))
                    .transpose()?
                    .map_or(DEFAULT_LLM_TIMEOUT, Duration::from_secs),
            },
            bulk_concurrency: get("BULK_CONCURRENCY")
                .map(|value| parse::<usize>(&value, "BULK_CONCURRENCY"))
                .transpose()?
                .unwrap_or(1)
                .max(1),
            app_base_url: get("APP_BASE_URL").unwrap_or_else(|| DEFAULT_APP_BASE_URL.to_string()),
            reminder_dedupe: get("REMINDER_DEDUPE")
                .map(|value| parse_bool(&value, "REMINDER_DEDUPE"))
                .transpose()?
                .unwrap_or(false),
            reminder_interval: Duration::from_secs(
                get("REMINDER_INTERVAL_SECS")
                    .map(|value| parse::<u64>(&value, "REMINDER_INTERVAL_SECS"))
                    .transpose()?
                    .unwrap_or(0),
            ),
        })
    }
}

fn provider_config<G>(get: &G) -> Result<ProviderConfig, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let provider = get("EMAIL_PROVIDER")
        .unwrap_or_else(|| "mock".to_string())
        .to_ascii_lowercase();

    Ok(match provider.as_str() {
        "mock" => ProviderConfig::Mock,
        "sendgrid" => ProviderConfig::Sendgrid(SendgridConfig {
            api_key: get("SENDGRID_API_KEY"),
            base_url: get("SENDGRID_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SENDGRID_BASE_URL.to_string()),
        }),
        "smtp" => ProviderConfig::Smtp(SmtpConfig {
            host: get("SMTP_HOST"),
            port: get("SMTP_PORT")
                .map(|value| parse::<u16>(&value, "SMTP_PORT"))
                .transpose()?
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: get("SMTP_USERNAME"),
            password: get("SMTP_PASSWORD"),
        }),
        "ses" => ProviderConfig::Ses(SesConfig {
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            endpoint: get("SES_ENDPOINT"),
        }),
        _ => return Err(ConfigError::UnknownProvider(provider)),
    })
}

fn parse<T: std::str::FromStr>(value: &str, key: &'static str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(value: &str, key: &'static str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
