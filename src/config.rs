use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub environment: String,
    pub max_body_size: usize,
    pub log_level: String,
    pub sheet: SheetConfig,
    pub smtp: SmtpConfig,
    pub site: SiteConfig,
}

/// Apps Script web app that appends rows to the spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Mail is considered configured only when a password is present.
    pub pass: Option<String>,
    pub from_name: String,
    /// "starttls" (default), "tls" or "none".
    pub tls_mode: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        self.pass.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let environment = env_or("APP_ENV", "production");

        let max_body_size: usize = env_or("MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        let sheet = SheetConfig {
            url: env_optional("GOOGLE_SCRIPT_URL"),
            timeout: env_secs("SHEET_TIMEOUT_SECS", 30)?,
        };

        let smtp = SmtpConfig {
            host: env_or("SMTP_HOST", "smtp.gmail.com"),
            port: env_or("SMTP_PORT", "587")
                .parse()
                .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?,
            user: env_or("SMTP_EMAIL", "noreply.nexhub@gmail.com"),
            pass: env_optional("SMTP_PASSWORD"),
            from_name: env_or("SMTP_FROM_NAME", "NexHub Community"),
            tls_mode: env_or("SMTP_TLS", "starttls"),
            timeout: env_secs("SMTP_TIMEOUT_SECS", 20)?,
        };

        let site = SiteConfig {
            name: env_or("SITE_NAME", "NexHub"),
            url: env_or("SITE_URL", "https://nexhubcommunity.vercel.app"),
        };

        Ok(Config {
            host,
            port,
            environment,
            max_body_size,
            log_level,
            sheet,
            smtp,
            site,
        })
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default: u64) -> Result<Duration, String> {
    env_or(key, &default.to_string())
        .parse()
        .map(Duration::from_secs)
        .map_err(|e| format!("Invalid {key}: {e}"))
}
