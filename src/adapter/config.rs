//! Migration Configuration
//!
//! CLI入力から解決された実行設定

use reqwest::Url;
use std::fmt;
use std::path::PathBuf;

use crate::domain::errors::MigrationError;

/// Resolved configuration for one migration run
#[derive(Clone)]
pub struct Config {
    /// Bridge subdomain, e.g. `acme` for acme.bridgeapp.com
    pub domain: String,
    /// API token as given by the operator
    pub token: String,
    /// Input CSV
    pub file: PathBuf,
    /// Directory the two reports are written to
    pub output_dir: PathBuf,
    /// API root, always ending with `/`
    pub base_url: Url,
}

/// Default API root for a Bridge subdomain
pub fn default_base_url(domain: &str) -> String {
    format!("https://{}.bridgeapp.com/api/", domain)
}

fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty()
        && !domain.starts_with('-')
        && !domain.ends_with('-')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl Config {
    /// Build and validate a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomain` when the domain is not a bare subdomain and
    /// `InvalidBaseUrl` when the base URL cannot be parsed.
    pub fn new(
        domain: &str,
        token: &str,
        file: PathBuf,
        output_dir: PathBuf,
        base_url: Option<&str>,
    ) -> Result<Self, MigrationError> {
        let domain = domain.trim();
        if !is_valid_domain(domain) {
            return Err(MigrationError::InvalidDomain(domain.to_string()));
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(MigrationError::MissingInput("token"));
        }

        let raw = base_url
            .map(str::to_string)
            .unwrap_or_else(|| default_base_url(domain));
        let normalized = if raw.ends_with('/') {
            raw.clone()
        } else {
            format!("{}/", raw)
        };
        let base_url =
            Url::parse(&normalized).map_err(|_| MigrationError::InvalidBaseUrl(raw.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(MigrationError::InvalidBaseUrl(raw));
        }

        Ok(Self {
            domain: domain.to_string(),
            token: token.to_string(),
            file,
            output_dir,
            base_url,
        })
    }

    /// Value of the `Authorization` header
    ///
    /// A token that already carries a scheme (`Basic ...`) is sent verbatim.
    pub fn authorization_header(&self) -> String {
        if self.token.contains(char::is_whitespace) {
            self.token.clone()
        } else {
            format!("Bearer {}", self.token)
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("token", &"<redacted>")
            .field("file", &self.file)
            .field("output_dir", &self.output_dir)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
