use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig, SectionConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_sections(&config.sections)?;
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.progress_every < 1 {
        return Err(ConfigError::Validation(format!(
            "progress_every must be >= 1, got {}",
            config.progress_every
        )));
    }

    if config.ad_delay_ms > 600_000 || config.page_delay_ms > 600_000 {
        return Err(ConfigError::Validation(
            "delays must be <= 600000ms".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP transport configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Header values must survive HeaderValue::from_str
    for (name, value) in [
        ("user_agent", &config.user_agent),
        ("accept_language", &config.accept_language),
    ] {
        if value.is_empty() || !value.is_ascii() || value.chars().any(|c| c.is_ascii_control()) {
            return Err(ConfigError::Validation(format!(
                "{} must be non-empty printable ASCII, got '{}'",
                name, value
            )));
        }
    }

    if config.timeout_secs < 1 || config.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 120, got {}",
            config.timeout_secs
        )));
    }

    if config.retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retries must be <= 10, got {}",
            config.retries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl sections
fn validate_sections(sections: &[SectionConfig]) -> Result<(), ConfigError> {
    if sections.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[section]] is required".to_string(),
        ));
    }

    for section in sections {
        if section.name.is_empty() {
            return Err(ConfigError::Validation(
                "section name cannot be empty".to_string(),
            ));
        }

        let url = Url::parse(&section.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid section URL '{}': {}", section.url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Section URL '{}' must use HTTP or HTTPS",
                section.url
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawl: CrawlConfig {
                ad_delay_ms: 400,
                page_delay_ms: 400,
                max_pages: 400,
                progress_every: 25,
            },
            http: HttpConfig {
                user_agent: "Mozilla/5.0".to_string(),
                accept_language: "fr-FR,fr;q=0.9,en;q=0.8".to_string(),
                timeout_secs: 15,
                retries: 2,
                retry_backoff_ms: 800,
            },
            output: OutputConfig {
                csv_path: "data/raw/ventes.csv".to_string(),
            },
            sections: vec![SectionConfig {
                name: "maisons".to_string(),
                url: "https://example.com/annonces/vente/maison/".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = valid_config();
        config.crawl.max_pages = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_progress_every_rejected() {
        let mut config = valid_config();
        config.crawl.progress_every = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = valid_config();
        config.http.user_agent = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_control_chars_in_header_rejected() {
        let mut config = valid_config();
        config.http.accept_language = "fr\nfr".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_timeout_rejected() {
        let mut config = valid_config();
        config.http.timeout_secs = 500;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_no_sections_rejected() {
        let mut config = valid_config();
        config.sections.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_section_url_rejected() {
        let mut config = valid_config();
        config.sections[0].url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_ftp_section_url_rejected() {
        let mut config = valid_config();
        config.sections[0].url = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
