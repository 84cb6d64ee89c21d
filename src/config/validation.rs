use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::matcher::compile_full_match;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.parallelism == Some(0) {
        return Err(ConfigError::Validation(
            "parallelism must be >= 1 when set".to_string(),
        ));
    }

    if config.popular_word_count < 1 {
        return Err(ConfigError::Validation(format!(
            "popular_word_count must be >= 1, got {}",
            config.popular_word_count
        )));
    }

    for page in &config.start_pages {
        Url::parse(page).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid start page '{}': {}", page, e))
        })?;
    }

    for pattern in config.ignored_urls.iter().chain(&config.ignored_words) {
        compile_full_match(pattern)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.result_path.is_some() && config.result_path == config.profile_output_path {
        if let Some(path) = config.result_path() {
            return Err(ConfigError::Validation(format!(
                "result_path and profile_output_path must differ, both are '{}'",
                path
            )));
        }
    }

    Ok(())
}
