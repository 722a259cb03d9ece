//! URL 验证模块
//!
//! 只接受绝对的 http/https URL

use url::Url;

use crate::errors::{Result, SnipError};

/// Validate that the input is an absolute http/https URL.
///
/// The parsed scheme is compared as the parser reports it; no additional
/// case folding is applied on top of parser normalization.
pub fn validate_url(original: &str) -> Result<()> {
    let parsed = Url::parse(original)
        .map_err(|_| SnipError::validation("invalid url: must include http:// or https://"))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(SnipError::validation(
            "invalid url: must include http:// or https://",
        ));
    }

    Ok(())
}
