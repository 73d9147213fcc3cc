//! Terminal step of the petition wizard.

use reqwest::Url;

use crate::error::{AppError, Result};

/// Buttons on the print step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintAction {
    /// Open the print-friendly view in a browser tab.
    Print,
    /// Open the petition detail page in a browser tab.
    View,
    Complete,
    Previous,
}

/// Parse the configured server URL and append path segments, each one
/// percent-encoded.
fn join_segments(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|e| AppError::config(format!("Invalid server URL '{base_url}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::config(format!("Server URL '{base_url}' cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Print-friendly view of a petition.
pub fn print_url(base_url: &str, petition_id: &str) -> Result<String> {
    let mut url = join_segments(base_url, &["petitions-print"])?;
    url.query_pairs_mut().append_pair("id", petition_id);
    Ok(url.into())
}

/// Detail page of a petition.
pub fn detail_url(base_url: &str, petition_id: &str) -> Result<String> {
    Ok(join_segments(base_url, &["petitions", petition_id])?.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_url() {
        assert_eq!(
            print_url("https://parish.example.org", "p-42").unwrap(),
            "https://parish.example.org/petitions-print?id=p-42"
        );
    }

    #[test]
    fn test_detail_url_trims_slash() {
        assert_eq!(
            detail_url("https://parish.example.org/", "p-42").unwrap(),
            "https://parish.example.org/petitions/p-42"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let base = "https://parish.example.org";
        assert_eq!(
            print_url(base, "p 1/2&x=y").unwrap(),
            "https://parish.example.org/petitions-print?id=p+1%2F2%26x%3Dy"
        );
        assert_eq!(
            detail_url(base, "p 1/2").unwrap(),
            "https://parish.example.org/petitions/p%201%2F2"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        assert_eq!(
            detail_url("https://example.org/parish/", "p-42").unwrap(),
            "https://example.org/parish/petitions/p-42"
        );
    }

    #[test]
    fn test_invalid_base_is_config_error() {
        assert!(matches!(print_url("not a url", "p-42"), Err(AppError::Config(_))));
        assert!(matches!(detail_url("mailto:office@example.org", "p-42"), Err(AppError::Config(_))));
    }
}
