//! Result sharing
//!
//! Builds the tweet-intent request for a finished round. Opening it is up
//! to the platform layer.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::settings::ShareConfig;

const INTENT_ENDPOINT: &str = "http://twitter.com/intent/tweet";

/// Everything outside the RFC 3986 unreserved set
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A post describing a finished round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub text: String,
    pub hashtags: Vec<String>,
    pub url: String,
}

impl ShareRequest {
    pub fn for_score(final_score: u32, config: &ShareConfig) -> Self {
        Self {
            text: format!("SCORE:{final_score}点で力尽きた"),
            hashtags: config.hashtags.clone(),
            url: config.url.clone(),
        }
    }

    /// Full intent URL with every query component percent-encoded
    pub fn intent_url(&self) -> String {
        let mut url = format!("{INTENT_ENDPOINT}?text={}", encode_component(&self.text));
        if !self.hashtags.is_empty() {
            url.push_str("&hashtags=");
            url.push_str(&encode_component(&self.hashtags.join(",")));
        }
        if !self.url.is_empty() {
            url.push_str("&url=");
            url.push_str(&encode_component(&self.url));
        }
        url
    }
}

fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_text() {
        let request = ShareRequest::for_score(12, &ShareConfig::default());
        assert_eq!(request.text, "SCORE:12点で力尽きた");
        assert_eq!(request.hashtags, vec!["sample".to_string()]);
        assert_eq!(request.url, "https://hothukurou.com");
    }

    #[test]
    fn test_intent_url_encoding() {
        let request = ShareRequest {
            text: "SCORE:3 点".to_string(),
            hashtags: vec!["a".to_string(), "b c".to_string()],
            url: "https://example.com/x?y=1".to_string(),
        };
        assert_eq!(
            request.intent_url(),
            "http://twitter.com/intent/tweet?text=SCORE%3A3%20%E7%82%B9\
             &hashtags=a%2Cb%20c&url=https%3A%2F%2Fexample.com%2Fx%3Fy%3D1"
        );
    }

    #[test]
    fn test_intent_url_omits_empty_fields() {
        let config = ShareConfig {
            url: String::new(),
            hashtags: Vec::new(),
        };
        let request = ShareRequest::for_score(0, &config);
        assert!(request.intent_url().starts_with("http://twitter.com/intent/tweet?text=SCORE%3A0"));
        assert!(!request.intent_url().contains("&hashtags="));
        assert!(!request.intent_url().contains("&url="));
    }
}
