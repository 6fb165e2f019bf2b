//! Base and per-request URL assembly.
//!
//! Deliberately plain string concatenation: the segment and slash rules are
//! part of the client's contract, and `url::Url::join` semantics (absolute
//! paths replacing the base path) do not match them. The transport parses
//! the final string.

use crate::config::ClientConfig;

impl ClientConfig {
    /// The base URL: `root [+ /stage] [+ /prefix] [+ /version] + /`.
    ///
    /// Segments appear only when non-empty, in fixed order, and the result
    /// always ends with exactly one trailing slash. Idempotent for a
    /// sanitized configuration.
    pub fn base_url(&self) -> String {
        let mut url = self.root.clone();
        for segment in [&self.stage, &self.prefix, &self.version] {
            if let Some(segment) = segment
                && !segment.is_empty()
            {
                url.push('/');
                url.push_str(segment);
            }
        }
        url.push('/');
        url
    }

    /// Resolve a request path against the base URL. At most one leading
    /// slash is stripped from `path`, so `"x"` and `"/x"` are equivalent.
    pub fn build_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}{}", self.base_url(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(stage: Option<&str>, prefix: Option<&str>, version: Option<&str>) -> ClientConfig {
        let mut builder = ClientConfig::builder().root("api.example.com");
        if let Some(stage) = stage {
            builder = builder.stage(stage);
        }
        if let Some(prefix) = prefix {
            builder = builder.prefix(prefix);
        }
        if let Some(version) = version {
            builder = builder.version(version);
        }
        builder.build().sanitize().unwrap()
    }

    #[test]
    fn test_base_url_root_only() {
        assert_eq!(config(None, None, None).base_url(), "https://api.example.com/");
    }

    #[test]
    fn test_base_url_segment_accumulation() {
        assert_eq!(
            config(Some("dev"), None, None).base_url(),
            "https://api.example.com/dev/"
        );
        assert_eq!(
            config(Some("dev"), Some("api"), None).base_url(),
            "https://api.example.com/dev/api/"
        );
        assert_eq!(
            config(Some("dev"), Some("api"), Some("v1")).base_url(),
            "https://api.example.com/dev/api/v1/"
        );
    }

    #[test]
    fn test_base_url_skips_empty_segments() {
        assert_eq!(
            config(Some(""), None, Some("v2")).base_url(),
            "https://api.example.com/v2/"
        );
    }

    #[test]
    fn test_base_url_idempotent() {
        let config = config(Some("dev"), Some("api"), Some("v1"));
        assert_eq!(config.base_url(), config.base_url());
        assert!(config.base_url().ends_with("/v1/"));
        assert!(!config.base_url().ends_with("//"));
    }

    #[test]
    fn test_build_url_leading_slash_equivalence() {
        let config = config(Some("dev"), None, None);
        assert_eq!(config.build_url("users/1"), config.build_url("/users/1"));
        assert_eq!(
            config.build_url("/users/1"),
            "https://api.example.com/dev/users/1"
        );
    }

    #[test]
    fn test_build_url_strips_at_most_one_slash() {
        let config = config(None, None, None);
        assert_eq!(config.build_url("//users"), "https://api.example.com//users");
    }
}
