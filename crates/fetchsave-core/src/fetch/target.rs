//! Scheme check for request targets.

use super::FetchError;
use url::Url;

/// Parse `raw` and check its scheme: `https` always, `http` only when `allow_plain_http`.
pub fn parse_target(raw: &str, allow_plain_http: bool) -> Result<Url, FetchError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "https" => Ok(url),
        "http" if allow_plain_http => Ok(url),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_accepted() {
        let url = parse_target("https://example.com/data.json", false).unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn http_needs_opt_in() {
        assert!(matches!(
            parse_target("http://127.0.0.1:8080/", false),
            Err(FetchError::UnsupportedScheme(s)) if s == "http"
        ));
        assert!(parse_target("http://127.0.0.1:8080/", true).is_ok());
    }

    #[test]
    fn other_schemes_rejected() {
        assert!(matches!(
            parse_target("ftp://example.com/file", true),
            Err(FetchError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            parse_target("file:///etc/hosts", true),
            Err(FetchError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn garbage_is_invalid_url() {
        assert!(matches!(
            parse_target("not a url", false),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
