//! Signed request URL construction for the Allocine REST API.

use base64::Engine;
use chrono::{NaiveDate, Utc};
use sha1::{Digest, Sha1};
use url::Url;
use url::form_urlencoded;

use crate::error::AllocineError;
use crate::params::{Method, Params, RESERVED_PARAMS};

/// Default base URL for the Allocine REST API v3.
pub(crate) const DEFAULT_BASE_URL: &str = "http://api.allocine.fr/rest/v3/";

/// Builds authenticated, signed request URLs.
///
/// The remote contract salts every request with a `sed` date parameter
/// (`YYYYMMDD`) and signs it with
/// `sig = urlencode(base64(sha1(secret_key + params)))`, where `params` is
/// the ordered `&key=value` string including `sed` and excluding `partner`.
/// Same credentials, method, parameter order, and date always produce the
/// same URL.
#[derive(Debug, Clone)]
pub(crate) struct ApiUrl {
    /// Partner identifier, sent as the `partner` query parameter.
    partner_key: String,
    /// Secret key prepended to the signed string. Never sent on the wire.
    secret_key: String,
    /// API base URL (trailing slash required).
    base_url: Url,
    /// Fixed `sed` date; `None` uses today's UTC date.
    sed_date: Option<NaiveDate>,
}

impl ApiUrl {
    /// Creates a URL builder for the given credentials.
    pub(crate) fn new(
        partner_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: Url,
        sed_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            partner_key: partner_key.into(),
            secret_key: secret_key.into(),
            base_url,
            sed_date,
        }
    }

    /// The `sed` date salt as `YYYYMMDD`.
    fn sed(&self) -> String {
        self.sed_date
            .unwrap_or_else(|| Utc::now().date_naive())
            .format("%Y%m%d")
            .to_string()
    }

    /// Generates the fully qualified, signed request URL for a method call.
    ///
    /// # Errors
    ///
    /// - [`AllocineError::InvalidRequest`] if a caller parameter uses a
    ///   reserved name (`partner`, `sed`, `sig`).
    /// - [`AllocineError::InvalidUrl`] if the assembled string does not parse
    ///   as a URL.
    pub(crate) fn generate_url(
        &self,
        method: Method,
        params: &Params,
    ) -> Result<Url, AllocineError> {
        for (key, _) in params.iter() {
            if RESERVED_PARAMS.contains(&key) {
                return Err(AllocineError::InvalidRequest {
                    reason: format!("parameter name `{key}` is reserved"),
                });
            }
        }

        let endpoint = self.base_url.join(method.as_str()).map_err(|source| {
            AllocineError::InvalidUrl {
                url: format!("{}{}", self.base_url, method.as_str()),
                source,
            }
        })?;

        // Ordered parameter string; this exact byte sequence is signed.
        let mut sparams = String::new();
        for (key, value) in params.iter() {
            sparams.push('&');
            sparams.push_str(key);
            sparams.push('=');
            sparams.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }
        sparams.push_str("&sed=");
        sparams.push_str(&self.sed());

        let digest = Sha1::digest(format!("{}{sparams}", self.secret_key).as_bytes());
        let encoded = base64::engine::general_purpose::STANDARD.encode(digest);
        let sig: String = form_urlencoded::byte_serialize(encoded.as_bytes()).collect();

        let raw = format!("{endpoint}?partner={}{sparams}&sig={sig}", self.partner_key);
        Url::parse(&raw).map_err(|source| AllocineError::InvalidUrl { url: raw, source })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn api_url() -> ApiUrl {
        ApiUrl::new(
            "pkey",
            "skey",
            Url::parse(DEFAULT_BASE_URL).unwrap(),
            NaiveDate::from_ymd_opt(2014, 4, 18),
        )
    }

    #[test]
    fn test_generate_url_known_answer() {
        // Arrange
        let params = Params::new()
            .push("q", "avatar")
            .push("format", "json")
            .push("filter", "movie");

        // Act
        let url = api_url().generate_url(Method::Search, &params).unwrap();

        // Assert: sig = urlencode(base64(sha1("skey&q=avatar&format=json&filter=movie&sed=20140418")))
        assert_eq!(
            url.as_str(),
            "http://api.allocine.fr/rest/v3/search?partner=pkey\
             &q=avatar&format=json&filter=movie&sed=20140418\
             &sig=vg3vI8YRQ8c2S85a8m4i0qnoEpk%3D",
        );
    }

    #[test]
    fn test_generate_url_is_deterministic() {
        // Arrange
        let params = Params::new().push("code", "61282").push("format", "json");

        // Act
        let first = api_url().generate_url(Method::Movie, &params).unwrap();
        let second = api_url().generate_url(Method::Movie, &params).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_url_contains_all_parameters() {
        // Arrange
        let params = Params::new()
            .push("code", "61282")
            .push("profile", "large")
            .push("filter", "movie")
            .push("format", "json");

        // Act
        let url = api_url().generate_url(Method::Movie, &params).unwrap();

        // Assert
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let keys: Vec<&str> = pairs.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["partner", "code", "profile", "filter", "format", "sed", "sig"],
        );
        assert!(pairs.contains(&(String::from("partner"), String::from("pkey"))));
        assert!(pairs.contains(&(String::from("format"), String::from("json"))));
        assert!(pairs.contains(&(String::from("sed"), String::from("20140418"))));
    }

    #[test]
    fn test_generate_url_encodes_query_values() {
        // Arrange: space becomes `+`, UTF-8 is percent-escaped
        let params = Params::new()
            .push("q", "la môme")
            .push("format", "json")
            .push("filter", "movie");

        // Act
        let url = api_url().generate_url(Method::Search, &params).unwrap();

        // Assert
        assert!(url.as_str().contains("&q=la+m%C3%B4me&"));
        assert!(url.as_str().ends_with("&sig=yRVvMyL%2FVkCVb1QROO6CxGA%2BLjw%3D"));
    }

    #[test]
    fn test_reordered_params_change_signature() {
        // Arrange
        let forward = Params::new().push("q", "avatar").push("format", "json");
        let reversed = Params::new().push("format", "json").push("q", "avatar");

        // Act
        let first = api_url().generate_url(Method::Search, &forward).unwrap();
        let second = api_url().generate_url(Method::Search, &reversed).unwrap();

        // Assert
        let sig = |url: &Url| {
            url.query_pairs()
                .find(|(key, _)| key == "sig")
                .map(|(_, value)| value.into_owned())
                .unwrap()
        };
        assert_ne!(sig(&first), sig(&second));
    }

    #[test]
    fn test_reserved_parameter_is_rejected() {
        // Arrange
        let params = Params::new().push("q", "avatar").push("sig", "forged");

        // Act
        let result = api_url().generate_url(Method::Search, &params);

        // Assert
        assert!(matches!(
            result,
            Err(AllocineError::InvalidRequest { ref reason }) if reason.contains("sig"),
        ));
    }

    #[test]
    fn test_sed_defaults_to_current_date() {
        // Arrange: no fixed date
        let api = ApiUrl::new("pkey", "skey", Url::parse(DEFAULT_BASE_URL).unwrap(), None);
        let params = Params::new().push("q", "avatar");

        // Act
        let url = api.generate_url(Method::Search, &params).unwrap();

        // Assert
        let sed = url
            .query_pairs()
            .find(|(key, _)| key == "sed")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        assert_eq!(sed, Utc::now().date_naive().format("%Y%m%d").to_string());
    }
}
