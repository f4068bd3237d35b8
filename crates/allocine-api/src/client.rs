//! `AllocineClient` - Allocine REST API client implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::api::LocalAllocineApi;
use crate::error::AllocineError;
use crate::params::{Method, Params};
use crate::sign::{ApiUrl, DEFAULT_BASE_URL};
use crate::types::{EpisodeInfos, MovieInfos, PersonInfos, Search, TvSeasonInfos, TvSeriesInfos};

/// `striptags` value shared by synopsis-bearing operations.
const STRIPTAGS_SYNOPSIS: &str = "synopsis,synopsisshort";

/// Allocine REST API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AllocineClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Signed URL builder holding the credentials.
    api_url: ApiUrl,
}

/// Builder for `AllocineClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AllocineClientBuilder {
    partner_key: Option<String>,
    secret_key: Option<String>,
    user_agent: Option<String>,
    base_url: Option<Url>,
    sed_date: Option<NaiveDate>,
}

impl AllocineClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            partner_key: None,
            secret_key: None,
            user_agent: None,
            base_url: None,
            sed_date: None,
        }
    }

    /// Sets the partner identifier (required).
    #[must_use]
    pub fn partner_key(mut self, key: impl Into<String>) -> Self {
        self.partner_key = Some(key.into());
        self
    }

    /// Sets the signing secret (required).
    #[must_use]
    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Fixes the `sed` date salt so generated URLs are fully deterministic
    /// (for tests). Defaults to today's UTC date.
    #[must_use]
    pub const fn sed_date(mut self, date: NaiveDate) -> Self {
        self.sed_date = Some(date);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `partner_key`, `secret_key`, or `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<AllocineClient> {
        let partner_key = self.partner_key.context("partner_key is required")?;
        let secret_key = self.secret_key.context("secret_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(AllocineClient {
            http_client,
            api_url: ApiUrl::new(partner_key, secret_key, base_url, self.sed_date),
        })
    }
}

impl AllocineClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> AllocineClientBuilder {
        AllocineClientBuilder::new()
    }

    /// Sends a signed GET request and maps the JSON body into `T`.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        params: &Params,
    ) -> Result<T, AllocineError> {
        let url = self.api_url.generate_url(method, params)?;

        tracing::debug!(url = %url, method = method.as_str(), "Allocine API request");

        let result = self
            .http_client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await;
        let response = result.map_err(|source| AllocineError::Transport {
            url: String::from(url.as_str()),
            source,
        })?;

        let response = response
            .error_for_status()
            .map_err(|source| AllocineError::Transport {
                url: String::from(url.as_str()),
                source,
            })?;

        let body = response
            .text()
            .await
            .map_err(|source| AllocineError::Transport {
                url: String::from(url.as_str()),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| AllocineError::Mapping {
            url: String::from(url.as_str()),
            source,
        })
    }
}

impl LocalAllocineApi for AllocineClient {
    #[instrument(skip_all)]
    async fn search_movies(&self, query: &str) -> Result<Search, AllocineError> {
        let params = Params::new()
            .push("q", query)
            .push("format", "json")
            .push("filter", "movie")
            .push("striptags", STRIPTAGS_SYNOPSIS);
        self.get_json(Method::Search, &params).await
    }

    #[instrument(skip_all)]
    async fn search_tv_series(&self, query: &str) -> Result<Search, AllocineError> {
        let params = Params::new()
            .push("q", query)
            .push("format", "json")
            .push("filter", "tvseries");
        self.get_json(Method::Search, &params).await
    }

    #[instrument(skip_all)]
    async fn search_persons(&self, query: &str) -> Result<Search, AllocineError> {
        let params = Params::new()
            .push("q", query)
            .push("format", "json")
            .push("filter", "person");
        self.get_json(Method::Search, &params).await
    }

    #[instrument(skip_all)]
    async fn movie_infos(&self, code: &str) -> Result<MovieInfos, AllocineError> {
        let params = Params::new()
            .push("code", code)
            .push("profile", "large")
            .push("filter", "movie")
            .push("format", "json");
        self.get_json(Method::Movie, &params).await
    }

    #[instrument(skip_all)]
    async fn tv_series_infos(&self, code: &str) -> Result<TvSeriesInfos, AllocineError> {
        let params = Params::new()
            .push("profile", "large")
            .push("mediafmt", "mp4-lc")
            .push("filter", "movie")
            .push("format", "json")
            .push("code", code)
            .push("striptags", STRIPTAGS_SYNOPSIS);
        self.get_json(Method::TvSeries, &params).await
    }

    #[instrument(skip_all)]
    async fn tv_season_infos(&self, season_code: u32) -> Result<TvSeasonInfos, AllocineError> {
        let params = Params::new()
            .push("profile", "large")
            .push("mediafmt", "mp4-lc")
            .push("filter", "movie")
            .push("format", "json")
            .push("code", season_code.to_string())
            .push("striptags", STRIPTAGS_SYNOPSIS);
        self.get_json(Method::Season, &params).await
    }

    #[instrument(skip_all)]
    async fn person_infos(&self, code: &str) -> Result<PersonInfos, AllocineError> {
        let params = Params::new()
            .push("profile", "large")
            .push("format", "json")
            .push("code", code)
            .push("striptags", "biography,biographyshort");
        self.get_json(Method::Person, &params).await
    }

    #[instrument(skip_all)]
    async fn episode_infos(&self, code: &str) -> Result<EpisodeInfos, AllocineError> {
        let params = Params::new()
            .push("profile", "large")
            .push("format", "json")
            .push("code", code)
            .push("striptags", STRIPTAGS_SYNOPSIS);
        self.get_json(Method::Episode, &params).await
    }
}
