//! `AllocineApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::AllocineError;
use crate::types::{EpisodeInfos, MovieInfos, PersonInfos, Search, TvSeasonInfos, TvSeriesInfos};

/// Allocine API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(AllocineApi: Send)]
pub trait LocalAllocineApi {
    /// Searches for movies matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn search_movies(&self, query: &str) -> Result<Search, AllocineError>;

    /// Searches for TV series matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn search_tv_series(&self, query: &str) -> Result<Search, AllocineError>;

    /// Searches for persons matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn search_persons(&self, query: &str) -> Result<Search, AllocineError>;

    /// Fetches movie details for an Allocine code.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn movie_infos(&self, code: &str) -> Result<MovieInfos, AllocineError>;

    /// Fetches TV series details, including the season list.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn tv_series_infos(&self, code: &str) -> Result<TvSeriesInfos, AllocineError>;

    /// Fetches TV season details, including the episode list.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn tv_season_infos(&self, season_code: u32) -> Result<TvSeasonInfos, AllocineError>;

    /// Fetches person details.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn person_infos(&self, code: &str) -> Result<PersonInfos, AllocineError>;

    /// Fetches episode details.
    ///
    /// # Errors
    ///
    /// Returns an error if URL construction, the HTTP request, or JSON
    /// mapping fails.
    async fn episode_infos(&self, code: &str) -> Result<EpisodeInfos, AllocineError>;
}
