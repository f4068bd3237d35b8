//! Typed client for the Allocine REST API.
//!
//! Builds signed request URLs (partner key + SHA-1 signature), issues HTTP
//! GET requests, and maps the JSON responses into typed model objects with
//! derived convenience views (cast partitioning, rating normalization,
//! synopsis flattening, poster extraction).

mod api;
mod client;
mod error;
mod params;
mod sign;
mod types;
mod views;

#[allow(clippy::module_name_repetitions)]
pub use api::{AllocineApi, LocalAllocineApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{AllocineClient, AllocineClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::AllocineError;
pub use params::{Method, Params};
pub use types::{
    CastMember, CodeName, Episode, EpisodeInfos, Feed, HtmlElement, HtmlFragment, HtmlText, Media,
    Movie, MovieInfos, Person, PersonInfos, RatingStat, Release, Search, Season, SeasonRef,
    Statistics, Thumbnail, TvSeasonInfos, TvSeries, TvSeriesInfos,
};
pub use views::CastingSplit;
