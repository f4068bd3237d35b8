//! Allocine API response types.
//!
//! The remote service wraps every response body in a single-key JSON object
//! (`{"feed": …}`, `{"movie": …}`, `{"tvseries": …}`, …) and encodes
//! text-bearing code pairs as `{"code": N, "$": "text"}`. The `*Infos`
//! wrapper types deserialized from those bodies memoize their derived views
//! (cast partition, poster list, synopsis, rating) per instance.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::views::{self, CastingSplit};

// --- Shared sub-objects ---

/// Code + display text pair (`{"code": 8001, "$": "Acteur"}`).
#[derive(Debug, Clone, Deserialize)]
pub struct CodeName {
    /// Numeric code.
    #[serde(default)]
    pub code: i32,
    /// Display text.
    #[serde(rename = "$", alias = "name", default)]
    pub name: Option<String>,
}

/// One casting entry: a person and their activity on the work.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    /// The credited person.
    #[serde(default)]
    pub person: Option<CodeName>,
    /// Activity code classifying the contribution (acting, directing, …).
    #[serde(default)]
    pub activity: Option<CodeName>,
}

/// Thumbnail reference of a media asset.
#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    /// Thumbnail URL.
    #[serde(default)]
    pub href: Option<String>,
}

/// Image/media asset entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    /// Media type code (e.g. 31001 = poster).
    #[serde(rename = "type", default)]
    pub media_type: Option<CodeName>,
    /// Thumbnail reference.
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

/// One bucket of the reviewer score histogram.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingStat {
    /// Score on the 0-5 scale.
    #[serde(default)]
    pub note: f32,
    /// Number of reviewers who gave this score.
    #[serde(default)]
    pub value: u32,
}

/// Rating statistics block.
#[derive(Debug, Clone, Deserialize)]
pub struct Statistics {
    /// Reviewer score histogram.
    #[serde(rename = "ratingStats", default)]
    pub rating_stats: Vec<RatingStat>,
}

/// Rich-text field: either a bare string (`striptags` responses) or a list
/// of markup fragments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HtmlText {
    /// Plain text.
    Text(String),
    /// Fragment sequence in document order.
    Fragments(Vec<HtmlFragment>),
}

/// One node of a rich-text fragment sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HtmlFragment {
    /// Bare text node.
    Text(String),
    /// Markup element; only its text content is rendered.
    Element(HtmlElement),
}

/// Markup element of a rich-text fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlElement {
    /// Rendered text content of the element.
    #[serde(rename = "$", default)]
    pub text: Option<String>,
}

/// Release information of a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release date (`YYYY-MM-DD`).
    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
}

// --- Entities ---

/// Movie entity (detail responses and search feed entries).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Movie {
    /// Allocine code identifying the movie.
    #[serde(default)]
    pub code: i32,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Original title.
    #[serde(rename = "originalTitle", default)]
    pub original_title: Option<String>,
    /// Production year.
    #[serde(rename = "productionYear", default)]
    pub production_year: Option<u32>,
    /// Runtime in seconds.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Raw synopsis (possibly HTML-fragmented).
    #[serde(default)]
    pub synopsis: Option<HtmlText>,
    /// Genres.
    #[serde(default)]
    pub genre: Vec<CodeName>,
    /// Production nationalities.
    #[serde(default)]
    pub nationality: Vec<CodeName>,
    /// Release information.
    #[serde(default)]
    pub release: Option<Release>,
    /// Cast list.
    #[serde(default)]
    pub casting: Vec<CastMember>,
    /// Media assets.
    #[serde(default)]
    pub media: Vec<Media>,
    /// Rating statistics.
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// Season reference within a TV series detail.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonRef {
    /// Allocine code of the season.
    #[serde(default)]
    pub code: i32,
    /// Season number within the series.
    #[serde(rename = "seasonNumber", default)]
    pub season_number: u32,
}

/// TV series entity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvSeries {
    /// Allocine code identifying the series.
    #[serde(default)]
    pub code: i32,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Original title.
    #[serde(rename = "originalTitle", default)]
    pub original_title: Option<String>,
    /// First air year.
    #[serde(rename = "yearStart", default)]
    pub year_start: Option<u32>,
    /// Last air year.
    #[serde(rename = "yearEnd", default)]
    pub year_end: Option<u32>,
    /// Raw synopsis.
    #[serde(default)]
    pub synopsis: Option<HtmlText>,
    /// Number of seasons.
    #[serde(rename = "seasonCount", default)]
    pub season_count: Option<u32>,
    /// Season references.
    #[serde(default)]
    pub season: Vec<SeasonRef>,
    /// Broadcasting channel.
    #[serde(rename = "originalChannel", default)]
    pub original_channel: Option<CodeName>,
    /// Cast list.
    #[serde(default)]
    pub casting: Vec<CastMember>,
    /// Media assets.
    #[serde(default)]
    pub media: Vec<Media>,
    /// Rating statistics.
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// Episode entity (detail responses and season episode lists).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Episode {
    /// Allocine code identifying the episode.
    #[serde(default)]
    pub code: i32,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Original title.
    #[serde(rename = "originalTitle", default)]
    pub original_title: Option<String>,
    /// Raw synopsis.
    #[serde(default)]
    pub synopsis: Option<HtmlText>,
    /// Episode number within the season.
    #[serde(rename = "episodeNumberSeason", default)]
    pub episode_number_season: Option<u32>,
    /// Episode number within the whole series.
    #[serde(rename = "episodeNumberSeries", default)]
    pub episode_number_series: Option<u32>,
    /// First broadcast date.
    #[serde(rename = "originalBroadcastDate", default)]
    pub original_broadcast_date: Option<String>,
    /// Parent series reference.
    #[serde(rename = "parentSeries", default)]
    pub parent_series: Option<CodeName>,
    /// Parent season reference.
    #[serde(rename = "parentSeason", default)]
    pub parent_season: Option<CodeName>,
    /// Cast list.
    #[serde(default)]
    pub casting: Vec<CastMember>,
    /// Media assets.
    #[serde(default)]
    pub media: Vec<Media>,
}

/// TV season entity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Season {
    /// Allocine code identifying the season.
    #[serde(default)]
    pub code: i32,
    /// Season number within the series.
    #[serde(rename = "seasonNumber", default)]
    pub season_number: u32,
    /// First air year.
    #[serde(rename = "yearStart", default)]
    pub year_start: Option<u32>,
    /// Last air year.
    #[serde(rename = "yearEnd", default)]
    pub year_end: Option<u32>,
    /// Raw synopsis.
    #[serde(default)]
    pub synopsis: Option<HtmlText>,
    /// Number of episodes.
    #[serde(rename = "episodeCount", default)]
    pub episode_count: Option<u32>,
    /// Parent series reference.
    #[serde(rename = "parentSeries", default)]
    pub parent_series: Option<CodeName>,
    /// Episodes of this season.
    #[serde(default)]
    pub episode: Vec<Episode>,
    /// Cast list.
    #[serde(default)]
    pub casting: Vec<CastMember>,
    /// Media assets.
    #[serde(default)]
    pub media: Vec<Media>,
    /// Rating statistics.
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// Person entity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Person {
    /// Allocine code identifying the person.
    #[serde(default)]
    pub code: i32,
    /// Person name.
    #[serde(default)]
    pub name: Option<String>,
    /// Birth date (`YYYY-MM-DD`).
    #[serde(rename = "birthDate", default)]
    pub birth_date: Option<String>,
    /// Nationalities.
    #[serde(default)]
    pub nationality: Vec<CodeName>,
    /// Known activities (acting, directing, …).
    #[serde(default)]
    pub activity: Vec<CodeName>,
    /// Raw biography (possibly HTML-fragmented).
    #[serde(default)]
    pub biography: Option<HtmlText>,
    /// Media assets.
    #[serde(default)]
    pub media: Vec<Media>,
}

// --- Search ---

/// Search response body (`{"feed": …}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Search {
    /// Result feed; absent on empty responses.
    #[serde(default)]
    pub feed: Option<Feed>,
}

/// Search result feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    /// Current page.
    #[serde(default)]
    pub page: Option<u32>,
    /// Results on this page.
    #[serde(default)]
    pub count: Option<u32>,
    /// Total matching results.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u32>,
    /// Matching movies.
    #[serde(default)]
    pub movie: Vec<Movie>,
    /// Matching TV series.
    #[serde(default)]
    pub tvseries: Vec<TvSeries>,
    /// Matching persons.
    #[serde(default)]
    pub person: Vec<Person>,
}

impl Search {
    /// Total number of matching results (0 when the feed is absent).
    #[must_use]
    pub fn total_results(&self) -> u32 {
        self.feed
            .as_ref()
            .and_then(|feed| feed.total_results)
            .unwrap_or(0)
    }

    /// Matching movies, empty when the feed is absent.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        self.feed.as_ref().map_or(&[], |feed| feed.movie.as_slice())
    }

    /// Matching TV series, empty when the feed is absent.
    #[must_use]
    pub fn tv_series(&self) -> &[TvSeries] {
        self.feed
            .as_ref()
            .map_or(&[], |feed| feed.tvseries.as_slice())
    }

    /// Matching persons, empty when the feed is absent.
    #[must_use]
    pub fn persons(&self) -> &[Person] {
        self.feed
            .as_ref()
            .map_or(&[], |feed| feed.person.as_slice())
    }
}

// --- Detail wrappers with memoized derived views ---

/// Movie detail response (`{"movie": …}`) with memoized derived views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieInfos {
    /// The wrapped movie; absent when the code was unknown.
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(skip)]
    cast_cache: OnceLock<CastingSplit>,
    #[serde(skip)]
    poster_cache: OnceLock<Vec<String>>,
    #[serde(skip)]
    synopsis_cache: OnceLock<String>,
    #[serde(skip)]
    rating_cache: OnceLock<i32>,
}

impl MovieInfos {
    /// Whether the response carries a usable movie object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.movie.as_ref().is_some_and(|movie| movie.code > 0)
    }

    /// Allocine code, `-1` when the movie is absent.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.movie.as_ref().map_or(-1, |movie| movie.code)
    }

    /// Localized title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.movie.as_ref().and_then(|movie| movie.title.as_deref())
    }

    fn cast_split(&self) -> &CastingSplit {
        self.cast_cache.get_or_init(|| {
            views::classify_cast(self.movie.as_ref().map_or(&[], |movie| movie.casting.as_slice()))
        })
    }

    /// Actor names, insertion-ordered and deduplicated.
    #[must_use]
    pub fn actors(&self) -> &[String] {
        &self.cast_split().actors
    }

    /// Director names.
    #[must_use]
    pub fn directors(&self) -> &[String] {
        &self.cast_split().directors
    }

    /// Writer and scriptwriter names.
    #[must_use]
    pub fn writers(&self) -> &[String] {
        &self.cast_split().writers
    }

    /// Poster thumbnail URLs, first-seen order.
    #[must_use]
    pub fn poster_urls(&self) -> &[String] {
        self.poster_cache.get_or_init(|| {
            views::poster_urls(self.movie.as_ref().map_or(&[], |movie| movie.media.as_slice()))
        })
    }

    /// Normalized plain-text synopsis, empty when absent.
    #[must_use]
    pub fn synopsis(&self) -> &str {
        self.synopsis_cache.get_or_init(|| {
            views::normalize_synopsis(self.movie.as_ref().and_then(|movie| movie.synopsis.as_ref()))
        })
    }

    /// Weighted user rating on a 0-100 scale, `-1` when unrated.
    #[must_use]
    pub fn rating(&self) -> i32 {
        *self.rating_cache.get_or_init(|| {
            views::rating(self.movie.as_ref().and_then(|movie| movie.statistics.as_ref()))
        })
    }
}

/// TV series detail response (`{"tvseries": …}`) with memoized derived views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvSeriesInfos {
    /// The wrapped series; absent when the code was unknown.
    #[serde(default)]
    pub tvseries: Option<TvSeries>,
    #[serde(skip)]
    cast_cache: OnceLock<CastingSplit>,
    #[serde(skip)]
    poster_cache: OnceLock<Vec<String>>,
    #[serde(skip)]
    synopsis_cache: OnceLock<String>,
    #[serde(skip)]
    rating_cache: OnceLock<i32>,
}

impl TvSeriesInfos {
    /// Whether the response carries a usable series object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.tvseries.as_ref().is_some_and(|series| series.code > 0)
    }

    /// Allocine code, `-1` when the series is absent.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.tvseries.as_ref().map_or(-1, |series| series.code)
    }

    /// Localized title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.tvseries
            .as_ref()
            .and_then(|series| series.title.as_deref())
    }

    /// Season references of this series.
    #[must_use]
    pub fn season_list(&self) -> &[SeasonRef] {
        self.tvseries
            .as_ref()
            .map_or(&[], |series| series.season.as_slice())
    }

    /// Allocine code of the season with the given number, `-1` when absent.
    #[must_use]
    pub fn season_code(&self, season_number: u32) -> i32 {
        self.season_list()
            .iter()
            .find(|season| season.season_number == season_number)
            .map_or(-1, |season| season.code)
    }

    fn cast_split(&self) -> &CastingSplit {
        self.cast_cache.get_or_init(|| {
            views::classify_cast(self.tvseries.as_ref().map_or(&[], |series| series.casting.as_slice()))
        })
    }

    /// Actor names, insertion-ordered and deduplicated.
    #[must_use]
    pub fn actors(&self) -> &[String] {
        &self.cast_split().actors
    }

    /// Director names.
    #[must_use]
    pub fn directors(&self) -> &[String] {
        &self.cast_split().directors
    }

    /// Writer and scriptwriter names.
    #[must_use]
    pub fn writers(&self) -> &[String] {
        &self.cast_split().writers
    }

    /// Poster thumbnail URLs, first-seen order.
    #[must_use]
    pub fn poster_urls(&self) -> &[String] {
        self.poster_cache.get_or_init(|| {
            views::poster_urls(self.tvseries.as_ref().map_or(&[], |series| series.media.as_slice()))
        })
    }

    /// Normalized plain-text synopsis, empty when absent.
    #[must_use]
    pub fn synopsis(&self) -> &str {
        self.synopsis_cache.get_or_init(|| {
            views::normalize_synopsis(
                self.tvseries
                    .as_ref()
                    .and_then(|series| series.synopsis.as_ref()),
            )
        })
    }

    /// Weighted user rating on a 0-100 scale, `-1` when unrated.
    #[must_use]
    pub fn rating(&self) -> i32 {
        *self.rating_cache.get_or_init(|| {
            views::rating(
                self.tvseries
                    .as_ref()
                    .and_then(|series| series.statistics.as_ref()),
            )
        })
    }
}

/// TV season detail response (`{"season": …}`) with memoized derived views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvSeasonInfos {
    /// The wrapped season; absent when the code was unknown.
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(skip)]
    cast_cache: OnceLock<CastingSplit>,
    #[serde(skip)]
    poster_cache: OnceLock<Vec<String>>,
    #[serde(skip)]
    rating_cache: OnceLock<i32>,
}

impl TvSeasonInfos {
    /// Whether the response carries a usable season object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.season.as_ref().is_some_and(|season| season.code > 0)
    }

    /// Allocine code, `-1` when the season is absent.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.season.as_ref().map_or(-1, |season| season.code)
    }

    /// Episodes of this season.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        self.season
            .as_ref()
            .map_or(&[], |season| season.episode.as_slice())
    }

    /// Allocine code of the episode with the given in-season number, `-1`
    /// when absent.
    #[must_use]
    pub fn episode_code(&self, episode_number: u32) -> i32 {
        self.episodes()
            .iter()
            .find(|episode| episode.episode_number_season == Some(episode_number))
            .map_or(-1, |episode| episode.code)
    }

    fn cast_split(&self) -> &CastingSplit {
        self.cast_cache.get_or_init(|| {
            views::classify_cast(self.season.as_ref().map_or(&[], |season| season.casting.as_slice()))
        })
    }

    /// Actor names, insertion-ordered and deduplicated.
    #[must_use]
    pub fn actors(&self) -> &[String] {
        &self.cast_split().actors
    }

    /// Director names.
    #[must_use]
    pub fn directors(&self) -> &[String] {
        &self.cast_split().directors
    }

    /// Writer and scriptwriter names.
    #[must_use]
    pub fn writers(&self) -> &[String] {
        &self.cast_split().writers
    }

    /// Poster thumbnail URLs, first-seen order.
    #[must_use]
    pub fn poster_urls(&self) -> &[String] {
        self.poster_cache.get_or_init(|| {
            views::poster_urls(self.season.as_ref().map_or(&[], |season| season.media.as_slice()))
        })
    }

    /// Weighted user rating on a 0-100 scale, `-1` when unrated.
    #[must_use]
    pub fn rating(&self) -> i32 {
        *self.rating_cache.get_or_init(|| {
            views::rating(
                self.season
                    .as_ref()
                    .and_then(|season| season.statistics.as_ref()),
            )
        })
    }
}

/// Episode detail response (`{"episode": …}`) with memoized derived views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodeInfos {
    /// The wrapped episode; absent when the code was unknown.
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(skip)]
    cast_cache: OnceLock<CastingSplit>,
    #[serde(skip)]
    poster_cache: OnceLock<Vec<String>>,
    #[serde(skip)]
    synopsis_cache: OnceLock<String>,
}

impl EpisodeInfos {
    /// Whether the response carries a usable episode object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.episode.as_ref().is_some_and(|episode| episode.code > 0)
    }

    /// Allocine code, `-1` when the episode is absent.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.episode.as_ref().map_or(-1, |episode| episode.code)
    }

    /// Localized title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.episode
            .as_ref()
            .and_then(|episode| episode.title.as_deref())
    }

    fn cast_split(&self) -> &CastingSplit {
        self.cast_cache.get_or_init(|| {
            views::classify_cast(self.episode.as_ref().map_or(&[], |episode| episode.casting.as_slice()))
        })
    }

    /// Actor names, insertion-ordered and deduplicated.
    #[must_use]
    pub fn actors(&self) -> &[String] {
        &self.cast_split().actors
    }

    /// Director names.
    #[must_use]
    pub fn directors(&self) -> &[String] {
        &self.cast_split().directors
    }

    /// Writer and scriptwriter names.
    #[must_use]
    pub fn writers(&self) -> &[String] {
        &self.cast_split().writers
    }

    /// Poster thumbnail URLs, first-seen order.
    #[must_use]
    pub fn poster_urls(&self) -> &[String] {
        self.poster_cache.get_or_init(|| {
            views::poster_urls(self.episode.as_ref().map_or(&[], |episode| episode.media.as_slice()))
        })
    }

    /// Normalized plain-text synopsis, empty when absent.
    #[must_use]
    pub fn synopsis(&self) -> &str {
        self.synopsis_cache.get_or_init(|| {
            views::normalize_synopsis(
                self.episode
                    .as_ref()
                    .and_then(|episode| episode.synopsis.as_ref()),
            )
        })
    }
}

/// Person detail response (`{"person": …}`) with memoized derived views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonInfos {
    /// The wrapped person; absent when the code was unknown.
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(skip)]
    poster_cache: OnceLock<Vec<String>>,
    #[serde(skip)]
    biography_cache: OnceLock<String>,
}

impl PersonInfos {
    /// Whether the response carries a usable person object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.person.as_ref().is_some_and(|person| person.code > 0)
    }

    /// Allocine code, `-1` when the person is absent.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.person.as_ref().map_or(-1, |person| person.code)
    }

    /// Person name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.person.as_ref().and_then(|person| person.name.as_deref())
    }

    /// Photo thumbnail URLs of poster-type media, first-seen order.
    #[must_use]
    pub fn poster_urls(&self) -> &[String] {
        self.poster_cache.get_or_init(|| {
            views::poster_urls(self.person.as_ref().map_or(&[], |person| person.media.as_slice()))
        })
    }

    /// Normalized plain-text biography, empty when absent.
    #[must_use]
    pub fn biography(&self) -> &str {
        self.biography_cache.get_or_init(|| {
            views::normalize_synopsis(
                self.person
                    .as_ref()
                    .and_then(|person| person.biography.as_ref()),
            )
        })
    }
}
