//! Derived read-only views over Allocine response objects.
//!
//! Pure, single-pass projections of the nested JSON object graph: cast
//! partitioning by activity code, weighted rating normalization, synopsis
//! flattening, and poster URL extraction. The `*Infos` wrapper types in
//! [`crate::types`] memoize these per instance.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{CastMember, HtmlFragment, HtmlText, Media, Statistics};

/// Activity code for actors.
const ACTOR_ACTIVITY_CODE: i32 = 8001;
/// Activity code for directors.
const DIRECTOR_ACTIVITY_CODE: i32 = 8002;
/// Activity code for writers.
const WRITER_ACTIVITY_CODE: i32 = 8004;
/// Activity code for scriptwriters (folded into the writer bucket).
const SCRIPT_ACTIVITY_CODE: i32 = 8043;

/// Media type code for poster images.
const POSTER_MEDIA_CODE: i32 = 31001;

#[allow(clippy::expect_used)]
static CR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r+").expect("failed to compile CR regex"));
#[allow(clippy::expect_used)]
static LF_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("failed to compile LF regex"));
#[allow(clippy::expect_used)]
static WS_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("failed to compile whitespace regex"));

/// Cast member names partitioned by activity, insertion-ordered and
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastingSplit {
    /// Actors (activity code 8001).
    pub actors: Vec<String>,
    /// Directors (activity code 8002).
    pub directors: Vec<String>,
    /// Writers (8004) and scriptwriters (8043), scriptwriters last.
    pub writers: Vec<String>,
}

/// Appends `name` unless the bucket already holds it.
fn push_unique(bucket: &mut Vec<String>, name: String) {
    if !bucket.contains(&name) {
        bucket.push(name);
    }
}

/// Partitions a cast list by activity code.
///
/// Entries with an unrecognized activity code, or without a person name, are
/// dropped silently: the projection is intentionally lossy. Scriptwriters
/// join the writer bucket after all credited writers.
#[must_use]
pub fn classify_cast(casting: &[CastMember]) -> CastingSplit {
    let mut split = CastingSplit::default();
    let mut scripts: Vec<String> = Vec::new();

    for member in casting {
        let Some(code) = member.activity.as_ref().map(|activity| activity.code) else {
            continue;
        };
        let Some(name) = member.person.as_ref().and_then(|person| person.name.clone()) else {
            continue;
        };
        match code {
            ACTOR_ACTIVITY_CODE => push_unique(&mut split.actors, name),
            DIRECTOR_ACTIVITY_CODE => push_unique(&mut split.directors, name),
            WRITER_ACTIVITY_CODE => push_unique(&mut split.writers, name),
            SCRIPT_ACTIVITY_CODE => push_unique(&mut scripts, name),
            _ => {}
        }
    }

    for name in scripts {
        push_unique(&mut split.writers, name);
    }
    split
}

/// Computes the weighted mean of the reviewer score histogram, scaled from
/// the 0-5 note scale to 0-100.
///
/// Returns `-1` when no statistics are present or no votes were cast.
#[must_use]
pub fn rating(statistics: Option<&Statistics>) -> i32 {
    let Some(stats) = statistics else {
        return -1;
    };

    let mut weighted = 0.0_f64;
    let mut votes = 0.0_f64;
    for stat in &stats.rating_stats {
        weighted += f64::from(stat.note) * f64::from(stat.value);
        votes += f64::from(stat.value);
    }
    if votes <= 0.0 {
        return -1;
    }

    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    {
        (weighted / votes / 5.0 * 100.0).round() as i32
    }
}

/// Flattens a rich-text synopsis into normalized plain text.
///
/// Concatenates the text content of every fragment in document order (markup
/// elements contribute only their text), then collapses CR runs to a newline,
/// newline runs to a space, all whitespace runs to a single space, and trims.
#[must_use]
pub fn normalize_synopsis(synopsis: Option<&HtmlText>) -> String {
    let mut flat = String::new();
    match synopsis {
        None => {}
        Some(HtmlText::Text(text)) => flat.push_str(text),
        Some(HtmlText::Fragments(fragments)) => {
            for fragment in fragments {
                match fragment {
                    HtmlFragment::Text(text) => flat.push_str(text),
                    HtmlFragment::Element(element) => {
                        if let Some(text) = &element.text {
                            flat.push_str(text);
                        }
                    }
                }
            }
        }
    }

    let flat = CR_RUNS.replace_all(&flat, "\n");
    let flat = LF_RUNS.replace_all(&flat, " ");
    let flat = WS_RUNS.replace_all(&flat, " ");
    flat.trim().to_owned()
}

/// Collects thumbnail URLs of poster-type media entries, first-seen order,
/// deduplicated.
#[must_use]
pub fn poster_urls(media: &[Media]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for entry in media {
        let is_poster = entry
            .media_type
            .as_ref()
            .is_some_and(|media_type| media_type.code == POSTER_MEDIA_CODE);
        if !is_poster {
            continue;
        }
        let Some(href) = entry.thumbnail.as_ref().and_then(|thumb| thumb.href.clone()) else {
            continue;
        };
        push_unique(&mut urls, href);
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CodeName, HtmlElement, RatingStat, Thumbnail};

    fn member(name: &str, activity_code: i32) -> CastMember {
        CastMember {
            person: Some(CodeName {
                code: 0,
                name: Some(String::from(name)),
            }),
            activity: Some(CodeName {
                code: activity_code,
                name: None,
            }),
        }
    }

    fn poster(href: &str, type_code: i32) -> Media {
        Media {
            media_type: Some(CodeName {
                code: type_code,
                name: None,
            }),
            thumbnail: Some(Thumbnail {
                href: Some(String::from(href)),
            }),
        }
    }

    #[test]
    fn test_classify_cast_partitions_by_activity() {
        // Arrange
        let casting = vec![
            member("A", 8001),
            member("B", 8002),
            member("C", 8004),
            member("D", 8043),
            member("E", 8001),
        ];

        // Act
        let split = classify_cast(&casting);

        // Assert: scriptwriters are folded into writers
        assert_eq!(split.actors, vec!["A", "E"]);
        assert_eq!(split.directors, vec!["B"]);
        assert_eq!(split.writers, vec!["C", "D"]);
    }

    #[test]
    fn test_classify_cast_deduplicates_preserving_order() {
        // Arrange
        let casting = vec![member("A", 8001), member("B", 8001), member("A", 8001)];

        // Act
        let split = classify_cast(&casting);

        // Assert
        assert_eq!(split.actors, vec!["A", "B"]);
    }

    #[test]
    fn test_classify_cast_drops_unknown_activities() {
        // Arrange: 8029 is a camera activity, not part of the projection
        let casting = vec![member("A", 8029), member("B", 8001)];

        // Act
        let split = classify_cast(&casting);

        // Assert
        assert_eq!(split.actors, vec!["B"]);
        assert!(split.directors.is_empty());
        assert!(split.writers.is_empty());
    }

    #[test]
    fn test_classify_cast_skips_members_without_person_name() {
        // Arrange
        let nameless = CastMember {
            person: None,
            activity: Some(CodeName {
                code: 8001,
                name: None,
            }),
        };

        // Act
        let split = classify_cast(&[nameless]);

        // Assert
        assert!(split.actors.is_empty());
    }

    #[test]
    fn test_classify_cast_script_joins_writers_after_credited_writers() {
        // Arrange: script entry appears before the writer entry
        let casting = vec![member("S", 8043), member("W", 8004)];

        // Act
        let split = classify_cast(&casting);

        // Assert
        assert_eq!(split.writers, vec!["W", "S"]);
    }

    #[test]
    fn test_rating_empty_is_sentinel() {
        // Arrange
        let stats = Statistics {
            rating_stats: vec![],
        };

        // Act & Assert
        assert_eq!(rating(Some(&stats)), -1);
        assert_eq!(rating(None), -1);
    }

    #[test]
    fn test_rating_zero_votes_is_sentinel() {
        // Arrange
        let stats = Statistics {
            rating_stats: vec![RatingStat {
                note: 4.0,
                value: 0,
            }],
        };

        // Act & Assert
        assert_eq!(rating(Some(&stats)), -1);
    }

    #[test]
    fn test_rating_single_bucket() {
        // Arrange
        let stats = Statistics {
            rating_stats: vec![RatingStat {
                note: 4.0,
                value: 10,
            }],
        };

        // Act & Assert: 4.0 / 5 * 100 = 80
        assert_eq!(rating(Some(&stats)), 80);
    }

    #[test]
    fn test_rating_weighted_mean() {
        // Arrange
        let stats = Statistics {
            rating_stats: vec![
                RatingStat {
                    note: 5.0,
                    value: 1,
                },
                RatingStat {
                    note: 0.0,
                    value: 1,
                },
            ],
        };

        // Act & Assert: mean 2.5 / 5 * 100 = 50
        assert_eq!(rating(Some(&stats)), 50);
    }

    #[test]
    fn test_rating_rounds_to_nearest() {
        // Arrange: mean 4.33... -> 86.66... -> 87
        let stats = Statistics {
            rating_stats: vec![
                RatingStat {
                    note: 5.0,
                    value: 2,
                },
                RatingStat {
                    note: 3.0,
                    value: 1,
                },
            ],
        };

        // Act & Assert
        assert_eq!(rating(Some(&stats)), 87);
    }

    #[test]
    fn test_normalize_synopsis_whitespace_law() {
        // Arrange: CR runs -> newline, newline runs -> space, collapse, trim
        let synopsis = HtmlText::Fragments(vec![
            HtmlFragment::Text(String::from("Hello\r\n\r\nWorld")),
            HtmlFragment::Text(String::from("  foo   bar  ")),
        ]);

        // Act & Assert
        assert_eq!(normalize_synopsis(Some(&synopsis)), "Hello World foo bar");
    }

    #[test]
    fn test_normalize_synopsis_takes_element_text_content() {
        // Arrange: markup tags contribute only their rendered text
        let synopsis = HtmlText::Fragments(vec![
            HtmlFragment::Text(String::from("Un film de ")),
            HtmlFragment::Element(HtmlElement {
                text: Some(String::from("James Cameron")),
            }),
            HtmlFragment::Text(String::from(".")),
        ]);

        // Act & Assert
        assert_eq!(
            normalize_synopsis(Some(&synopsis)),
            "Un film de James Cameron."
        );
    }

    #[test]
    fn test_normalize_synopsis_plain_string() {
        // Arrange
        let synopsis = HtmlText::Text(String::from("  Sur Pandora,\rdes humains  "));

        // Act & Assert
        assert_eq!(
            normalize_synopsis(Some(&synopsis)),
            "Sur Pandora, des humains"
        );
    }

    #[test]
    fn test_normalize_synopsis_empty_is_empty_string() {
        // Arrange & Act & Assert
        assert_eq!(normalize_synopsis(None), "");
        assert_eq!(
            normalize_synopsis(Some(&HtmlText::Fragments(vec![]))),
            ""
        );
    }

    #[test]
    fn test_poster_urls_filters_and_deduplicates() {
        // Arrange: 31006 is a photo type, excluded entirely
        let media = vec![
            poster("http://img/a.jpg", 31001),
            poster("http://img/b.jpg", 31006),
            poster("http://img/c.jpg", 31001),
            poster("http://img/a.jpg", 31001),
        ];

        // Act
        let urls = poster_urls(&media);

        // Assert: first-seen order, duplicates dropped
        assert_eq!(urls, vec!["http://img/a.jpg", "http://img/c.jpg"]);
    }

    #[test]
    fn test_poster_urls_skips_entries_without_thumbnail() {
        // Arrange
        let media = vec![Media {
            media_type: Some(CodeName {
                code: 31001,
                name: None,
            }),
            thumbnail: None,
        }];

        // Act & Assert
        assert!(poster_urls(&media).is_empty());
    }
}
