//! Allocine API request methods and ordered parameter lists.

/// Query parameter names appended by the URL builder itself. Caller
/// parameters must not use these names.
pub(crate) const RESERVED_PARAMS: [&str; 3] = ["partner", "sed", "sig"];

/// Operation selector for the Allocine REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Full-text search (movies, TV series, persons).
    Search,
    /// Movie detail.
    Movie,
    /// TV series detail.
    TvSeries,
    /// TV season detail.
    Season,
    /// Episode detail.
    Episode,
    /// Person detail.
    Person,
}

impl Method {
    /// Path segment appended to the API base URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Movie => "movie",
            Self::TvSeries => "tvseries",
            Self::Season => "season",
            Self::Episode => "episode",
            Self::Person => "person",
        }
    }
}

/// Ordered request parameter list.
///
/// Insertion order is preserved: the request signature is computed over the
/// concatenated `&key=value` string, so reordering parameters changes the
/// signature and the server rejects the request.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter, keeping insertion order.
    #[must_use]
    pub fn push(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }
}
