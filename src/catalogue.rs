//! The hardcoded catalogue of API endpoints to probe.
//!
//! Each entry is an immutable [`RequestDescriptor`] naming a category, a path
//! with all identifiers already resolved, the HTTP method, an ordered
//! parameter list, and optionally the declared shape the response is expected
//! to match. The catalogue is built once per run and consumed sequentially.

use std::fmt;

use serde::Serialize;

use crate::shapes::ShapeId;

/// Stable identifiers of well-known fixture records, used so every run probes
/// the same documents.
const ID_AVATAR: u32 = 19995;
const ID_BRUCE_WILLIS: u32 = 62;
const ID_BRUCE_WILLIS_MIAMI_VICE: &str = "525719bb760ee3776a1835d3";
const ID_TWENTIETH_CENTURY_FOX: u32 = 25;
const ID_JAMES_BOND_COLLECTION: u32 = 645;
const ID_GENRE_ACTION: u32 = 28;
const ID_KEYWORD_ROGUE: u32 = 186447;
const ID_DARK_KNIGHT_RISES_REVIEW: &str = "5010553819c2952d1b000451";

const SESSION_ID: &str = "c413282cdadad9af972c06d9b13096a8b13ab1c1";
const ACCOUNT_ID: &str = "6089455";

/// The HTTP methods the catalogue uses.
#[derive(Serialize, Copy, Clone, Eq, PartialEq, Debug)]
pub enum Method {
    /// Parameters travel as a URL query string.
    Get,
    /// Parameters travel as a JSON object request body.
    Post,
}

impl Method {
    /// The method's wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One endpoint to fetch and diff.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct RequestDescriptor {
    /// Reporting/storage category, e.g. `Movies`.
    pub category: &'static str,
    /// Resolved request path, e.g. `/movie/19995/credits`.
    pub path: String,
    /// HTTP method to use.
    pub method: Method,
    /// Ordered request parameters, not including the API key.
    pub params: Vec<(String, String)>,
    /// Declared shape of the response, when one is known.
    pub shape: Option<ShapeId>,
}

impl RequestDescriptor {
    /// A GET descriptor with no parameters.
    pub fn get(category: &'static str, path: impl Into<String>) -> Self {
        RequestDescriptor {
            category,
            path: path.into(),
            method: Method::Get,
            params: Vec::new(),
            shape: None,
        }
    }

    /// A POST descriptor with no parameters.
    pub fn post(category: &'static str, path: impl Into<String>) -> Self {
        RequestDescriptor {
            method: Method::Post,
            ..Self::get(category, path)
        }
    }

    /// Append one request parameter.
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Attach the declared shape of the expected response.
    pub fn shaped(mut self, shape: ShapeId) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// Movie sub-resources, with an explicit mapping to their wire names.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum MovieMethod {
    AlternativeTitles,
    Credits,
    Images,
    Keywords,
    ReleaseDates,
    Videos,
    Translations,
    Similar,
    Reviews,
    Lists,
    Changes,
}

impl MovieMethod {
    /// Every movie sub-resource the catalogue probes, in catalogue order.
    pub const ALL: [MovieMethod; 11] = [
        MovieMethod::AlternativeTitles,
        MovieMethod::Credits,
        MovieMethod::Images,
        MovieMethod::Keywords,
        MovieMethod::ReleaseDates,
        MovieMethod::Videos,
        MovieMethod::Translations,
        MovieMethod::Similar,
        MovieMethod::Reviews,
        MovieMethod::Lists,
        MovieMethod::Changes,
    ];

    /// The path segment for this sub-resource.
    pub fn wire_name(self) -> &'static str {
        match self {
            MovieMethod::AlternativeTitles => "alternative_titles",
            MovieMethod::Credits => "credits",
            MovieMethod::Images => "images",
            MovieMethod::Keywords => "keywords",
            MovieMethod::ReleaseDates => "release_dates",
            MovieMethod::Videos => "videos",
            MovieMethod::Translations => "translations",
            MovieMethod::Similar => "similar",
            MovieMethod::Reviews => "reviews",
            MovieMethod::Lists => "lists",
            MovieMethod::Changes => "changes",
        }
    }

    fn shape(self) -> Option<ShapeId> {
        match self {
            MovieMethod::AlternativeTitles => Some(ShapeId::AlternativeTitles),
            MovieMethod::Credits => Some(ShapeId::Credits),
            MovieMethod::Keywords => Some(ShapeId::MovieKeywords),
            _ => None,
        }
    }
}

/// Person sub-resources, with an explicit mapping to their wire names.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum PersonMethod {
    MovieCredits,
    TvCredits,
    CombinedCredits,
    ExternalIds,
    Images,
    TaggedImages,
    Changes,
}

impl PersonMethod {
    /// Every person sub-resource the catalogue probes, in catalogue order.
    pub const ALL: [PersonMethod; 7] = [
        PersonMethod::MovieCredits,
        PersonMethod::TvCredits,
        PersonMethod::CombinedCredits,
        PersonMethod::ExternalIds,
        PersonMethod::Images,
        PersonMethod::TaggedImages,
        PersonMethod::Changes,
    ];

    /// The path segment for this sub-resource.
    pub fn wire_name(self) -> &'static str {
        match self {
            PersonMethod::MovieCredits => "movie_credits",
            PersonMethod::TvCredits => "tv_credits",
            PersonMethod::CombinedCredits => "combined_credits",
            PersonMethod::ExternalIds => "external_ids",
            PersonMethod::Images => "images",
            PersonMethod::TaggedImages => "tagged_images",
            PersonMethod::Changes => "changes",
        }
    }
}

/// Build the full endpoint catalogue, in reporting order.
pub fn endpoints() -> Vec<RequestDescriptor> {
    let mut list = Vec::new();

    // Configuration
    list.push(
        RequestDescriptor::get("Configuration", "/configuration").shaped(ShapeId::Configuration),
    );

    // Account
    list.push(account("/account"));
    for sub in [
        "lists",
        "favorite/movies",
        "favorite/tv",
        "rated/movies",
        "rated/tv",
        "rated/tv/episodes",
        "watchlist/movies",
        "watchlist/tv",
    ] {
        list.push(account(&format!("/account/{ACCOUNT_ID}/{sub}")));
    }

    // Certifications
    list.push(RequestDescriptor::get("Certifications", "/certification/movie/list"));
    list.push(RequestDescriptor::get("Certifications", "/certification/tv/list"));

    // Changes
    for media in ["movie", "person", "tv"] {
        list.push(RequestDescriptor::get("Changes", format!("/{media}/changes")));
    }

    // Collections
    list.push(
        RequestDescriptor::get("Collections", format!("/collection/{ID_JAMES_BOND_COLLECTION}"))
            .shaped(ShapeId::Collection),
    );
    list.push(RequestDescriptor::get(
        "Collections",
        format!("/collection/{ID_JAMES_BOND_COLLECTION}/images"),
    ));

    // Companies
    list.push(
        RequestDescriptor::get("Companies", format!("/company/{ID_TWENTIETH_CENTURY_FOX}"))
            .shaped(ShapeId::Company),
    );
    list.push(RequestDescriptor::get(
        "Companies",
        format!("/company/{ID_TWENTIETH_CENTURY_FOX}/movies"),
    ));

    // Credits
    list.push(RequestDescriptor::get(
        "Credits",
        format!("/credit/{ID_BRUCE_WILLIS_MIAMI_VICE}"),
    ));

    // Discover
    list.push(RequestDescriptor::get("Discover", "/discover/movie").shaped(ShapeId::MovieList));
    list.push(RequestDescriptor::get("Discover", "/discover/tv"));

    // Genres
    list.push(RequestDescriptor::get("Genres", "/genre/movie/list").shaped(ShapeId::GenreList));
    list.push(RequestDescriptor::get("Genres", "/genre/tv/list").shaped(ShapeId::GenreList));
    list.push(
        RequestDescriptor::get("Genres", format!("/genre/{ID_GENRE_ACTION}/movies"))
            .shaped(ShapeId::MovieList),
    );

    // Jobs
    list.push(RequestDescriptor::get("Jobs", "/job/list"));

    // Keywords
    list.push(
        RequestDescriptor::get("Keywords", format!("/keyword/{ID_KEYWORD_ROGUE}"))
            .shaped(ShapeId::Keyword),
    );
    list.push(RequestDescriptor::get(
        "Keywords",
        format!("/keyword/{ID_KEYWORD_ROGUE}/movies"),
    ));

    // Movies
    list.push(RequestDescriptor::get("Movies", format!("/movie/{ID_AVATAR}")).shaped(ShapeId::Movie));
    for method in MovieMethod::ALL {
        let mut descriptor = RequestDescriptor::get(
            "Movies",
            format!("/movie/{ID_AVATAR}/{}", method.wire_name()),
        );
        descriptor.shape = method.shape();
        list.push(descriptor);
    }
    list.push(RequestDescriptor::get("Movies", "/movie/latest").shaped(ShapeId::Movie));
    for feed in ["now_playing", "popular", "top_rated", "upcoming"] {
        list.push(RequestDescriptor::get("Movies", format!("/movie/{feed}")).shaped(ShapeId::MovieList));
    }

    // Networks
    list.push(RequestDescriptor::get("Networks", format!("/network/{ID_TWENTIETH_CENTURY_FOX}")));

    // People
    list.push(
        RequestDescriptor::get("People", format!("/person/{ID_BRUCE_WILLIS}"))
            .shaped(ShapeId::Person),
    );
    for method in PersonMethod::ALL {
        list.push(RequestDescriptor::get(
            "People",
            format!("/person/{ID_BRUCE_WILLIS}/{}", method.wire_name()),
        ));
    }
    list.push(RequestDescriptor::get("People", "/person/popular"));
    list.push(RequestDescriptor::get("People", "/person/latest"));

    // Reviews
    list.push(
        RequestDescriptor::get("Reviews", format!("/review/{ID_DARK_KNIGHT_RISES_REVIEW}"))
            .shaped(ShapeId::Review),
    );

    // Search
    for (target, query) in [
        ("company", "hbo"),
        ("collection", "james"),
        ("keyword", "tower"),
        ("list", "james"),
        ("movie", "james"),
        ("multi", "james"),
        ("person", "bruce"),
        ("tv", "house"),
    ] {
        let mut descriptor =
            RequestDescriptor::get("Search", format!("/search/{target}")).param("query", query);
        if target == "movie" {
            descriptor = descriptor.shaped(ShapeId::MovieList);
        }
        list.push(descriptor);
    }

    // Timezones
    list.push(RequestDescriptor::get("Timezones", "/timezones/list"));

    list
}

fn account(path: &str) -> RequestDescriptor {
    RequestDescriptor::get("Account", path).param("session_id", SESSION_ID)
}
