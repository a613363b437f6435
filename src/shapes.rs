//! Declared contracts for the resource types the catalogue validates.
//!
//! [`ShapeId`] is the opaque tag a [`RequestDescriptor`] carries; the mapping
//! from tag to field set is a compile-time match, one arm per resource type.
//! Field sets mirror the client library's object models.
//!
//! [`RequestDescriptor`]: crate::catalogue::RequestDescriptor

use std::fmt;

use serde::Serialize;

use crate::Shape;

/// Tag naming the declared shape of one response type.
#[derive(Serialize, Copy, Clone, Eq, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum ShapeId {
    Configuration,
    Movie,
    MovieList,
    GenreList,
    AlternativeTitles,
    Credits,
    MovieKeywords,
    Collection,
    Company,
    Keyword,
    Person,
    Review,
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ShapeId {
    /// The declared field set for this resource type.
    pub fn shape(self) -> Shape {
        match self {
            ShapeId::Configuration => Shape::new()
                .object(
                    "images",
                    Shape::new()
                        .field("base_url")
                        .field("secure_base_url")
                        .field("backdrop_sizes")
                        .field("logo_sizes")
                        .field("poster_sizes")
                        .field("profile_sizes")
                        .field("still_sizes"),
                )
                .field("change_keys"),
            ShapeId::Movie => Shape::new()
                .field("adult")
                .field("backdrop_path")
                .field("belongs_to_collection")
                .field("budget")
                .array("genres", genre())
                .field("homepage")
                .field("id")
                .field("imdb_id")
                .field("original_language")
                .field("original_title")
                .field("overview")
                .field("popularity")
                .field("poster_path")
                .array(
                    "production_companies",
                    Shape::new()
                        .field("id")
                        .field("logo_path")
                        .field("name")
                        .field("origin_country"),
                )
                .array(
                    "production_countries",
                    Shape::new().field("iso_3166_1").field("name"),
                )
                .field("release_date")
                .field("revenue")
                .field("runtime")
                .array(
                    "spoken_languages",
                    Shape::new().field("iso_639_1").field("name"),
                )
                .field("status")
                .field("tagline")
                .field("title")
                .field("video")
                .field("vote_average")
                .field("vote_count"),
            ShapeId::MovieList => Shape::new()
                .field("page")
                .array("results", movie_result())
                .field("total_pages")
                .field("total_results"),
            ShapeId::GenreList => Shape::new().array("genres", genre()),
            ShapeId::AlternativeTitles => Shape::new().field("id").array(
                "titles",
                Shape::new().field("iso_3166_1").field("title"),
            ),
            ShapeId::Credits => Shape::new()
                .field("id")
                .array(
                    "cast",
                    Shape::new()
                        .field("cast_id")
                        .field("character")
                        .field("credit_id")
                        .field("id")
                        .field("name")
                        .field("order")
                        .field("profile_path"),
                )
                .array(
                    "crew",
                    Shape::new()
                        .field("credit_id")
                        .field("department")
                        .field("id")
                        .field("job")
                        .field("name")
                        .field("profile_path"),
                ),
            ShapeId::MovieKeywords => Shape::new().field("id").array("keywords", genre()),
            ShapeId::Collection => Shape::new()
                .field("id")
                .field("name")
                .field("overview")
                .field("poster_path")
                .field("backdrop_path")
                .array("parts", movie_result()),
            ShapeId::Company => Shape::new()
                .field("description")
                .field("headquarters")
                .field("homepage")
                .field("id")
                .field("logo_path")
                .field("name")
                .field("parent_company"),
            ShapeId::Keyword => Shape::new().field("id").field("name"),
            ShapeId::Person => Shape::new()
                .field("adult")
                .field("also_known_as")
                .field("biography")
                .field("birthday")
                .field("deathday")
                .field("homepage")
                .field("id")
                .field("imdb_id")
                .field("name")
                .field("place_of_birth")
                .field("popularity")
                .field("profile_path"),
            ShapeId::Review => Shape::new()
                .field("id")
                .field("author")
                .field("content")
                .field("iso_639_1")
                .field("media_id")
                .field("media_title")
                .field("media_type")
                .field("url"),
        }
    }
}

fn genre() -> Shape {
    Shape::new().field("id").field("name")
}

fn movie_result() -> Shape {
    Shape::new()
        .field("adult")
        .field("backdrop_path")
        .field("genre_ids")
        .field("id")
        .field("original_language")
        .field("original_title")
        .field("overview")
        .field("popularity")
        .field("poster_path")
        .field("release_date")
        .field("title")
        .field("video")
        .field("vote_average")
        .field("vote_count")
}
