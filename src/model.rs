//! The movie record and its JSON shape.
//!
//! ```json
//! {"id":"1","isbn":"12345","title":"Inception","director":{"firstname":"Christopher","lastname":"Nolan"}}
//! ```
//!
//! Decoding follows the rules clients of the service already rely on:
//!
//! - keys match field names ignoring ASCII case (`"ID"` fills `id`);
//! - when a key repeats, the last occurrence wins;
//! - unknown keys are skipped, and missing keys leave the zero value;
//! - `null` leaves a text field untouched, and clears `director`.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A movie's director. Has no identity of its own; equal by value.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Director {
    pub firstname: String,
    pub lastname: String,
}

/// A movie record.
///
/// `id` is the lookup key, supplied by the caller. It is never generated,
/// validated, or checked for uniqueness.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Movie {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub director: Option<Director>,
}

impl Director {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self { firstname: firstname.into(), lastname: lastname.into() }
    }
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        isbn: impl Into<String>,
        title: impl Into<String>,
        director: Option<Director>,
    ) -> Self {
        Self { id: id.into(), isbn: isbn.into(), title: title.into(), director }
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Reads the next value as an optional string and stores it unless it was `null`.
fn assign_text<'de, A: MapAccess<'de>>(map: &mut A, field: &mut String) -> Result<(), A::Error> {
    if let Some(text) = map.next_value::<Option<String>>()? {
        *field = text;
    }
    Ok(())
}

impl<'de> Deserialize<'de> for Director {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectorVisitor;

        impl<'de> Visitor<'de> for DirectorVisitor {
            type Value = Director;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a director object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Director, A::Error> {
                let mut director = Director::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("firstname") {
                        assign_text(&mut map, &mut director.firstname)?;
                    } else if key.eq_ignore_ascii_case("lastname") {
                        assign_text(&mut map, &mut director.lastname)?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(director)
            }
        }

        deserializer.deserialize_map(DirectorVisitor)
    }
}

impl<'de> Deserialize<'de> for Movie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MovieVisitor;

        impl<'de> Visitor<'de> for MovieVisitor {
            type Value = Movie;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a movie object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Movie, A::Error> {
                let mut movie = Movie::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("id") {
                        assign_text(&mut map, &mut movie.id)?;
                    } else if key.eq_ignore_ascii_case("isbn") {
                        assign_text(&mut map, &mut movie.isbn)?;
                    } else if key.eq_ignore_ascii_case("title") {
                        assign_text(&mut map, &mut movie.title)?;
                    } else if key.eq_ignore_ascii_case("director") {
                        movie.director = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(movie)
            }
        }

        deserializer.deserialize_map(MovieVisitor)
    }
}
