//! The post record and the request body that creates or replaces one.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored post. `id` is assigned by the registry and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub rating: Option<i64>,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
///
/// `published` defaults to `true` and `rating` to `null`; unknown fields are
/// ignored. Both optional fields are read leniently (see [`lax`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,

    #[serde(default = "default_published", deserialize_with = "lax::boolean")]
    pub published: bool,

    #[serde(default, deserialize_with = "lax::optional_int")]
    pub rating: Option<i64>,
}

fn default_published() -> bool {
    true
}

/// Lenient scalar readers for client-supplied fields.
///
/// Booleans accept `true`/`false`, the integers `0`/`1`, and the strings
/// `0 off f false n no` / `1 on t true y yes` (case-insensitive). Integers
/// accept integral numbers, floats with no fractional part, and decimal
/// integer strings. Anything else is a data error.
pub mod lax {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_json::{Number, Value};

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Value::deserialize(d)? {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(D::Error::custom(format!("`{n}` is not a valid boolean"))),
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "0" | "off" | "f" | "false" | "n" | "no" => Ok(false),
                "1" | "on" | "t" | "true" | "y" | "yes" => Ok(true),
                _ => Err(D::Error::custom(format!("{s:?} is not a valid boolean"))),
            },
            other => Err(D::Error::custom(format!("expected a boolean, got {other}"))),
        }
    }

    pub fn optional_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::Number(n) => integral(&n)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("`{n}` is not a valid integer"))),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("{s:?} is not a valid integer"))),
            other => Err(D::Error::custom(format!("expected an integer, got {other}"))),
        }
    }

    fn integral(n: &Number) -> Option<i64> {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
        let f = n.as_f64()?;
        let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
        (f.fract() == 0.0 && in_range).then_some(f as i64)
    }
}

impl PostInput {
    /// Published, unrated input.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            published: true,
            rating: None,
        }
    }

    pub fn rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub(crate) fn into_post(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            published: self.published,
            rating: self.rating,
        }
    }
}
