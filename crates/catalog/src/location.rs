use std::borrow::Cow;

use foundation::math::LatLon;
use serde::{Deserialize, Serialize};

pub const HEADQUARTERS: &str = "headquarters";

/// What a location is: the company's own site or a hosting provider's.
///
/// Serialized as a bare string; anything other than `"headquarters"` is a
/// provider identifier. Unknown providers are kept, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Headquarters,
    Provider(Cow<'static, str>),
}

impl Category {
    pub const fn provider(id: &'static str) -> Self {
        Category::Provider(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Headquarters => HEADQUARTERS,
            Category::Provider(id) => id,
        }
    }

    pub fn is_headquarters(&self) -> bool {
        matches!(self, Category::Headquarters)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(HEADQUARTERS) {
            Category::Headquarters
        } else {
            Category::Provider(Cow::Owned(trimmed.to_ascii_lowercase()))
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named site on the globe. Immutable once catalogued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: Cow<'static, str>,
    /// Degrees.
    pub lat: f64,
    /// Degrees.
    pub lon: f64,
    pub category: Category,
    /// Display name of the provider (or "Headquarters").
    pub provider: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Cow<'static, str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Cow<'static, str>>,
}

impl Location {
    pub const fn site(
        name: &'static str,
        lat: f64,
        lon: f64,
        category: Category,
        provider: &'static str,
        city: &'static str,
        country: &'static str,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            lat,
            lon,
            category,
            provider: Cow::Borrowed(provider),
            city: Some(Cow::Borrowed(city)),
            country: Some(Cow::Borrowed(country)),
        }
    }

    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}
