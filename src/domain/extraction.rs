//! Raw extraction results as returned by the page extraction service.
//!
//! Every field is optional at every depth. Values of the wrong JSON type are
//! dropped here instead of failing deserialization, so anything object-shaped
//! turns into a `RawExtraction`.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtraction {
    #[serde(default, deserialize_with = "lenient::object")]
    pub seo: Option<RawSeo>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub headings: Option<RawHeadings>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub images: Option<Vec<RawImage>>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub links: Option<RawLinks>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub social: Option<RawSocial>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub content: Option<RawContent>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub technical: Option<RawTechnical>,
}

impl RawExtraction {
    /// Build from arbitrary JSON. Non-object input yields the empty extraction.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn word_count(&self) -> Option<f64> {
        self.content.as_ref().and_then(|c| c.word_count)
    }

    /// Fill in the word count when the extractor did not report one.
    pub fn with_fallback_word_count(mut self, words: u32) -> Self {
        if self.word_count().is_none() {
            self.content.get_or_insert_with(RawContent::default).word_count = Some(words as f64);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub meta_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub meta_keywords: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub canonical_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub robots: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub viewport: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHeadings {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub h1: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub h2: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub h3: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub h4: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub h5: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub h6: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawImage {
    #[serde(default, deserialize_with = "lenient::string")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLinks {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub internal: Option<Vec<RawLink>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub external: Option<Vec<RawLink>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLink {
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSocial {
    #[serde(default, deserialize_with = "lenient::object")]
    pub open_graph: Option<RawOpenGraph>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub twitter: Option<RawTwitter>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOpenGraph {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::string")]
    pub og_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub site_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTwitter {
    #[serde(default, deserialize_with = "lenient::string")]
    pub card: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub site: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    #[serde(default, deserialize_with = "lenient::number")]
    pub word_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub reading_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub paragraphs: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sentences: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTechnical {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub structured_data: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub hreflang: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub breadcrumbs: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub forms: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub iframes: Option<f64>,
}

/// Deserializers that coerce or drop mistyped values rather than erroring.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(parsed.filter(|v| v.is_finite()))
    }

    pub fn seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }
}
