use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Distinguishes an absent field from an explicit `null`: a missing key
/// deserializes to `None` (via `#[serde(default)]`), a present key — even a
/// null one — to `Some(_)`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Plain-text preview for note listings: markup tags stripped, first 120
/// characters.
pub fn preview(content: &str) -> String {
    let mut out = String::new();
    let mut len = 0;
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => {
                out.push(c);
                len += 1;
                if len >= 120 {
                    break;
                }
            }
            _ => {}
        }
    }
    out
}
