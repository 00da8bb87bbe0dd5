use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::catalog::urdu_for;

lazy_static! {
    static ref SIZE_SUFFIX: Regex = Regex::new(r"(?i)\s*\((small|normal|large)\)\s*$").unwrap();
    static ref TRAILING_PAREN: Regex = Regex::new(r"\(([^)]+)\)\s*$").unwrap();
}

/// Size modifier a customer picks next to an item.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum Size {
    Small,
    #[default]
    Normal,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Normal, Size::Large];

    pub fn from_strng(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "small" => Some(Size::Small),
            "normal" => Some(Size::Normal),
            "large" => Some(Size::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Normal => "Normal",
            Size::Large => "Large",
        }
    }

    /// Phrase appended to the English name on the invoice.
    pub fn english_phrase(&self) -> Option<&'static str> {
        match self {
            Size::Small => Some("small size"),
            Size::Normal => None,
            Size::Large => Some("big size"),
        }
    }

    /// Phrase appended to the Urdu name on the invoice.
    pub fn urdu_phrase(&self) -> Option<&'static str> {
        match self {
            Size::Small => Some("چھوٹا سائز"),
            Size::Normal => None,
            Size::Large => Some("بڑا سائز"),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three parts packed into a display string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedItem {
    pub english: String,
    pub urdu: String,
    pub size: Size,
}

/// Split a display string such as `ٹماٹر (Tomato) (Large)` into its parts
///
/// A trailing `(Small)`, `(Normal)` or `(Large)` is taken as the size, in any
/// letter case; without one the size is `Normal`. The last parenthesized
/// token of what remains is the English name and everything before it the
/// Urdu name. A string with no parentheses is all English.
///
/// # Examples
/// ```
/// use fruzy_invoice::display::{Size, decode};
///
/// let item = decode("لہسن (Garlic) (small)");
/// assert_eq!(item.english, "Garlic");
/// assert_eq!(item.urdu, "لہسن");
/// assert_eq!(item.size, Size::Small);
/// ```
pub fn decode(display: &str) -> DecodedItem {
    let mut rest = display.trim();
    let mut size = Size::Normal;

    if let Some(caps) = SIZE_SUFFIX.captures(rest) {
        // The pattern only admits the three names.
        size = Size::from_strng(&caps[1]).unwrap_or_default();
        let start = caps.get(0).map_or(rest.len(), |m| m.start());
        rest = rest[..start].trim();
    }

    match TRAILING_PAREN.captures(rest) {
        Some(caps) => {
            let open = caps.get(0).map_or(0, |m| m.start());
            DecodedItem {
                english: caps[1].trim().to_string(),
                urdu: rest[..open].trim().to_string(),
                size,
            }
        }
        None => DecodedItem {
            english: rest.to_string(),
            urdu: String::new(),
            size,
        },
    }
}

/// Compose a display string from its parts; `decode` reverses it.
pub fn encode(urdu: &str, english: &str, size: Size) -> String {
    if urdu.is_empty() {
        format!("{} ({})", english, size)
    } else {
        format!("{} ({}) ({})", urdu, english, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_without_size_defaults_to_normal() {
        let item = decode("سبز مرچ (Green Chili)");
        assert_eq!(item.english, "Green Chili");
        assert_eq!(item.urdu, "سبز مرچ");
        assert_eq!(item.size, Size::Normal);
    }

    #[test]
    fn size_suffix_is_stripped_before_the_name_split() {
        let item = decode("  ٹماٹر (Tomato) (Large)  ");
        assert_eq!(item.english, "Tomato");
        assert_eq!(item.urdu, "ٹماٹر");
        assert_eq!(item.size, Size::Large);

        let item = decode("Tomato (LARGE)");
        assert_eq!(item.english, "Tomato");
        assert_eq!(item.urdu, "");
        assert_eq!(item.size, Size::Large);
    }

    #[test]
    fn plain_string_is_all_english() {
        let item = decode("Onion");
        assert_eq!(item.english, "Onion");
        assert_eq!(item.urdu, "");
        assert_eq!(item.size, Size::Normal);
    }

    #[test]
    fn unknown_trailing_token_is_the_english_name() {
        let item = decode("پیاز (Medium)");
        assert_eq!(item.english, "Medium");
        assert_eq!(item.urdu, "پیاز");
        assert_eq!(item.size, Size::Normal);
    }

    #[test]
    fn only_the_last_size_token_is_consumed() {
        let item = decode("(Small) (Large)");
        assert_eq!(item.size, Size::Large);
        assert_eq!(item.english, "Small");
        assert_eq!(item.urdu, "");
    }

    #[test]
    fn encode_round_trips_for_every_size() {
        for size in Size::ALL {
            let display = encode("آلو پرانا", "Old Potato", size);
            let item = decode(&display);
            assert_eq!(item.english, "Old Potato");
            assert_eq!(item.urdu, "آلو پرانا");
            assert_eq!(item.size, size);
        }
        assert_eq!(encode("", "Mango", Size::Small), "Mango (Small)");
    }

    #[test]
    fn urdu_lookup_is_reexported() {
        assert_eq!(urdu_for("onion"), "پیاز");
    }
}
