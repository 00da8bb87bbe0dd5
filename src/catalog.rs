use crate::display::{Size, encode};
use serde::Serialize;

/// One produce item the shop sells, named in both languages.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct CatalogEntry {
    pub id: u32,
    pub english: &'static str,
    pub urdu: &'static str,
}

impl CatalogEntry {
    /// Picker label for this item, e.g. `ٹماٹر (Tomato) (Large)`.
    pub fn display(&self, size: Size) -> String {
        encode(self.urdu, self.english, size)
    }

    /// Picker label without the size suffix, e.g. `ٹماٹر (Tomato)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.urdu, self.english)
    }
}

/// The fixed catalog, in picker order.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 1,
        english: "Tomato",
        urdu: "ٹماٹر",
    },
    CatalogEntry {
        id: 2,
        english: "Green Chili",
        urdu: "سبز مرچ",
    },
    CatalogEntry {
        id: 3,
        english: "Garlic",
        urdu: "لہسن",
    },
    CatalogEntry {
        id: 4,
        english: "Onion",
        urdu: "پیاز",
    },
    CatalogEntry {
        id: 5,
        english: "Old Potato",
        urdu: "آلو پرانا",
    },
];

/// Look up the Urdu name for an English catalog name
///
/// Matching is exact but case-insensitive. Returns an empty string when the
/// name is not in the catalog.
///
/// # Examples
/// ```
/// use fruzy_invoice::catalog::urdu_for;
///
/// assert_eq!(urdu_for("garlic"), "لہسن");
/// assert_eq!(urdu_for("Mango"), "");
/// ```
pub fn urdu_for(english: &str) -> &'static str {
    let wanted = english.to_lowercase();
    CATALOG
        .iter()
        .find(|entry| entry.english.trim().to_lowercase() == wanted)
        .map(|entry| entry.urdu)
        .unwrap_or("")
}

/// Catalog row as shipped to the page, with its ready-made picker label.
#[derive(Serialize, Debug)]
pub struct CatalogView {
    pub id: u32,
    pub english: &'static str,
    pub urdu: &'static str,
    pub label: String,
    pub sizes: Vec<SizedLabel>,
}

#[derive(Serialize, Debug)]
pub struct SizedLabel {
    pub size: Size,
    pub display: String,
}

pub fn catalog_view() -> Vec<CatalogView> {
    CATALOG
        .iter()
        .map(|entry| CatalogView {
            id: entry.id,
            english: entry.english,
            urdu: entry.urdu,
            label: entry.label(),
            sizes: Size::ALL
                .iter()
                .map(|&size| SizedLabel {
                    size,
                    display: entry.display(size),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(urdu_for("TOMATO"), "ٹماٹر");
        assert_eq!(urdu_for("old potato"), "آلو پرانا");
    }

    #[test]
    fn unknown_item_has_no_urdu() {
        assert_eq!(urdu_for("Potato"), "");
        assert_eq!(urdu_for(""), "");
    }

    #[test]
    fn view_carries_one_label_per_size() {
        let view = catalog_view();
        assert_eq!(view.len(), CATALOG.len());
        let tomato = &view[0];
        assert_eq!(tomato.label, "ٹماٹر (Tomato)");
        let displays: Vec<&str> = tomato.sizes.iter().map(|s| s.display.as_str()).collect();
        assert_eq!(
            displays,
            vec![
                "ٹماٹر (Tomato) (Small)",
                "ٹماٹر (Tomato) (Normal)",
                "ٹماٹر (Tomato) (Large)"
            ]
        );
    }
}
