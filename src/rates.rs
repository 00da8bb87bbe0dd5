use crate::display::decode;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Item name to unit price, in the order the rate sheet listed them.
#[derive(Clone, Serialize, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct RateTable {
    rates: IndexMap<String, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rate. A repeated name keeps its first position but takes the new price.
    pub fn insert(&mut self, name: impl Into<String>, rate: f64) {
        self.rates.insert(name.into(), rate);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.rates.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(name, rate)| (name.as_str(), *rate))
    }

    /// Suggest a price for a display string
    ///
    /// The English name is pulled out of the display string and compared with
    /// every rate name, ignoring case and surrounding whitespace. An exact hit
    /// wins; failing that, the first name that contains the English name (or
    /// is contained in it) is used. Ties go to whichever came first in the
    /// sheet. An empty English name is contained in every rate name, so it
    /// takes the first price.
    ///
    /// # Examples
    /// ```
    /// use fruzy_invoice::rates::RateTable;
    ///
    /// let mut table = RateTable::new();
    /// table.insert("Old Potato", 80.0);
    /// table.insert("Tomato", 120.0);
    ///
    /// assert_eq!(table.match_rate("ٹماٹر (Tomato) (Large)"), Some(120.0));
    /// assert_eq!(table.match_rate("Potato"), Some(80.0));
    /// assert_eq!(table.match_rate("Mango"), None);
    /// ```
    pub fn match_rate(&self, display: &str) -> Option<f64> {
        let wanted = decode(display).english.trim().to_lowercase();

        let exact = self
            .iter()
            .find(|(name, _)| name.trim().to_lowercase() == wanted);
        if let Some((_, rate)) = exact {
            return Some(rate);
        }

        self.iter()
            .find(|(name, _)| {
                let name = name.trim().to_lowercase();
                name.contains(&wanted) || wanted.contains(&name)
            })
            .map(|(_, rate)| rate)
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = RateTable::new();
        for (name, rate) in iter {
            table.insert(name, rate);
        }
        table
    }
}

/// Holder for the latest uploaded rate table.
///
/// Readers get a snapshot that stays valid while an upload swaps in a new
/// table, so a request never sees a half-built table.
#[derive(Debug, Default)]
pub struct RateStore {
    current: RwLock<Arc<RateTable>>,
}

impl RateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<RateTable> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Replace the whole table, returning how many entries the new one holds.
    pub fn replace(&self, table: RateTable) -> usize {
        let count = table.len();
        let fresh = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
        count
    }
}
