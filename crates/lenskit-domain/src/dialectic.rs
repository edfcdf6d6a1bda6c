//! Dialectic keyword scoring
//!
//! A presence-based heuristic: two definitions are in tension when one mentions
//! a concept and the other mentions its opposite. Matching is exact substring
//! containment on case-folded text, with no stemming or negation handling.

/// Opposing concept-word pairs used when no table is configured
pub const STANDARD_PAIRS: [(&str, &str); 15] = [
    ("centralized", "decentralized"),
    ("control", "freedom"),
    ("stability", "change"),
    ("conservative", "liberal"),
    ("individual", "collective"),
    ("short-term", "long-term"),
    ("reactive", "proactive"),
    ("top-down", "bottom-up"),
    ("rigid", "flexible"),
    ("specialized", "generalized"),
    ("compete", "cooperate"),
    ("open", "closed"),
    ("fast", "slow"),
    ("explicit", "implicit"),
    ("formal", "informal"),
];

/// Score added for every matching pair
pub const DEFAULT_INCREMENT: f64 = 0.2;

/// Upper bound of the score
pub const DEFAULT_CAP: f64 = 1.0;

/// Table of opposing keyword pairs with its scoring parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DialecticTable {
    pairs: Vec<(String, String)>,
    increment: f64,
    cap: f64,
}

impl DialecticTable {
    /// Create a table; keywords are case-folded on construction
    pub fn new<I, A, B>(pairs: I, increment: f64, cap: f64) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(a, b)| (a.as_ref().to_lowercase(), b.as_ref().to_lowercase()))
            .collect();
        Self { pairs, increment, cap }
    }

    /// The fifteen standard pairs, 0.2 per match, capped at 1.0
    pub fn standard() -> Self {
        Self::new(STANDARD_PAIRS, DEFAULT_INCREMENT, DEFAULT_CAP)
    }

    /// Number of keyword pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the table has no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Score how dialectically opposed two definitions are
    ///
    /// Each pair contributes once when one definition contains one member and
    /// the other definition contains the other member, in either direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit_domain::DialecticTable;
    ///
    /// let table = DialecticTable::standard();
    /// let score = table.score("A centralized system", "a decentralized network");
    /// assert!((score - 0.2).abs() < 1e-9);
    /// ```
    pub fn score(&self, source_definition: &str, target_definition: &str) -> f64 {
        let source = source_definition.to_lowercase();
        let target = target_definition.to_lowercase();

        let matches = self
            .pairs
            .iter()
            .filter(|(a, b)| {
                (source.contains(a.as_str()) && target.contains(b.as_str()))
                    || (source.contains(b.as_str()) && target.contains(a.as_str()))
            })
            .count();

        (matches as f64 * self.increment).min(self.cap)
    }
}

impl Default for DialecticTable {
    fn default() -> Self {
        Self::standard()
    }
}
