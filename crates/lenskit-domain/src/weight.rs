//! Presentation weight of a generated contrast

/// Linear remapping of a combined score into a presentation weight
///
/// Combined scores empirically fall in roughly `[0.45, 0.95]`; they are mapped
/// onto `[floor, ceiling]` with `floor + (score - origin) * slope`, rounded to
/// two decimals and clamped. This is a cosmetic rescaling, not a probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightMapping {
    /// Lowest weight emitted
    pub floor: f64,

    /// Highest weight emitted
    pub ceiling: f64,

    /// Combined score that maps onto `floor`
    pub origin: f64,

    /// Weight gained per unit of combined score
    pub slope: f64,
}

impl Default for WeightMapping {
    fn default() -> Self {
        Self {
            floor: 0.80,
            ceiling: 0.95,
            origin: 0.45,
            slope: 0.30,
        }
    }
}

impl WeightMapping {
    /// Map a combined score onto the weight range
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit_domain::WeightMapping;
    ///
    /// let mapping = WeightMapping::default();
    /// assert_eq!(mapping.weight(0.45), 0.80);
    /// assert_eq!(mapping.weight(1.2), 0.95);
    /// ```
    pub fn weight(&self, combined_score: f64) -> f64 {
        let raw = self.floor + (combined_score - self.origin) * self.slope;
        round_to(raw, 2).clamp(self.floor, self.ceiling)
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
