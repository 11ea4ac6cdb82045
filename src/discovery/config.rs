use chrono::Duration;

/// Weights for the recommendation score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    /// Multiplier on the 0-5 rating
    pub rating: f64,
    /// Bonus when fractional shares are offered and some remain
    pub open_fraction: f64,
    /// Multiplier on expected annual return (percent)
    pub expected_return: f64,
    /// Bonus for listings in a high-demand city
    pub hot_city: f64,
    /// Bonus when the user holds no shares in the listing yet
    pub not_owned: f64,
    /// Bonus for listings younger than the recency window
    pub recent: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rating: 10.0,
            open_fraction: 20.0,
            expected_return: 2.0,
            hot_city: 15.0,
            not_owned: 10.0,
            recent: 5.0,
        }
    }
}

/// Tunables for the discovery engine
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub weights: ScoringWeights,
    /// Cities that earn the hot-city bonus (exact match)
    pub hot_cities: Vec<String>,
    /// How long a listing counts as new
    pub recency_window: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            hot_cities: ["San Francisco", "New York", "Los Angeles", "Miami"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            recency_window: Duration::days(30),
        }
    }
}

impl DiscoveryConfig {
    pub fn is_hot_city(&self, city: &str) -> bool {
        self.hot_cities.iter().any(|c| c == city)
    }
}
