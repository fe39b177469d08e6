use serde::*;

/// Tunable parameters of the evaluation core
///
/// None of these change the value an operation produces. They only pick
/// between algorithms or bound resource use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Above this `tally × tally` product, `cull` and `except` sort and merge
    /// instead of comparing every pair
    pub except_crossover: usize,
    /// Partitions smaller than this are finished by insertion sort in the
    /// fast sort
    pub quicksort_cutoff: usize,
    /// The largest number of elements a single container may hold
    pub max_elements: usize,
    /// Whether `sort` and `grade` scan an unflagged argument for sortedness
    /// before sorting it
    pub check_sorted_scan: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            except_crossover: 5000,
            quicksort_cutoff: 16,
            max_elements: u32::MAX as usize,
            check_sorted_scan: true,
        }
    }
}

impl CoreConfig {
    /// Load a configuration from JSON
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CoreConfig::from_json(r#"{"except_crossover": 10}"#).unwrap();
        assert_eq!(config.except_crossover, 10);
        assert_eq!(config.quicksort_cutoff, 16);
        assert!(config.check_sorted_scan);
    }

    #[test]
    fn json_round_trip() {
        let config = CoreConfig {
            max_elements: 99,
            ..CoreConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CoreConfig::from_json(&json).unwrap(), config);
        assert!(CoreConfig::from_json(r#"{"except_crossover": "x"}"#).is_err());
        assert!(CoreConfig::from_json(r#"{"max_elements": -1}"#).is_err());
    }
}
