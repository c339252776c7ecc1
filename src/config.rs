//! Application-level configuration constants.

// UI Behavior
pub const DEBOUNCE_MS: u32 = 300;
pub const RESULTS_ELEMENT_ID: &str = "splits-results";

// Default values for input fields
pub const DEFAULT_PACE_TEXT: &str = "5:00";
pub const DEFAULT_REFERENCE_KM_TEXT: &str = "1";
pub const DEFAULT_DISTANCES_TEXT: &str = "400m, 1k, 1mi, 5k, 10k, half_marathon, marathon";
