// Probability tolerance, shared by every mismatch check
pub const PROBABILITY_EPSILON: f64 = 1e-6;
// Same tolerance on percentage-scaled editor input (0-100)
pub const PERCENT_EPSILON: f64 = PROBABILITY_EPSILON * 100.0;

// New pack defaults
pub const DEFAULT_TIER_LABEL: &str = "Common";
pub const DEFAULT_SLOTS_PER_PACK: u32 = 10;
pub const DEFAULT_PACK_PRICE: f64 = 0.0;

// Simulator
pub const DEFAULT_SIM_RUNS: u32 = 1000;

// Settings file
pub const SETTINGS_DIR_NAME: &str = "packforge";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";
