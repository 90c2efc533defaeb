use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Rarity configuration has no tiers")]
    EmptyTiers,

    #[error("Slots per pack must be at least 1")]
    ZeroSlots,

    #[error("Duplicate rarity label: {label}")]
    DuplicateLabel { label: String },

    #[error("Invalid probability {value} for rarity {label}")]
    InvalidProbability { label: String, value: f64 },

    #[error(
        "Fixed ({fixed}) + special ({special}) slots exceed {slots_per_pack} slots per pack"
    )]
    SlotOverflow {
        fixed: u64,
        special: u32,
        slots_per_pack: u32,
    },

    #[error("Base probabilities sum to {total}, expected 1")]
    ProbabilityMismatch { total: f64 },

    #[error("Special probabilities sum to {total}, expected 1")]
    SpecialProbabilityMismatch { total: f64 },

    #[error("Cannot remove the last rarity tier")]
    LastTier,

    #[error("No rarity tier at index {index}")]
    TierNotFound { index: usize },

    #[error("{field} is only available in advanced mode")]
    AdvancedOnly { field: &'static str },

    #[error("Unknown pack: {pack_id}")]
    UnknownPack { pack_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackError {
    /// True for errors that mean the configuration itself is malformed,
    /// as opposed to file or lookup failures.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PackError::EmptyTiers
                | PackError::ZeroSlots
                | PackError::DuplicateLabel { .. }
                | PackError::InvalidProbability { .. }
                | PackError::SlotOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
