use crate::rarity::types::PackRarityConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of product a pack is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductType {
    /// Randomised contents drawn by rarity.
    #[default]
    Booster,
    /// Fixed deck list with no rarity variance.
    ConstructedDeck { card_count: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_type: ProductType,
    pub rarity: PackRarityConfig,
}

impl Pack {
    /// A new booster with a generated id and the default rarity configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            product_type: ProductType::Booster,
            rarity: PackRarityConfig::default(),
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, rarity: PackRarityConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product_type: ProductType::Booster,
            rarity,
        }
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub pack_id: String,
    pub name: String,
    pub rarity: String,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        pack_id: impl Into<String>,
        name: impl Into<String>,
        rarity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pack_id: pack_id.into(),
            name: name.into(),
            rarity: rarity.into(),
        }
    }
}
