//! JSON-backed catalog of packs and cards.

use super::types::{Card, Pack, ProductType};
use crate::draw::pool::InMemoryCardPool;
use crate::error::{PackError, Result};
use crate::pricing::logic::{price_per_card, uniform_price_table};
use crate::pricing::types::PriceTable;
use crate::rarity::types::{AdvancedTier, PackRarityConfig, SimpleTier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub packs: Vec<Pack>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&contents)?;
        debug!(
            path = %path.display(),
            packs = catalog.packs.len(),
            cards = catalog.cards.len(),
            "Loaded catalog"
        );
        for pack in &catalog.packs {
            if let ProductType::ConstructedDeck { card_count } = pack.product_type {
                let registered = catalog.card_count(&pack.id);
                if registered != card_count as usize {
                    warn!(
                        pack = %pack.id,
                        declared = card_count,
                        registered,
                        "Deck size differs from registered cards; pricing uses registered cards"
                    );
                }
            }
        }
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Find a pack by id, falling back to an exact name match.
    pub fn pack(&self, key: &str) -> Result<&Pack> {
        self.packs
            .iter()
            .find(|p| p.id == key)
            .or_else(|| self.packs.iter().find(|p| p.name == key))
            .ok_or_else(|| PackError::UnknownPack {
                pack_id: key.to_string(),
            })
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Number of cards registered to a pack.
    pub fn card_count(&self, pack_id: &str) -> usize {
        self.cards.iter().filter(|c| c.pack_id == pack_id).count()
    }

    /// Per-card values for `pack`. Constructed decks are priced over the
    /// cards registered to them, falling back to the declared size when none
    /// are registered.
    pub fn price_table(&self, pack: &Pack) -> PriceTable {
        match pack.product_type {
            ProductType::ConstructedDeck { card_count } => {
                let registered = self.card_count(&pack.id);
                let total = if registered > 0 {
                    registered
                } else {
                    card_count as usize
                };
                uniform_price_table(&pack.rarity, total)
            }
            ProductType::Booster => price_per_card(pack),
        }
    }

    pub fn card_pool(&self) -> InMemoryCardPool {
        let mut pool = InMemoryCardPool::new();
        for card in &self.cards {
            pool.insert(&card.pack_id, &card.rarity, card.id.clone());
        }
        pool
    }

    /// A small catalog with one booster of each mode and a constructed deck.
    pub fn sample() -> Self {
        let basic = Pack::with_id(
            "core-booster",
            "Core Booster",
            PackRarityConfig::simple(
                vec![SimpleTier::new("Common", 0.8), SimpleTier::new("Rare", 0.2)],
                5,
                100.0,
            ),
        );
        let premium = Pack::with_id(
            "premium-booster",
            "Premium Booster",
            PackRarityConfig::advanced(
                vec![
                    AdvancedTier::new("Common", 0.75).with_special(0.0),
                    AdvancedTier::new("Rare", 0.2).with_special(0.8),
                    AdvancedTier::new("Mythic", 0.05).with_special(0.2),
                    AdvancedTier::new("Foil", 0.0).with_fixed(1),
                ],
                1,
                10,
                250.0,
            ),
        );
        let deck = Pack::with_id("starter-deck", "Starter Deck", PackRarityConfig::default())
            .with_product_type(ProductType::ConstructedDeck { card_count: 40 });

        let mut cards = Vec::new();
        for (pack_id, rarity, count) in [
            ("core-booster", "Common", 10),
            ("core-booster", "Rare", 4),
            ("premium-booster", "Common", 10),
            ("premium-booster", "Rare", 5),
            ("premium-booster", "Mythic", 2),
            ("premium-booster", "Foil", 3),
            ("starter-deck", "Common", 40),
        ] {
            for i in 1..=count {
                let id = format!("{}-{}-{:02}", pack_id, rarity.to_lowercase(), i);
                cards.push(Card::new(id, pack_id, format!("{} {}", rarity, i), rarity));
            }
        }

        Self {
            packs: vec![basic, premium, deck],
            cards,
        }
    }
}
