use std::collections::HashMap;

/// Lookup of the card identifiers registered under a pack and rarity.
///
/// Implementations return candidates in a stable order; the engine never
/// mutates the pool.
pub trait CardPool {
    fn cards_for(&self, pack_id: &str, rarity: &str) -> Vec<String>;
}

/// Card pool held in memory, keyed by `(pack_id, rarity)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardPool {
    cards: HashMap<(String, String), Vec<String>>,
}

impl InMemoryCardPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pack_id: &str, rarity: &str, card_id: impl Into<String>) {
        self.cards
            .entry((pack_id.to_string(), rarity.to_string()))
            .or_default()
            .push(card_id.into());
    }

    /// Builder-style insert of several cards of one rarity.
    pub fn with_cards<I, S>(mut self, pack_id: &str, rarity: &str, card_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for card_id in card_ids {
            self.insert(pack_id, rarity, card_id);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CardPool for InMemoryCardPool {
    fn cards_for(&self, pack_id: &str, rarity: &str) -> Vec<String> {
        self.cards
            .get(&(pack_id.to_string(), rarity.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_pack_and_rarity() {
        let pool = InMemoryCardPool::new()
            .with_cards("alpha", "Common", ["c1", "c2"])
            .with_cards("alpha", "Rare", ["r1"])
            .with_cards("beta", "Common", ["b1"]);

        assert_eq!(pool.cards_for("alpha", "Common"), vec!["c1", "c2"]);
        assert_eq!(pool.cards_for("alpha", "Rare"), vec!["r1"]);
        assert_eq!(pool.cards_for("beta", "Common"), vec!["b1"]);
        assert!(pool.cards_for("beta", "Rare").is_empty());
        assert_eq!(pool.len(), 4);
    }
}
