use serde::Serialize;
use std::collections::BTreeMap;

/// Derived value of one card of a tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierPrice {
    pub label: String,
    /// Expected number of cards of this tier per opening.
    pub expected_count: f64,
    pub blended_probability: f64,
    pub value_per_card: f64,
}

/// Per-card values for a pack, in tier order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    pub pack_price: f64,
    pub entries: Vec<TierPrice>,
}

impl PriceTable {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value_per_card)
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.label.clone(), e.value_per_card))
            .collect()
    }

    /// Sum of expected count times value over all tiers.
    pub fn expected_pack_value(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.expected_count * e.value_per_card)
            .sum()
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(&format!("Pack price: {:.2}\n", self.pack_price));
        text.push_str("  Rarity           Expected    Value/card\n");
        text.push_str("  ──────           ────────    ──────────\n");
        for entry in &self.entries {
            text.push_str(&format!(
                "  {:<16} {:>8.3}    {:>10.2}\n",
                entry.label, entry.expected_count, entry.value_per_card
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PriceTable {
        PriceTable {
            pack_price: 10.0,
            entries: vec![
                TierPrice {
                    label: "Common".to_string(),
                    expected_count: 4.0,
                    blended_probability: 0.8,
                    value_per_card: 1.25,
                },
                TierPrice {
                    label: "Rare".to_string(),
                    expected_count: 1.0,
                    blended_probability: 0.2,
                    value_per_card: 5.0,
                },
            ],
        }
    }

    #[test]
    fn test_lookup_and_map() {
        let table = table();
        assert_eq!(table.get("Rare"), Some(5.0));
        assert_eq!(table.get("Mythic"), None);
        assert_eq!(table.to_map().len(), 2);
    }

    #[test]
    fn test_expected_pack_value() {
        assert!((table().expected_pack_value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_lists_every_tier() {
        let text = table().to_text();
        assert!(text.contains("Common"));
        assert!(text.contains("Rare"));
        assert!(text.contains("5.00"));
    }
}
