//! Simulation report generation.

use crate::catalog::types::Pack;
use crate::draw::opening::OpeningResult;
use crate::pricing::logic::expected_counts;
use std::collections::BTreeMap;

/// Aggregated results from many simulated openings of one pack.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub pack_id: String,
    pub pack_name: String,
    pub slots_per_pack: u32,
    pub num_runs: u32,
    pub runs_with_failures: u32,

    pub total_drawn: u64,
    pub total_failed: u64,

    // Distribution data
    pub rarity_counts: BTreeMap<String, u64>,
    pub card_counts: BTreeMap<String, u64>,
    pub failure_counts: BTreeMap<String, u64>,

    /// Expected cards per opening, by rarity, in tier order
    pub expected_per_pack: Vec<(String, f64)>,
}

impl SimReport {
    pub fn new(pack: &Pack) -> Self {
        Self {
            pack_id: pack.id.clone(),
            pack_name: pack.name.clone(),
            slots_per_pack: pack.rarity.slots_per_pack,
            num_runs: 0,
            runs_with_failures: 0,
            total_drawn: 0,
            total_failed: 0,
            rarity_counts: BTreeMap::new(),
            card_counts: BTreeMap::new(),
            failure_counts: BTreeMap::new(),
            expected_per_pack: expected_counts(&pack.rarity),
        }
    }

    /// Fold one opening into the totals.
    pub fn record(&mut self, opening: &OpeningResult) {
        self.num_runs += 1;
        if !opening.is_complete() {
            self.runs_with_failures += 1;
        }
        self.total_drawn += opening.total_drawn() as u64;
        self.total_failed += opening.total_failed() as u64;

        for (rarity, count) in &opening.rarity_counts {
            *self.rarity_counts.entry(rarity.clone()).or_insert(0) += *count as u64;
        }
        for (card, count) in &opening.results {
            *self.card_counts.entry(card.clone()).or_insert(0) += *count as u64;
        }
        for failure in &opening.failures {
            *self.failure_counts.entry(failure.rarity.clone()).or_insert(0) += failure.count as u64;
        }
    }

    pub fn drawn_of(&self, rarity: &str) -> u64 {
        self.rarity_counts.get(rarity).copied().unwrap_or(0)
    }

    /// Fraction of all slots that produced a card of `rarity`.
    pub fn observed_share(&self, rarity: &str) -> f64 {
        let slots = self.total_drawn + self.total_failed;
        if slots == 0 {
            0.0
        } else {
            self.drawn_of(rarity) as f64 / slots as f64
        }
    }

    /// Fraction of slots expected to be `rarity`.
    pub fn expected_share(&self, rarity: &str) -> f64 {
        if self.slots_per_pack == 0 {
            return 0.0;
        }
        self.expected_per_pack
            .iter()
            .find(|(label, _)| label == rarity)
            .map(|(_, count)| count / self.slots_per_pack as f64)
            .unwrap_or(0.0)
    }

    /// Average cards of `rarity` per opening.
    pub fn avg_per_pack(&self, rarity: &str) -> f64 {
        self.drawn_of(rarity) as f64 / self.num_runs.max(1) as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 PACK OPENING SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Pack: {} ({})\n",
            self.pack_name, self.pack_id
        ));
        report.push_str(&format!(
            "Openings: {} total, {} with unfilled slots\n\n",
            self.num_runs, self.runs_with_failures
        ));

        report.push_str("── RARITY DISTRIBUTION ──────────────────────────────────────────\n");
        report.push_str("  Rarity           Drawn   Per pack   Observed   Expected\n");
        report.push_str("  ──────           ─────   ────────   ────────   ────────\n");
        for (label, _) in &self.expected_per_pack {
            report.push_str(&format!(
                "  {:<16} {:>6}   {:>8.3}   {:>7.2}%   {:>7.2}%\n",
                label,
                self.drawn_of(label),
                self.avg_per_pack(label),
                self.observed_share(label) * 100.0,
                self.expected_share(label) * 100.0
            ));
        }
        report.push('\n');

        report.push_str("── CARDS ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Distinct cards drawn: {}\n",
            self.card_counts.len()
        ));
        let mut top: Vec<_> = self.card_counts.iter().collect();
        top.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (card, count) in top.iter().take(10) {
            report.push_str(&format!("  {:<32} {:>6}\n", card, count));
        }
        report.push('\n');

        if !self.failure_counts.is_empty() {
            report.push_str("── UNFILLED SLOTS ───────────────────────────────────────────────\n");
            for (rarity, count) in &self.failure_counts {
                report.push_str(&format!(
                    "  ⚠️  {} slots of {} had no registered cards\n",
                    count, rarity
                ));
            }
            report.push('\n');
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// Implement Serialize for JSON output
impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let observed_share: BTreeMap<&str, f64> = self
            .expected_per_pack
            .iter()
            .map(|(label, _)| (label.as_str(), self.observed_share(label)))
            .collect();
        let expected_share: BTreeMap<&str, f64> = self
            .expected_per_pack
            .iter()
            .map(|(label, _)| (label.as_str(), self.expected_share(label)))
            .collect();

        let mut state = serializer.serialize_struct("SimReport", 11)?;
        state.serialize_field("pack_id", &self.pack_id)?;
        state.serialize_field("pack_name", &self.pack_name)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("runs_with_failures", &self.runs_with_failures)?;
        state.serialize_field("total_drawn", &self.total_drawn)?;
        state.serialize_field("total_failed", &self.total_failed)?;
        state.serialize_field("rarity_counts", &self.rarity_counts)?;
        state.serialize_field("card_counts", &self.card_counts)?;
        state.serialize_field("failure_counts", &self.failure_counts)?;
        state.serialize_field("observed_share", &observed_share)?;
        state.serialize_field("expected_share", &expected_share)?;
        state.end()
    }
}
