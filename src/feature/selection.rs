//! Chi-square feature selection.

use ahash::AHashMap;
use log::debug;

use crate::feature::stats::FeatureStats;

/// Chi-square critical value for p = 0.001 with one degree of freedom.
pub const DEFAULT_CRITICAL_VALUE: f64 = 10.83;

/// Chi-square statistic of a 2x2 contingency table.
///
/// `n11` counts documents with the feature in the category, `n10` with the
/// feature outside it, `n01` without the feature in the category and `n00`
/// neither. Returns `None` when a marginal is zero: the table is then
/// degenerate (a single category, or a feature present in every document) and
/// the feature carries no information about the category.
pub fn chisquare_score(n: f64, n11: f64, n10: f64, n01: f64, n00: f64) -> Option<f64> {
    let denominator = (n11 + n01) * (n11 + n10) * (n10 + n00) * (n01 + n00);
    if denominator == 0.0 {
        return None;
    }
    let diff = n11 * n00 - n10 * n01;
    Some(n * diff * diff / denominator)
}

/// Test every feature against every observed category.
///
/// A feature is selected when its score reaches `critical_level` for at least
/// one category; the returned value is its highest such score. Degenerate
/// tables never select a feature.
pub fn chisquare(stats: &FeatureStats, critical_level: f64) -> AHashMap<String, f64> {
    let mut selected: AHashMap<String, f64> = AHashMap::new();
    let n = stats.n as f64;

    for (feature, category_list) in &stats.feature_category_joint_count {
        let n1dot: f64 = category_list.values().map(|&count| count as f64).sum();
        let n0dot = n - n1dot;

        for (category, &category_count) in &stats.category_counts {
            let n11 = category_list.get(category).copied().unwrap_or(0) as f64;
            let n01 = category_count as f64 - n11;
            let n00 = n0dot - n01;
            let n10 = n1dot - n11;

            let Some(score) = chisquare_score(n, n11, n10, n01, n00) else {
                continue;
            };

            if score >= critical_level {
                selected
                    .entry(feature.clone())
                    .and_modify(|best| {
                        if score > *best {
                            *best = score;
                        }
                    })
                    .or_insert(score);
            }
        }
    }

    selected
}

/// Run the chi-square test and prune the statistics to the selected features.
///
/// Returns the pruned copy together with the per-feature scores; `stats` is
/// not modified.
pub fn select_features(
    stats: &FeatureStats,
    critical_level: f64,
) -> (FeatureStats, AHashMap<String, f64>) {
    let scores = chisquare(stats, critical_level);
    let pruned = stats.retain_features(scores.keys());

    debug!(
        "chi-square selection kept {} of {} features (critical value {})",
        pruned.num_features(),
        stats.num_features(),
        critical_level
    );

    (pruned, scores)
}
