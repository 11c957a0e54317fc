use std::collections::HashMap;

use tracing::{debug, warn};

use crate::constants::NOISE_FLOOR;

use super::types::PotentialCondition;
use super::validator::PredictionValidator;

/// Folds externally produced predictions into the pipeline's own list.
///
/// Conditions are matched by case-insensitive name. A condition present in both
/// keeps the pipeline record with the higher of the two scores. External-only
/// conditions are admitted when they clear the noise floor. The merged list is
/// re-ranked with the validator's rules.
pub fn merge_predictions(
    primary: Vec<PotentialCondition>,
    external: Vec<PotentialCondition>,
    validator: &PredictionValidator,
) -> Vec<PotentialCondition> {
    let mut merged = primary;
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, p)| (p.key(), i))
        .collect();

    for mut prediction in external {
        if prediction.name.trim().is_empty() {
            warn!("Ignoring external prediction without a name");
            continue;
        }
        if !prediction.score.is_finite() {
            warn!(condition = %prediction.name, "Ignoring external prediction with non-finite score");
            continue;
        }
        prediction.score = prediction.score.clamp(0.0, 1.0);

        let key = prediction.key();
        match index.get(&key) {
            Some(&i) => {
                let existing = &mut merged[i];
                if prediction.score > existing.score {
                    existing.reasoning_notes.push(format!(
                        "External prediction raised score: {:.2} -> {:.2}",
                        existing.score, prediction.score
                    ));
                    existing.score = prediction.score;
                }
            }
            None => {
                if prediction.score < NOISE_FLOOR {
                    debug!(condition = %prediction.name, score = prediction.score, "External prediction below noise floor");
                    continue;
                }
                prediction
                    .reasoning_notes
                    .push(format!("Added from external prediction ({:.2})", prediction.score));
                index.insert(key, merged.len());
                merged.push(prediction);
            }
        }
    }

    validator.rank(merged)
}
