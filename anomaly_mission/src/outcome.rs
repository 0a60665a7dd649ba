use serde::Serialize;

/// Discrete verdict on how much clock the agent had left at the checkpoint.
/// Always recomputed from the clock; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTier {
    OnTime,
    Late,
    Failed,
}

impl OutcomeTier {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeTier::OnTime => "on_time",
            OutcomeTier::Late => "late",
            OutcomeTier::Failed => "failed",
        }
    }

    /// Narrative fragment the supervisor prompts splice in for this tier.
    pub fn time_status(self) -> &'static str {
        match self {
            OutcomeTier::OnTime => {
                "He returned well within the mission window, excellent time keeping."
            }
            OutcomeTier::Late => {
                "He barely made it back before the mission window closed, cutting it very close."
            }
            OutcomeTier::Failed => "He did not make it back before the mission window ran out.",
        }
    }
}

/// The two configured checkpoint thresholds. `full_seconds` is the armed
/// mission duration; classification pivots on `middle_seconds` alone.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutcomeThresholds {
    pub full_seconds: f32,
    pub middle_seconds: f32,
}

impl OutcomeThresholds {
    pub fn new(full_seconds: f32, middle_seconds: f32) -> Self {
        OutcomeThresholds {
            full_seconds,
            middle_seconds,
        }
    }
}

/// Total over every float input: no remaining time fails, anything up to
/// the middle threshold is late, anything above it is on time.
pub fn classify(remaining_seconds: f32, thresholds: &OutcomeThresholds) -> OutcomeTier {
    if remaining_seconds <= 0.0 {
        OutcomeTier::Failed
    } else if remaining_seconds <= thresholds.middle_seconds {
        OutcomeTier::Late
    } else {
        OutcomeTier::OnTime
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, OutcomeThresholds, OutcomeTier};

    fn thresholds() -> OutcomeThresholds {
        OutcomeThresholds::new(300.0, 120.0)
    }

    #[test]
    fn plenty_of_clock_is_on_time() {
        assert_eq!(classify(300.0, &thresholds()), OutcomeTier::OnTime);
        assert_eq!(classify(120.5, &thresholds()), OutcomeTier::OnTime);
    }

    #[test]
    fn at_or_below_middle_is_late() {
        assert_eq!(classify(120.0, &thresholds()), OutcomeTier::Late);
        assert_eq!(classify(1.0, &thresholds()), OutcomeTier::Late);
        assert_eq!(classify(0.001, &thresholds()), OutcomeTier::Late);
    }

    #[test]
    fn exhausted_clock_is_failed() {
        assert_eq!(classify(0.0, &thresholds()), OutcomeTier::Failed);
        assert_eq!(classify(-5.0, &thresholds()), OutcomeTier::Failed);
    }

    #[test]
    fn classification_is_idempotent() {
        for remaining in [0.0, 60.0, 120.0, 240.0] {
            let first = classify(remaining, &thresholds());
            let second = classify(remaining, &thresholds());
            assert_eq!(first, second);
        }
    }
}
