use serde::Serialize;

use crate::outcome::OutcomeTier;

/// Everything the mission-report prompt needs, frozen at the checkpoint.
/// Assembled once, turned into text, then dropped.
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub object_retrieved: bool,
    pub tier: OutcomeTier,
    pub era: String,
    pub object_description: String,
}

/// Mutable narrative parameters feeding every generated-dialogue prompt.
/// Scene props adjust these before the relevant beat fires.
#[derive(Debug, Clone, Serialize)]
pub struct PromptDeck {
    pub era: String,
    pub anomaly_object: String,
    pub retrieved_line: String,
    pub spotted_line: String,
    pub supervisor_mood: String,
    object_retrieved: bool,
}

impl Default for PromptDeck {
    fn default() -> Self {
        PromptDeck {
            era: "The Hun Era".to_string(),
            anomaly_object: "A Walkman from the 80s".to_string(),
            retrieved_line: "The agent brings back the object".to_string(),
            spotted_line: "He was not spotted, so no disruptions were caused to the timeline, \
                           very good performance"
                .to_string(),
            supervisor_mood: "stern but encouraging".to_string(),
            object_retrieved: true,
        }
    }
}

impl PromptDeck {
    /// Flips the retrieval sentence to the failure wording. Called before
    /// the report prompt when the clock ran out.
    pub fn mark_object_not_retrieved(&mut self) {
        self.retrieved_line = "The agent did not bring back the object".to_string();
        self.object_retrieved = false;
    }

    pub fn object_retrieved(&self) -> bool {
        self.object_retrieved
    }

    /// The supervisor's opening call, before the agent departs.
    pub fn briefing_prompt(&self) -> String {
        format!(
            "You are the supervisor in a timetraveling company and you are directing an agent \
             retrieving timeanomaly-objects from timeperiods. Send him to {} where today's \
             object is located. Let him know that you are getting more intel on what the object \
             will be. Your mood is {} so form dialogue accordingly.",
            self.era, self.supervisor_mood
        )
    }

    /// The in-era call revealing what the anomaly object turned out to be.
    pub fn arrival_prompt(&self) -> String {
        format!(
            "The agent travels to {}. You have received new information about the object: it is \
             {}. Inform the agent and make a comment about how this particular object could \
             influence the time period. Tell him to blend in while searching for the item.",
            self.era, self.anomaly_object
        )
    }

    /// The debrief after the checkpoint, spliced from the retrieval line,
    /// the spotted line and the tier's time-status fragment.
    pub fn report_prompt(&self, report: &MissionReport) -> String {
        format!(
            "{}. {} {} Address the situation and call him back to the office.",
            self.retrieved_line,
            self.spotted_line,
            report.tier.time_status()
        )
    }

    /// The radio host's recap of the whole trip.
    pub fn radio_report_prompt(&self, report: &MissionReport) -> String {
        format!(
            "The agent returned from his trip to {}. The object was: {}. {}. {}",
            report.era,
            report.object_description,
            self.retrieved_line,
            report.tier.time_status()
        )
    }

    /// Freezes the deck's narrative state into a report for the given tier.
    pub fn build_report(&self, tier: OutcomeTier) -> MissionReport {
        MissionReport {
            object_retrieved: self.object_retrieved(),
            tier,
            era: self.era.clone(),
            object_description: self.anomaly_object.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PromptDeck;
    use crate::outcome::OutcomeTier;

    #[test]
    fn briefing_carries_era_and_mood() {
        let deck = PromptDeck::default();
        let prompt = deck.briefing_prompt();
        assert!(prompt.contains("The Hun Era"));
        assert!(prompt.contains("stern but encouraging"));
    }

    #[test]
    fn arrival_reveals_the_object() {
        let mut deck = PromptDeck::default();
        deck.anomaly_object = "A polaroid camera".to_string();
        let prompt = deck.arrival_prompt();
        assert!(prompt.contains("A polaroid camera"));
        assert!(prompt.contains("blend in"));
    }

    #[test]
    fn failed_report_switches_the_retrieval_line() {
        let mut deck = PromptDeck::default();
        deck.mark_object_not_retrieved();
        let report = deck.build_report(OutcomeTier::Failed);
        assert!(!report.object_retrieved);
        let prompt = deck.report_prompt(&report);
        assert!(prompt.contains("did not bring back"));
        assert!(prompt.contains("did not make it back"));
        assert!(prompt.contains("call him back to the office"));
    }

    #[test]
    fn report_is_a_frozen_copy_of_the_deck() {
        let mut deck = PromptDeck::default();
        let report = deck.build_report(OutcomeTier::OnTime);
        deck.era = "The Renaissance".to_string();
        assert_eq!(report.era, "The Hun Era");
        assert!(report.object_retrieved);
    }

    #[test]
    fn radio_recap_names_era_object_and_time_status() {
        let deck = PromptDeck::default();
        let report = deck.build_report(OutcomeTier::Late);
        let prompt = deck.radio_report_prompt(&report);
        assert!(prompt.contains("The Hun Era"));
        assert!(prompt.contains("A Walkman from the 80s"));
        assert!(prompt.contains("barely made it back"));
    }
}
