use std::{cell::RefCell, rc::Rc};

use serde::Serialize;

/// The four generated-dialogue beats a mission can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionBeat {
    Briefing,
    Arrival,
    Report,
    RadioRecap,
}

impl MissionBeat {
    pub fn label(self) -> &'static str {
        match self {
            MissionBeat::Briefing => "briefing",
            MissionBeat::Arrival => "arrival",
            MissionBeat::Report => "report",
            MissionBeat::RadioRecap => "radio_recap",
        }
    }

    fn index(self) -> usize {
        match self {
            MissionBeat::Briefing => 0,
            MissionBeat::Arrival => 1,
            MissionBeat::Report => 2,
            MissionBeat::RadioRecap => 3,
        }
    }
}

/// Outbound chat-completion collaborator: takes an assembled prompt,
/// answers with the character's spoken line.
pub trait DialogueSink {
    fn deliver(&self, beat: MissionBeat, prompt: &str) -> String;
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BeatRecord {
    pub beat: String,
    pub prompt: String,
    pub reply: String,
}

/// Records every delivered prompt and answers with a canned line per
/// beat, standing in for the live completion endpoint.
#[derive(Clone, Default)]
pub struct RecordingDialogueSink {
    beats: Rc<RefCell<Vec<BeatRecord>>>,
}

impl RecordingDialogueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beats(&self) -> Vec<BeatRecord> {
        self.beats.borrow().clone()
    }

    fn scripted_reply(beat: MissionBeat) -> &'static str {
        match beat {
            MissionBeat::Briefing => {
                "Agent, the office clock is already running. Get to the portal."
            }
            MissionBeat::Arrival => {
                "New intel just came through. Find the object and keep your head down."
            }
            MissionBeat::Report => "I have read your report. Come back to the office, now.",
            MissionBeat::RadioRecap => {
                "And that, dear listeners, was tonight's trip through the timeline."
            }
        }
    }
}

impl DialogueSink for RecordingDialogueSink {
    fn deliver(&self, beat: MissionBeat, prompt: &str) -> String {
        let reply = Self::scripted_reply(beat).to_string();
        self.beats.borrow_mut().push(BeatRecord {
            beat: beat.label().to_string(),
            prompt: prompt.to_string(),
            reply: reply.clone(),
        });
        reply
    }
}

/// Guards each narrative beat behind a call-once latch so a chatty scene
/// cannot fire the same generation twice in one mission.
#[derive(Debug, Clone, Default)]
pub struct DialogueDirector {
    sent: [bool; 4],
}

impl DialogueDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers the prompt unless this beat already fired; returns the
    /// reply on the first request only.
    pub fn request(
        &mut self,
        beat: MissionBeat,
        prompt: &str,
        sink: &dyn DialogueSink,
    ) -> Option<String> {
        let slot = &mut self.sent[beat.index()];
        if *slot {
            return None;
        }
        *slot = true;
        Some(sink.deliver(beat, prompt))
    }

    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.sent = [false; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogueDirector, MissionBeat, RecordingDialogueSink};

    #[test]
    fn each_beat_fires_at_most_once() {
        let sink = RecordingDialogueSink::new();
        let mut director = DialogueDirector::new();

        assert!(director
            .request(MissionBeat::Briefing, "go to the hun era", &sink)
            .is_some());
        assert!(director
            .request(MissionBeat::Briefing, "go to the hun era", &sink)
            .is_none());
        assert!(director
            .request(MissionBeat::Report, "the agent returned", &sink)
            .is_some());

        let beats = sink.beats();
        assert_eq!(beats.len(), 2);
        assert_eq!(beats[0].beat, "briefing");
        assert_eq!(beats[1].beat, "report");
    }

    #[test]
    fn reset_reopens_the_latches() {
        let sink = RecordingDialogueSink::new();
        let mut director = DialogueDirector::new();
        director.request(MissionBeat::Arrival, "prompt", &sink);
        director.reset();
        assert!(director
            .request(MissionBeat::Arrival, "prompt", &sink)
            .is_some());
    }
}
