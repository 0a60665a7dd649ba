use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

/// Outbound text-to-speech collaborator. The live providers sit behind
/// HTTPS and stay outside this host; anything implementing this trait can
/// stand in for them.
pub trait SpeechSynth {
    /// Synthesizes one line and returns the utterance handle.
    fn synthesize(&self, voice: &str, line: &str) -> String;
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Utterance {
    pub voice: String,
    pub line: String,
    pub handle: String,
}

/// Collects every requested utterance instead of talking to a provider.
#[derive(Clone, Default)]
pub struct RecordingSpeechSynth {
    utterances: Rc<RefCell<Vec<Utterance>>>,
    counter: Cell<u32>,
}

impl RecordingSpeechSynth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        self.utterances.borrow().clone()
    }

    pub fn last_handle(&self) -> Option<String> {
        self.utterances
            .borrow()
            .last()
            .map(|utterance| utterance.handle.clone())
    }
}

impl SpeechSynth for RecordingSpeechSynth {
    fn synthesize(&self, voice: &str, line: &str) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        let handle = format!("tts_{next:04}");
        self.utterances.borrow_mut().push(Utterance {
            voice: voice.to_string(),
            line: line.to_string(),
            handle: handle.clone(),
        });
        handle
    }
}

/// One-way readiness latches over completed utterances. Scene props key
/// off these: the return lever unlocks once the second line is ready, and
/// the failure line plays only after the third.
#[derive(Debug, Clone, Default)]
pub struct SpeechGate {
    completed: u32,
}

impl SpeechGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed utterance and names the latch it flipped, if
    /// any; completions past the third flip nothing.
    pub fn mark_ready(&mut self) -> Option<&'static str> {
        self.completed += 1;
        match self.completed {
            1 => Some("first"),
            2 => Some("second"),
            3 => Some("third"),
            _ => None,
        }
    }

    pub fn is_first_ready(&self) -> bool {
        self.completed >= 1
    }

    pub fn is_second_ready(&self) -> bool {
        self.completed >= 2
    }

    pub fn is_third_ready(&self) -> bool {
        self.completed >= 3
    }

    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.completed = 0;
    }
}

/// Plays the stored failure line at most once, and only after the third
/// utterance latch has flipped.
#[derive(Debug, Clone, Default)]
pub struct FailureCue {
    played: bool,
}

impl FailureCue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle to replay the one time the cue actually fires.
    pub fn try_play<'a>(&mut self, gate: &SpeechGate, handle: Option<&'a str>) -> Option<&'a str> {
        if self.played || !gate.is_third_ready() {
            return None;
        }
        let handle = handle?;
        self.played = true;
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::{FailureCue, RecordingSpeechSynth, SpeechGate, SpeechSynth};

    #[test]
    fn recording_synth_hands_out_sequential_handles() {
        let synth = RecordingSpeechSynth::new();
        let first = synth.synthesize("onyx", "Head out, agent.");
        let second = synth.synthesize("onyx", "We have the intel.");
        assert_eq!(first, "tts_0001");
        assert_eq!(second, "tts_0002");

        let utterances = synth.utterances();
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].line, "Head out, agent.");
        assert_eq!(synth.last_handle().as_deref(), Some("tts_0002"));
    }

    #[test]
    fn latches_flip_in_order_and_stay_flipped() {
        let mut gate = SpeechGate::new();
        assert!(!gate.is_first_ready());
        assert_eq!(gate.mark_ready(), Some("first"));
        assert_eq!(gate.mark_ready(), Some("second"));
        assert!(gate.is_second_ready());
        assert!(!gate.is_third_ready());
        assert_eq!(gate.mark_ready(), Some("third"));
        assert_eq!(gate.mark_ready(), None);
        assert!(gate.is_third_ready());
    }

    #[test]
    fn failure_cue_waits_for_the_third_latch_and_fires_once() {
        let mut gate = SpeechGate::new();
        let mut cue = FailureCue::new();
        assert_eq!(cue.try_play(&gate, Some("tts_0003")), None);

        gate.mark_ready();
        gate.mark_ready();
        gate.mark_ready();
        assert_eq!(cue.try_play(&gate, Some("tts_0003")), Some("tts_0003"));
        assert_eq!(cue.try_play(&gate, Some("tts_0003")), None);
    }
}
