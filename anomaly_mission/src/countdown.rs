use serde::Serialize;

/// Phase of the mission clock. The only transition that signals is
/// `Running -> Expired`, and it signals exactly once per armed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    Idle,
    Running,
    Expired,
}

/// Mission clock that outlives individual scenes. The session owns one
/// instance for the whole run; scene changes never touch it.
#[derive(Debug, Clone, Serialize)]
pub struct CountdownState {
    remaining_seconds: f32,
    started: bool,
    phase: CountdownPhase,
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownState {
    pub fn new() -> Self {
        CountdownState {
            remaining_seconds: 0.0,
            started: false,
            phase: CountdownPhase::Idle,
        }
    }

    /// Arms the clock. Returns false (and changes nothing) when a previous
    /// trigger already armed it; repeat pulls on the trigger prop must not
    /// restart the mission.
    pub fn start(&mut self, duration_seconds: f32) -> bool {
        if self.started {
            return false;
        }
        self.remaining_seconds = duration_seconds.max(0.0);
        self.started = true;
        self.phase = if self.remaining_seconds > 0.0 {
            CountdownPhase::Running
        } else {
            CountdownPhase::Expired
        };
        true
    }

    /// Advances the clock by one frame's elapsed time. Returns true only on
    /// the tick where the clock crosses zero; later ticks are inert.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if self.phase != CountdownPhase::Running {
            return false;
        }
        self.remaining_seconds = (self.remaining_seconds - delta_seconds.max(0.0)).max(0.0);
        if self.remaining_seconds <= 0.0 {
            self.remaining_seconds = 0.0;
            self.phase = CountdownPhase::Expired;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> f32 {
        self.remaining_seconds
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Back to an unarmed clock; the next `start` arms a fresh cycle with a
    /// fresh expiry signal.
    pub fn reset(&mut self) {
        *self = CountdownState::new();
    }

    /// Text for the countdown display surface: `MM:SS` while the clock has
    /// time on it, the terminal banner once it runs out.
    pub fn display(&self) -> String {
        if self.phase == CountdownPhase::Expired {
            return "Time's up!".to_string();
        }
        let whole = self.remaining_seconds.max(0.0) as u32;
        format!("{:02}:{:02}", whole / 60, whole % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::{CountdownPhase, CountdownState};

    #[test]
    fn second_start_does_not_rearm() {
        let mut clock = CountdownState::new();
        assert!(clock.start(300.0));
        clock.tick(40.0);
        assert!(!clock.start(300.0));
        assert_eq!(clock.remaining(), 260.0);
    }

    #[test]
    fn tick_clamps_at_zero() {
        let mut clock = CountdownState::new();
        clock.start(5.0);
        clock.tick(12.0);
        assert_eq!(clock.remaining(), 0.0);
        clock.tick(1.0);
        assert_eq!(clock.remaining(), 0.0);
    }

    #[test]
    fn expiry_signals_exactly_once_per_cycle() {
        let mut clock = CountdownState::new();
        clock.start(2.0);
        assert!(!clock.tick(1.0));
        assert!(clock.tick(1.0));
        assert!(!clock.tick(1.0));
        assert_eq!(clock.phase(), CountdownPhase::Expired);

        clock.reset();
        clock.start(1.0);
        assert!(clock.tick(1.0));
    }

    #[test]
    fn ticking_an_unarmed_clock_is_inert() {
        let mut clock = CountdownState::new();
        assert!(!clock.tick(10.0));
        assert_eq!(clock.remaining(), 0.0);
        assert_eq!(clock.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn display_counts_down_then_reports_expiry() {
        let mut clock = CountdownState::new();
        clock.start(300.0);
        assert_eq!(clock.display(), "05:00");
        clock.tick(61.0);
        assert_eq!(clock.display(), "03:59");
        clock.tick(500.0);
        assert_eq!(clock.display(), "Time's up!");
    }
}
