use serde::Serialize;

use anomaly_mission::countdown::{CountdownPhase, CountdownState};
use anomaly_mission::dial::{format_year, DialRange, TimelineDial};
use anomaly_mission::outcome::{classify, OutcomeThresholds, OutcomeTier};
use anomaly_mission::prompts::{MissionReport, PromptDeck};
use anomaly_mission::puzzle::{RuneBoard, SnapOutcome};
use anomaly_mission::scenes::{DelayedSwitch, SceneGraph, SceneRouter};

/// Everything a session needs up front. Built once by the host; no piece
/// of the session discovers collaborators at runtime.
#[derive(Debug, Clone)]
pub struct MissionConfig {
    pub mission_seconds: f32,
    pub middle_seconds: f32,
    pub win_scene: String,
    pub fail_scene: String,
    pub start_scene: String,
    pub lever_delay_seconds: f32,
    pub deck: PromptDeck,
    pub scene_graph: SceneGraph,
    pub rune_glyphs: Vec<String>,
}

/// Snapshot of where the mission ended up, for the report artifact.
#[derive(Debug, Clone, Serialize)]
pub struct MissionSummary {
    pub final_scene: String,
    pub came_from: Option<String>,
    pub remaining_seconds: f32,
    pub clock_display: String,
    pub failed_officially: bool,
    pub tier: Option<OutcomeTier>,
    pub report: Option<MissionReport>,
}

/// The process-wide mission state. One instance owns the clock, the
/// routing, the prompt deck and the puzzle board for the whole run;
/// scene transitions only reset the per-scene latches.
pub struct MissionSession {
    countdown: CountdownState,
    thresholds: OutcomeThresholds,
    router: SceneRouter,
    deck: PromptDeck,
    dial: TimelineDial,
    board: RuneBoard,
    graph: SceneGraph,
    mission_seconds: f32,
    lever_delay_seconds: f32,
    current_scene: String,
    came_from: Option<String>,
    pending: Option<DelayedSwitch>,
    routed_scene: Option<String>,
    lever_pulled: bool,
    objective_done: bool,
    failed_officially: bool,
    tier: Option<OutcomeTier>,
    report: Option<MissionReport>,
    events: Vec<String>,
}

impl MissionSession {
    pub fn new(config: MissionConfig) -> Self {
        let MissionConfig {
            mission_seconds,
            middle_seconds,
            win_scene,
            fail_scene,
            start_scene,
            lever_delay_seconds,
            deck,
            scene_graph,
            rune_glyphs,
        } = config;

        let mut session = MissionSession {
            countdown: CountdownState::new(),
            thresholds: OutcomeThresholds::new(mission_seconds, middle_seconds),
            router: SceneRouter::new(win_scene, fail_scene),
            deck,
            dial: TimelineDial::new(DialRange::default()),
            board: RuneBoard::new(rune_glyphs),
            graph: scene_graph,
            mission_seconds,
            lever_delay_seconds,
            current_scene: String::new(),
            came_from: None,
            pending: None,
            routed_scene: None,
            lever_pulled: false,
            objective_done: false,
            failed_officially: false,
            tier: None,
            report: None,
            events: Vec::new(),
        };
        session.enter_scene(start_scene);
        session
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    pub fn remaining(&self) -> f32 {
        self.countdown.remaining()
    }

    pub fn clock_phase(&self) -> CountdownPhase {
        self.countdown.phase()
    }

    pub fn clock_display(&self) -> String {
        self.countdown.display()
    }

    pub fn tier(&self) -> Option<OutcomeTier> {
        self.tier
    }

    pub fn report(&self) -> Option<&MissionReport> {
        self.report.as_ref()
    }

    pub fn deck(&self) -> &PromptDeck {
        &self.deck
    }

    pub fn failed_officially(&self) -> bool {
        self.failed_officially
    }

    pub fn chest_open(&self) -> bool {
        self.board.is_open()
    }

    /// Appends a host-side marker to the session event stream so
    /// collaborator activity interleaves with mission events in order.
    pub fn note(&mut self, label: impl Into<String>) {
        self.events.push(label.into());
    }

    /// Arms the mission clock. Repeat triggers are recorded and ignored.
    pub fn trigger_timer(&mut self) {
        if self.countdown.start(self.mission_seconds) {
            self.events
                .push(format!("timer.start {:.0}", self.mission_seconds));
        } else {
            self.events.push("timer.retrigger ignored".to_string());
        }
    }

    /// One frame of simulated time: the clock ticks, and any armed scene
    /// change is polled against the frame's elapsed time.
    pub fn advance(&mut self, delta_seconds: f32) {
        if self.countdown.tick(delta_seconds) {
            self.events.push("timer.expired".to_string());
        }

        if let Some(pending) = self.pending.as_mut() {
            if pending.poll(delta_seconds) {
                let target = pending.target().to_string();
                self.pending = None;
                self.enter_scene(target);
            }
        }
    }

    /// Feeds a dial extension sample; logs only on an actual year change.
    pub fn set_dial_extension(&mut self, extension: f32) {
        if let Some(year) = self.dial.set_extension(extension) {
            self.events.push(format!("dial.year {}", format_year(year)));
        }
    }

    /// Seats a rune on the chest board, logging accepted and bounced
    /// placements alike. The chest latch event fires exactly once.
    pub fn place_rune(&mut self, socket: usize, glyph: &str) {
        match self.board.place(socket, glyph) {
            SnapOutcome::Snapped { latch_opened } => {
                self.events.push(format!("rune.snap {socket} {glyph}"));
                if latch_opened {
                    self.events.push("chest.open".to_string());
                }
            }
            SnapOutcome::Occupied => {
                self.events
                    .push(format!("rune.reject {socket} {glyph} occupied"));
            }
            SnapOutcome::WrongGlyph => {
                self.events
                    .push(format!("rune.reject {socket} {glyph} wrong_glyph"));
            }
            SnapOutcome::UnknownSocket => {
                self.events
                    .push(format!("rune.reject {socket} {glyph} unknown_socket"));
            }
        }
    }

    /// The mission-time check: classifies the remaining clock, records the
    /// tier, points the routed scene at win or fail, and freezes the
    /// mission report. Re-running against an unchanged clock lands on the
    /// same tier and the same route.
    pub fn checkpoint(&mut self) -> MissionReport {
        let remaining = self.countdown.remaining();
        let tier = classify(remaining, &self.thresholds);
        if tier == OutcomeTier::Failed {
            self.deck.mark_object_not_retrieved();
            self.failed_officially = true;
        }
        let destination = self.router.route(tier).to_string();
        let report = self.deck.build_report(tier);

        self.events.push(format!(
            "checkpoint.tier {} remaining={:.0}",
            tier.label(),
            remaining
        ));
        self.events.push(format!("scene.route {destination}"));

        self.tier = Some(tier);
        self.routed_scene = Some(destination);
        self.report = Some(report.clone());
        report
    }

    /// Pulls the return lever: arms the routed scene change behind the
    /// configured delay. One shot per scene; pulls before a checkpoint has
    /// routed anything are recorded and dropped.
    pub fn pull_lever(&mut self) -> bool {
        if self.lever_pulled {
            self.events.push("lever.ignored".to_string());
            return false;
        }
        let Some(target) = self.routed_scene.clone() else {
            self.events.push("lever.unrouted".to_string());
            return false;
        };
        self.lever_pulled = true;
        self.pending = Some(DelayedSwitch::new(
            target.clone(),
            self.lever_delay_seconds,
        ));
        self.events.push(format!(
            "lever.pull {target} delay={:.0}",
            self.lever_delay_seconds
        ));
        true
    }

    /// Arms an arbitrary scene change (walk-through triggers, the outbound
    /// time jump). Ignored while another change is already in flight.
    pub fn request_switch(&mut self, target: &str, delay_seconds: f32) {
        if self.pending.is_some() {
            self.events.push(format!("scene.request {target} dropped"));
            return;
        }
        self.pending = Some(DelayedSwitch::new(target, delay_seconds));
        self.events
            .push(format!("scene.request {target} delay={delay_seconds:.0}"));
    }

    /// Fires the scene objective at most once per scene visit.
    pub fn complete_objective(&mut self) -> bool {
        if self.objective_done {
            return false;
        }
        self.objective_done = true;
        self.events
            .push(format!("objective.complete {}", self.current_scene));
        true
    }

    /// Clears the mission back to its unarmed state, keeping the scene
    /// graph and routing configuration.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.countdown.reset();
        self.board.reset();
        self.pending = None;
        self.routed_scene = None;
        self.lever_pulled = false;
        self.objective_done = false;
        self.failed_officially = false;
        self.tier = None;
        self.report = None;
        self.events.push("session.reset".to_string());
    }

    pub fn summary(&self) -> MissionSummary {
        MissionSummary {
            final_scene: self.current_scene.clone(),
            came_from: self.came_from.clone(),
            remaining_seconds: self.countdown.remaining(),
            clock_display: self.countdown.display(),
            failed_officially: self.failed_officially,
            tier: self.tier,
            report: self.report.clone(),
        }
    }

    fn enter_scene(&mut self, target: String) {
        let came_from = if self.current_scene.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.current_scene))
        };
        if came_from.is_none() && !self.graph.contains(&target) {
            eprintln!("[anomaly_engine] warning: starting scene {target} is not in the scene graph");
        }
        let spawn = self
            .graph
            .spawn_point_for(&target, came_from.as_deref())
            .unwrap_or("DefaultSpawn")
            .to_string();
        if came_from.is_some() {
            self.events.push(format!("scene.switch {target} spawn={spawn}"));
        } else {
            self.events.push(format!("scene.arrive {target} spawn={spawn}"));
        }
        self.came_from = came_from;
        self.current_scene = target;
        self.lever_pulled = false;
        self.objective_done = false;
    }
}
