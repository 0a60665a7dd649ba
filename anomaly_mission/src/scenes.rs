use std::collections::BTreeMap;

use serde::Serialize;

use crate::outcome::OutcomeTier;

/// Static tier-to-destination table. The late tier routes to the win scene
/// on purpose: that is the shipped behavior and callers rely on it.
#[derive(Debug, Clone, Serialize)]
pub struct SceneRouter {
    pub win_scene: String,
    pub fail_scene: String,
}

impl SceneRouter {
    pub fn new(win_scene: impl Into<String>, fail_scene: impl Into<String>) -> Self {
        SceneRouter {
            win_scene: win_scene.into(),
            fail_scene: fail_scene.into(),
        }
    }

    pub fn route(&self, tier: OutcomeTier) -> &str {
        match tier {
            OutcomeTier::OnTime | OutcomeTier::Late => &self.win_scene,
            OutcomeTier::Failed => &self.fail_scene,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SceneEntry {
    default_spawn: String,
    arrivals: BTreeMap<String, String>,
}

/// Explicit registry of scenes and their spawn points, built up front and
/// handed to the session. Arrival spawns are keyed by the scene the player
/// came from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneGraph {
    scenes: BTreeMap<String, SceneEntry>,
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph::default()
    }

    pub fn insert_scene(&mut self, name: impl Into<String>, default_spawn: impl Into<String>) {
        self.scenes.insert(
            name.into(),
            SceneEntry {
                default_spawn: default_spawn.into(),
                arrivals: BTreeMap::new(),
            },
        );
    }

    pub fn add_arrival(
        &mut self,
        scene: &str,
        came_from: impl Into<String>,
        spawn: impl Into<String>,
    ) {
        if let Some(entry) = self.scenes.get_mut(scene) {
            entry.arrivals.insert(came_from.into(), spawn.into());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Picks the spawn point for an arrival: the per-origin override when
    /// one was registered for the previous scene, the default otherwise.
    pub fn spawn_point_for(&self, scene: &str, came_from: Option<&str>) -> Option<&str> {
        let entry = self.scenes.get(scene)?;
        if let Some(from) = came_from {
            if let Some(spawn) = entry.arrivals.get(from) {
                return Some(spawn);
            }
        }
        Some(&entry.default_spawn)
    }
}

/// Scene change armed with a wall-clock delay, polled once per frame.
#[derive(Debug, Clone, Serialize)]
pub struct DelayedSwitch {
    target: String,
    remaining_seconds: f32,
}

impl DelayedSwitch {
    pub fn new(target: impl Into<String>, delay_seconds: f32) -> Self {
        DelayedSwitch {
            target: target.into(),
            remaining_seconds: delay_seconds.max(0.0),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Counts the frame's elapsed time against the delay. Returns true on
    /// the frame whose tick crosses the deadline.
    pub fn poll(&mut self, delta_seconds: f32) -> bool {
        self.remaining_seconds = (self.remaining_seconds - delta_seconds.max(0.0)).max(0.0);
        self.remaining_seconds <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{DelayedSwitch, SceneGraph, SceneRouter};
    use crate::outcome::OutcomeTier;

    #[test]
    fn late_still_routes_to_the_win_scene() {
        let router = SceneRouter::new("Win_Scene_v3", "Fail_Scene_v3");
        assert_eq!(router.route(OutcomeTier::OnTime), "Win_Scene_v3");
        assert_eq!(router.route(OutcomeTier::Late), "Win_Scene_v3");
        assert_eq!(router.route(OutcomeTier::Failed), "Fail_Scene_v3");
    }

    #[test]
    fn spawn_point_prefers_the_arrival_override() {
        let mut graph = SceneGraph::new();
        graph.insert_scene("Testscene_Hun_1", "DefaultSpawn");
        graph.add_arrival("Testscene_Hun_1", "Testscene_Hun_tent_1", "ExitSpawn");

        assert_eq!(
            graph.spawn_point_for("Testscene_Hun_1", Some("Testscene_Hun_tent_1")),
            Some("ExitSpawn")
        );
        assert_eq!(
            graph.spawn_point_for("Testscene_Hun_1", Some("BossOffice_1")),
            Some("DefaultSpawn")
        );
        assert_eq!(
            graph.spawn_point_for("Testscene_Hun_1", None),
            Some("DefaultSpawn")
        );
        assert_eq!(graph.spawn_point_for("Nowhere", None), None);
    }

    #[test]
    fn delayed_switch_completes_on_the_crossing_frame() {
        let mut switch = DelayedSwitch::new("Win_Scene_v3", 3.0);
        assert!(!switch.poll(1.0));
        assert!(!switch.poll(1.0));
        assert!(switch.poll(1.0));
    }

    #[test]
    fn zero_delay_completes_on_the_first_poll() {
        let mut switch = DelayedSwitch::new("Win_Scene_v3", 0.0);
        assert!(switch.poll(0.0));
    }
}
