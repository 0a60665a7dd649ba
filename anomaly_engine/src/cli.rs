use std::path::PathBuf;

use clap::Parser;

/// Headless host that drives one scripted retrieval mission end to end.
#[derive(Parser, Debug)]
#[command(
    about = "Headless host that drives a time-anomaly retrieval mission",
    version
)]
pub struct Args {
    /// Mission length in seconds before the clock runs out
    #[arg(long, default_value_t = 300.0)]
    pub mission_seconds: f32,

    /// Remaining-time threshold separating an on-time return from a late one
    #[arg(long, default_value_t = 120.0)]
    pub middle_seconds: f32,

    /// Scene loaded when the agent makes it back before the clock runs out
    #[arg(long, default_value = "Win_Scene_v3")]
    pub win_scene: String,

    /// Scene loaded when the mission clock runs out
    #[arg(long, default_value = "Fail_Scene_v3")]
    pub fail_scene: String,

    /// Era the supervisor sends the agent to
    #[arg(long, default_value = "The Hun Era")]
    pub era: String,

    /// Description of today's anomaly object
    #[arg(long, default_value = "A Walkman from the 80s")]
    pub anomaly_object: String,

    /// Mood the supervisor's generated dialogue should carry
    #[arg(long, default_value = "stern but encouraging")]
    pub supervisor_mood: String,

    /// Seconds of simulated time advanced per frame
    #[arg(long, default_value_t = 1.0)]
    pub frame_seconds: f32,

    /// Delay in seconds between the lever pull and the scene change
    #[arg(long, default_value_t = 3.0)]
    pub lever_delay: f32,

    /// Let the mission clock run out instead of returning in time
    #[arg(long)]
    pub let_expire: bool,

    /// XML key collection holding the speech/dialogue credentials
    #[arg(long)]
    pub keys: Option<PathBuf>,

    /// Path to write the session event log as JSON
    #[arg(long)]
    pub event_log_json: Option<PathBuf>,

    /// Path to write the mission summary as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Path to write the dialogue/speech transcript as JSON
    #[arg(long)]
    pub transcript_json: Option<PathBuf>,

    /// Print every session event as it is recorded
    #[arg(long)]
    pub verbose: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
