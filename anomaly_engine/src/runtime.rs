use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use anomaly_mission::countdown::CountdownPhase;
use anomaly_mission::prompts::PromptDeck;
use anomaly_mission::scenes::SceneGraph;

use crate::cli::Args;
use crate::dialogue::{BeatRecord, DialogueDirector, DialogueSink, MissionBeat, RecordingDialogueSink};
use crate::keys::load_api_keys;
use crate::session::{MissionConfig, MissionSession};
use crate::speech::{FailureCue, RecordingSpeechSynth, SpeechGate, SpeechSynth, Utterance};

const OFFICE_SCENE: &str = "BossOffice_1";
const ERA_SCENE: &str = "Testscene_Hun_1";
const TENT_SCENE: &str = "Testscene_Hun_tent_1";

const SUPERVISOR_VOICE: &str = "onyx";
const RADIO_VOICE: &str = "adriansaad";

#[derive(Serialize)]
struct EventLog<'a> {
    events: &'a [String],
}

#[derive(Serialize)]
struct Transcript {
    beats: Vec<BeatRecord>,
    utterances: Vec<Utterance>,
}

/// Runs the scripted retrieval mission frame by frame and dumps the
/// requested artifacts.
pub fn execute(args: Args) -> Result<()> {
    let Args {
        mission_seconds,
        middle_seconds,
        win_scene,
        fail_scene,
        era,
        anomaly_object,
        supervisor_mood,
        frame_seconds,
        lever_delay,
        let_expire,
        keys,
        event_log_json,
        report_json,
        transcript_json,
        verbose,
    } = args;

    if frame_seconds <= 0.0 {
        bail!("--frame-seconds must be positive");
    }

    let credentials = match keys.as_ref() {
        Some(path) => match load_api_keys(path) {
            Ok(loaded) => {
                println!("Loaded speech credentials from {}", path.display());
                Some(loaded)
            }
            Err(err) => {
                eprintln!("[anomaly_engine] warning: {err}; continuing without credentials");
                None
            }
        },
        None => {
            if verbose {
                eprintln!("[anomaly_engine] info: no key collection given; collaborators stay inert");
            }
            None
        }
    };
    if let Some(loaded) = credentials.as_ref() {
        println!(
            "Speech providers configured: play.ht ({} chars, user {}), openai ({} chars)",
            loaded.playht_api_key.len(),
            loaded.playht_user_id,
            loaded.openai_api_key.len()
        );
    }

    let mut deck = PromptDeck::default();
    deck.era = era;
    deck.anomaly_object = anomaly_object;
    deck.supervisor_mood = supervisor_mood;

    let mut graph = SceneGraph::new();
    graph.insert_scene(OFFICE_SCENE, "OfficeSpawn");
    graph.insert_scene(ERA_SCENE, "DefaultSpawn");
    graph.add_arrival(ERA_SCENE, TENT_SCENE, "ExitSpawn");
    graph.insert_scene(TENT_SCENE, "TentSpawn");
    graph.insert_scene(&win_scene, "DebriefSpawn");
    graph.insert_scene(&fail_scene, "DebriefSpawn");

    let mut session = MissionSession::new(MissionConfig {
        mission_seconds,
        middle_seconds,
        win_scene: win_scene.clone(),
        fail_scene: fail_scene.clone(),
        start_scene: OFFICE_SCENE.to_string(),
        lever_delay_seconds: lever_delay,
        deck,
        scene_graph: graph,
        rune_glyphs: vec![
            "I".to_string(),
            "II".to_string(),
            "III".to_string(),
            "IV".to_string(),
        ],
    });
    if credentials.is_some() {
        session.note("keys.loaded");
    }

    let synth = RecordingSpeechSynth::new();
    let sink = RecordingDialogueSink::new();
    let mut gate = SpeechGate::new();
    let mut director = DialogueDirector::new();
    let mut failure_cue = FailureCue::new();

    // Briefing call in the office, then the clock gets armed on the prop.
    let briefing = session.deck().briefing_prompt();
    speak_beat(
        &mut session,
        &mut director,
        &mut gate,
        &sink,
        &synth,
        MissionBeat::Briefing,
        &briefing,
        SUPERVISOR_VOICE,
    );
    session.trigger_timer();
    session.trigger_timer();
    run_frames(&mut session, 3, frame_seconds);

    // Dial in the destination year and jump out.
    for extension in [0.2, 0.55, 0.8] {
        session.set_dial_extension(extension);
    }
    session.request_switch(ERA_SCENE, 2.0);
    advance_until(&mut session, frame_seconds, 64, |state| {
        state.current_scene() == ERA_SCENE
    })?;

    if !gate.is_first_ready() {
        session.note("speech.pending briefing");
    }
    let arrival = session.deck().arrival_prompt();
    speak_beat(
        &mut session,
        &mut director,
        &mut gate,
        &sink,
        &synth,
        MissionBeat::Arrival,
        &arrival,
        SUPERVISOR_VOICE,
    );

    // The hunt: into the tent, open the rune chest, grab the object.
    session.request_switch(TENT_SCENE, 1.0);
    advance_until(&mut session, frame_seconds, 64, |state| {
        state.current_scene() == TENT_SCENE
    })?;
    session.place_rune(0, "IV");
    session.place_rune(0, "I");
    session.place_rune(1, "II");
    session.place_rune(2, "III");
    session.place_rune(3, "IV");
    session.complete_objective();
    session.request_switch(ERA_SCENE, 1.0);
    advance_until(&mut session, frame_seconds, 64, |state| {
        state.current_scene() == ERA_SCENE
    })?;

    if let_expire {
        let cap = (mission_seconds / frame_seconds).ceil() as usize + 16;
        advance_until(&mut session, frame_seconds, cap, |state| {
            state.clock_phase() == CountdownPhase::Expired
        })?;
    } else {
        run_frames(&mut session, 20, frame_seconds);
    }

    // Back at the return lever: checkpoint, report call, then the pull.
    let report = session.checkpoint();
    let debrief = session.deck().report_prompt(&report);
    speak_beat(
        &mut session,
        &mut director,
        &mut gate,
        &sink,
        &synth,
        MissionBeat::Report,
        &debrief,
        SUPERVISOR_VOICE,
    );

    if session.failed_officially() {
        let stored = synth.last_handle();
        if let Some(handle) = failure_cue.try_play(&gate, stored.as_deref()) {
            session.note(format!("speech.replay {handle}"));
        }
    }

    if gate.is_second_ready() {
        session.pull_lever();
    } else {
        session.note("lever.blocked speech_pending");
    }
    advance_until(&mut session, frame_seconds, 64, |state| {
        state.current_scene() == win_scene || state.current_scene() == fail_scene
    })?;

    // Radio recap once the agent is back in a debrief scene.
    let radio = match session.report() {
        Some(report) => session.deck().radio_report_prompt(report),
        None => String::new(),
    };
    if !radio.is_empty() {
        speak_beat(
            &mut session,
            &mut director,
            &mut gate,
            &sink,
            &synth,
            MissionBeat::RadioRecap,
            &radio,
            RADIO_VOICE,
        );
    }

    let tier_label = session
        .tier()
        .map(|tier| tier.label())
        .unwrap_or("unresolved");
    println!(
        "Clock: {} ({:.0}s remaining)",
        session.clock_display(),
        session.remaining()
    );
    println!("Tier: {tier_label}");
    println!("Chest opened: {}", session.chest_open());
    println!("Final scene: {}", session.current_scene());

    println!("\nSession events:");
    for event in session.events() {
        println!("  {event}");
    }

    if verbose {
        println!("\nDialogue transcript:");
        for beat in sink.beats() {
            println!("  [{}] {}", beat.beat, beat.reply);
        }
        println!("\nUtterances:");
        for utterance in synth.utterances() {
            println!("  {} ({}): {}", utterance.handle, utterance.voice, utterance.line);
        }
    }

    if let Some(path) = event_log_json.as_ref() {
        let log = EventLog {
            events: session.events(),
        };
        write_json_artifact(path, &log, "session event log")?;
    }
    if let Some(path) = report_json.as_ref() {
        write_json_artifact(path, &session.summary(), "mission summary")?;
    }
    if let Some(path) = transcript_json.as_ref() {
        let transcript = Transcript {
            beats: sink.beats(),
            utterances: synth.utterances(),
        };
        write_json_artifact(path, &transcript, "dialogue transcript")?;
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn speak_beat(
    session: &mut MissionSession,
    director: &mut DialogueDirector,
    gate: &mut SpeechGate,
    sink: &dyn DialogueSink,
    synth: &dyn SpeechSynth,
    beat: MissionBeat,
    prompt: &str,
    voice: &str,
) {
    let Some(reply) = director.request(beat, prompt, sink) else {
        return;
    };
    session.note(format!("dialogue.{}", beat.label()));
    let handle = synth.synthesize(voice, &reply);
    session.note(format!("speech.synthesize {handle}"));
    if let Some(latch) = gate.mark_ready() {
        session.note(format!("speech.ready {latch}"));
    }
}

fn run_frames(session: &mut MissionSession, frames: usize, frame_seconds: f32) {
    for _ in 0..frames {
        session.advance(frame_seconds);
    }
}

fn advance_until<F>(
    session: &mut MissionSession,
    frame_seconds: f32,
    max_frames: usize,
    done: F,
) -> Result<()>
where
    F: Fn(&MissionSession) -> bool,
{
    for _ in 0..max_frames {
        if done(session) {
            return Ok(());
        }
        session.advance(frame_seconds);
    }
    if done(session) {
        return Ok(());
    }
    bail!("simulation stalled after {max_frames} frames")
}

fn write_json_artifact<T: Serialize>(path: &Path, value: &T, label: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {label} to JSON"))?;
    fs::write(path, &json).with_context(|| format!("writing {label} to {}", path.display()))?;
    println!("Saved {label} to {}", path.display());
    Ok(())
}
