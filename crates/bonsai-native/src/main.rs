//! Headless driver: builds a scene from `BONSAI_*` environment settings, plays
//! a scripted pointer session on a virtual 60 fps clock and logs what the
//! render and audio consumers would have received.

mod script;

use anyhow::{Context, Result};
use bonsai_core::{parse_seed, AudioCue, SceneOptions, SceneState, Viewport};
use instant::Instant;
use script::Script;
use std::collections::BTreeMap;

const FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_FRAMES: usize = 1800;

struct Settings {
    seed: Option<u32>,
    width: f32,
    height: f32,
    speed: f64,
    frames: usize,
}

fn env_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{name}={v:?}")),
        Err(_) => Ok(None),
    }
}

impl Settings {
    fn from_env() -> Result<Self> {
        let seed = match std::env::var("BONSAI_SEED") {
            Ok(s) => Some(parse_seed(&s).context("BONSAI_SEED")?),
            Err(_) => None,
        };
        let defaults = SceneOptions::default();
        Ok(Self {
            seed,
            width: env_var("BONSAI_WIDTH")?.unwrap_or(defaults.viewport.width),
            height: env_var("BONSAI_HEIGHT")?.unwrap_or(defaults.viewport.height),
            speed: env_var("BONSAI_SPEED")?.unwrap_or(defaults.speed),
            frames: env_var("BONSAI_FRAMES")?.unwrap_or(DEFAULT_FRAMES),
        })
    }
}

#[derive(Default)]
struct Stats {
    cues: BTreeMap<&'static str, usize>,
    peak_ripples: usize,
    peak_rustles: usize,
    drawn_branches: usize,
    drawn_leaves: usize,
}

impl Stats {
    fn record(&mut self, scene: &SceneState, cues: &[AudioCue], now: f64) {
        for cue in cues {
            *self.cues.entry(cue.name()).or_default() += 1;
        }
        let snap = scene.snapshot(now);
        self.peak_ripples = self.peak_ripples.max(snap.ripples.len());
        self.peak_rustles = self.peak_rustles.max(scene.disturbances().len());
        self.drawn_branches = snap.branches.len();
        self.drawn_leaves = snap.leaves.len() + snap.mature_leaves.len();
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = Settings::from_env()?;
    let options = SceneOptions {
        seed: settings.seed,
        viewport: Viewport::new(settings.width, settings.height),
        speed: settings.speed,
    };
    let mut scene = SceneState::new(options, 0.0).context("scene init")?;
    log::info!(
        "[native] seed={:#010x} viewport={}x{} speed={} frames={}",
        scene.seed(),
        settings.width,
        settings.height,
        settings.speed,
        settings.frames
    );

    let script = Script::new(&scene);
    let mut stats = Stats::default();
    let mut cues = Vec::new();
    let started = Instant::now();

    for frame in 0..settings.frames {
        let now = frame as f64 * FRAME_DT;
        script.drive(&mut scene, frame, now)?;
        cues.clear();
        scene.frame(now, &mut cues);
        stats.record(&scene, &cues, now);
        for cue in &cues {
            log::debug!("[native] t={:.2} cue {} {:.2}", now, cue.name(), cue.intensity());
        }
    }

    let elapsed = started.elapsed();
    let end = settings.frames as f64 * FRAME_DT;
    log::info!(
        "[native] {} frames in {:.1} ms ({:.3} ms/frame)",
        settings.frames,
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / settings.frames.max(1) as f64
    );
    log::info!(
        "[native] progress={:.3} maturity={:.3} branches drawn={}/{} leaves drawn={}",
        scene.progress(end),
        scene.maturity(end),
        stats.drawn_branches,
        scene.tree().branches.len(),
        stats.drawn_leaves
    );
    log::info!(
        "[native] peak ripples={} peak rustles={} cues={:?}",
        stats.peak_ripples,
        stats.peak_rustles,
        stats.cues
    );
    Ok(())
}
