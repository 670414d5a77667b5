#![cfg(target_arch = "wasm32")]
//! Browser bridge. The host page owns the canvas, the audio graph and the DOM;
//! it forwards pointer events and animation-frame timestamps here and reads
//! back packed float buffers and audio cues after each frame.

mod constants;
mod pack;

use anyhow::Context;
use bonsai_core::{parse_seed, AudioCue, PointerEvent, SceneOptions, SceneState, Viewport};
use constants::*;
use glam::Vec2;
use js_sys::{Array, Float32Array};
use pack::FrameBuffers;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("bonsai-web starting");
    Ok(())
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

fn secs(ms: f64) -> f64 {
    ms / MS_PER_SEC
}

/// Host clock in seconds, for callers that have no event timestamp at hand.
fn host_now() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| secs(p.now()))
        .unwrap_or(0.0)
}

fn viewport_or_default(width: f32, height: f32) -> Viewport {
    let vp = Viewport::new(width, height);
    if vp.width > 0.0 && vp.height > 0.0 {
        vp
    } else {
        log::warn!("[bridge] unusable viewport {}x{}, using default", width, height);
        Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn seed_arg(seed: Option<String>) -> anyhow::Result<Option<u32>> {
    seed.filter(|s| !s.trim().is_empty())
        .map(|s| parse_seed(&s))
        .transpose()
        .context("seed")
}

#[wasm_bindgen]
pub struct BonsaiApp {
    scene: SceneState,
    cues: Vec<AudioCue>,
    buffers: FrameBuffers,
    config: Vec<f32>,
}

impl BonsaiApp {
    fn build(width: f32, height: f32, seed: Option<String>) -> anyhow::Result<BonsaiApp> {
        let options = SceneOptions {
            seed: seed_arg(seed)?,
            viewport: viewport_or_default(width, height),
            ..SceneOptions::default()
        };
        let scene = SceneState::new(options, host_now()).context("scene init")?;
        let mut app = BonsaiApp {
            scene,
            cues: Vec::new(),
            buffers: FrameBuffers::default(),
            config: Vec::with_capacity(CONFIG_STRIDE),
        };
        app.refresh_config();
        Ok(app)
    }

    fn refresh_config(&mut self) {
        pack::config(&mut self.config, self.scene.config(), &self.scene.viewport());
    }
}

#[wasm_bindgen]
impl BonsaiApp {
    /// Build a scene for a `width` x `height` canvas. `seed` may be decimal or
    /// `0x` hex; omit it for a random scene.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<String>) -> Result<BonsaiApp, JsValue> {
        Self::build(width, height, seed).map_err(to_js)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, time_ms: f64) {
        self.scene.push_pointer(PointerEvent::Move {
            pos: Vec2::new(x, y),
            time: secs(time_ms),
        });
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, time_ms: f64) {
        self.scene.push_pointer(PointerEvent::Down {
            pos: Vec2::new(x, y),
            time: secs(time_ms),
        });
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, time_ms: f64) {
        self.scene.push_pointer(PointerEvent::Up {
            pos: Vec2::new(x, y),
            time: secs(time_ms),
        });
    }

    /// Advance one animation frame and refill the render buffers. Returns the
    /// number of audio cues raised since the last `take_cues`.
    pub fn frame(&mut self, now_ms: f64) -> usize {
        let now = secs(now_ms);
        self.scene.frame(now, &mut self.cues);
        let snap = self.scene.snapshot(now);
        self.buffers.fill(&snap);
        self.cues.len()
    }

    /// Drain pending audio cues as `[name, intensity]` pairs.
    pub fn take_cues(&mut self) -> Array {
        self.cues
            .drain(..)
            .map(|c| Array::of2(&JsValue::from_str(c.name()), &JsValue::from_f64(c.intensity() as f64)))
            .collect()
    }

    pub fn set_speed(&mut self, now_ms: f64, speed: f64) -> Result<(), JsValue> {
        self.scene
            .set_speed(secs(now_ms), speed)
            .context("set speed")
            .map_err(to_js)
    }

    /// Returns true when the scene is now paused.
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        self.scene.toggle_pause(secs(now_ms))
    }

    pub fn restart(&mut self, now_ms: f64, seed: Option<String>) -> Result<(), JsValue> {
        let seed = seed_arg(seed).map_err(to_js)?;
        self.scene.restart(seed, secs(now_ms));
        self.cues.clear();
        self.refresh_config();
        Ok(())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let vp = viewport_or_default(width, height);
        self.scene.resize(vp.width, vp.height);
        self.refresh_config();
    }

    pub fn seed(&self) -> u32 {
        self.scene.seed()
    }

    pub fn seed_hex(&self) -> String {
        format!("{:#010x}", self.scene.seed())
    }

    pub fn paused(&self) -> bool {
        self.scene.is_paused()
    }

    pub fn progress(&self, now_ms: f64) -> f32 {
        self.scene.progress(secs(now_ms))
    }

    pub fn maturity(&self, now_ms: f64) -> f32 {
        self.scene.maturity(secs(now_ms))
    }

    pub fn config(&self) -> Float32Array {
        Float32Array::from(self.config.as_slice())
    }

    pub fn branches(&self) -> Float32Array {
        Float32Array::from(self.buffers.branches.as_slice())
    }

    pub fn leaves(&self) -> Float32Array {
        Float32Array::from(self.buffers.leaves.as_slice())
    }

    pub fn ripples(&self) -> Float32Array {
        Float32Array::from(self.buffers.ripples.as_slice())
    }

    pub fn stones(&self) -> Float32Array {
        Float32Array::from(self.buffers.stones.as_slice())
    }

    pub fn petals(&self) -> Float32Array {
        Float32Array::from(self.buffers.petals.as_slice())
    }

    pub fn motes(&self) -> Float32Array {
        Float32Array::from(self.buffers.motes.as_slice())
    }

    /// Speckle layout per stone: `[x, y, r, tone]` in stone-size units.
    pub fn speckles(&self, stone: usize) -> Float32Array {
        let data: Vec<f32> = self
            .scene
            .config()
            .stones
            .get(stone)
            .map(|s| s.speckles.iter().flat_map(|p| [p.x, p.y, p.r, p.tone]).collect())
            .unwrap_or_default();
        Float32Array::from(data.as_slice())
    }
}
