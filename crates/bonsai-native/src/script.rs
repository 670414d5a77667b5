use anyhow::{Context, Result};
use bonsai_core::{PointerEvent, SceneState};
use glam::Vec2;

// Scripted session, repeating every CYCLE frames
const CYCLE: usize = 600;
const CROWN_SWEEP: (usize, usize) = (60, 120);
const POND_STROKE: (usize, usize) = (150, 190);
const STONE_DOWN: usize = 240;
const STONE_UP: usize = 270;
const PAUSE_AT: usize = 320;
const RESUME_AT: usize = 350;
const SPEED_BOOST_AT: usize = 900; // absolute frame, once
const SPEED_BOOST: f64 = 4.0;
const RESIZE_AT: usize = 1200; // absolute frame, once
const RESIZE_FACTOR: f32 = 0.75;

/// Pointer choreography exercising rustle, wake, stone drag, pause, speed
/// change and resize. Targets are re-derived from the scene every frame so
/// they follow resizes.
pub struct Script {
    base_speed: f64,
}

impl Script {
    pub fn new(scene: &SceneState) -> Self {
        Self {
            base_speed: scene.clock().speed(),
        }
    }

    pub fn drive(&self, scene: &mut SceneState, frame: usize, now: f64) -> Result<()> {
        if frame == SPEED_BOOST_AT {
            scene
                .set_speed(now, self.base_speed * SPEED_BOOST)
                .context("speed boost")?;
            log::info!("[script] speed x{} at t={:.2}", SPEED_BOOST, now);
        }
        if frame == RESIZE_AT {
            let vp = scene.viewport();
            scene.resize(vp.width * RESIZE_FACTOR, vp.height * RESIZE_FACTOR);
        }

        let f = frame % CYCLE;
        match f {
            _ if in_span(f, CROWN_SWEEP) => {
                let bounds = scene.tree().bounds;
                if !bounds.is_empty() {
                    let t = span_t(f, CROWN_SWEEP);
                    let y = bounds.min.y + (bounds.max.y - bounds.min.y) * 0.35;
                    let x = bounds.min.x + (bounds.max.x - bounds.min.x) * t;
                    move_to(scene, Vec2::new(x, y), now);
                }
            }
            _ if in_span(f, POND_STROKE) => {
                let pond = scene.config().pond_ellipse(&scene.viewport());
                let t = span_t(f, POND_STROKE) * 2.0 - 1.0;
                move_to(scene, pond.center + Vec2::new(pond.radii.x * 0.8 * t, 0.0), now);
            }
            STONE_DOWN => {
                let c = stone_center(scene);
                scene.push_pointer(PointerEvent::Down { pos: c, time: now });
            }
            _ if f > STONE_DOWN && f < STONE_UP => {
                if scene.stones().active().is_some() {
                    let k = (f - STONE_DOWN) as f32;
                    let grab = stone_center(scene);
                    move_to(scene, grab + Vec2::new(3.0 * k.min(10.0), -1.5), now);
                }
            }
            STONE_UP => {
                let c = stone_center(scene);
                scene.push_pointer(PointerEvent::Up { pos: c, time: now });
            }
            PAUSE_AT | RESUME_AT => {
                let paused = scene.toggle_pause(now);
                log::info!("[script] paused={} at t={:.2}", paused, now);
            }
            _ => {}
        }
        Ok(())
    }
}

fn in_span(f: usize, (a, b): (usize, usize)) -> bool {
    f >= a && f < b
}

fn span_t(f: usize, (a, b): (usize, usize)) -> f32 {
    (f - a) as f32 / (b - a).max(1) as f32
}

fn move_to(scene: &mut SceneState, pos: Vec2, time: f64) {
    scene.push_pointer(PointerEvent::Move { pos, time });
}

fn stone_center(scene: &SceneState) -> Vec2 {
    scene
        .stones()
        .transform(1, scene.config(), &scene.viewport())
        .center
}
