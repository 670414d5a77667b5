//! Pointer input buffering.
//!
//! Host callbacks only push into an [`InputQueue`]; the scene drains it once
//! at the top of each frame, so handlers never observe a half-updated scene.

use glam::Vec2;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { pos: Vec2, time: f64 },
    Down { pos: Vec2, time: f64 },
    Up { pos: Vec2, time: f64 },
}

impl PointerEvent {
    pub fn pos(&self) -> Vec2 {
        match *self {
            PointerEvent::Move { pos, .. }
            | PointerEvent::Down { pos, .. }
            | PointerEvent::Up { pos, .. } => pos,
        }
    }

    pub fn time(&self) -> f64 {
        match *self {
            PointerEvent::Move { time, .. }
            | PointerEvent::Down { time, .. }
            | PointerEvent::Up { time, .. } => time,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<PointerEvent>,
}

impl InputQueue {
    pub fn push(&mut self, ev: PointerEvent) {
        self.events.push_back(ev);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Oldest queued event, if any.
    pub fn pop(&mut self) -> Option<PointerEvent> {
        self.events.pop_front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Pointer position plus the instantaneous velocity between the last two samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub time: f64,
}

impl PointerSample {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Derives velocity from consecutive pointer positions.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    last: Option<(Vec2, f64)>,
    pub down: bool,
}

impl PointerTracker {
    pub fn observe(&mut self, pos: Vec2, time: f64) -> PointerSample {
        let velocity = match self.last {
            Some((prev, t0)) if time > t0 => (pos - prev) / (time - t0) as f32,
            _ => Vec2::ZERO,
        };
        self.last = Some((pos, time));
        PointerSample {
            pos,
            velocity,
            time,
        }
    }

    pub fn last_pos(&self) -> Option<Vec2> {
        self.last.map(|(p, _)| p)
    }

    /// Forget the last sample so the next one reports zero velocity.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn rescale(&mut self, sx: f32, sy: f32) {
        if let Some((p, t)) = self.last {
            self.last = Some((Vec2::new(p.x * sx, p.y * sy), t));
        }
    }
}
