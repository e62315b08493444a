//! Frame timing

use web_time::Instant;

/// Delta and absolute time handed to one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped
    pub delta: f32,
    /// Seconds accumulated over all frames
    pub time: f32,
}

#[derive(Debug, Clone, Copy)]
enum ClockMode {
    Realtime { last: Option<Instant> },
    Fixed { step: f32 },
}

/// Produces per-frame timing, either from the wall clock or fixed steps.
/// Deltas are clamped to `[0, max_delta]`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: ClockMode,
    max_delta: f32,
    time: f32,
}

impl FrameClock {
    pub fn realtime(max_delta: f32) -> Self {
        Self {
            mode: ClockMode::Realtime { last: None },
            max_delta,
            time: 0.0,
        }
    }

    /// Clock advancing `step` seconds per frame regardless of wall time
    pub fn fixed(step: f32, max_delta: f32) -> Self {
        Self {
            mode: ClockMode::Fixed { step },
            max_delta,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Restart wall-clock measurement; the next delta is measured from now
    pub fn start(&mut self) {
        if let ClockMode::Realtime { last } = &mut self.mode {
            *last = Some(Instant::now());
        }
    }

    /// Timing for the next frame
    pub fn tick(&mut self) -> FrameTime {
        let raw = match &mut self.mode {
            ClockMode::Realtime { last } => {
                let now = Instant::now();
                let elapsed = last.map_or(0.0, |previous| (now - previous).as_secs_f32());
                *last = Some(now);
                elapsed
            }
            ClockMode::Fixed { step } => *step,
        };
        self.advance(raw)
    }

    /// Advance by an externally measured delta
    pub fn advance(&mut self, delta: f32) -> FrameTime {
        let delta = delta.clamp(0.0, self.max_delta);
        self.time += delta;
        FrameTime {
            delta,
            time: self.time,
        }
    }
}
