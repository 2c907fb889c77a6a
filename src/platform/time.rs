//! Frame timing
//!
//! The host calls `FrameClock::advance_to` once per animation frame with the
//! frame timestamp and runs the returned number of fixed simulation steps.

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Number of samples averaged for the FPS readout
pub const FPS_SAMPLES: usize = 30;

/// Fixed-timestep accumulator driven by frame timestamps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    /// Previous frame timestamp in milliseconds
    last_time: Option<f64>,
    running: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin consuming frames. The next frame only sets the time base.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_time = None;
            self.accumulator = 0.0;
        }
    }

    /// Stop stepping; frames are ignored until `start`
    pub fn stop(&mut self) {
        self.running = false;
        self.last_time = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Leftover time not yet consumed by a fixed step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Feed a frame timestamp (ms) and return how many fixed steps to run
    pub fn advance_to(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.advance(dt)
    }

    /// Feed an elapsed frame time (s) and return how many fixed steps to run.
    ///
    /// Frame time is clamped to `MAX_FRAME_DT` so a stalled tab does not
    /// trigger a burst of catch-up steps.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }
}

/// Rolling FPS readout, refreshed every `FPS_SAMPLES` frames
#[derive(Debug, Clone)]
pub struct FpsMeter {
    samples: [f32; FPS_SAMPLES],
    len: usize,
    last_report: Option<u32>,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self {
            samples: [0.0; FPS_SAMPLES],
            len: 0,
            last_report: None,
        }
    }
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Returns a fresh rounded average when a batch fills.
    pub fn record(&mut self, frame_dt: f32) -> Option<u32> {
        if !(frame_dt.is_finite() && frame_dt > 0.0) {
            return None;
        }
        self.samples[self.len] = 1.0 / frame_dt;
        self.len += 1;
        if self.len < FPS_SAMPLES {
            return None;
        }

        let avg = self.samples.iter().sum::<f32>() / FPS_SAMPLES as f32;
        self.len = 0;
        let fps = avg.round() as u32;
        self.last_report = Some(fps);
        Some(fps)
    }

    /// Most recent report, if a batch has completed
    pub fn fps(&self) -> Option<u32> {
        self.last_report
    }
}
