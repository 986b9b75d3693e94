//! Frame clocks and the loop that drives a session
//!
//! The driver hands out one-shot frame requests. A request is re-armed only
//! after the frame it triggered has returned, so ticks never overlap, and a
//! cancelled request can never reach the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use log::{debug, info};

use super::autopilot::InputSource;
use super::session::{FrameOutcome, GameSession};
use super::types::{GamePhase, Timestamp};

/// Source of frame timestamps
pub trait FrameClock {
    /// Wait until the next frame is due and return its timestamp in ms.
    ///
    /// Successive calls must never go backward.
    fn next_frame(&mut self) -> Timestamp;
}

/// A virtual clock that advances a fixed step per frame without sleeping
#[derive(Debug, Clone)]
pub struct SteppedClock {
    now: Timestamp,
    step_ms: u64,
}

impl SteppedClock {
    pub fn new(start: Timestamp, step_ms: u64) -> Self {
        Self {
            now: start,
            step_ms,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }
}

impl FrameClock for SteppedClock {
    fn next_frame(&mut self) -> Timestamp {
        self.now = self.now.saturating_add(self.step_ms);
        self.now
    }
}

/// A wall clock that sleeps the calling thread to a fixed refresh rate
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    origin: Instant,
    frame: Duration,
    next_deadline: Instant,
}

impl FixedRateClock {
    pub fn new(frame: Duration) -> Self {
        let origin = Instant::now();
        Self {
            origin,
            frame,
            next_deadline: origin + frame,
        }
    }
}

impl FrameClock for FixedRateClock {
    fn next_frame(&mut self) -> Timestamp {
        let now = Instant::now();
        if self.next_deadline > now {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame;
        } else {
            // Fell behind; don't try to catch up with a burst of frames
            self.next_deadline = now + self.frame;
        }
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Identifies one armed frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

/// Lets a host stop a running driver, possibly from another thread
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened during a call to [`FrameDriver::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Frames that actually advanced the simulation
    pub frames: u64,
    pub final_phase: GamePhase,
    pub score: u64,
    /// Whether the run ended because of the frame limit
    pub hit_frame_limit: bool,
}

/// Schedules one frame at a time against a clock
pub struct FrameDriver<C: FrameClock> {
    clock: C,
    pending: Option<FrameRequest>,
    next_request: u64,
    stop: StopHandle,
}

impl<C: FrameClock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            pending: None,
            next_request: 0,
            stop: StopHandle::default(),
        }
    }

    /// A handle that halts this driver before its next frame
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Arm a one-shot frame callback.
    ///
    /// While a request is armed, asking again returns that same request.
    pub fn request_frame(&mut self) -> FrameRequest {
        if let Some(request) = self.pending {
            return request;
        }
        let request = FrameRequest(self.next_request);
        self.next_request += 1;
        self.pending = Some(request);
        request
    }

    /// Disarm the pending frame, if any
    pub fn cancel(&mut self) {
        if let Some(request) = self.pending.take() {
            debug!("Cancelled frame request {:?}", request);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver `request` with `timestamp`.
    ///
    /// Returns `None` without touching the session when the request has been
    /// cancelled, already fired, or superseded.
    pub fn fire(
        &mut self,
        request: FrameRequest,
        timestamp: Timestamp,
        session: &mut GameSession,
    ) -> Option<FrameOutcome> {
        if self.pending != Some(request) || self.stop.is_stopped() {
            return None;
        }
        self.pending = None;
        Some(session.frame(timestamp))
    }

    /// Drive `session` until its game stops, the stop handle fires, or
    /// `max_frames` frames have run.
    ///
    /// `input` is polled once per frame, before the session sees the frame.
    pub fn run(
        &mut self,
        session: &mut GameSession,
        input: &mut dyn InputSource,
        max_frames: u64,
    ) -> Result<RunReport> {
        ensure!(max_frames > 0, "max_frames must be positive");

        let mut frames = 0;
        let mut hit_frame_limit = false;
        let mut request = self.request_frame();

        loop {
            if self.stop.is_stopped() {
                info!("Driver stopped by host after {} frames", frames);
                self.cancel();
                break;
            }

            let timestamp = self.clock.next_frame();

            // The host may have stopped us while the clock was waiting
            if self.stop.is_stopped() {
                info!("Driver stopped by host after {} frames", frames);
                self.cancel();
                break;
            }

            for event in input.poll(&session.snapshot(), timestamp) {
                session.handle_event(event);
            }

            let simulated_before = session.frames;
            let Some(outcome) = self.fire(request, timestamp, session) else {
                break;
            };
            if session.frames > simulated_before {
                frames += 1;
            }

            match outcome {
                FrameOutcome::Continue if frames < max_frames => {
                    request = self.request_frame();
                }
                FrameOutcome::Continue => {
                    hit_frame_limit = true;
                    break;
                }
                FrameOutcome::Stop => break,
            }
        }

        let state = session.state();
        Ok(RunReport {
            frames,
            final_phase: state.phase,
            score: state.score,
            hit_frame_limit,
        })
    }
}
