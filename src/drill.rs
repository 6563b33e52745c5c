use std::time::{Duration, SystemTime};

/// What the event loop should do with the tick timer after an update.
///
/// A timed drill keeps itself alive by answering `Arm` to each tick; once it
/// answers `Idle` no further tick arrives and the timer lapses.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickRequest {
    Arm,
    Idle,
}

/// Final metrics for a completed (or in-flight) run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub duration_secs: f64,
    pub gross_wpm: f64,
    pub net_wpm: f64,
    pub accuracy_pct: f64,
    pub correct: usize,
    pub total_typed: usize,
}

/// Numbers for the live line under the prompt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveStats {
    pub wpm: f64,
    pub accuracy: f64,
    pub errors: usize,
    pub time_secs: f64,
}

/// Represents one typing run against a fixed target text.
///
/// A zero `duration` means the drill is untimed: it finishes when the cursor
/// reaches the end of the target and never asks for ticks. A non-zero
/// duration means the drill finishes when time runs out, and typing past the
/// end of the target is possible (and counted as incorrect).
#[derive(Clone, Debug, PartialEq)]
pub struct Drill {
    pub target: Vec<char>,
    pub typed: Vec<char>,
    pub cursor: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub duration: Duration,
    pub remaining: Duration,
    pub started_at: Option<SystemTime>,
    pub ended_at: Option<SystemTime>,
    pub done: bool,
}

impl Drill {
    pub fn new(target: &str, duration: Duration) -> Self {
        Self {
            target: target.chars().collect(),
            typed: vec![],
            cursor: 0,
            correct: 0,
            incorrect: 0,
            duration,
            remaining: duration,
            started_at: None,
            ended_at: None,
            done: false,
        }
    }

    /// Arms the clock. The keystroke that triggers this is not consumed.
    pub fn start(&mut self) -> TickRequest {
        if self.has_started() {
            return TickRequest::Idle;
        }
        self.started_at = Some(SystemTime::now());
        self.remaining = self.duration;
        if self.duration.is_zero() {
            TickRequest::Idle
        } else {
            TickRequest::Arm
        }
    }

    pub fn write(&mut self, c: char) -> TickRequest {
        if self.done {
            return TickRequest::Idle;
        }
        if !self.has_started() {
            return self.start();
        }

        self.typed.push(c);
        if self.cursor < self.target.len() {
            if c == self.target[self.cursor] {
                self.correct += 1;
            } else {
                self.incorrect += 1;
            }
        } else {
            // past the end of the target; always an error
            self.incorrect += 1;
        }
        self.cursor += 1;

        if self.duration.is_zero() && self.cursor >= self.target.len() {
            self.done = true;
            self.ended_at = Some(SystemTime::now());
        }
        TickRequest::Idle
    }

    pub fn backspace(&mut self) -> TickRequest {
        if self.done {
            return TickRequest::Idle;
        }
        if !self.has_started() {
            return self.start();
        }

        if let Some(&removed) = self.typed.last() {
            // undo whichever counter the removed char landed in
            let idx = self.typed.len() - 1;
            if idx < self.target.len() && removed == self.target[idx] {
                self.correct -= 1;
            } else {
                self.incorrect -= 1;
            }
            self.typed.pop();
            if self.cursor > 0 {
                self.cursor -= 1;
            }
        }
        TickRequest::Idle
    }

    pub fn on_tick(&mut self) -> TickRequest {
        if !self.has_started() || self.done || self.duration.is_zero() {
            return TickRequest::Idle;
        }
        let elapsed = self.elapsed();
        if elapsed >= self.duration {
            self.remaining = Duration::ZERO;
            self.done = true;
            self.ended_at = Some(SystemTime::now());
            return TickRequest::Idle;
        }
        self.remaining = self.duration - elapsed;
        TickRequest::Arm
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.done
    }

    /// Wall-clock seconds spent in the run so far. Frozen once the drill is
    /// done: timed runs report the configured duration, untimed runs the
    /// span between start and completion.
    pub fn elapsed(&self) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::ZERO;
        };
        if self.done {
            if !self.duration.is_zero() {
                self.duration
            } else if let Some(ended_at) = self.ended_at {
                ended_at.duration_since(started_at).unwrap_or_default()
            } else {
                Duration::ZERO
            }
        } else {
            started_at.elapsed().unwrap_or_default()
        }
    }

    pub fn live_stats(&self) -> LiveStats {
        let elapsed = self.elapsed().as_secs_f64();
        let minutes = elapsed / 60.0;
        let wpm = if minutes > 0.0 {
            self.typed.len() as f64 / 5.0 / minutes
        } else {
            0.0
        };
        let accuracy = if !self.typed.is_empty() {
            self.correct as f64 / self.typed.len() as f64 * 100.0
        } else {
            0.0
        };
        // remaining for timed runs, elapsed for untimed ones
        let time_secs = if self.duration.is_zero() {
            elapsed
        } else if !self.has_started() {
            self.duration.as_secs_f64()
        } else if !self.done {
            self.remaining.as_secs_f64()
        } else {
            0.0
        };
        LiveStats {
            wpm,
            accuracy,
            errors: self.incorrect,
            time_secs,
        }
    }

    pub fn stats(&self) -> Stats {
        let total_secs = if !self.duration.is_zero() {
            self.duration.as_secs_f64()
        } else {
            match (self.started_at, self.ended_at) {
                (Some(started_at), Some(ended_at)) => ended_at
                    .duration_since(started_at)
                    .unwrap_or_default()
                    .as_secs_f64(),
                _ => 0.0,
            }
        };
        let minutes = total_secs / 60.0;
        let gross = if minutes > 0.0 {
            self.typed.len() as f64 / 5.0 / minutes
        } else {
            0.0
        };
        let accuracy = if !self.typed.is_empty() {
            self.correct as f64 / self.typed.len() as f64 * 100.0
        } else {
            0.0
        };
        Stats {
            duration_secs: total_secs,
            gross_wpm: gross,
            net_wpm: gross * (accuracy / 100.0),
            accuracy_pct: accuracy,
            correct: self.correct,
            total_typed: self.typed.len(),
        }
    }
}
