use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

pub const TICK_RATE_MS: u64 = 100;

/// Unified event type consumed by the app loop. Ticks carry the generation
/// they were armed for; see [`TickTimer`].
#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick(u64),
}

/// Fan-in queue for terminal input and timer ticks.
///
/// Input arrives from a reader thread; ticks arrive from a [`TickTimer`]
/// handed out by [`EventQueue::timer`]. Tests drive the loop by pushing
/// events through [`EventQueue::sender`] instead of spawning the reader.
pub struct EventQueue {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Forwards crossterm input onto the queue from a background thread.
    pub fn spawn_input_reader(&self) {
        let tx = self.tx.clone();
        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(Event::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(Event::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn timer(&self) -> TickTimer {
        TickTimer {
            tx: self.tx.clone(),
        }
    }

    pub fn recv(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot tick source. Each `arm` delivers a single `Event::Tick` after
/// the tick interval; a drill that wants the next one has to ask again, so
/// an unanswered tick lets the timer lapse.
///
/// The tick is stamped with the generation passed to `arm`, letting the
/// consumer drop one that was still in flight when its drill was replaced.
#[derive(Clone)]
pub struct TickTimer {
    tx: Sender<Event>,
}

impl TickTimer {
    pub fn arm(&self, generation: u64) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(TICK_RATE_MS));
            let _ = tx.send(Event::Tick(generation));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::RecvTimeoutError;

    #[test]
    fn armed_timer_delivers_exactly_one_tick() {
        let queue = EventQueue::new();
        let timer = queue.timer();

        timer.arm(1);

        match queue.rx.recv_timeout(Duration::from_millis(500)) {
            Ok(Event::Tick(1)) => {}
            other => panic!("expected Tick, got {other:?}"),
        }
        // no re-arm, no second tick
        match queue.rx.recv_timeout(Duration::from_millis(300)) {
            Err(RecvTimeoutError::Timeout) => {}
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn tick_carries_the_arming_generation() {
        let queue = EventQueue::new();
        let timer = queue.timer();

        timer.arm(7);

        match queue.rx.recv_timeout(Duration::from_millis(500)) {
            Ok(Event::Tick(generation)) => assert_eq!(generation, 7),
            other => panic!("expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn unarmed_timer_stays_silent() {
        let queue = EventQueue::new();
        let _timer = queue.timer();

        match queue.rx.recv_timeout(Duration::from_millis(150)) {
            Err(RecvTimeoutError::Timeout) => {}
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn sender_feeds_the_queue() {
        let queue = EventQueue::new();
        let tx = queue.sender();

        tx.send(Event::Resize).unwrap();

        match queue.recv() {
            Ok(Event::Resize) => {}
            other => panic!("expected Resize, got {other:?}"),
        }
    }

    #[test]
    fn queue_preserves_event_order() {
        use crossterm::event::{KeyCode, KeyModifiers};

        let queue = EventQueue::new();
        let tx = queue.sender();

        tx.send(Event::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(Event::Tick(0)).unwrap();

        assert!(matches!(queue.recv(), Ok(Event::Key(_))));
        assert!(matches!(queue.recv(), Ok(Event::Tick(0))));
    }
}
