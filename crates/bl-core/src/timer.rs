//! Auto-repeat timer.
//!
//! The timer never touches the file window. It only posts
//! [`Event::Tick`] into the session's queue and pokes a wake hook so a
//! blocked render loop notices.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::scroll::{Event, TimerCommand};

/// Something that can be armed to deliver repeat ticks.
pub trait RepeatTimer {
    fn arm(&mut self, generation: u64, first_shot: Duration, interval: Duration);
    fn disarm(&mut self);

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Arm { generation, first_shot, interval } => self.arm(generation, first_shot, interval),
            TimerCommand::Disarm => self.disarm(),
        }
    }
}

/// Deadlines of one arming: `armed_at + first_shot`, then every `interval`.
#[derive(Debug, Clone, Copy)]
pub struct RepeatSchedule {
    generation: u64,
    next: Instant,
    interval: Duration,
}

impl RepeatSchedule {
    pub fn new(generation: u64, armed_at: Instant, first_shot: Duration, interval: Duration) -> Self {
        Self { generation, next: armed_at + first_shot, interval }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Whether a tick is due at `now`. Deadlines missed while the caller was
    /// late collapse into this single tick.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        while self.next <= now {
            self.next += self.interval;
        }
        true
    }
}

enum Control {
    Arm { generation: u64, first_shot: Duration, interval: Duration },
    Disarm,
}

/// Repeat timer running on its own thread.
pub struct ThreadTimer {
    control: Option<Sender<Control>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    /// Start the timer thread. Ticks go to `events`; `wake` runs after each one.
    pub fn spawn<W>(events: Sender<Event>, wake: W) -> std::io::Result<Self>
    where
        W: Fn() + Send + 'static,
    {
        let (control_tx, control_rx) = mpsc::channel::<Control>();

        let handle = std::thread::Builder::new()
            .name("bitlens-repeat".into())
            .spawn(move || {
                let mut schedule: Option<RepeatSchedule> = None;
                loop {
                    let msg = match &schedule {
                        None => control_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                        Some(s) => control_rx
                            .recv_timeout(s.next_deadline().saturating_duration_since(Instant::now())),
                    };

                    match msg {
                        Ok(Control::Arm { generation, first_shot, interval }) => {
                            schedule = Some(RepeatSchedule::new(generation, Instant::now(), first_shot, interval));
                        }
                        Ok(Control::Disarm) => schedule = None,
                        Err(RecvTimeoutError::Timeout) => {
                            let Some(s) = schedule.as_mut() else { continue };
                            if s.fire(Instant::now()) {
                                if events.send(Event::Tick(s.generation())).is_err() {
                                    break;
                                }
                                wake();
                            }
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!("repeat timer thread exiting");
            })?;

        Ok(Self { control: Some(control_tx), handle: Some(handle) })
    }

    fn send(&self, msg: Control) {
        if let Some(control) = &self.control {
            if control.send(msg).is_err() {
                log::warn!("repeat timer thread is gone");
            }
        }
    }
}

impl RepeatTimer for ThreadTimer {
    fn arm(&mut self, generation: u64, first_shot: Duration, interval: Duration) {
        self.send(Control::Arm { generation, first_shot, interval });
    }

    fn disarm(&mut self) {
        self.send(Control::Disarm);
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        // Closing the control channel stops the thread.
        self.control.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A timer driven by an explicit clock, for headless runs and tests.
pub struct ManualTimer {
    now: Instant,
    schedule: Option<RepeatSchedule>,
    commands: Vec<TimerCommand>,
}

impl ManualTimer {
    pub fn new(now: Instant) -> Self {
        Self { now, schedule: None, commands: Vec::new() }
    }

    pub fn is_armed(&self) -> bool {
        self.schedule.is_some()
    }

    /// Every command received so far.
    pub fn commands(&self) -> &[TimerCommand] {
        &self.commands
    }

    /// Move the clock forward, returning one tick per deadline passed.
    pub fn advance(&mut self, by: Duration) -> Vec<Event> {
        self.now += by;
        let mut ticks = Vec::new();
        if let Some(s) = self.schedule.as_mut() {
            while s.next_deadline() <= self.now {
                let deadline = s.next_deadline();
                s.fire(deadline);
                ticks.push(Event::Tick(s.generation()));
            }
        }
        ticks
    }
}

impl RepeatTimer for ManualTimer {
    fn arm(&mut self, generation: u64, first_shot: Duration, interval: Duration) {
        self.commands.push(TimerCommand::Arm { generation, first_shot, interval });
        self.schedule = Some(RepeatSchedule::new(generation, self.now, first_shot, interval));
    }

    fn disarm(&mut self) {
        self.commands.push(TimerCommand::Disarm);
        self.schedule = None;
    }
}
