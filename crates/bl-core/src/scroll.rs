//! Navigation state machine: key presses, key releases and repeat ticks.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Seek};
use std::time::Duration;

use crate::file_window::FileWindow;

/// A navigation action, independent of the host's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Scroll forward by one line step.
    LineDown,
    /// Scroll back by one line step.
    LineUp,
    /// Move the file offset forward by a whole buffer.
    JumpDown,
    /// Move the file offset back by a whole buffer.
    JumpUp,
}

impl Action {
    /// Apply this action to the window. `line_step` is in bytes.
    pub fn apply<S: Read + Seek>(self, window: &mut FileWindow<S>, line_step: usize) {
        match self {
            Action::LineDown => window.page_down(line_step),
            Action::LineUp => window.page_up(line_step),
            Action::JumpDown => window.jump_down(),
            Action::JumpUp => window.jump_up(),
        }
    }
}

/// Input delivered to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(Action),
    KeyUp(Action),
    /// A repeat-timer tick, tagged with the arming it belongs to.
    Tick(u64),
    /// The host stopped receiving input; no key-up will follow for a held key.
    FocusLost,
}

/// Timer instruction produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Arm { generation: u64, first_shot: Duration, interval: Duration },
    Disarm,
}

/// Effect of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// The view changed and must be redrawn.
    pub dirty: bool,
    pub timer: Option<TimerCommand>,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    Repeating(Action),
}

pub struct ScrollController {
    state: ScrollState,
    repeat_timer_armed: bool,
    generation: u64,
    line_step: usize,
    first_shot: Duration,
    interval: Duration,
}

impl ScrollController {
    pub fn new(line_step: usize, first_shot: Duration, interval: Duration) -> Self {
        Self {
            state: ScrollState::Idle,
            repeat_timer_armed: false,
            generation: 0,
            line_step,
            first_shot,
            interval,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn active(&self) -> Option<Action> {
        match self.state {
            ScrollState::Idle => None,
            ScrollState::Repeating(action) => Some(action),
        }
    }

    pub fn repeat_timer_armed(&self) -> bool {
        self.repeat_timer_armed
    }

    /// Generation of the current (or last) arming.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Feed one event. Offsets change only through `window`; the caller applies
    /// the returned timer command and redraws when `dirty` is set.
    pub fn handle<S: Read + Seek>(&mut self, event: Event, window: &mut FileWindow<S>) -> Transition {
        match (self.state, event) {
            (_, Event::KeyDown(action)) => {
                action.apply(window, self.line_step);
                self.generation += 1;
                self.repeat_timer_armed = true;
                self.state = ScrollState::Repeating(action);
                log::debug!("key down {:?}, repeat armed (gen {})", action, self.generation);
                Transition {
                    dirty: true,
                    timer: Some(TimerCommand::Arm {
                        generation: self.generation,
                        first_shot: self.first_shot,
                        interval: self.interval,
                    }),
                }
            }
            (ScrollState::Repeating(active), Event::KeyUp(action)) if active == action => self.release(active),
            (ScrollState::Repeating(active), Event::FocusLost) => self.release(active),
            (ScrollState::Repeating(active), Event::Tick(generation)) if generation == self.generation => {
                log::trace!("repeat {:?}", active);
                active.apply(window, self.line_step);
                Transition { dirty: true, timer: None }
            }
            _ => Transition::default(),
        }
    }

    fn release(&mut self, action: Action) -> Transition {
        self.repeat_timer_armed = false;
        self.state = ScrollState::Idle;
        log::debug!("{:?} released, repeat disarmed", action);
        Transition { dirty: false, timer: Some(TimerCommand::Disarm) }
    }
}

/// Host key bindings. `K` is the display backend's key type.
pub struct KeyMap<K> {
    bindings: HashMap<K, Action>,
}

impl<K: Eq + Hash> KeyMap<K> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Bind `key` to `action`, replacing any earlier binding.
    pub fn register(&mut self, key: K, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn action(&self, key: &K) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Translate a host key transition. Unbound keys yield nothing.
    pub fn translate(&self, key: &K, pressed: bool) -> Option<Event> {
        self.action(key)
            .map(|action| if pressed { Event::KeyDown(action) } else { Event::KeyUp(action) })
    }
}

impl<K: Eq + Hash> Default for KeyMap<K> {
    fn default() -> Self {
        Self::new()
    }
}
