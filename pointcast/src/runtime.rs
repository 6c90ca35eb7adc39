//! The event/action/render loop.
//!
//! 1. Terminal events map to actions via the root component
//! 2. Actions dispatch to the store; the reducer mutates state and returns
//!    effects
//! 3. Effects are handed to the effect handler, which spawns keyed fetch
//!    tasks; settled tasks send result actions back onto the same channel
//! 4. When a dispatch changed the state, the next loop iteration re-renders

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pointcast_core::{Action, AppState, Effect, Store, Subscriptions, TaskManager};

use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Context passed to the effect handler.
pub struct EffectContext<'a> {
    action_tx: &'a mpsc::UnboundedSender<Action>,
    tasks: &'a mut TaskManager,
}

impl<'a> EffectContext<'a> {
    /// Send an action directly, bypassing the task manager.
    pub fn emit(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Access the task manager for spawning keyed fetch tasks.
    pub fn tasks(&mut self) -> &mut TaskManager {
        self.tasks
    }
}

/// Owns the store, the action channel, and the async machinery.
pub struct Runtime {
    store: Store,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller_config: PollerConfig,
    tasks: TaskManager,
    subscriptions: Subscriptions,
    should_render: bool,
}

impl Runtime {
    pub fn new(store: Store) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());
        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            tasks,
            subscriptions,
            should_render: true,
        }
    }

    /// Configure event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Access the interval subscriptions (tick, alerts auto-refresh).
    pub fn subscriptions(&mut self) -> &mut Subscriptions {
        &mut self.subscriptions
    }

    /// Run the event/action loop until an action satisfies `should_quit`.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> Vec<Action>,
        FQuit: FnMut(&Action) -> bool,
        FEffect: FnMut(Effect, &mut EffectContext<'_>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    if matches!(event, EventKind::Resize(_, _)) {
                        self.should_render = true;
                    }
                    for action in map_event(&event, self.store.state()) {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            action_tx: &self.action_tx,
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        Ok(())
    }
}
