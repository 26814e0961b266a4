//! The event-handling object
//!
//! `Interceptor` owns every piece of mutable state (the chord accumulator,
//! the current mode, a pending snippet save) together with the collaborator
//! adapters. Raw events go in one at a time through [`Interceptor::handle_event`];
//! a completed cycle is classified and dispatched before the call returns.
//!
//! A failure while dispatching aborts only that cycle. The accumulator has
//! already handed the cycle out by value, so its buffers are empty either way.

use std::path::PathBuf;

use crate::chord::{
    classify, replay, ChordAccumulator, Classification, Cycle, EventKind, RawEvent,
};
use crate::config::Settings;
use crate::keymap::{
    Action, ActionTable, CanonicalKey, Effect, ModifierMask, Resolver, SyntheticKey,
};
use crate::math::{self, MathError};
use crate::mode::{Mode, ModeSlot, ModeStore};
use crate::style::{clipboard_payload, synthesize};
use crate::target::{Backends, TargetError};

/// What happened to a completed cycle (or, in disabled mode, a single event)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A handler claimed the cycle
    Handled,
    /// Nothing claimed it; buffered events were re-sent
    Replayed,
    /// Disabled mode: the event went straight through
    Forwarded,
    /// A collaborator failed; the cycle was abandoned
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("snippet store: {0}")]
    Store(#[from] std::io::Error),
}

pub struct Interceptor {
    resolver: Resolver,
    table: ActionTable,
    accumulator: ChordAccumulator,
    mode: Mode,
    pending_save: Option<ModeSlot>,
    store: ModeStore,
    settings: Settings,
    latex_dir: PathBuf,
    backends: Backends,
}

impl Interceptor {
    /// Snippets and LaTeX documents go to the standard config locations
    /// unless overridden with [`with_store`](Self::with_store) and
    /// [`with_latex_dir`](Self::with_latex_dir).
    pub fn new(resolver: Resolver, table: ActionTable, backends: Backends) -> Self {
        let modes_dir = crate::config_paths::modes_dir().unwrap_or_else(|| PathBuf::from("modes"));
        let latex_dir = crate::config_paths::latex_dir().unwrap_or_else(|| PathBuf::from("latex"));

        Self {
            resolver,
            table,
            accumulator: ChordAccumulator::new(),
            mode: Mode::Normal,
            pending_save: None,
            store: ModeStore::new(modes_dir),
            settings: Settings::default(),
            latex_dir,
            backends,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_store(mut self, store: ModeStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_latex_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.latex_dir = dir.into();
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Snippet slot waiting for the key that names it
    pub fn pending_save(&self) -> Option<ModeSlot> {
        self.pending_save
    }

    /// True between cycles: no pressed keys and no buffered events
    pub fn is_idle(&self) -> bool {
        self.accumulator.is_idle()
    }

    pub fn accumulator(&self) -> &ChordAccumulator {
        &self.accumulator
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    pub fn store(&self) -> &ModeStore {
        &self.store
    }

    /// Feed one raw event
    ///
    /// Returns `None` while a cycle is still accumulating.
    pub fn handle_event(&mut self, event: RawEvent) -> Option<Outcome> {
        if self.mode == Mode::Disabled {
            return Some(self.forward(event));
        }

        let cycle = self.accumulator.on_event(event, &self.resolver)?;
        let keys = cycle.pressed.sorted();
        tracing::debug!(mode = %self.mode, ?keys, events = cycle.events.len(), "cycle complete");

        match self.dispatch(&cycle) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(
                    mode = %self.mode,
                    ?keys,
                    "cycle aborted: {}",
                    e
                );
                Some(Outcome::Failed)
            }
        }
    }

    fn forward(&mut self, event: RawEvent) -> Outcome {
        let sent = self
            .backends
            .target
            .send_event(&event, true)
            .and_then(|_| self.backends.target.flush());

        if event.kind == EventKind::Release && self.resolver.is_escape(event.keycode) {
            tracing::info!("leaving disabled mode");
            self.mode = Mode::Normal;
        }

        match sent {
            Ok(()) => Outcome::Forwarded,
            Err(e) => {
                tracing::error!(keycode = event.keycode, "failed to forward event: {}", e);
                Outcome::Failed
            }
        }
    }

    fn dispatch(&mut self, cycle: &Cycle) -> Result<Outcome, DispatchError> {
        if let Some(slot) = self.pending_save {
            // Stray releases (the Shift of Shift+a) leave the save armed
            if cycle.pressed.len() > 1 || self.contains_escape(cycle) {
                self.pending_save = None;
                tracing::info!("{} snippet save cancelled", slot.dir_name());
            } else if let Some(key) = cycle.pressed.single() {
                self.pending_save = None;
                self.persist_snippet(slot, key)?;
                return Ok(Outcome::Handled);
            }
        }

        match self.mode.slot() {
            Some(slot) => self.dispatch_snippet_mode(slot, cycle),
            None => self.dispatch_normal(cycle),
        }
    }

    fn dispatch_normal(&mut self, cycle: &Cycle) -> Result<Outcome, DispatchError> {
        let classification = classify(&cycle.pressed, &self.table);
        tracing::debug!(?classification, handled = classification.is_handled(), "classified");

        match classification {
            Classification::StyleChord => {
                self.apply_style(cycle)?;
                Ok(Outcome::Handled)
            }
            Classification::Single(action) => {
                self.execute(action)?;
                Ok(Outcome::Handled)
            }
            Classification::Unrecognized => self.replay(cycle),
        }
    }

    fn dispatch_snippet_mode(
        &mut self,
        slot: ModeSlot,
        cycle: &Cycle,
    ) -> Result<Outcome, DispatchError> {
        if self.contains_escape(cycle) {
            tracing::info!("leaving {} mode", self.mode);
            self.mode = Mode::Normal;
            return self.replay(cycle);
        }

        let Some(key) = cycle.pressed.single() else {
            return self.replay(cycle);
        };

        match self.store.load(slot, key)? {
            Some(snippet) => {
                self.backends
                    .clipboard
                    .copy(&snippet, &self.settings.clipboard_target)?;
                self.backends.target.press(slot.paste_key())?;
                self.mode = Mode::Normal;
                Ok(Outcome::Handled)
            }
            None => {
                tracing::debug!(key = %key, "no {} snippet saved", slot.dir_name());
                self.replay(cycle)
            }
        }
    }

    fn contains_escape(&self, cycle: &Cycle) -> bool {
        cycle
            .events
            .iter()
            .any(|e| e.kind == EventKind::Press && self.resolver.is_escape(e.keycode))
    }

    fn replay(&mut self, cycle: &Cycle) -> Result<Outcome, DispatchError> {
        replay(&cycle.events, self.backends.target.as_mut())?;
        Ok(Outcome::Replayed)
    }

    fn apply_style(&mut self, cycle: &Cycle) -> Result<(), DispatchError> {
        let style = synthesize(&cycle.pressed);
        let payload = clipboard_payload(&style);
        tracing::debug!(style = %style.descriptor.to_style_string(), "applying style");

        self.backends
            .clipboard
            .copy(&payload, &self.settings.clipboard_target)?;
        self.backends.target.press(ModeSlot::Style.paste_key())?;
        Ok(())
    }

    fn execute(&mut self, action: Action) -> Result<(), DispatchError> {
        tracing::debug!(%action, "executing");

        for effect in action.to_effects() {
            match effect {
                Effect::Press(key) => self.backends.target.press(key)?,
                Effect::SetMode(mode) => {
                    tracing::info!("entering {} mode", mode);
                    self.mode = mode;
                }
                Effect::PersistMode(slot) => {
                    tracing::info!("press a key to save the {} snippet under", slot.dir_name());
                    self.pending_save = Some(slot);
                }
                Effect::OpenMathEditor { prerendered } => {
                    math::run_math_input(
                        prerendered,
                        &mut self.backends,
                        &self.settings,
                        &self.latex_dir,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Copy the target's selection and store it under `key`
    fn persist_snippet(
        &mut self,
        slot: ModeSlot,
        key: &CanonicalKey,
    ) -> Result<(), DispatchError> {
        self.backends
            .target
            .press(SyntheticKey::new("c", ModifierMask::CONTROL))?;
        let content = self
            .backends
            .clipboard
            .read(&self.settings.clipboard_target)?;
        self.store.save(slot, key, &content)?;
        Ok(())
    }
}
