//! Translates game sound events into audio backend calls.

use crate::backend::AudioBackend;
use crate::error::{AudioError, AudioResult};
use crate::event::SoundEvent;
use crate::registry::SoundRegistry;

/// Dispatch counters, readable through [`Dispatcher::stats`].
///
/// The only observable trace of a swallowed failure besides the log line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Owns the registry and the backend; stateless between dispatches apart
/// from the counters.
pub struct Dispatcher<B: AudioBackend> {
    backend: B,
    registry: SoundRegistry<B>,
    stats: DispatchStats,
}

impl<B: AudioBackend> Dispatcher<B> {
    /// Full startup sequence: load the manifest, apply the factory-hum
    /// defaults, set the master level.
    pub fn new(mut backend: B) -> AudioResult<Self> {
        let mut registry = SoundRegistry::load(&mut backend, crate::SOUND_MANIFEST)?;
        // The hum sits under the effects and keeps going on its own.
        if let Some(sound) = registry.get_mut(crate::FACTORY_HUM) {
            backend.set_volume(sound, crate::FACTORY_HUM_VOLUME)?;
            backend.set_loop(sound, true)?;
        }
        backend.set_master_volume(crate::MASTER_VOLUME)?;
        Ok(Self::with_registry(backend, registry))
    }

    /// Builds a dispatcher over an already-populated registry.
    pub fn with_registry(backend: B, registry: SoundRegistry<B>) -> Self {
        Self {
            backend,
            registry,
            stats: DispatchStats::default(),
        }
    }

    /// Handles one sound event. Never returns anything to the caller and
    /// never panics outward; failures are logged, counted and dropped.
    pub fn dispatch(&mut self, event: SoundEvent) {
        log::debug!("sound event {event:?}");
        match self.try_dispatch(&event) {
            Ok(()) => self.stats.delivered += 1,
            Err(err) => {
                self.stats.failed += 1;
                log::warn!("sound dispatch failed for {event:?}: {err}");
            }
        }
    }

    fn try_dispatch(&mut self, event: &SoundEvent) -> AudioResult<()> {
        let name = event.name();
        let sound = self
            .registry
            .get_mut(name)
            .ok_or_else(|| AudioError::UnknownSound(name.to_string()))?;
        match event {
            SoundEvent::Play(_) => self.backend.play(sound),
            SoundEvent::Loop(_) => {
                self.backend.set_loop(sound, true)?;
                self.backend.play(sound)
            }
            SoundEvent::Stop(_) => self.backend.stop(sound),
        }
    }

    /// Decodes a raw port payload and dispatches it. A payload that does not
    /// decode is a dispatch failure like any other.
    pub fn dispatch_raw(&mut self, payload: &str) {
        match serde_json::from_str::<SoundEvent>(payload) {
            Ok(event) => self.dispatch(event),
            Err(err) => {
                self.stats.failed += 1;
                log::warn!("sound dispatch failed for payload {payload:?}: {err}");
            }
        }
    }

    /// Drains an in-order event stream, dispatching one event at a time.
    /// Returns when the stream ends (for an `mpsc::Receiver`, when the game
    /// side hangs up).
    pub fn attach<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = SoundEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn registry(&self) -> &SoundRegistry<B> {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
