//! Sound bridge for the factory idle game.
//!
//! The game itself runs elsewhere and emits sound events on a single outbound
//! port. This crate loads the bundled sound assets into a registry at startup
//! and translates each incoming event into play / loop / stop calls on the
//! audio library. It never talks back to the game; a sound that cannot be
//! played is logged and forgotten.

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod registry;

pub use backend::{AudioBackend, KiraBackend, MockBackend};
pub use dispatch::{DispatchStats, Dispatcher};
pub use error::{AudioError, AudioResult};
pub use event::SoundEvent;
pub use registry::SoundRegistry;

/// Bundled sound assets, keyed by the name the game's port uses.
pub const SOUND_MANIFEST: &[(&str, &str)] = &[
    ("buy", "sounds/buy.wav"),
    ("sell", "sounds/sell.wav"),
    ("click", "sounds/click.wav"),
    ("upgrade", "sounds/upgrade.wav"),
    ("research", "sounds/research.wav"),
    ("factory", "sounds/factory.mp3"),
];

/// The looping machine hum; quieter than the one-shot effects.
pub const FACTORY_HUM: &str = "factory";
pub const FACTORY_HUM_VOLUME: f64 = 0.4;

pub const MASTER_VOLUME: f64 = 0.8;

/// One-call bootstrap: build the dispatcher over `backend` and pump the
/// game's event stream until it ends.
pub fn run<B, I>(backend: B, events: I) -> AudioResult<Dispatcher<B>>
where
    B: AudioBackend,
    I: IntoIterator<Item = SoundEvent>,
{
    let mut dispatcher = Dispatcher::new(backend)?;
    log::info!("sound bridge ready, {} sounds", dispatcher.registry().len());
    dispatcher.attach(events);
    Ok(dispatcher)
}
