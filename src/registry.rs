use std::collections::HashMap;

use crate::backend::AudioBackend;
use crate::error::AudioResult;

/// Startup-built table mapping sound names to loaded handles.
///
/// Built once from the manifest; the key set never changes afterwards. The
/// handles themselves stay mutable because playback state lives behind them.
pub struct SoundRegistry<B: AudioBackend> {
    sounds: HashMap<String, B::Sound>,
}

impl<B: AudioBackend> SoundRegistry<B> {
    /// Loads every manifest entry through the backend. A failed load aborts
    /// construction.
    pub fn load(backend: &mut B, manifest: &[(&str, &str)]) -> AudioResult<Self> {
        let mut sounds = HashMap::with_capacity(manifest.len());
        for (name, path) in manifest {
            let sound = backend.load(path)?;
            if sounds.insert(name.to_string(), sound).is_some() {
                log::warn!("duplicate sound name {name:?} in manifest, keeping the later entry");
            }
        }
        log::info!("loaded {} sounds", sounds.len());
        Ok(Self { sounds })
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut B::Sound> {
        self.sounds.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(String::as_str)
    }
}
