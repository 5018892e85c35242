//! Audio capability surface and its kira implementation.

use std::time::Duration;

use kira::{
    manager::{AudioManager, AudioManagerSettings, DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle},
    tween::Tween,
};

use crate::error::{AudioError, AudioResult};

/// Everything the dispatcher needs from an audio library.
///
/// `Sound` is an opaque loaded-sound handle owned by the backend
/// implementation; all playback state lives behind it.
pub trait AudioBackend {
    type Sound;

    fn load(&mut self, path: &str) -> AudioResult<Self::Sound>;
    fn play(&mut self, sound: &mut Self::Sound) -> AudioResult<()>;
    fn stop(&mut self, sound: &mut Self::Sound) -> AudioResult<()>;
    fn set_loop(&mut self, sound: &mut Self::Sound, looped: bool) -> AudioResult<()>;
    fn set_volume(&mut self, sound: &mut Self::Sound, volume: f64) -> AudioResult<()>;
    fn set_master_volume(&mut self, volume: f64) -> AudioResult<()>;
}

/// A sound loaded by [`KiraBackend`].
///
/// Keeps the decoded data plus the handle of the most recent playback, so a
/// stop or volume change reaches the instance that is actually sounding.
pub struct KiraSound {
    data: StaticSoundData,
    playing: Option<StaticSoundHandle>,
    looped: bool,
    volume: f64,
}

/// Production backend over kira's [`AudioManager`].
pub struct KiraBackend {
    manager: AudioManager<DefaultBackend>,
}

impl KiraBackend {
    pub fn new() -> AudioResult<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|err| AudioError::Playback(err.to_string()))?;
        Ok(Self { manager })
    }
}

impl AudioBackend for KiraBackend {
    type Sound = KiraSound;

    fn load(&mut self, path: &str) -> AudioResult<KiraSound> {
        let data = StaticSoundData::from_file(path).map_err(|err| AudioError::Load {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        Ok(KiraSound {
            data,
            playing: None,
            looped: false,
            volume: 1.0,
        })
    }

    fn play(&mut self, sound: &mut KiraSound) -> AudioResult<()> {
        let mut handle = self
            .manager
            .play(sound.data.clone())
            .map_err(|err| AudioError::Playback(err.to_string()))?;
        handle.set_volume(sound.volume, Tween::default());
        if sound.looped {
            handle.set_loop_region(0.0..);
        }
        sound.playing.replace(handle);
        Ok(())
    }

    fn stop(&mut self, sound: &mut KiraSound) -> AudioResult<()> {
        if let Some(mut handle) = sound.playing.take() {
            handle.stop(Tween {
                duration: Duration::from_secs_f32(0.1),
                ..Default::default()
            });
        }
        Ok(())
    }

    fn set_loop(&mut self, sound: &mut KiraSound, looped: bool) -> AudioResult<()> {
        sound.looped = looped;
        if let Some(handle) = sound.playing.as_mut() {
            if looped {
                handle.set_loop_region(0.0..);
            } else {
                handle.set_loop_region(None);
            }
        }
        Ok(())
    }

    fn set_volume(&mut self, sound: &mut KiraSound, volume: f64) -> AudioResult<()> {
        sound.volume = volume;
        if let Some(handle) = sound.playing.as_mut() {
            handle.set_volume(volume, Tween::default());
        }
        Ok(())
    }

    fn set_master_volume(&mut self, volume: f64) -> AudioResult<()> {
        self.manager.main_track().set_volume(volume, Tween::default());
        Ok(())
    }
}

/// One recorded [`MockBackend`] operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Load(String),
    Play(usize),
    Stop(usize),
    SetLoop(usize, bool),
    SetVolume(usize, f64),
    SetMasterVolume(f64),
}

/// A sound "loaded" by [`MockBackend`]; just an id for call matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockSound {
    pub id: usize,
    pub path: String,
}

/// Call-recording backend for tests and debugging.
///
/// Injected wherever a real audio device is unwanted; every operation is
/// appended to `calls` in invocation order.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub calls: Vec<Call>,
    next_id: usize,
    /// When set, `play` fails; simulates an internal library error.
    pub fail_play: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls that touched the handle with the given id.
    pub fn calls_for(&self, id: usize) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| match call {
                Call::Play(i) | Call::Stop(i) | Call::SetLoop(i, _) | Call::SetVolume(i, _) => {
                    *i == id
                }
                Call::Load(_) | Call::SetMasterVolume(_) => false,
            })
            .collect()
    }
}

impl AudioBackend for MockBackend {
    type Sound = MockSound;

    fn load(&mut self, path: &str) -> AudioResult<MockSound> {
        let id = self.next_id;
        self.next_id += 1;
        self.calls.push(Call::Load(path.to_string()));
        Ok(MockSound {
            id,
            path: path.to_string(),
        })
    }

    fn play(&mut self, sound: &mut MockSound) -> AudioResult<()> {
        if self.fail_play {
            return Err(AudioError::Playback("mock play failure".into()));
        }
        self.calls.push(Call::Play(sound.id));
        Ok(())
    }

    fn stop(&mut self, sound: &mut MockSound) -> AudioResult<()> {
        self.calls.push(Call::Stop(sound.id));
        Ok(())
    }

    fn set_loop(&mut self, sound: &mut MockSound, looped: bool) -> AudioResult<()> {
        self.calls.push(Call::SetLoop(sound.id, looped));
        Ok(())
    }

    fn set_volume(&mut self, sound: &mut MockSound, volume: f64) -> AudioResult<()> {
        self.calls.push(Call::SetVolume(sound.id, volume));
        Ok(())
    }

    fn set_master_volume(&mut self, volume: f64) -> AudioResult<()> {
        self.calls.push(Call::SetMasterVolume(volume));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_in_order() {
        let mut backend = MockBackend::new();
        let mut s = backend.load("sounds/buy.wav").unwrap();
        backend.set_loop(&mut s, true).unwrap();
        backend.play(&mut s).unwrap();
        assert_eq!(
            backend.calls,
            vec![
                Call::Load("sounds/buy.wav".into()),
                Call::SetLoop(s.id, true),
                Call::Play(s.id),
            ]
        );
    }

    #[test]
    fn mock_play_failure_records_nothing() {
        let mut backend = MockBackend::new();
        let mut s = backend.load("sounds/buy.wav").unwrap();
        backend.fail_play = true;
        assert!(backend.play(&mut s).is_err());
        assert_eq!(backend.calls_for(s.id).len(), 0);
    }
}
