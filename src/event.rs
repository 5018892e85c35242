use serde::Deserialize;

/// One sound intent emitted by the game's port.
///
/// The port delivers externally tagged JSON payloads, e.g. `{"play": "buy"}`
/// or `{"loop": "factory"}`. A payload carrying more than one intent does not
/// decode.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundEvent {
    Play(String),
    Loop(String),
    Stop(String),
}

impl SoundEvent {
    /// Name of the sound this event refers to.
    pub fn name(&self) -> &str {
        match self {
            SoundEvent::Play(name) | SoundEvent::Loop(name) | SoundEvent::Stop(name) => name,
        }
    }
}
