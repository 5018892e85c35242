//! End-to-end dispatch behavior over the call-recording backend.

use factory_audio::backend::{Call, MockBackend};
use factory_audio::{
    Dispatcher, SoundEvent, SoundRegistry, FACTORY_HUM_VOLUME, MASTER_VOLUME, SOUND_MANIFEST,
};

const BUY: usize = 0;
const FACTORY: usize = 1;

/// Two-sound registry matching the ids above, with startup calls cleared.
fn bridge() -> Dispatcher<MockBackend> {
    let mut backend = MockBackend::new();
    let manifest = [("buy", "sounds/buy.wav"), ("factory", "sounds/factory.mp3")];
    let registry = SoundRegistry::load(&mut backend, &manifest).unwrap();
    backend.calls.clear();
    Dispatcher::with_registry(backend, registry)
}

#[test]
fn startup_loads_manifest_and_applies_defaults() {
    let dispatcher = Dispatcher::new(MockBackend::new()).unwrap();
    assert_eq!(dispatcher.registry().len(), SOUND_MANIFEST.len());
    for (name, _) in SOUND_MANIFEST {
        assert!(dispatcher.registry().contains(name));
    }

    // Manifest order, then the factory-hum overrides, then the master level.
    let calls = &dispatcher.backend().calls;
    let factory_id = SOUND_MANIFEST.len() - 1;
    let tail = &calls[calls.len() - 3..];
    assert_eq!(
        tail,
        [
            Call::SetVolume(factory_id, FACTORY_HUM_VOLUME),
            Call::SetLoop(factory_id, true),
            Call::SetMasterVolume(MASTER_VOLUME),
        ]
    );
}

#[test]
fn play_invokes_the_handle_exactly_once() {
    let mut d = bridge();
    d.dispatch(SoundEvent::Play("buy".into()));
    assert_eq!(d.backend().calls, vec![Call::Play(BUY)]);
    assert!(d.backend().calls_for(FACTORY).is_empty());
}

#[test]
fn loop_enables_looping_before_playing() {
    let mut d = bridge();
    d.dispatch(SoundEvent::Loop("factory".into()));
    assert_eq!(
        d.backend().calls,
        vec![Call::SetLoop(FACTORY, true), Call::Play(FACTORY)]
    );
}

#[test]
fn stop_never_plays() {
    let mut d = bridge();
    d.dispatch(SoundEvent::Stop("buy".into()));
    assert_eq!(d.backend().calls, vec![Call::Stop(BUY)]);
}

#[test]
fn unknown_name_touches_no_handle() {
    let mut d = bridge();
    d.dispatch(SoundEvent::Stop("unknown".into()));
    assert!(d.backend().calls.is_empty());
    assert_eq!(d.stats().failed, 1);
    assert_eq!(d.stats().delivered, 0);
}

#[test]
fn attach_dispatches_in_delivery_order() {
    let (tx, rx) = std::sync::mpsc::channel();
    tx.send(SoundEvent::Play("buy".into())).unwrap();
    tx.send(SoundEvent::Loop("factory".into())).unwrap();
    tx.send(SoundEvent::Stop("factory".into())).unwrap();
    drop(tx);

    let mut d = bridge();
    d.attach(rx);
    assert_eq!(
        d.backend().calls,
        vec![
            Call::Play(BUY),
            Call::SetLoop(FACTORY, true),
            Call::Play(FACTORY),
            Call::Stop(FACTORY),
        ]
    );
    assert_eq!(d.stats().delivered, 3);
}

#[test]
fn raw_port_payloads_decode_and_dispatch() {
    let mut d = bridge();
    d.dispatch_raw(r#"{"play":"buy"}"#);
    d.dispatch_raw(r#"{"loop":"factory"}"#);
    d.dispatch_raw(r#"{"volume":"buy"}"#); // unknown intent
    assert_eq!(
        d.backend().calls,
        vec![
            Call::Play(BUY),
            Call::SetLoop(FACTORY, true),
            Call::Play(FACTORY),
        ]
    );
    assert_eq!(d.stats().delivered, 2);
    assert_eq!(d.stats().failed, 1);
}

#[test]
fn failures_never_escape_the_dispatcher() {
    let mut d = bridge();
    for payload in ["{}", "null", r#"{"play":42}"#, r#"{"play":"nope"}"#] {
        d.dispatch_raw(payload);
    }
    assert!(d.backend().calls.is_empty());
    assert_eq!(d.stats().failed, 4);
}

#[test]
fn run_builds_and_pumps_the_stream() {
    let events = vec![
        SoundEvent::Play("click".into()),
        SoundEvent::Play("upgrade".into()),
    ];
    let dispatcher = factory_audio::run(MockBackend::new(), events).unwrap();
    assert_eq!(dispatcher.stats().delivered, 2);
    assert_eq!(dispatcher.stats().failed, 0);
}
