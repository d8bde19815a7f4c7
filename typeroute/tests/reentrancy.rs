//! Handlers that call back into the dispatcher while it is delivering.

use typeroute::{Dispatcher, RegistrationHandle, testing::Counter};

mod common;
use common::{Log, Ping, Pong};

#[test]
fn test_consecutive_once_handlers_all_fire() {
    let dispatcher = Dispatcher::new();
    let log = Log::default();
    for name in ["a", "b", "c", "d"] {
        let log = log.clone();
        dispatcher.register_once(move |_: &Ping| log.push(name));
    }

    dispatcher.dispatch(Ping { seq: 0 }).unwrap();
    dispatcher.dispatch(Ping { seq: 1 }).unwrap();

    assert_eq!(log.entries(), vec!["a", "b", "c", "d"]);
    assert!(dispatcher.is_empty());
}

#[test]
fn test_interleaved_once_and_always_keep_order() {
    let dispatcher = Dispatcher::new();
    let log = Log::default();
    let l = log.clone();
    dispatcher.register_once(move |_: &Ping| l.push("once-1"));
    let l = log.clone();
    dispatcher.register(move |_: &Ping| l.push("always"));
    let l = log.clone();
    dispatcher.register_once(move |_: &Ping| l.push("once-2"));

    dispatcher.dispatch(Ping { seq: 0 }).unwrap();
    dispatcher.dispatch(Ping { seq: 1 }).unwrap();

    assert_eq!(log.entries(), vec!["once-1", "always", "once-2", "always"]);
}

#[test]
fn test_handler_registered_during_dispatch_waits_for_next_dispatch() {
    let dispatcher = Dispatcher::new();
    let late = Counter::new();
    let d = dispatcher.clone();
    let l = late.clone();
    dispatcher.register_once(move |_: &Ping| {
        d.register::<Ping, _>(l.clone());
    });

    let report = dispatcher.dispatch(Ping { seq: 0 }).unwrap();
    assert_eq!(report.delivered, 1);
    assert_eq!(late.get(), 0);

    dispatcher.dispatch(Ping { seq: 1 }).unwrap();
    assert_eq!(late.get(), 1);
}

#[test]
fn test_handler_unregistering_its_neighbor() {
    let dispatcher = Dispatcher::new();
    let neighbor = Counter::new();
    let tail = Counter::new();
    let slot = std::sync::Arc::new(std::sync::OnceLock::<RegistrationHandle>::new());

    let d = dispatcher.clone();
    let s = slot.clone();
    dispatcher.register(move |_: &Ping| {
        if let Some(handle) = s.get() {
            d.unregister(handle);
        }
    });
    let neighbor_handle = dispatcher.register::<Ping, _>(neighbor.clone());
    dispatcher.register::<Ping, _>(tail.clone());
    slot.set(neighbor_handle).unwrap();

    dispatcher.dispatch(Ping { seq: 0 }).unwrap();
    dispatcher.dispatch(Ping { seq: 1 }).unwrap();

    assert_eq!(neighbor.get(), 0, "removed before its turn in the snapshot");
    assert_eq!(tail.get(), 2, "no entry is skipped by the removal");
}

#[test]
fn test_handler_unregistering_itself() {
    let dispatcher = Dispatcher::new();
    let runs = Counter::new();
    let slot = std::sync::Arc::new(std::sync::OnceLock::<RegistrationHandle>::new());

    let d = dispatcher.clone();
    let s = slot.clone();
    let r = runs.clone();
    let handle = dispatcher.register(move |p: &Ping| {
        typeroute::Handler::<Ping>::call(&r, p)?;
        if let Some(own) = s.get() {
            d.unregister(own);
        }
        Ok::<(), typeroute::BoxError>(())
    });
    slot.set(handle).unwrap();

    for seq in 0..3 {
        dispatcher.dispatch(Ping { seq }).unwrap();
    }
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_nested_dispatch_of_same_type_fires_once_handler_once() {
    let dispatcher = Dispatcher::new();
    let once = Counter::new();
    let visits = Counter::new();
    dispatcher.register_once::<Ping, _>(once.clone());

    let d = dispatcher.clone();
    let v = visits.clone();
    dispatcher.register(move |p: &Ping| {
        typeroute::Handler::<Ping>::call(&v, p).unwrap();
        if p.seq > 0 {
            d.dispatch(Ping { seq: p.seq - 1 }).unwrap();
        }
    });

    dispatcher.dispatch(Ping { seq: 3 }).unwrap();

    assert_eq!(once.get(), 1);
    assert_eq!(visits.get(), 4);
}

#[test]
fn test_handler_dispatching_other_type() {
    let dispatcher = Dispatcher::new();
    let pongs = Counter::new();
    dispatcher.register::<Pong, _>(pongs.clone());

    let d = dispatcher.clone();
    dispatcher.register(move |p: &Ping| d.dispatch(Pong { seq: p.seq }).map(|_| ()));

    dispatcher.dispatch(Ping { seq: 0 }).unwrap();
    assert_eq!(pongs.get(), 1);
}
