//! Integration tests for the typeroute macros.

#![cfg(feature = "macros")]

use typeroute::{Dispatcher, Handler, Message, handler};

#[derive(Clone, Debug, Message)]
struct OrderPlaced {
    id: u64,
    total_cents: u64,
}

#[derive(Debug, Message)]
struct Envelope<T: Send + Sync + 'static> {
    body: T,
}

#[handler]
fn audit(order: &OrderPlaced) {
    let _ = order.id;
}

#[handler(name = "RejectEmpty")]
fn reject_empty(order: &OrderPlaced) -> Result<(), String> {
    if order.total_cents == 0 {
        return Err(format!("order {} has no total", order.id));
    }
    Ok(())
}

#[test]
fn test_handler_macro_generates_unit_struct() {
    let order = OrderPlaced {
        id: 1,
        total_cents: 250,
    };
    assert!(audit.call(&order).is_ok());
    assert!(RejectEmpty.call(&order).is_ok());
}

#[test]
fn test_handler_macro_keeps_return_value() {
    let order = OrderPlaced {
        id: 9,
        total_cents: 0,
    };
    let err = RejectEmpty.call(&order).unwrap_err();
    assert_eq!(err.to_string(), "order 9 has no total");
}

#[test]
fn test_generated_handlers_register() {
    let dispatcher = Dispatcher::new();
    dispatcher.register::<OrderPlaced, _>(audit);
    let reject = dispatcher.register::<OrderPlaced, _>(RejectEmpty);

    dispatcher
        .dispatch(OrderPlaced {
            id: 2,
            total_cents: 100,
        })
        .unwrap();
    let err = dispatcher
        .dispatch(OrderPlaced {
            id: 3,
            total_cents: 0,
        })
        .unwrap_err();
    assert_eq!(*err.handle(), reject);
}

#[test]
fn test_derived_generic_message_routes_per_instantiation() {
    let dispatcher = Dispatcher::new();
    let strings = typeroute::testing::Counter::new();
    dispatcher.register::<Envelope<String>, _>(strings.clone());

    dispatcher.dispatch(Envelope { body: 5_u32 }).unwrap();
    dispatcher
        .dispatch(Envelope {
            body: "hi".to_string(),
        })
        .unwrap();

    assert_eq!(strings.get(), 1);
}
