#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use typeroute::Message;

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Ping {
    pub seq: u32,
}

impl Message for Ping {}

#[derive(Clone, Debug, PartialEq)]
pub struct Pong {
    pub seq: u32,
}

impl Message for Pong {}

/// A trait several event types satisfy; routing must ignore it.
pub trait Shape {
    fn area(&self) -> f64;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

impl Message for Circle {}

pub type BoxedShape = Box<dyn Shape + Send + Sync>;

impl Message for BoxedShape {}

// ============================================================================
// Helpers
// ============================================================================

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("typeroute_std=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Ordered log shared between handlers.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<&'static str>>>);

impl Log {
    pub fn push(&self, entry: &'static str) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}
