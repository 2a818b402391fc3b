//! Operation that fails a fixed number of times before succeeding.

use std::sync::atomic::{AtomicU32, Ordering};
use ticketflow_core::Failure;

pub struct Flaky {
    failures: u32,
    failure: Failure,
    calls: AtomicU32,
}

impl Flaky {
    pub fn new(failures: u32, failure: Failure) -> Self {
        Self {
            failures,
            failure,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn call(&self) -> Result<&'static str, Failure> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.failures {
            Err(self.failure.clone())
        } else {
            Ok("ok")
        }
    }
}
