#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use zpages::{Probe, ProbeDescriptor, ProbeError};

pub const FAKE_KIND: &str = "Fake";

/// Always returns the same outcome and counts its checks.
pub struct StaticProbe {
    name: String,
    error: Option<String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl Probe for StaticProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(FAKE_KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            None => Ok(()),
            Some(message) => Err(ProbeError::Connectivity(message.clone())),
        }
    }
}

pub fn healthy(name: &str) -> Arc<StaticProbe> {
    Arc::new(StaticProbe {
        name: name.to_string(),
        error: None,
        calls: AtomicUsize::new(0),
    })
}

pub fn failing(name: &str) -> Arc<StaticProbe> {
    Arc::new(StaticProbe {
        name: name.to_string(),
        error: Some(format!("{} is down", name)),
        calls: AtomicUsize::new(0),
    })
}

/// Blocks until its gate is opened.
pub struct GatedProbe {
    name: String,
    gate: Arc<Notify>,
}

impl GatedProbe {
    pub fn new(name: &str, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            gate,
        })
    }
}

#[async_trait]
impl Probe for GatedProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(FAKE_KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        self.gate.notified().await;
        Ok(())
    }
}

/// Succeeds after a fixed delay.
pub struct DelayedProbe {
    name: String,
    delay: Duration,
}

impl DelayedProbe {
    pub fn new(name: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            delay,
        })
    }
}

#[async_trait]
impl Probe for DelayedProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(FAKE_KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

pub struct PanickingProbe;

#[async_trait]
impl Probe for PanickingProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(FAKE_KIND, "panics")
    }

    async fn check(&self) -> Result<(), ProbeError> {
        panic!("boom")
    }
}
