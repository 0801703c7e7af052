//! Shared fixtures for unit tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::context::ClientContext;
use crate::application::errors::DeliveryError;
use crate::application::messaging::CommandDispatcher;
use crate::application::messaging::cooldown::COMMAND_COOLDOWN;
use crate::domain::entities::{Outbound, User};
use crate::domain::traits::{ManualClock, Notifier, TransportChannel};
use crate::infrastructure::transport::{LocalChannel, TransportGateway};

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<String>>,
    echoes: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn echoes(&self) -> Vec<(String, String)> {
        self.echoes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str) {
        self.notices.lock().unwrap().push(text.to_string());
    }

    fn echo(&self, author: &str, text: &str) {
        self.echoes.lock().unwrap().push((author.to_string(), text.to_string()));
    }
}

pub struct RecordingChannel {
    name: &'static str,
    available: AtomicBool,
    sent: Mutex<Vec<Outbound>>,
}

impl RecordingChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            available: AtomicBool::new(true),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }
}

impl TransportChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self, _payload: &Outbound) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

pub struct Harness {
    pub dispatcher: CommandDispatcher,
    pub client: ClientContext,
    pub clock: Arc<ManualClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub channel: Arc<RecordingChannel>,
}

/// Client `tester` in room `lobby` with a recording channel ahead of the local fallback
pub fn client(privileged: bool) -> (ClientContext, Arc<ManualClock>, Arc<RecordingNotifier>, Arc<RecordingChannel>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
    let notifier = Arc::new(RecordingNotifier::default());
    let channel = Arc::new(RecordingChannel::new("recording"));
    let user = if privileged { User::admin("tester") } else { User::new("tester") };

    let gateway = TransportGateway::new(LocalChannel::new(notifier.clone())).with_channel(channel.clone());
    let client = ClientContext::new(Arc::new(user), clock.clone(), notifier.clone(), gateway, "lobby");
    (client, clock, notifier, channel)
}

pub fn harness(privileged: bool) -> Harness {
    let (client, clock, notifier, channel) = client(privileged);
    Harness {
        dispatcher: CommandDispatcher::new(COMMAND_COOLDOWN).with_rng(StdRng::seed_from_u64(42)),
        client,
        clock,
        notifier,
        channel,
    }
}
