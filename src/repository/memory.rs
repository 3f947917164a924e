//! In-memory item repository
//!
//! Keeps items in insertion order and records every call so callers can check
//! which requests were issued, in what order, and how many overlapped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ItemRepository, RepositoryError};
use crate::item::{Item, ItemId, ItemPayload};

/// A repository call as issued by the client
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryCall {
    List,
    Create(ItemPayload),
    Update(ItemId, ItemPayload),
}

/// Start/finish markers for each call, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryEvent {
    Started(RepositoryCall),
    Finished(RepositoryCall),
}

#[derive(Debug, Default)]
struct FailurePlan {
    list: Option<RepositoryError>,
    create_by_name: HashMap<String, RepositoryError>,
    update_by_id: HashMap<ItemId, RepositoryError>,
}

/// Instrumented in-memory store
#[derive(Debug)]
pub struct InMemoryRepository {
    items: Mutex<Vec<Item>>,
    next_id: AtomicI64,
    events: Mutex<Vec<RepositoryEvent>>,
    failures: Mutex<FailurePlan>,
    latency: Option<Duration>,
    creates_in_flight: AtomicUsize,
    max_creates_in_flight: AtomicUsize,
    updates_in_flight: AtomicUsize,
    max_updates_in_flight: AtomicUsize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Seed the store; new identities continue after the highest seeded id
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            items: Mutex::new(items),
            next_id: AtomicI64::new(next_id),
            events: Mutex::new(Vec::new()),
            failures: Mutex::new(FailurePlan::default()),
            latency: None,
            creates_in_flight: AtomicUsize::new(0),
            max_creates_in_flight: AtomicUsize::new(0),
            updates_in_flight: AtomicUsize::new(0),
            max_updates_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delay every create/update by `latency` so overlapping calls are observable
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn fail_list(&self, err: RepositoryError) {
        self.failures.lock().await.list = Some(err);
    }

    /// Fail any create whose payload carries this name
    pub async fn fail_create_named(&self, name: &str, err: RepositoryError) {
        self.failures
            .lock()
            .await
            .create_by_name
            .insert(name.to_string(), err);
    }

    pub async fn fail_update(&self, id: ItemId, err: RepositoryError) {
        self.failures.lock().await.update_by_id.insert(id, err);
    }

    pub async fn clear_failures(&self) {
        *self.failures.lock().await = FailurePlan::default();
    }

    /// Current stored items
    pub async fn items(&self) -> Vec<Item> {
        self.items.lock().await.clone()
    }

    pub async fn events(&self) -> Vec<RepositoryEvent> {
        self.events.lock().await.clone()
    }

    /// Calls in the order they were issued
    pub async fn calls(&self) -> Vec<RepositoryCall> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                RepositoryEvent::Started(call) => Some(call.clone()),
                RepositoryEvent::Finished(_) => None,
            })
            .collect()
    }

    /// Calls other than `List`
    pub async fn write_calls(&self) -> Vec<RepositoryCall> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| !matches!(c, RepositoryCall::List))
            .collect()
    }

    pub async fn clear_events(&self) {
        self.events.lock().await.clear();
    }

    /// Highest number of creates that were ever in flight together
    pub fn max_concurrent_creates(&self) -> usize {
        self.max_creates_in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of updates that were ever in flight together
    pub fn max_concurrent_updates(&self) -> usize {
        self.max_updates_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, event: RepositoryEvent) {
        self.events.lock().await.push(event);
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn enter(counter: &AtomicUsize, max: &AtomicUsize) {
    let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
    max.fetch_max(now, Ordering::SeqCst);
}

fn leave(counter: &AtomicUsize) {
    counter.fetch_sub(1, Ordering::SeqCst);
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn list_items(&self) -> Result<Vec<Item>, RepositoryError> {
        self.record(RepositoryEvent::Started(RepositoryCall::List))
            .await;
        let result = match self.failures.lock().await.list.clone() {
            Some(err) => Err(err),
            None => Ok(self.items.lock().await.clone()),
        };
        self.record(RepositoryEvent::Finished(RepositoryCall::List))
            .await;
        result
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<Item, RepositoryError> {
        let call = RepositoryCall::Create(payload.clone());
        self.record(RepositoryEvent::Started(call.clone())).await;
        enter(&self.creates_in_flight, &self.max_creates_in_flight);

        self.simulate_latency().await;

        let failure = self
            .failures
            .lock()
            .await
            .create_by_name
            .get(&payload.name)
            .cloned();
        let result = match failure {
            Some(err) => Err(err),
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let item = payload.clone().with_id(id);
                self.items.lock().await.push(item.clone());
                Ok(item)
            }
        };

        leave(&self.creates_in_flight);
        self.record(RepositoryEvent::Finished(call)).await;
        result
    }

    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> Result<(), RepositoryError> {
        let call = RepositoryCall::Update(id, payload.clone());
        self.record(RepositoryEvent::Started(call.clone())).await;
        enter(&self.updates_in_flight, &self.max_updates_in_flight);

        self.simulate_latency().await;

        let failure = self.failures.lock().await.update_by_id.get(&id).cloned();
        let result = match failure {
            Some(err) => Err(err),
            None => {
                let mut items = self.items.lock().await;
                match items.iter_mut().find(|item| item.id == id) {
                    Some(item) => {
                        *item = payload.clone().with_id(id);
                        Ok(())
                    }
                    None => Err(RepositoryError::NotFound(id)),
                }
            }
        };

        leave(&self.updates_in_flight);
        self.record(RepositoryEvent::Finished(call)).await;
        result
    }
}
