//! In-memory repositories and feeds for service tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use ratecard_common::{hash_password, JwtService};
use ratecard_core::traits::{
    ActivityFeed, ActivityQuery, ActivityRepository, LaneQuery, PortRepository, RateRepository,
    RepoResult, ShippingLineRepository, UserRepository,
};
use ratecard_core::{
    Activity, ActivityActor, DomainError, IdGenerator, Port, Rate, RateHistory, RateNote,
    RecordId, ShippingLine, StoredRateLine, User, UserRole, ValidityWindow,
};
use ratecard_service::{ActivitySettings, ServiceContext};

pub const ADMIN_PASSWORD: &str = "Harbour-Master-2024";

/// All tables behind one lock each
#[derive(Default)]
pub struct MemoryStore {
    ports: Mutex<Vec<Port>>,
    lines: Mutex<Vec<ShippingLine>>,
    rates: Mutex<Vec<Rate>>,
    history: Mutex<Vec<RateHistory>>,
    notes: Mutex<Vec<RateNote>>,
    users: Mutex<Vec<(User, String)>>,
    activities: Mutex<Vec<Activity>>,
}

impl MemoryStore {
    pub fn history_len(&self, rate_id: RecordId) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.rate_id == rate_id)
            .count()
    }

    pub fn notes_len(&self, rate_id: RecordId) -> usize {
        self.notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.rate_id == rate_id)
            .count()
    }

    pub fn activity_len(&self) -> usize {
        self.activities.lock().unwrap().len()
    }

    pub fn insert_rate(&self, rate: Rate) {
        self.rates.lock().unwrap().push(rate);
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl PortRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Port>> {
        Ok(self.ports.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Port>> {
        Ok(self.ports.lock().unwrap().iter().find(|p| p.port_code == code).cloned())
    }

    async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<Port>> {
        Ok(self
            .ports
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepoResult<Vec<Port>> {
        let mut ports = self.ports.lock().unwrap().clone();
        ports.sort_by(|a, b| a.port_name.cmp(&b.port_name));
        Ok(ports)
    }

    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Port>> {
        Ok(self
            .ports
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                contains_ci(&p.port_name, term)
                    || contains_ci(&p.port_code, term)
                    || contains_ci(&p.country, term)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, port: &Port) -> RepoResult<()> {
        let mut ports = self.ports.lock().unwrap();
        if ports.iter().any(|p| p.port_code == port.port_code) {
            return Err(DomainError::PortCodeExists(port.port_code.clone()));
        }
        ports.push(port.clone());
        Ok(())
    }

    async fn update(&self, port: &Port) -> RepoResult<()> {
        let mut ports = self.ports.lock().unwrap();
        let slot = ports
            .iter_mut()
            .find(|p| p.id == port.id)
            .ok_or(DomainError::PortNotFound(port.id))?;
        *slot = port.clone();
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut ports = self.ports.lock().unwrap();
        let before = ports.len();
        ports.retain(|p| p.id != id);
        if ports.len() == before {
            return Err(DomainError::PortNotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.ports.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl ShippingLineRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ShippingLine>> {
        Ok(self.lines.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ShippingLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<ShippingLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| ids.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepoResult<Vec<ShippingLine>> {
        Ok(self.lines.lock().unwrap().clone())
    }

    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<ShippingLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| contains_ci(&l.name, term) || contains_ci(&l.contact_email, term))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, line: &ShippingLine) -> RepoResult<()> {
        self.lines.lock().unwrap().push(line.clone());
        Ok(())
    }

    async fn update(&self, line: &ShippingLine) -> RepoResult<()> {
        let mut lines = self.lines.lock().unwrap();
        let slot = lines
            .iter_mut()
            .find(|l| l.id == line.id)
            .ok_or(DomainError::ShippingLineNotFound(line.id))?;
        *slot = line.clone();
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|l| l.id != id);
        if lines.len() == before {
            return Err(DomainError::ShippingLineNotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.lines.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl RateRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Rate>> {
        Ok(self.rates.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Rate>> {
        let mut rates = self.rates.lock().unwrap().clone();
        rates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rates)
    }

    async fn find_by_lane(&self, query: LaneQuery) -> RepoResult<Vec<Rate>> {
        Ok(self
            .rates
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.pol_id == query.pol_id && r.pod_id == query.pod_id)
            .filter(|r| query.validity.admits(&r.validity))
            .cloned()
            .collect())
    }

    async fn create(&self, rate: &Rate) -> RepoResult<()> {
        self.rates.lock().unwrap().push(rate.clone());
        Ok(())
    }

    async fn update(&self, rate: &Rate) -> RepoResult<()> {
        let mut rates = self.rates.lock().unwrap();
        let slot = rates
            .iter_mut()
            .find(|r| r.id == rate.id)
            .ok_or(DomainError::RateNotFound(rate.id))?;
        *slot = rate.clone();
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut rates = self.rates.lock().unwrap();
        let before = rates.len();
        rates.retain(|r| r.id != id);
        if rates.len() == before {
            return Err(DomainError::RateNotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rates.lock().unwrap().len() as i64)
    }

    async fn append_history(&self, history: &RateHistory) -> RepoResult<()> {
        self.history.lock().unwrap().push(history.clone());
        Ok(())
    }

    async fn find_history(&self, rate_id: RecordId) -> RepoResult<Vec<RateHistory>> {
        let mut rows: Vec<RateHistory> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.rate_id == rate_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn create_note(&self, note: &RateNote) -> RepoResult<()> {
        self.notes.lock().unwrap().push(note.clone());
        Ok(())
    }

    async fn find_notes(&self, rate_id: RecordId) -> RepoResult<Vec<RateNote>> {
        self.find_notes_for_rates(&[rate_id]).await
    }

    async fn find_notes_for_rates(&self, rate_ids: &[RecordId]) -> RepoResult<Vec<RateNote>> {
        let mut notes: Vec<RateNote> = self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| rate_ids.contains(&n.rate_id))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(notes)
    }

    async fn delete_notes(&self, rate_id: RecordId) -> RepoResult<u64> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| n.rate_id != rate_id);
        Ok((before - notes.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.lock().unwrap().iter().map(|(u, _)| u.clone()).collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.users
            .lock()
            .unwrap()
            .push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        slot.0 = user.clone();
        Ok(())
    }

    async fn update_password(&self, id: RecordId, password_hash: &str) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        slot.1 = password_hash.to_string();
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|(u, _)| u.id != id);
        if users.len() == before {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }

    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, h)| h.clone()))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn create(&self, activity: &Activity) -> RepoResult<()> {
        self.activities.lock().unwrap().push(activity.clone());
        Ok(())
    }

    async fn find(&self, query: ActivityQuery) -> RepoResult<Vec<Activity>> {
        let mut rows: Vec<Activity> = self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| query.start.map_or(true, |s| a.timestamp >= s))
            .filter(|a| query.end.map_or(true, |e| a.timestamp <= e))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(rows
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect())
    }
}

/// Bounded newest-first feed
pub struct MemoryFeed {
    entries: Mutex<VecDeque<Activity>>,
    capacity: usize,
}

impl MemoryFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity,
        }
    }
}

#[async_trait]
impl ActivityFeed for MemoryFeed {
    async fn push(&self, activity: &Activity) -> RepoResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.push_front(activity.clone());
        entries.truncate(self.capacity);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> RepoResult<Vec<Activity>> {
        Ok(self.entries.lock().unwrap().iter().take(limit).cloned().collect())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// Cache that never answers
#[derive(Default)]
pub struct UnreachableFeed {
    pub push_attempts: AtomicU32,
}

impl UnreachableFeed {
    pub fn attempts(&self) -> u32 {
        self.push_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityFeed for UnreachableFeed {
    async fn push(&self, _activity: &Activity) -> RepoResult<()> {
        self.push_attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }

    async fn recent(&self, _limit: usize) -> RepoResult<Vec<Activity>> {
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> RepoResult<()> {
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }
}

/// Rate table that refuses the nth insert
pub struct FlakyRates {
    inner: Arc<MemoryStore>,
    fail_on: u32,
    creates: AtomicU32,
}

impl FlakyRates {
    pub fn failing_on(inner: Arc<MemoryStore>, fail_on: u32) -> Self {
        Self {
            inner,
            fail_on,
            creates: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl RateRepository for FlakyRates {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Rate>> {
        RateRepository::find_by_id(self.inner.as_ref(), id).await
    }

    async fn find_all(&self) -> RepoResult<Vec<Rate>> {
        RateRepository::find_all(self.inner.as_ref()).await
    }

    async fn find_by_lane(&self, query: LaneQuery) -> RepoResult<Vec<Rate>> {
        self.inner.find_by_lane(query).await
    }

    async fn create(&self, rate: &Rate) -> RepoResult<()> {
        if self.creates.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(DomainError::DatabaseUnavailable("connection reset".to_string()));
        }
        RateRepository::create(self.inner.as_ref(), rate).await
    }

    async fn update(&self, rate: &Rate) -> RepoResult<()> {
        RateRepository::update(self.inner.as_ref(), rate).await
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        RateRepository::delete(self.inner.as_ref(), id).await
    }

    async fn count(&self) -> RepoResult<i64> {
        RateRepository::count(self.inner.as_ref()).await
    }

    async fn append_history(&self, history: &RateHistory) -> RepoResult<()> {
        self.inner.append_history(history).await
    }

    async fn find_history(&self, rate_id: RecordId) -> RepoResult<Vec<RateHistory>> {
        self.inner.find_history(rate_id).await
    }

    async fn create_note(&self, note: &RateNote) -> RepoResult<()> {
        self.inner.create_note(note).await
    }

    async fn find_notes(&self, rate_id: RecordId) -> RepoResult<Vec<RateNote>> {
        self.inner.find_notes(rate_id).await
    }

    async fn find_notes_for_rates(&self, rate_ids: &[RecordId]) -> RepoResult<Vec<RateNote>> {
        self.inner.find_notes_for_rates(rate_ids).await
    }

    async fn delete_notes(&self, rate_id: RecordId) -> RepoResult<u64> {
        self.inner.delete_notes(rate_id).await
    }
}

/// Feed that answers each push from a queue of outcomes, then succeeds
#[derive(Default)]
pub struct ScriptedFeed {
    outcomes: Mutex<VecDeque<RepoResult<()>>>,
    entries: Mutex<Vec<Activity>>,
    push_attempts: AtomicU32,
}

impl ScriptedFeed {
    pub fn with_outcomes(outcomes: Vec<RepoResult<()>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> u32 {
        self.push_attempts.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Activity> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityFeed for ScriptedFeed {
    async fn push(&self, activity: &Activity) -> RepoResult<()> {
        self.push_attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
        if outcome.is_ok() {
            self.entries.lock().unwrap().push(activity.clone());
        }
        outcome
    }

    async fn recent(&self, limit: usize) -> RepoResult<Vec<Activity>> {
        Ok(self.entries.lock().unwrap().iter().rev().take(limit).cloned().collect())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub ctx: ServiceContext,
}

impl Harness {
    pub fn new(feed: Option<Arc<dyn ActivityFeed>>) -> Self {
        let store = Arc::new(MemoryStore::default());
        Self::assemble(store.clone(), store, feed)
    }

    /// Durable-only harness whose rate table is `wrap` around the store
    pub fn with_rate_repo(wrap: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn RateRepository>) -> Self {
        let store = Arc::new(MemoryStore::default());
        let rates = wrap(store.clone());
        Self::assemble(store, rates, None)
    }

    fn assemble(
        store: Arc<MemoryStore>,
        rates: Arc<dyn RateRepository>,
        feed: Option<Arc<dyn ActivityFeed>>,
    ) -> Self {
        let mut builder = ServiceContext::builder()
            .port_repo(store.clone())
            .shipping_line_repo(store.clone())
            .rate_repo(rates)
            .user_repo(store.clone())
            .activity_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret-that-is-long-enough", 3600)))
            .id_generator(Arc::new(IdGenerator::default()))
            .activity_settings(ActivitySettings::default());
        if let Some(feed) = feed {
            builder = builder.activity_feed(feed);
        }
        Self {
            store,
            ctx: builder.build().unwrap(),
        }
    }

    pub fn durable_only() -> Self {
        Self::new(None)
    }

    pub fn id(&self) -> RecordId {
        self.ctx.generate_id()
    }

    pub async fn port(&self, code: &str, name: &str, country: &str) -> Port {
        let port = Port::new(self.id(), code, name, country, None);
        PortRepository::create(self.store.as_ref(), &port).await.unwrap();
        port
    }

    pub async fn line(&self, name: &str) -> ShippingLine {
        let email = format!("{}@carrier.example", name.to_lowercase());
        let line = ShippingLine::new(self.id(), name, &email, None);
        ShippingLineRepository::create(self.store.as_ref(), &line)
            .await
            .unwrap();
        line
    }

    pub async fn admin(&self) -> User {
        let user = User::new(self.id(), "Asha Rao", "asha@ratecard.example", UserRole::Admin);
        let hash = hash_password(ADMIN_PASSWORD).unwrap();
        UserRepository::create(self.store.as_ref(), &user, &hash)
            .await
            .unwrap();
        user
    }

    /// Rate inserted directly, bypassing the service
    pub fn seed_rate(&self, line: &ShippingLine, pol: &Port, pod: &Port, validity: ValidityWindow) -> Rate {
        let rate = Rate::new(self.id(), line.id, pol.id, pod.id, validity, vec![flat_line("20GP", 1500.0)]);
        self.store.insert_rate(rate.clone());
        rate
    }
}

pub fn actor() -> ActivityActor {
    ActivityActor {
        id: RecordId::new(7),
        name: "Asha Rao".to_string(),
        email: "asha@ratecard.example".to_string(),
    }
}

pub fn flat_line(container_type: &str, rate: f64) -> StoredRateLine {
    StoredRateLine {
        container_type: Some(container_type.to_string()),
        rate: Some(rate),
        ..StoredRateLine::default()
    }
}

pub fn current_window() -> ValidityWindow {
    let now = Utc::now();
    ValidityWindow::new(now - Duration::days(10), now + Duration::days(30)).unwrap()
}

pub fn expired_window() -> ValidityWindow {
    let now = Utc::now();
    ValidityWindow::new(now - Duration::days(60), now - Duration::days(1)).unwrap()
}
