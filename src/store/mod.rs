//! In-memory domain store.
//!
//! Holds the five entity collections for the lifetime of the process and is
//! the sole point of mutation. Each collection sits behind its own
//! `tokio::sync::RwLock`; compound operations (duplicate-email check plus
//! insert, slot check plus decrement) run inside a single write-lock
//! acquisition so concurrent requests cannot interleave between the check
//! and the mutation. A restart resets everything to the seed data.

pub mod models;
mod seed;

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use self::models::{Category, Event, EventPayload, Journey, MerchItem, User};

/// Handle shared between all request handlers via router state.
pub type SharedStore = Arc<Store>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("no slots available")]
    NoSlotsLeft,
    #[error("email already registered")]
    EmailTaken,
}

pub struct Store {
    events: RwLock<Vec<Event>>,
    categories: RwLock<Vec<Category>>,
    journeys: RwLock<Vec<Journey>>,
    merch: RwLock<Vec<MerchItem>>,
    users: RwLock<Vec<User>>,
}

impl Store {
    /// An empty store, used by tests that want full control over contents.
    pub fn empty() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            categories: RwLock::new(Vec::new()),
            journeys: RwLock::new(Vec::new()),
            merch: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
        }
    }

    /// The store as it looks at process start: static demo data for every
    /// collection except users, which only ever grow via registration.
    pub fn seeded() -> Self {
        Self {
            events: RwLock::new(seed::events()),
            categories: RwLock::new(seed::categories()),
            journeys: RwLock::new(seed::journeys()),
            merch: RwLock::new(seed::merch_items()),
            users: RwLock::new(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub async fn events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn events_by_category(&self, category: &str) -> Vec<Event> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }

    pub async fn live_events(&self) -> Vec<Event> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.is_live)
            .cloned()
            .collect()
    }

    pub async fn event(&self, id: &str) -> Option<Event> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    /// Append a new event, assigning a fresh id and creation instant.
    pub async fn insert_event(&self, payload: EventPayload) -> Event {
        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            location: payload.location,
            date: payload.date,
            time: payload.time,
            is_live: payload.is_live,
            category: payload.category,
            thumbnail_url: payload.thumbnail_url,
            created_at: Utc::now(),
        };
        self.events.write().await.push(event.clone());
        event
    }

    /// Replace every field of an existing event except `id` and `created_at`.
    pub async fn replace_event(
        &self,
        id: &str,
        payload: EventPayload,
    ) -> Result<Event, StoreError> {
        let mut events = self.events.write().await;
        let existing = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        let updated = Event {
            id: existing.id.clone(),
            title: payload.title,
            location: payload.location,
            date: payload.date,
            time: payload.time,
            is_live: payload.is_live,
            category: payload.category,
            thumbnail_url: payload.thumbnail_url,
            created_at: existing.created_at,
        };
        *existing = updated.clone();
        Ok(updated)
    }

    pub async fn remove_event(&self, id: &str) -> Result<(), StoreError> {
        let mut events = self.events.write().await;
        let idx = events
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        events.remove(idx);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.read().await.clone()
    }

    pub async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.categories
            .read()
            .await
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
    }

    // ------------------------------------------------------------------
    // Journeys
    // ------------------------------------------------------------------

    pub async fn journeys(&self) -> Vec<Journey> {
        self.journeys.read().await.clone()
    }

    pub async fn journey(&self, id: &str) -> Option<Journey> {
        self.journeys
            .read()
            .await
            .iter()
            .find(|j| j.id == id)
            .cloned()
    }

    /// Claim one slot on a journey. The check and the decrement happen under
    /// the same write lock, so two bookings can never both take a last slot.
    pub async fn book_journey(&self, id: &str) -> Result<Journey, StoreError> {
        let mut journeys = self.journeys.write().await;
        let journey = journeys
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or(StoreError::NotFound)?;
        if journey.slots_left <= 0 {
            return Err(StoreError::NoSlotsLeft);
        }
        journey.slots_left -= 1;
        Ok(journey.clone())
    }

    // ------------------------------------------------------------------
    // Merch
    // ------------------------------------------------------------------

    pub async fn merch_items(&self) -> Vec<MerchItem> {
        self.merch.read().await.clone()
    }

    pub async fn merch_item(&self, id: &str) -> Option<MerchItem> {
        self.merch.read().await.iter().find(|m| m.id == id).cloned()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Create a user. Email comparison is exact-match (no case folding), and
    /// the uniqueness check shares a write lock with the insert so two
    /// concurrent registrations of the same address cannot both succeed.
    pub async fn insert_user(
        &self,
        email: String,
        password_hash: String,
        name: String,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            name,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn user_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }
}
