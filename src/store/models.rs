//! Domain Models - the five entity kinds held by the in-memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A racing/extreme-sports event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub location: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub is_live: bool,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied event fields for create/update.
/// `id` and `created_at` are intentionally absent — the store assigns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub location: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub is_live: bool,
    pub category: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// An event category. `slug` is the stable external reference used for
/// filtering events; `live_count` is curated, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub live_count: i64,
    pub description: String,
    pub color: String,
}

/// An exclusive bookable experience
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub badge: String,
    pub slots_left: i64,
    pub date: DateTime<Utc>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// A merchandise item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub price: f64,
    pub category: String,
}

/// A platform user. The password hash never leaves the process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
