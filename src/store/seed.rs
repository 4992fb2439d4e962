//! Static demo data loaded at process start in place of a real
//! persistence layer. Dates are relative to startup so the catalogue
//! always contains a mix of upcoming and past events.

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::models::{Category, Event, Journey, MerchItem};

fn id() -> String {
    Uuid::new_v4().to_string()
}

pub fn events() -> Vec<Event> {
    let now = Utc::now();
    let event = |title: &str, location: &str, days: i64, is_live: bool, category: &str, time: &str| Event {
        id: id(),
        title: title.to_string(),
        location: location.to_string(),
        date: now + Duration::days(days),
        time: Some(time.to_string()),
        is_live,
        category: category.to_string(),
        thumbnail_url: None,
        created_at: now,
    };

    vec![
        event(
            "NASCAR Daytona 500",
            "Daytona International Speedway · Florida",
            10,
            true,
            "motorsport",
            "15:00 UTC",
        ),
        event(
            "Dakar Rally — Stage 9",
            "Al Ula → Ha'il · Saudi Arabia",
            -2,
            false,
            "offroad",
            "09:00 UTC",
        ),
        event(
            "World Dirt Track Championship",
            "Knob Noster · Missouri, USA",
            5,
            true,
            "motorsport",
            "18:00 UTC",
        ),
        event(
            "Speed Boat Cup — Finals",
            "Lake Como · Italy",
            14,
            false,
            "water",
            "14:00 UTC",
        ),
        event(
            "Red Bull Skydive Series — Rd. 3",
            "Interlaken Drop Zone · Switzerland",
            20,
            false,
            "air",
            "11:30 UTC",
        ),
        event(
            "Crop Duster Air Racing",
            "Bakersfield Airfield · California",
            26,
            false,
            "air",
            "16:00 UTC",
        ),
    ]
}

pub fn categories() -> Vec<Category> {
    let category =
        |name: &str, slug: &str, icon: &str, live_count: i64, description: &str, color: &str| {
            Category {
                id: id(),
                name: name.to_string(),
                slug: slug.to_string(),
                icon: icon.to_string(),
                live_count,
                description: description.to_string(),
                color: color.to_string(),
            }
        };

    vec![
        category(
            "MOTORSPORT",
            "motorsport",
            "🏎️",
            24,
            "NASCAR · F1 · Dirt · Rally",
            "cyan",
        ),
        category(
            "WATER",
            "water",
            "🌊",
            8,
            "Speed Boats · Jet Ski · Surf",
            "blue",
        ),
        category(
            "AIR & SKY",
            "air",
            "🪂",
            5,
            "Skydive · Air Race · Wing",
            "purple",
        ),
        category(
            "OFF-ROAD",
            "offroad",
            "🏔️",
            12,
            "Dakar · Baja · Enduro",
            "orange",
        ),
    ]
}

pub fn journeys() -> Vec<Journey> {
    let now = Utc::now();

    vec![
        Journey {
            id: id(),
            title: "DAYTONA PIT CREW EXPERIENCE".to_string(),
            category: "MOTORSPORT · BEHIND THE SCENES".to_string(),
            description: "Go behind the wall at Daytona 500. Watch pit stops up close, \
                          meet the crew chiefs, and ride the pace car on track."
                .to_string(),
            badge: "EXCLUSIVE".to_string(),
            slots_left: 12,
            date: now + Duration::days(10),
            price: 2400.0,
            thumbnail_url: None,
        },
        Journey {
            id: id(),
            title: "DAKAR DESERT CONVOY".to_string(),
            category: "RALLY · DESERT EXPEDITION".to_string(),
            description: "Ride a support vehicle through the Dakar stages. Sleep under \
                          the stars, eat with the team, and feel the dust."
                .to_string(),
            badge: "MEMBERS ONLY".to_string(),
            slots_left: 6,
            date: now + Duration::days(345),
            price: 5800.0,
            thumbnail_url: None,
        },
        Journey {
            id: id(),
            title: "RED BULL TANDEM SKYDIVE".to_string(),
            category: "AIR · EXTREME SPORT".to_string(),
            description: "Jump with a Red Bull certified instructor at 15,000ft. \
                          Camera-equipped, full debrief, and a story you'll never forget."
                .to_string(),
            badge: "LIMITED".to_string(),
            slots_left: 3,
            date: now + Duration::days(20),
            price: 1200.0,
            thumbnail_url: None,
        },
    ]
}

pub fn merch_items() -> Vec<MerchItem> {
    let item = |name: &str, icon: &str, price: f64, category: &str| MerchItem {
        id: id(),
        name: name.to_string(),
        icon: icon.to_string(),
        price,
        category: category.to_string(),
    };

    vec![
        item("Team Hoodie", "👕", 89.0, "apparel"),
        item("NITROUS Cap", "🧢", 42.0, "apparel"),
        item("Racing Jacket", "🏎️", 189.0, "apparel"),
        item("Pit Watch", "⌚", 249.0, "accessories"),
        item("Gear Backpack", "🎒", 120.0, "accessories"),
        item("Drop Keychain", "🏆", 28.0, "collectibles"),
    ]
}
