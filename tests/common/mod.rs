//! Shared fixtures: a small account with an inbox task, a nested project,
//! an empty category and a task whose category no longer exists.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub fn categories() -> Value {
    json!([
        {"_id": "work", "title": "Work", "type": "category", "parentId": "root", "color": "#336699"},
        {"_id": "launch", "title": "Launch", "type": "project", "parentId": "work"},
        {"_id": "garden", "title": "Garden", "type": "category", "parentId": "root"}
    ])
}

pub fn today_items() -> Value {
    json!([
        {"_id": "t1", "title": "Buy milk", "parentId": "unassigned", "db": "Tasks", "done": false,
         "labelIds": ["l1"]},
        {"_id": "t2", "title": "Draft [notes](https://docs.example.com/n)", "parentId": "launch",
         "db": "Tasks", "done": false,
         "note": "\u{feff}{\"document\":{\"nodes\":[{\"object\":\"block\",\"nodes\":[{\"object\":\"text\",\"leaves\":[{\"object\":\"leaf\",\"text\":\"Keep it short\"}]}]}]}}",
         "subtasks": {"s1": {"_id": "s1", "title": "Outline", "done": true}}},
        {"_id": "t3", "title": "Call plumber", "parentId": "deleted-category", "db": "Tasks", "done": false},
        {"_id": "e1", "title": "Standup", "db": "Events"}
    ])
}

pub fn labels() -> Value {
    json!([{"_id": "l1", "title": "errand", "color": "#00aa00"}])
}

/// Mount the three endpoints a digest needs
pub async fn mount_account(server: &MockServer) {
    mount_json(server, "/todayItems", today_items()).await;
    mount_json(server, "/categories", categories()).await;
    mount_json(server, "/labels", labels()).await;
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("X-API-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub const EXPECTED_CHECKLIST: [&str; 7] = [
    "- [ ] 📥Inbox",
    "  - [ ] Buy milk",
    "- [ ] 📁Work",
    "  - [ ] 🏳️Launch",
    "    - [ ] Draft [notes](https://docs.example.com/n)",
    "      - [ ] Outline",
    "- [ ] Call plumber",
];
