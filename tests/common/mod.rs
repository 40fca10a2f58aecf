// tests/common/mod.rs

// Shared by several integration-test binaries; not every binary uses
// every helper.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use medquiz::config::Config;
use medquiz::models::{question::Question, secret::SurgerySecret, topic::Topic};
use medquiz::routes;
use medquiz::state::AppState;
use medquiz::store::{MemStorage, Storage};

pub fn question(qid: i64, label: &str, text: &str, explanation: &str) -> Question {
    Question {
        qid,
        label: label.to_string(),
        post_title: format!("Post {qid}"),
        source_url: format!("https://example.com/posts/{qid}"),
        question_text: text.to_string(),
        options: BTreeMap::from([
            ("A".to_string(), "Murphy's sign".to_string()),
            ("B".to_string(), "Rovsing's sign".to_string()),
            ("C".to_string(), "Cullen's sign".to_string()),
        ]),
        correct: vec!["A".to_string()],
        explanation: explanation.to_string(),
    }
}

pub fn fixture_topics() -> Vec<Topic> {
    vec![
        Topic {
            label: "MCQ : Trauma".to_string(),
            questions: vec![
                question(
                    1,
                    "MCQ : Trauma",
                    "Which sign suggests acute cholecystitis?",
                    "Inspiratory arrest during RUQ palpation.",
                ),
                question(
                    2,
                    "MCQ : Trauma",
                    "What is the first step of the primary survey?",
                    "Airway with cervical spine control.",
                ),
            ],
        },
        Topic {
            label: "MCQ : Hernia".to_string(),
            questions: vec![question(
                3,
                "MCQ : Hernia",
                "Which hernia strangulates most often?",
                "The femoral canal is narrow and rigid.",
            )],
        },
    ]
}

pub fn fixture_secrets() -> Vec<SurgerySecret> {
    vec![
        SurgerySecret {
            number: 1,
            point: "Airway always comes first.".to_string(),
        },
        SurgerySecret {
            number: 2,
            point: "The most common cause of early postoperative fever is atelectasis.".to_string(),
        },
        SurgerySecret {
            number: 3,
            point: "Murphy's sign suggests acute cholecystitis.".to_string(),
        },
    ]
}

pub fn test_config() -> Config {
    Config {
        topics_path: "data/topics.json".to_string(),
        secrets_path: "data/secrets.json".to_string(),
        port: 0,
        rust_log: "error".to_string(),
    }
}

/// Spawns the app on a random port over the fixture corpus. Returns the
/// base URL and a handle onto the server's storage so tests can inspect
/// server-visible state directly.
pub async fn spawn_app() -> (String, Arc<MemStorage>) {
    let storage = Arc::new(
        MemStorage::new(fixture_topics(), fixture_secrets()).expect("fixture corpus is valid"),
    );

    let state = AppState {
        storage: storage.clone() as Arc<dyn Storage>,
        config: test_config(),
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, storage)
}

/// Like `spawn_app`, but the returned sender shuts the server down so tests
/// can exercise behavior after the network goes away.
pub async fn spawn_app_with_shutdown() -> (String, tokio::sync::oneshot::Sender<()>) {
    let storage = Arc::new(
        MemStorage::new(fixture_topics(), fixture_secrets()).expect("fixture corpus is valid"),
    );

    let state = AppState {
        storage: storage as Arc<dyn Storage>,
        config: test_config(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                rx.await.ok();
            })
            .await
            .unwrap();
    });

    (address, tx)
}

/// An address nothing listens on: bind a port, then drop the listener.
/// Requests here fail at the transport level, like a lost connection.
pub async fn unreachable_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
