#![allow(dead_code)]

use std::collections::HashMap;

use blog_generator::{api::routes::create_router, config::Config, AppState};
use tokio::net::TcpListener;

pub fn test_config(llm_url: &str, news: Option<(&str, &str)>) -> Config {
    test_config_with(llm_url, news, &[])
}

/// Like [`test_config`], with extra variables applied last.
pub fn test_config_with(llm_url: &str, news: Option<(&str, &str)>, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("GROQ_API_KEY", "gsk_test".to_string());
    vars.insert("GROQ_API_URL", llm_url.to_string());
    vars.insert("LLM_TIMEOUT_SECS", "5".to_string());
    vars.insert("NEWS_TIMEOUT_SECS", "5".to_string());
    if let Some((url, key)) = news {
        vars.insert("NEWS_API_URL", url.to_string());
        vars.insert("NEWS_API_KEY", key.to_string());
    }
    for (key, value) in overrides {
        vars.insert(*key, value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(config: Config) -> String {
    let state = AppState::from_config(config).expect("app state");
    let app = create_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });
    format!("http://{}", addr)
}

/// Accepts connections and never answers them.
pub async fn spawn_stalled_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
