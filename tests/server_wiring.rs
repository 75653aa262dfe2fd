use blueprints_rust::config::AppConfig;
use blueprints_rust::{build_app, build_persistence};
use serde_json::{json, Value};

#[tokio::test]
async fn memory_storage_serves_full_blueprint_lifecycle() {
    let cfg = AppConfig::from_lookup(|k| match k {
                                         "BLUEPRINTS_STORAGE" => Some("memory".to_string()),
                                         _ => None,
                                     }).expect("config");
    let persistence = build_persistence(&cfg).expect("persistence");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, build_app(persistence)).await.expect("serve app") });

    let client = reqwest::Client::new();
    let base = format!("http://{addr}/blueprints");
    let created = client.post(&base)
                        .json(&json!({"author": "alice", "name": "house", "points": [{"x": 0, "y": 0}]}))
                        .send()
                        .await
                        .expect("post");
    assert_eq!(created.status().as_u16(), 201);

    let appended = client.put(format!("{base}/alice/house/points"))
                         .json(&json!({"x": 5, "y": 6}))
                         .send()
                         .await
                         .expect("put");
    assert_eq!(appended.status().as_u16(), 202);

    let body: Value = client.get(format!("{base}/alice")).send().await.expect("get").json().await.expect("json");
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"][0]["points"], json!([{"x": 0, "y": 0}, {"x": 5, "y": 6}]));
}
