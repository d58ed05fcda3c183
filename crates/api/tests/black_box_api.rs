use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = restock_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Two shops, one article: Paris overstocked (150/50..100), Marseille in
/// rupture (10/30..60). Deterministically yields one transfer proposal.
fn seed_snapshot() -> serde_json::Value {
    let paris = Uuid::now_v7();
    let marseille = Uuid::now_v7();
    let tee = Uuid::now_v7();

    json!({
        "shops": [
            { "id": paris, "name": "Paris" },
            { "id": marseille, "name": "Marseille", "address": "4 rue de la République" },
        ],
        "articles": [
            { "id": tee, "code": "ART-001", "label": "Blue cotton t-shirt", "category": "Apparel" },
        ],
        "entries": [
            { "shop_id": paris, "article_id": tee, "current": 150, "min": 50, "max": 100 },
            { "shop_id": marseille, "article_id": tee, "current": 10, "min": 30, "max": 60 },
        ],
    })
}

async fn seed_and_run(client: &reqwest::Client, base_url: &str) -> serde_json::Value {
    let res = client
        .put(format!("{}/snapshot", base_url))
        .json(&seed_snapshot())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/analysis/run", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn snapshot_rejects_negative_quantities() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let shop = Uuid::now_v7();
    let article = Uuid::now_v7();
    let res = client
        .put(format!("{}/snapshot", srv.base_url))
        .json(&json!({
            "shops": [{ "id": shop, "name": "Lille" }],
            "articles": [{ "id": article, "code": "A", "label": "A" }],
            "entries": [
                { "shop_id": shop, "article_id": article, "current": -1, "min": 0, "max": 10 },
            ],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn analysis_run_classifies_and_proposes_transfers() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let report = seed_and_run(&client, &srv.base_url).await;

    assert_eq!(report["global"]["total_items"], 2);
    assert_eq!(report["global"]["rupture_count"], 1);
    assert_eq!(report["global"]["overstock_count"], 1);
    assert_eq!(report["global"]["rupture_percentage"], 50.0);

    let proposals = report["transfer_proposals"].as_array().unwrap();
    assert_eq!(proposals.len(), 1);
    let proposal = &proposals[0];
    assert_eq!(proposal["source_shop_name"], "Paris");
    assert_eq!(proposal["destination_shop_name"], "Marseille");
    assert_eq!(proposal["quantity"], 20);
    assert_eq!(proposal["status"], "proposed");
}

#[tokio::test]
async fn proposal_lifecycle_happy_path() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let report = seed_and_run(&client, &srv.base_url).await;
    let id = report["transfer_proposals"][0]["id"].as_str().unwrap().to_string();

    for (step, expected) in [
        ("approve", "validated"),
        ("mark-in-transit", "in_transit"),
        ("mark-received", "received"),
    ] {
        let res = client
            .post(format!("{}/proposals/{}/{}", srv.base_url, id, step))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "step {step}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["status"], expected);
    }
}

#[tokio::test]
async fn invalid_transition_is_a_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let report = seed_and_run(&client, &srv.base_url).await;
    let id = report["transfer_proposals"][0]["id"].as_str().unwrap().to_string();

    // mark-received straight from proposed is not allowed
    let res = client
        .post(format!("{}/proposals/{}/mark-received", srv.base_url, id))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_transition");
}

#[tokio::test]
async fn unknown_and_malformed_proposal_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!(
            "{}/proposals/{}/approve",
            srv.base_url,
            Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/proposals/not-a-uuid/approve", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proposal_list_filters_by_status() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let report = seed_and_run(&client, &srv.base_url).await;
    let id = report["transfer_proposals"][0]["id"].as_str().unwrap().to_string();

    client
        .post(format!("{}/proposals/{}/reject", srv.base_url, id))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/proposals?status=rejected", srv.base_url))
        .send()
        .await
        .unwrap();
    let rejected: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(rejected.len(), 1);

    let res = client
        .get(format!("{}/proposals?status=proposed", srv.base_url))
        .send()
        .await
        .unwrap();
    let proposed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(proposed.is_empty());

    let res = client
        .get(format!("{}/proposals?status=bogus", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_history_filters_by_status_and_category() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    seed_and_run(&client, &srv.base_url).await;

    let res = client
        .get(format!(
            "{}/reports/transfers?period=all&category=Apparel",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let records: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["article_label"], "Blue cotton t-shirt");

    let res = client
        .get(format!(
            "{}/reports/transfers?category=Lighting",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let records: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(records.is_empty());

    let res = client
        .get(format!("{}/reports/transfers?period=bogus", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shop_performance_reflects_the_current_snapshot() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    seed_and_run(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/reports/shop-performance", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let rows: Vec<serde_json::Value> = res.json().await.unwrap();

    // Sorted by shop name
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["shop_name"], "Marseille");
    assert_eq!(rows[0]["rupture_rate"], 100.0);
    assert_eq!(rows[1]["shop_name"], "Paris");
    assert_eq!(rows[1]["overstock_rate"], 100.0);
}

#[tokio::test]
async fn balancing_trend_grows_with_each_run() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/reports/balancing-trend", srv.base_url))
        .send()
        .await
        .unwrap();
    let points: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(points.is_empty());

    seed_and_run(&client, &srv.base_url).await;
    client
        .post(format!("{}/analysis/run", srv.base_url))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/reports/balancing-trend", srv.base_url))
        .send()
        .await
        .unwrap();
    let points: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["rupture"], 50.0);
}

#[tokio::test]
async fn run_on_empty_snapshot_reports_zero_percentages() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/analysis/run", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report: serde_json::Value = res.json().await.unwrap();

    assert_eq!(report["global"]["total_items"], 0);
    assert_eq!(report["global"]["rupture_percentage"], 0.0);
    assert!(report["transfer_proposals"].as_array().unwrap().is_empty());
}
