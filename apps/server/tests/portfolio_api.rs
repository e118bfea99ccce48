use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use portfolio_analytics_core::{
    events::{NoOpPortfolioEventSink, PortfolioEvent},
    repository::JsonFilePortfolioRepository,
    service::PortfolioService,
};
use portfolio_analytics_server::{
    api::app_router, build_state, config::Config, events::EventBus, AppState,
};
use serde_json::Value;
use tokio_stream::StreamExt;
use tower::ServiceExt;

async fn static_app() -> (Arc<AppState>, Router) {
    let config = Config::default();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config).unwrap();
    (state, app)
}

fn app_over_file(contents: &str) -> (tempfile::NamedTempFile, Router) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    let service = PortfolioService::new(
        Arc::new(JsonFilePortfolioRepository::new(file.path())),
        Arc::new(NoOpPortfolioEventSink),
    );
    let state = Arc::new(AppState::new(Arc::new(service), EventBus::new(8)));
    let app = app_router(state, &Config::default()).unwrap();
    (file, app)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn symbols(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|h| h["symbol"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn holdings_default_to_value_descending() {
    let (_, app) = static_app().await;

    let (status, body) = get_json(app, "/api/portfolio/holdings").await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 15);
    assert_eq!(list[0]["symbol"], "MARUTI");
    assert_eq!(list[0]["value"].as_f64(), Some(307509.0));
    assert_eq!(list[0]["sector"], "Automotive");
    assert_eq!(list[0]["marketCap"], "Large");
    assert_eq!(list[14]["symbol"], "TATAMOTORS");
}

#[tokio::test]
async fn holdings_honour_sector_sort_and_limit() {
    let (_, app) = static_app().await;

    let (status, body) = get_json(
        app,
        "/api/portfolio/holdings?sector=Banking&sortBy=symbol&order=asc&limit=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(symbols(&body), vec!["AXISBANK", "HDFCBANK"]);
}

#[tokio::test]
async fn holdings_search_matches_name_or_symbol() {
    let (_, app) = static_app().await;

    let (_, body) = get_json(app, "/api/portfolio/holdings?search=tata").await;

    assert_eq!(symbols(&body), vec!["TCS", "TATAMOTORS"]);
}

#[tokio::test]
async fn bad_holdings_params_are_400() {
    for uri in [
        "/api/portfolio/holdings?sortBy=colour",
        "/api/portfolio/holdings?order=sideways",
        "/api/portfolio/holdings?sector=Crypto",
        "/api/portfolio/holdings?limit=many",
    ] {
        let (_, app) = static_app().await;
        let (status, body) = get_json(app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], 400);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn allocation_is_keyed_by_label_in_value_order() {
    let (_, app) = static_app().await;

    let (status, text) = send(app, Method::GET, "/api/portfolio/allocation").await;

    assert_eq!(status, StatusCode::OK);
    let tech = text.find("\"Technology\"").unwrap();
    let auto = text.find("\"Automotive\"").unwrap();
    let bank = text.find("\"Banking\"").unwrap();
    assert!(tech < auto && auto < bank);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["bySector"].as_object().unwrap().len(), 9);
    assert_eq!(body["bySector"]["Technology"]["percentage"].as_f64(), Some(31.12));
    assert_eq!(body["bySector"]["Technology"]["holdingsCount"], 4);
    assert_eq!(body["byMarketCap"]["Large"]["percentage"].as_f64(), Some(100.0));
    assert_eq!(body["totalValue"].as_f64(), Some(2006087.75));
}

#[tokio::test]
async fn performance_reports_timeline_and_returns() {
    let (_, app) = static_app().await;

    let (status, body) = get_json(app, "/api/portfolio/performance").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeline"].as_array().unwrap().len(), 12);
    assert_eq!(body["timeline"][0]["date"], "2024-01-01");
    assert_eq!(body["returns"]["portfolio"]["1month"].as_f64(), Some(2.0));
    assert_eq!(body["returns"]["portfolio"]["1year"].as_f64(), Some(23.33));
    assert_eq!(body["returns"]["nifty50"]["3months"].as_f64(), Some(6.19));
}

#[tokio::test]
async fn summary_includes_top_gainer_and_loser() {
    let (_, app) = static_app().await;

    let (status, body) = get_json(app, "/api/portfolio/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalValue"].as_f64(), Some(2006087.75));
    assert_eq!(body["totalInvested"].as_f64(), Some(1891200.0));
    assert_eq!(body["totalGainLoss"].as_f64(), Some(114887.75));
    assert_eq!(body["numberOfHoldings"], 15);
    assert_eq!(body["diversificationScore"].as_f64(), Some(8.2));
    assert_eq!(body["riskLevel"], "Moderate");
    assert_eq!(body["topGainer"]["symbol"], "ICICIBANK");
    assert_eq!(body["topLoser"]["symbol"], "ASIANPAINT");
}

#[tokio::test]
async fn top_performers_are_disjoint() {
    let (_, app) = static_app().await;

    let (status, body) = get_json(app, "/api/portfolio/top-performers?n=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(symbols(&body["top"]), vec!["ICICIBANK", "INFY", "TATAMOTORS"]);
    assert_eq!(
        symbols(&body["bottom"]),
        vec!["ASIANPAINT", "TECHM", "HDFCBANK"]
    );

    let (_, app) = static_app().await;
    let (status, _) = get_json(app, "/api/portfolio/top-performers?n=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sectors_are_distinct_and_ordered() {
    let (_, app) = static_app().await;

    let (_, body) = get_json(app, "/api/portfolio/sectors").await;

    let sectors: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(
        sectors,
        vec![
            "Automotive",
            "Banking",
            "Consumer Discretionary",
            "Consumer Goods",
            "Energy",
            "Financial Services",
            "Healthcare",
            "Technology",
            "Telecommunications",
        ]
    );
}

#[tokio::test]
async fn view_returns_only_requested_sections() {
    let (_, app) = static_app().await;
    let (status, body) = get_json(app, "/api/portfolio/view?mode=performance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "performance");
    assert!(body.get("performance").is_some());
    assert!(body.get("summary").is_none());
    assert!(body.get("holdings").is_none());

    let (_, app) = static_app().await;
    let (_, body) = get_json(
        app,
        "/api/portfolio/view?mode=holdings&sector=Technology&sortBy=name&order=asc",
    )
    .await;
    assert_eq!(
        symbols(&body["holdings"]),
        vec!["INFY", "TCS", "TECHM", "WIPRO"]
    );
    assert_eq!(body["sectors"].as_array().map(Vec::len), Some(9));
    assert!(body.get("summary").is_none());

    let (_, app) = static_app().await;
    let (status, _) = get_json(app, "/api/portfolio/view?mode=grid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reload_returns_204_and_publishes_event() {
    let (state, app) = static_app().await;
    let mut events = state.event_bus.subscribe();

    let (status, body) = send(app, Method::POST, "/api/portfolio/reload").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    let event = events.recv().await.unwrap();
    assert_eq!(event.name, "portfolio:snapshot-reloaded");
    assert_eq!(event.payload.unwrap()["holdings"], 15);
}

#[tokio::test]
async fn event_stream_is_server_sent_events() {
    let (_, app) = static_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events/stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );
}

#[tokio::test]
async fn event_stream_forwards_only_selected_events() {
    let (state, app) = static_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events/stream?events=reload-failed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    state
        .event_bus
        .publish(PortfolioEvent::snapshot_reloaded("static", 15).into());
    state
        .event_bus
        .publish(PortfolioEvent::reload_failed("source offline").into());

    let mut body = response.into_body().into_data_stream();
    let frame = tokio::time::timeout(Duration::from_secs(5), body.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = String::from_utf8(frame.to_vec()).unwrap();
    assert!(text.contains("event: portfolio:reload-failed"));
    assert!(text.contains("source offline"));
    assert!(!text.contains("snapshot-reloaded"));
}

#[tokio::test]
async fn event_stream_rejects_unknown_event_names() {
    let (_, app) = static_app().await;

    let (status, body) = get_json(app, "/api/events/stream?events=price-tick").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("price-tick"));
}

#[tokio::test]
async fn empty_portfolio_has_zero_summary_and_null_extremes() {
    let (_file, app) = app_over_file(r#"{"holdings": []}"#);
    let (status, body) = get_json(app, "/api/portfolio/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalValue"].as_f64(), Some(0.0));
    assert_eq!(body["numberOfHoldings"], 0);
    assert!(body["topGainer"].is_null());
    assert!(body["topLoser"].is_null());

    let (_file, app) = app_over_file("[]");
    let (_, body) = get_json(app, "/api/portfolio/top-performers").await;
    assert!(body["top"].as_array().unwrap().is_empty());
    assert!(body["bottom"].as_array().unwrap().is_empty());

    let (_file, app) = app_over_file("[]");
    let (_, body) = get_json(app, "/api/portfolio/view").await;
    assert!(body.get("highlights").is_none());
    assert!(body.get("summary").is_some());
}

#[tokio::test]
async fn unreadable_source_is_500() {
    let (file, app) = app_over_file("{ not json");
    let (status, body) = get_json(app, "/api/portfolio/holdings").await;
    drop(file);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
}

#[tokio::test]
async fn configured_data_file_is_served() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"symbol": "A", "name": "Alpha", "quantity": 10, "avgPrice": 100,
              "currentPrice": 110, "sector": "Technology", "marketCap": "Mid"}},
            {{"symbol": "B", "name": "Beta", "quantity": 5, "avgPrice": 200,
              "currentPrice": 180, "sector": "Banking", "marketCap": "Small"}}
        ]"#
    )
    .unwrap();
    let config = Config {
        data_file: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config).unwrap();

    let (status, body) = get_json(app, "/api/portfolio/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["numberOfHoldings"], 2);
    assert_eq!(body["totalValue"].as_f64(), Some(2000.0));
    assert_eq!(body["totalGainLossPercent"].as_f64(), Some(0.0));
    assert_eq!(body["topGainer"]["symbol"], "A");
}
