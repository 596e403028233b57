//! Integration tests for the JSON API.

use actix_web::{http::StatusCode, test, web::Data, App};
use serde_json::{json, Value};
use std::sync::Arc;
use swiss_tournament_web::{api, MemoryStore, Store};

fn state() -> Data<dyn Store> {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    Data::from(store)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(api::configure)).await
    };
}

#[actix_web::test]
async fn health_reports_ok() {
    let state = state();
    let app = app!(state);
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn full_round_in_a_tournament() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Friday Swiss" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let t = created["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/players?tournament={t}"))
            .set_json(json!({ "name": name }))
            .to_request();
        let player: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(player["id"].as_i64().unwrap());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/players/count?tournament={t}"))
        .to_request();
    let count: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count["count"], 4);

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches?tournament={t}"))
        .set_json(json!({ "winner": ids[0], "loser": ids[1] }))
        .to_request();
    let reported: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reported["recorded"], true);

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches?tournament={t}"))
        .set_json(json!({ "tie1": ids[2], "tie2": ids[3] }))
        .to_request();
    let reported: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reported["recorded"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/standings?tournament={t}"))
        .to_request();
    let standings: Value = test::call_and_read_body_json(&app, req).await;
    let rows = standings.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["id"], ids[0]);
    assert_eq!(rows[0]["points"], 3);
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[3]["id"], ids[1]);
    assert_eq!(rows[3]["losses"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/pairings?tournament={t}"))
        .to_request();
    let pairings: Value = test::call_and_read_body_json(&app, req).await;
    let pairs = pairings.as_array().unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0]["id1"], ids[0]);
    assert!(pairs[1]["id1"] == ids[1] || pairs[1]["id2"] == ids[1]);
}

#[actix_web::test]
async fn malformed_report_is_accepted_but_not_recorded() {
    let state = state();
    let app = app!(state);
    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "name": "Solo" }))
        .to_request();
    let player: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "winner": player["id"], "loser": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["recorded"], false);

    let req = test::TestRequest::get().uri("/api/matches").to_request();
    let matches: Value = test::call_and_read_body_json(&app, req).await;
    assert!(matches.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn errors_map_to_status_codes() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/standings?tournament=77")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "name": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "winner": 1, "loser": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn standings_csv_and_resets() {
    let state = state();
    let app = app!(state);
    for name in ["Ana", "Ben"] {
        let req = test::TestRequest::post()
            .uri("/api/players")
            .set_json(json!({ "name": name }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/standings.csv").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.starts_with("rank,id,name,wins,ties,losses,matches,points\n"));
    assert_eq!(text.lines().count(), 3);

    let req = test::TestRequest::delete().uri("/api/players").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.get_ref().count_players(Default::default()).unwrap(), 0);
}

#[actix_web::test]
async fn rejected_requests_answer_with_json_errors() {
    let state = state();
    let app = app!(state);

    let requests = vec![
        test::TestRequest::get()
            .uri("/api/standings?tournament=abc")
            .to_request(),
        test::TestRequest::post()
            .uri("/api/players")
            .set_json(json!({}))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/matches")
            .set_json(json!({ "winner": "x" }))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/tournaments/one/players/2")
            .to_request(),
    ];
    for req in requests {
        let uri = req.uri().to_string();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string(), "{uri}: {body}");
    }
}
