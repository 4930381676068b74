mod common;

use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};

use common::TestHarness;
use job_quiz_server::{auth::RefreshClaims, server};

macro_rules! init_app {
    ($harness:expr) => {
        test::init_service(
            App::new().configure(server::configure(
                $harness.state.clone(),
                $harness.tokens.clone(),
            )),
        )
        .await
    };
}

fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "correct-horse",
        "email": format!("{}@example.com", username),
        "displayName": "Quiz Taker",
        "lang": "zh-TW"
    })
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn test_register_login_refresh_logout_flow() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let registered: Value = test::read_body_json(resp).await;
    assert_eq!(registered["user"]["username"], "alice");
    assert_eq!(registered["user"]["lang"], "zh-TW");
    assert!(registered["user"].get("passwordHash").is_none());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "alice", "password": "correct-horse"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = test::read_body_json(resp).await;
    let refresh = session["refreshToken"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/refresh")
        .set_json(json!({"refreshToken": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: Value = test::read_body_json(resp).await;
    let new_refresh = rotated["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(new_refresh, refresh);

    // the old refresh token was revoked by the rotation
    let req = test::TestRequest::post()
        .uri("/refresh")
        .set_json(json!({"refreshToken": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/logout")
        .set_json(json!({"refreshToken": new_refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/refresh")
        .set_json(json!({"refreshToken": new_refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_all_devices_revokes_every_session() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("bob"))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = registered["user"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "bob", "password": "correct-horse"}))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(harness.refresh_tokens.active_count(&user_id).await, 2);

    let req = test::TestRequest::post()
        .uri("/logout")
        .set_json(json!({"refreshToken": session["refreshToken"], "allDevices": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(harness.refresh_tokens.active_count(&user_id).await, 0);
}

#[actix_web::test]
async fn test_concurrent_refresh_with_one_token_issues_one_session() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("carol"))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = registered["user"]["id"].as_str().unwrap().to_string();
    let refresh = registered["refreshToken"].clone();

    let first = test::TestRequest::post()
        .uri("/refresh")
        .set_json(json!({"refreshToken": refresh}))
        .to_request();
    let second = test::TestRequest::post()
        .uri("/refresh")
        .set_json(json!({"refreshToken": refresh}))
        .to_request();
    let (first, second) = futures::join!(
        test::call_service(&app, first),
        test::call_service(&app, second)
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort_by_key(|status| status.as_u16());
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::UNAUTHORIZED]);
    assert_eq!(harness.refresh_tokens.active_count(&user_id).await, 1);
}

#[actix_web::test]
async fn test_duplicate_username_conflicts() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(register_body("carol"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_wrong_password_is_unauthorized() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("dave"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "dave", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_guarded_group_rejects_before_handler_runs() {
    let harness = TestHarness::new();
    let app = init_app!(harness);
    let result = json!({"category": "career", "score": 3, "total": 5});

    let req = test::TestRequest::post()
        .uri("/api/test/results")
        .set_json(result.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/test/results")
        .insert_header(("Authorization", "Token abc"))
        .set_json(result.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // a refresh token is signed with the other key
    let refresh = harness
        .tokens
        .refresh
        .sign(&RefreshClaims::new("someone", harness.tokens.refresh.ttl()))
        .unwrap();
    let req = test::TestRequest::post()
        .uri("/api/test/results")
        .insert_header(bearer(&refresh))
        .set_json(result)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(harness.test_results.len().await, 0);
}

#[actix_web::test]
async fn test_results_and_profile_with_access_token() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("erin"))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;
    let access = session["accessToken"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/test/results")
        .insert_header(bearer(&access))
        .set_json(json!({
            "category": "career",
            "score": 4,
            "total": 5,
            "answers": {"q1": "1"},
            "summary": "Analytical"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["percentage"], 80.0);
    let result_id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/test/results")
        .insert_header(bearer(&access))
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/api/test/results/{}", result_id))
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/user/me")
        .insert_header(bearer(&access))
        .set_json(json!({"displayName": "Erin E.", "lang": "en"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/user/me")
        .insert_header(bearer(&access))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["displayName"], "Erin E.");
    assert_eq!(profile["lang"], "en");
}

#[actix_web::test]
async fn test_score_above_total_is_rejected() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("frank"))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;
    let access = session["accessToken"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/test/results")
        .insert_header(bearer(&access))
        .set_json(json!({"category": "career", "score": 6, "total": 5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.test_results.len().await, 0);
}

#[actix_web::test]
async fn test_root_and_health() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/").to_request();
    let root: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(root["status"], "online");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    harness.health.set(false);
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["uptime"].is_number());
}

#[actix_web::test]
async fn test_questions_are_public() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/questions?category=career&limit=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: Value = test::read_body_json(resp).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["id"], "q1");

    let req = test::TestRequest::get().uri("/api/questions/q3").to_request();
    let question: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(question["category"], "personality");
    assert_eq!(question["questionType"], "scale");

    let req = test::TestRequest::get().uri("/api/questions/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_chatbot_route_replies_and_reports_failures() {
    let harness = TestHarness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/chatbot/chat")
        .set_json(json!({
            "message": "How do I start?",
            "context": {"sessionId": "session-1", "user": {"lang": "en"}, "currentPage": "Home"}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(!body["response"]["reply"].as_str().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/api/chatbot/chat")
        .set_json(json!({"message": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}
