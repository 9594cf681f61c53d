use axum::body::Body;
use axum::http::{Request, StatusCode};
use hotel_booking_ddd::api::{AppState, create_router};
use hotel_booking_ddd::application::ServiceDependencies;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// E2Eテスト用のアプリケーションセットアップ
///
/// インメモリの依存関係と実際のAPIルーターを使用する。
/// 管理者を1人登録し、そのトークンも返す。
async fn setup_e2e_app() -> (axum::Router, ServiceDependencies, String) {
    let deps = common::deps();
    common::admin(&deps).await;

    let app = create_router(Arc::new(AppState {
        service_deps: deps.clone(),
    }));

    let (status, body) = send(
        &app,
        "POST",
        "/auth/sign-in",
        None,
        Some(json!({ "email": "admin@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    (app, deps, token)
}

/// リクエストを1件送信し、ステータスとJSONボディを返す
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

/// 一般利用者を登録してサインインする
async fn sign_up_and_in(app: &axum::Router, name: &str) -> (String, String) {
    let email = format!("{name}@example.com");

    let (status, user) = send(
        app,
        "POST",
        "/auth/sign-up",
        None,
        Some(json!({ "email": email, "password": "pw", "username": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["is_admin"], json!(false));

    let (status, body) = send(
        app,
        "POST",
        "/auth/sign-in",
        None,
        Some(json!({ "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        user["user_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_health_check() {
    let (app, _, _) = setup_e2e_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_e2e_full_booking_flow() {
    let (app, _, admin_token) = setup_e2e_app().await;
    let (alice_id, alice_token) = sign_up_and_in(&app, "alice").await;

    // Step 1: 管理者がホテルを登録
    let (status, hotel) = send(
        &app,
        "POST",
        "/hotels",
        Some(&admin_token),
        Some(json!({
            "name": "H1",
            "location": "Marrakech",
            "price": 100.0,
            "rating": 4.5,
            "features": ["Wifi", "Spa"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hotel_id = hotel["hotel_id"].as_str().unwrap().to_string();

    // Step 2: 見積もり
    let (status, quote) = send(
        &app,
        "GET",
        &format!("/hotels/{hotel_id}/quote?check_in=2024-06-01&check_out=2024-06-03"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["total_price"], json!(200.0));

    // Step 3: 予約（total_price省略時は見積もり額）
    let (status, booking) = send(
        &app,
        "POST",
        "/bookings",
        Some(&alice_token),
        Some(json!({
            "hotel_id": hotel_id,
            "check_in": "2024-06-01",
            "check_out": "2024-06-03"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], json!("pending"));
    assert_eq!(booking["total_price"], json!(200.0));
    assert_eq!(booking["user_id"], json!(alice_id));
    let booking_id = booking["booking_id"].as_str().unwrap().to_string();

    // Step 4: 管理者が確定
    let (status, confirmed) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/confirm"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], json!("confirmed"));

    // Step 5: レビュー投稿
    let (status, review) = send(
        &app,
        "POST",
        &format!("/hotels/{hotel_id}/reviews"),
        Some(&alice_token),
        Some(json!({ "booking_id": booking_id, "rating": 5, "comment": "Lovely" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["rating"], json!(5));

    let (status, reviews) = send(
        &app,
        "GET",
        &format!("/hotels/{hotel_id}/reviews"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews.as_array().unwrap().len(), 1);

    // Step 6: キャンセル、二重キャンセルは409
    let cancel_uri = format!("/bookings/{booking_id}/cancel");
    let (status, cancelled) = send(&app, "POST", &cancel_uri, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], json!("cancelled"));

    let (status, error) = send(&app, "POST", &cancel_uri, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], json!("INVALID_STATE"));

    // Step 7: 利用者の予約一覧
    let (status, bookings) = send(
        &app,
        "GET",
        &format!("/users/{alice_id}/bookings"),
        Some(&alice_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_e2e_search_hotels() {
    let (app, _, admin_token) = setup_e2e_app().await;

    for (name, location, price) in [
        ("Riad Atlas", "Marrakech", 120.0),
        ("Dar Fes", "Fes", 40.0),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/hotels",
            Some(&admin_token),
            Some(json!({ "name": name, "location": location, "price": price })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = send(&app, "GET", "/hotels", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, found) = send(&app, "GET", "/hotels?location=marra", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], json!("Riad Atlas"));
}

#[tokio::test]
async fn test_e2e_messages() {
    let (app, _, _) = setup_e2e_app().await;
    let (alice_id, alice_token) = sign_up_and_in(&app, "alice").await;
    let (bob_id, bob_token) = sign_up_and_in(&app, "bob").await;

    let (status, _) = send(
        &app,
        "POST",
        "/messages",
        Some(&alice_token),
        Some(json!({ "receiver_id": bob_id, "text": "Is breakfast included?" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, inbox) = send(&app, "GET", "/messages/inbox", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox[0]["sender_id"], json!(alice_id));

    let (status, conversation) = send(
        &app,
        "GET",
        &format!("/messages/with/{alice_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(conversation.as_array().unwrap().len(), 1);
}

// ============================================================================
// E2Eテスト: 異常系
// ============================================================================

#[tokio::test]
async fn test_e2e_requires_authentication() {
    let (app, _, _) = setup_e2e_app().await;

    let (status, error) = send(&app, "GET", "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], json!("UNAUTHENTICATED"));

    let (status, _) = send(&app, "GET", "/auth/me", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_e2e_sign_out_revokes_token() {
    let (app, _, _) = setup_e2e_app().await;
    let (_, token) = sign_up_and_in(&app, "alice").await;

    let (status, me) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], json!("alice"));

    let (status, _) = send(&app, "POST", "/auth/sign-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_e2e_error_mapping() {
    let (app, _, admin_token) = setup_e2e_app().await;
    let (_, alice_token) = sign_up_and_in(&app, "alice").await;

    // 重複登録は409
    let (status, error) = send(
        &app,
        "POST",
        "/auth/sign-up",
        None,
        Some(json!({ "email": "alice@example.com", "password": "pw", "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], json!("DUPLICATE_EMAIL"));

    // パスワード不一致は401
    let (status, error) = send(
        &app,
        "POST",
        "/auth/sign-in",
        None,
        Some(json!({ "email": "alice@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], json!("INVALID_CREDENTIALS"));

    // 一般利用者のホテル登録は403
    let (status, error) = send(
        &app,
        "POST",
        "/hotels",
        Some(&alice_token),
        Some(json!({ "name": "H1", "location": "Fes", "price": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], json!("UNAUTHORIZED"));

    // 範囲外の評価は422
    let (status, error) = send(
        &app,
        "POST",
        "/hotels",
        Some(&admin_token),
        Some(json!({ "name": "H1", "location": "Fes", "price": 10.0, "rating": 9.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], json!("INVALID_ARGUMENT"));

    // 存在しないホテルは404
    let (status, error) = send(
        &app,
        "GET",
        &format!("/hotels/{}", uuid::Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_e2e_malformed_requests_use_error_body() {
    let (app, _, admin_token) = setup_e2e_app().await;
    let (_, alice_token) = sign_up_and_in(&app, "alice").await;

    let (_, hotel) = send(
        &app,
        "POST",
        "/hotels",
        Some(&admin_token),
        Some(json!({ "name": "H1", "location": "Fes", "price": 10.0 })),
    )
    .await;
    let hotel_id = hotel["hotel_id"].as_str().unwrap().to_string();

    // 整数でない評価はボディとして解釈できない
    let (status, error) = send(
        &app,
        "POST",
        &format!("/hotels/{hotel_id}/reviews"),
        Some(&alice_token),
        Some(json!({ "rating": 4.5, "comment": "ok" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], json!("INVALID_REQUEST"));
    assert!(error["message"].as_str().is_some());

    // UUIDでないパス
    let (status, error) = send(&app, "GET", "/hotels/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], json!("INVALID_REQUEST"));

    // 日付として読めないクエリ
    let (status, error) = send(
        &app,
        "GET",
        &format!("/hotels/{hotel_id}/quote?check_in=soon&check_out=2024-06-03"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], json!("INVALID_REQUEST"));
}

#[tokio::test]
async fn test_e2e_overflowing_quote_is_not_booked_for_free() {
    let (app, deps, admin_token) = setup_e2e_app().await;
    let (alice_id, alice_token) = sign_up_and_in(&app, "alice").await;

    let (status, hotel) = send(
        &app,
        "POST",
        "/hotels",
        Some(&admin_token),
        Some(json!({ "name": "Palace", "location": "Fes", "price": f64::MAX * 0.75 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hotel_id = hotel["hotel_id"].as_str().unwrap().to_string();

    let (status, error) = send(
        &app,
        "POST",
        "/bookings",
        Some(&alice_token),
        Some(json!({
            "hotel_id": hotel_id,
            "check_in": "2024-06-01",
            "check_out": "2024-06-03"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], json!("INVALID_ARGUMENT"));

    let user_id = hotel_booking_ddd::domain::UserId::from_uuid(alice_id.parse().unwrap());
    assert!(
        hotel_booking_ddd::application::booking_manager::get_user_bookings(&deps, user_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_e2e_profile_update_cannot_grant_admin() {
    let (app, _, _) = setup_e2e_app().await;
    let (alice_id, alice_token) = sign_up_and_in(&app, "alice").await;

    let uri = format!("/users/{alice_id}");
    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(&alice_token),
        Some(json!({ "is_admin": true })),
    )
    .await;
    assert!(status.is_client_error());

    let (status, user) = send(
        &app,
        "PATCH",
        &uri,
        Some(&alice_token),
        Some(json!({ "username": "alice.b" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], json!("alice.b"));
    assert_eq!(user["is_admin"], json!(false));
}

#[tokio::test]
async fn test_e2e_users_cannot_touch_each_other() {
    let (app, _, admin_token) = setup_e2e_app().await;
    let (alice_id, _) = sign_up_and_in(&app, "alice").await;
    let (_, bob_token) = sign_up_and_in(&app, "bob").await;

    let (status, _) = send(
        &app,
        "GET",
        &format!("/users/{alice_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/users", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, users) = send(&app, "GET", "/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 3);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/users/{alice_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
