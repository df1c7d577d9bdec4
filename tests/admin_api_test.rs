mod common;

use axum::http::StatusCode;
use serde_json::json;

use jobboard_backend::routes;

#[tokio::test]
async fn admin_lifecycle_end_to_end() {
    let Some(state) = common::setup_state().await else {
        return;
    };
    common::reset_db(&state).await;
    let app = routes::api_routes(state.clone());

    // Empty table: creation needs no token and the requested role is ignored
    let (status, body) = common::send(
        &app,
        "POST",
        "/admins",
        None,
        Some(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "password": "super-secret-1",
            "role": "standard"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "superadmin");
    assert_eq!(body["status"], "active");
    assert!(body["createdByAdminId"].is_null());
    let first_id = body["id"].as_i64().unwrap();

    // Table no longer empty: unauthenticated creation is rejected
    let (status, body) = common::send(
        &app,
        "POST",
        "/admins",
        None,
        Some(json!({
            "firstName": "Eve",
            "lastName": "Intruder",
            "email": "eve@example.com",
            "password": "super-secret-1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_jwt");

    // Login failures are indistinguishable between unknown email and wrong
    // password
    let (status, body) = common::send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "jane@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Incorrect Email or password");

    let (status, body) = common::send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Incorrect Email or password");

    let (status, body) = common::send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "jane@example.com", "password": "super-secret-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let super_token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["account"]["email"], "jane@example.com");
    assert!(body["account"].get("hashedPassword").is_none());

    // Superadmin creates a standard admin
    let (status, body) = common::send(
        &app,
        "POST",
        "/admins",
        Some(&super_token),
        Some(json!({
            "firstName": "Sam",
            "lastName": "Standard",
            "email": "sam@example.com",
            "password": "super-secret-2",
            "role": "standard"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "standard");
    assert_eq!(body["createdByAdminId"].as_i64(), Some(first_id));
    let second_id = body["id"].as_i64().unwrap();

    // Duplicate email is a conflict
    let (status, body) = common::send(
        &app,
        "POST",
        "/admins",
        Some(&super_token),
        Some(json!({
            "firstName": "Sam",
            "lastName": "Clone",
            "email": "sam@example.com",
            "password": "super-secret-2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "already_exist");

    let (status, body) = common::send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "sam@example.com", "password": "super-secret-2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let standard_token = body["token"].as_str().unwrap().to_string();

    // A standard admin cannot manage accounts
    let (status, _) = common::send(
        &app,
        "POST",
        "/admins",
        Some(&standard_token),
        Some(json!({
            "firstName": "Nope",
            "lastName": "Nope",
            "email": "nope@example.com",
            "password": "super-secret-3"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/admins/{}", first_id),
        Some(&standard_token),
        Some(json!({"firstName": "Hijack"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Listing requires a valid admin token
    let (status, _) = common::send(&app, "GET", "/admins", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = common::send(&app, "GET", "/admins", Some(&standard_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_i64(), Some(2));

    // Superadmin partial update
    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/admins/{}", second_id),
        Some(&super_token),
        Some(json!({"firstName": "Renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Renamed");
    assert_eq!(body["lastName"], "Standard");

    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/admins/{}", second_id),
        Some(&super_token),
        Some(json!({"email": "jane@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Status toggle flips on every call
    let (status, body) = common::send(
        &app,
        "DELETE",
        &format!("/admins/{}", second_id),
        Some(&super_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    // Deleted targets reject updates
    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/admins/{}", second_id),
        Some(&super_token),
        Some(json!({"firstName": "Zombie"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    // Default listing hides deleted accounts; filters expose them
    let (status, body) = common::send(&app, "GET", "/admins", Some(&super_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_i64(), Some(1));

    let (_, body) =
        common::send(&app, "GET", "/admins?status=deleted", Some(&super_token), None).await;
    assert_eq!(body["total"].as_i64(), Some(1));
    assert_eq!(body["data"][0]["id"].as_i64(), Some(second_id));

    let (_, body) = common::send(&app, "GET", "/admins?status=all", Some(&super_token), None).await;
    assert_eq!(body["total"].as_i64(), Some(2));

    let (status, body) = common::send(
        &app,
        "DELETE",
        &format!("/admins/{}", second_id),
        Some(&super_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");

    let (status, body) = common::send(
        &app,
        "DELETE",
        "/admins/999999",
        Some(&super_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    // Garbage tokens never pass the gate
    let (status, body) = common::send(&app, "GET", "/admins", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_jwt");
}
