mod common;

use axum::http::StatusCode;
use serde_json::json;

use jobboard_backend::dto::admin_dto::CreateAdminPayload;
use jobboard_backend::routes;
use jobboard_backend::utils::jwt;

#[tokio::test]
async fn position_management_end_to_end() {
    let Some(state) = common::setup_state().await else {
        return;
    };
    common::reset_db(&state).await;
    let app = routes::api_routes(state.clone());

    let admin = state
        .admin_service
        .create_admin(
            CreateAdminPayload {
                first_name: "Root".into(),
                last_name: "Admin".into(),
                email: "root@example.com".into(),
                password: "super-secret-1".into(),
                role: None,
            },
            None,
        )
        .await
        .expect("bootstrap admin");
    let config = jobboard_backend::config::get_config();
    let token = jwt::encode_token(&admin, &config.jwt_secret).expect("token");

    // Creation is admin-gated
    let (status, _) = common::send(
        &app,
        "POST",
        "/positions",
        None,
        Some(json!({
            "title": "Backend Engineer",
            "category": "Engineering",
            "description": "Own the API"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = common::send(
        &app,
        "POST",
        "/positions",
        Some(&token),
        Some(json!({
            "title": "Backend Engineer",
            "category": "Engineering",
            "description": "Own the API"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workType"], "onsite");
    let engineering_id = body["id"].as_i64().unwrap();

    let (status, body) = common::send(
        &app,
        "POST",
        "/positions",
        Some(&token),
        Some(json!({
            "title": "Recruiter",
            "category": "People",
            "workType": "remote",
            "description": "Hire the team"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workType"], "remote");

    let (status, body) = common::send(
        &app,
        "POST",
        "/positions",
        Some(&token),
        Some(json!({
            "title": "Ghost",
            "category": "Nowhere",
            "workType": "astral",
            "description": "Bad work type"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    // Public list: no description on rows, newest first
    let (status, body) = common::send(&app, "GET", "/positions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_i64(), Some(2));
    assert!(body["data"][0].get("description").is_none());

    let (_, body) = common::send(&app, "GET", "/positions?category=Engineering", None, None).await;
    assert_eq!(body["total"].as_i64(), Some(1));
    assert_eq!(body["data"][0]["title"], "Backend Engineer");

    // Public detail includes the description
    let (status, body) = common::send(
        &app,
        "GET",
        &format!("/positions/{}", engineering_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Own the API");

    // Partial update leaves other fields alone
    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/positions/{}", engineering_id),
        Some(&token),
        Some(json!({"title": "Senior Backend Engineer"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Senior Backend Engineer");
    assert_eq!(body["category"], "Engineering");

    let (status, _) = common::send(
        &app,
        "PUT",
        "/positions/999999",
        Some(&token),
        Some(json!({"title": "Nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Soft delete hides the position from every read
    let (status, _) = common::send(
        &app,
        "DELETE",
        &format!("/positions/{}", engineering_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::send(
        &app,
        "GET",
        &format!("/positions/{}", engineering_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = common::send(&app, "GET", "/positions", None, None).await;
    assert_eq!(body["total"].as_i64(), Some(1));

    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/positions/{}", engineering_id),
        Some(&token),
        Some(json!({"title": "Too Late"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send(
        &app,
        "DELETE",
        &format!("/positions/{}", engineering_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
