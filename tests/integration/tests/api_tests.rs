//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (DATABASE_URL)
//! - Optionally Redis (REDIS_URL); without it the activity log runs durable-only
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error_code, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
    SEED_PASSWORD,
};
use ratecard_core::UserRole;
use reqwest::StatusCode;
use serde_json::json;

async fn create_port(server: &TestServer, token: &str) -> PortBody {
    let response = server
        .post_auth("/ports", token, &CreatePortBody::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_line(server: &TestServer, token: &str) -> ShippingLineBody {
    let response = server
        .post_auth("/shipping-lines", token, &CreateShippingLineBody::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_reports_database() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_and_me() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.seed_user(UserRole::Admin).await.unwrap();

    let response = server
        .post(
            "/auth/login",
            &LoginBody {
                email: user.email.to_uppercase(),
                password: SEED_PASSWORD.to_string(),
            },
        )
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.token_type, "Bearer");
    assert_eq!(login.user.id, user.id.to_string());
    assert_eq!(login.user.role, "admin");

    let response = server.get_auth("/auth/me", &login.access_token).await.unwrap();
    let me: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, user.email);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.seed_user(UserRole::User).await.unwrap();

    let response = server
        .post(
            "/auth/login",
            &LoginBody {
                email: user.email,
                password: "wrong-password".to_string(),
            },
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users").await.unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/users", "not-a-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.login_as(UserRole::User).await.unwrap();

    let response = server
        .post_auth("/ports", &token, &CreatePortBody::unique())
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ADMIN_REQUIRED");
}

// ============================================================================
// Reference Data Tests
// ============================================================================

#[tokio::test]
async fn test_port_create_search_and_conflict() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let body = CreatePortBody::unique();
    let response = server.post_auth("/ports", &token, &body).await.unwrap();
    let port: PortBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(port.port_code, body.port_code);

    // search is public
    let response = server
        .get(&format!("/ports/search?term={}", body.port_name.replace(' ', "%20")))
        .await
        .unwrap();
    let hits: Vec<SearchHit> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(hits.iter().any(|h| h.id == port.id));

    let response = server.post_auth("/ports", &token, &body).await.unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "PORT_CODE_EXISTS");

    let response = server
        .delete_auth(&format!("/ports/{}", port.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_unknown_port_id_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let response = server.get_auth("/ports/1", &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/ports/not-an-id", &token).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Rate Tests
// ============================================================================

#[tokio::test]
async fn test_rate_matrix_is_searchable() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let line = create_line(&server, &token).await;
    let pol_a = create_port(&server, &token).await;
    let pol_b = create_port(&server, &token).await;
    let pod = create_port(&server, &token).await;

    let body = create_rates_body(
        &line.id,
        &[&pol_a.id, &pol_b.id],
        &[&pod.id],
        json!([{"type": "20GP", "base_rate": "3000", "baf": 200}]),
    );
    let response = server.post_auth("/rates", &token, &body).await.unwrap();
    let created: CreateRatesResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.status, "success");
    assert_eq!(created.count, 2);

    let response = server
        .get(&format!(
            "/rates/search?pol_code={}&pod_code={}",
            pol_a.port_code.to_lowercase(),
            pod.port_code
        ))
        .await
        .unwrap();
    let result: RateSearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.data.len(), 1);

    let row = &result.data[0];
    assert_eq!(row["shipping_line"], line.name.as_str());
    assert_eq!(row["container_rates"][0]["total_cost"], 3200.0);
    assert_eq!(row["notes"].as_array().map(Vec::len), Some(1));
    // public rows carry no admin reference ids
    assert!(row.get("pol_id").is_none());

    let rate_id = &created.ids[0];
    let response = server
        .get_auth(&format!("/rates/{rate_id}/history"), &token)
        .await
        .unwrap();
    let history: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_search_with_unknown_code_is_empty() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/rates/search?pol_code=MUNX&pod_code=SGSIN")
        .await
        .unwrap();
    let result: RateSearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.status, "success");
    assert!(result.data.is_empty());
    assert!(result.message.is_some());
}

#[tokio::test]
async fn test_rate_update_and_delete() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let line = create_line(&server, &token).await;
    let pol = create_port(&server, &token).await;
    let pod = create_port(&server, &token).await;
    let body = create_rates_body(&line.id, &[&pol.id], &[&pod.id], json!([{"type": "40HC", "rate": 2400}]));
    let response = server.post_auth("/rates", &token, &body).await.unwrap();
    let created: CreateRatesResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let rate_id = &created.ids[0];

    let response = server
        .put_auth(
            &format!("/rates/{rate_id}"),
            &token,
            &json!({"container_rates": [{"type": "40HC", "rate": 2600}]}),
        )
        .await
        .unwrap();
    let updated: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["container_rates"][0]["total_cost"], 2600.0);

    let response = server
        .delete_auth(&format!("/rates/{rate_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/rates/{rate_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // history survives the rate
    let response = server
        .get_auth(&format!("/rates/{rate_id}/history"), &token)
        .await
        .unwrap();
    let history: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 2);
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_dashboard_stats_and_recent_activity() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let port = create_port(&server, &token).await;

    let response = server.get_auth("/dashboard/stats", &token).await.unwrap();
    let stats: DashboardStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(stats.total_users >= 1);
    assert!(stats.total_ports >= 1);
    assert!(stats.total_shipping_lines >= 0);
    assert!(stats.total_rates >= 0);

    let response = server
        .get_auth("/dashboard/recent-activity?limit=50", &token)
        .await
        .unwrap();
    let recent: Vec<ActivityBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(recent
        .iter()
        .any(|a| a.activity_type == "port_created" && a.description.contains(&port.port_name)));

    let response = server
        .get_auth("/dashboard/historical-activity?start_date=yesterday", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
