//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

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
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_me_requires_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_rejects_garbage_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_auth("/api/v1/auth/me", "not.a.token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_returns_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let account = create_account(&server).await.unwrap();

    let response = server
        .get_auth("/api/v1/auth/me", &account.token)
        .await
        .unwrap();
    let profile: UserProfileBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.id, account.user.id.to_string());
    assert_eq!(profile.github_username, account.user.github_username);
    assert!(!profile.is_admin);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/api/v1/auth/logout", &()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Set-Cookie header")
        .to_string();
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(set_cookie.starts_with(server.cookie_name()));

    let body: MessageBody = response.json().await.unwrap();
    assert_eq!(body.message, "Successfully logged out");
}

#[tokio::test]
async fn test_github_login_redirects_to_github() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/auth/github").await.unwrap();
    assert!(response.status().is_redirection());

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert!(location.starts_with("https://github.com/login/oauth/authorize"));
    assert!(location.contains("client_id="));
    assert!(location.contains("state="));
}

#[tokio::test]
async fn test_callback_with_invalid_state_redirects_to_frontend() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/auth/github/callback?code=abc&state=bogus")
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert!(location.contains("error=oauth_failed"));
    assert!(location.contains("reason=invalid_state"));
}

// ============================================================================
// Survey Administration Tests
// ============================================================================

#[tokio::test]
async fn test_create_survey_requires_admin() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let account = create_account(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &account.token, &request)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "ADMIN_REQUIRED");
}

#[tokio::test]
async fn test_create_survey() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(survey.title, request.title);
    assert_eq!(survey.slug, request.title.to_lowercase().replace(' ', "-"));
    assert_eq!(survey.created_by, admin.user.id.to_string());
    assert_eq!(survey.config, request.config);
}

#[tokio::test]
async fn test_create_survey_rejects_non_object_config() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let body = json!({"title": "Bad Config", "config": [1, 2, 3]});
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_titles_get_suffixed_slugs() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let first: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Same title again: the slug gets a numeric suffix
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let second: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(second.slug, format!("{}-1", first.slug));
}

#[tokio::test]
async fn test_update_survey_patches_only_sent_fields() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let created: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Title changes, slug does not
    let patch = json!({"title": "Renamed Poll"});
    let response = server
        .patch_auth(&format!("/api/v1/surveys/{}", created.id), &admin.token, &patch)
        .await
        .unwrap();
    let updated: SurveyBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed Poll");
    assert_eq!(updated.slug, created.slug);
    assert_eq!(updated.description, created.description);

    // Explicit null clears the description
    let patch = json!({"description": null});
    let response = server
        .patch_auth(&format!("/api/v1/surveys/{}", created.id), &admin.token, &patch)
        .await
        .unwrap();
    let updated: SurveyBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.description, None);

    // Title cannot be nulled
    let patch = json!({"title": null});
    let response = server
        .patch_auth(&format!("/api/v1/surveys/{}", created.id), &admin.token, &patch)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_delete_survey() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/surveys/{}", survey.id), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Gone from the owner's view
    let response = server
        .get_auth(&format!("/api/v1/surveys/{}", survey.id), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // And from the public view
    let response = server
        .get(&format!("/api/v1/surveys/{}/public", survey.slug))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_survey_hidden_from_other_admin() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = create_admin(&server).await.unwrap();
    let stranger = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &owner.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/surveys/{}", survey.id), &stranger.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_get_unknown_survey() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/surveys/{}", Uuid::new_v4()), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_survey() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let mut request = CreateSurveyRequest::unique();
    request.closes_at = Some("2030-01-01T00:00:00Z".to_string());
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let original: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/surveys/{}/duplicate", original.id),
            &admin.token,
            &(),
        )
        .await
        .unwrap();
    let copy: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(copy.title, format!("{} (Copy)", original.title));
    assert_ne!(copy.slug, original.slug);
    assert_eq!(copy.config, original.config);
    // The copy starts with a cleared open window
    assert_eq!(copy.opens_at, None);
    assert_eq!(copy.closes_at, None);
}

// ============================================================================
// Respondent Tests
// ============================================================================

#[tokio::test]
async fn test_public_survey_view() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // No session required
    let response = server
        .get(&format!("/api/v1/surveys/{}/public", survey.slug))
        .await
        .unwrap();
    let public: PublicSurveyBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(public.slug, survey.slug);
    assert_eq!(public.title, survey.title);
    assert!(public.is_open);
}

#[tokio::test]
async fn test_respond_requires_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post(
            &format!("/api/v1/surveys/{}/respond", survey.slug),
            &SubmitResponseRequest::draft(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_respond_draft_then_submit() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();
    let respondent = create_account(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let respond_path = format!("/api/v1/surveys/{}/respond", survey.slug);

    // Draft save
    let response = server
        .post_auth(&respond_path, &respondent.token, &SubmitResponseRequest::draft())
        .await
        .unwrap();
    let draft: ResponseRecordBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(draft.is_draft);
    assert_eq!(draft.submitted_at, None);

    // The draft reads back
    let response = server
        .get_auth(
            &format!("/api/v1/surveys/{}/my-response", survey.slug),
            &respondent.token,
        )
        .await
        .unwrap();
    let mine: MyResponseBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(mine.is_draft);
    assert_eq!(mine.answers, draft.answers);

    // Final submission overwrites the draft in place
    let response = server
        .post_auth(&respond_path, &respondent.token, &SubmitResponseRequest::finished())
        .await
        .unwrap();
    let submitted: ResponseRecordBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(submitted.id, draft.id);
    assert!(!submitted.is_draft);
    assert!(submitted.submitted_at.is_some());

    // A submitted response is immutable
    let response = server
        .post_auth(&respond_path, &respondent.token, &SubmitResponseRequest::draft())
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "RESPONSE_ALREADY_SUBMITTED");
}

#[tokio::test]
async fn test_respond_to_closed_survey() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();
    let respondent = create_account(&server).await.unwrap();

    let request = CreateSurveyRequest::closed();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/surveys/{}/respond", survey.slug),
            &respondent.token,
            &SubmitResponseRequest::finished(),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "SURVEY_CLOSED");
}

#[tokio::test]
async fn test_my_response_before_saving() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();
    let respondent = create_account(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/surveys/{}/my-response", survey.slug),
            &respondent.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Response Review and Export Tests
// ============================================================================

#[tokio::test]
async fn test_admin_lists_responses() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();
    let respondent = create_account(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth(
            &format!("/api/v1/surveys/{}/respond", survey.slug),
            &respondent.token,
            &SubmitResponseRequest::finished(),
        )
        .await
        .unwrap();

    let response = server
        .get_auth(&format!("/api/v1/surveys/{}/responses", survey.id), &admin.token)
        .await
        .unwrap();
    let responses: Vec<ResponseListItemBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].github_username, respondent.user.github_username);
    assert!(!responses[0].is_draft);

    // The dashboard listing carries the count
    let response = server.get_auth("/api/v1/surveys", &admin.token).await.unwrap();
    let surveys: Vec<SurveyListItemBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = surveys.iter().find(|s| s.id == survey.id).unwrap();
    assert_eq!(entry.response_count, 1);
}

#[tokio::test]
async fn test_export_csv() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();
    let respondent = create_account(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth(
            &format!("/api/v1/surveys/{}/respond", survey.slug),
            &respondent.token,
            &SubmitResponseRequest::finished(),
        )
        .await
        .unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/surveys/{}/export?format=csv", survey.id),
            &admin.token,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv"
    );
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.contains(&format!("{}-responses.csv", survey.slug)));

    let body = response.text().await.unwrap();
    let header = body.lines().next().unwrap();
    assert!(header.starts_with("id,user_id,github_username,is_draft,submitted_at,created_at"));
    assert_eq!(body.lines().count(), 2);
}

#[tokio::test]
async fn test_export_json_is_default() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/surveys/{}/export", survey.id), &admin.token)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let rows: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_export_rejects_unknown_format() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = create_admin(&server).await.unwrap();

    let request = CreateSurveyRequest::unique();
    let response = server
        .post_auth("/api/v1/surveys", &admin.token, &request)
        .await
        .unwrap();
    let survey: SurveyBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/surveys/{}/export?format=xml", survey.id),
            &admin.token,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_EXPORT_FORMAT");
}
