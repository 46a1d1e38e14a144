mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, course_body, course_titles};

#[tokio::test]
async fn test_courses_require_authentication() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/v1/api/courses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "missing_token");

    let (status, _) = app
        .request("POST", "/v1/api/courses", None, Some(course_body("Intro to UX", &["normal"])))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_developers_cannot_write() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    let (_, created) = app.create_course(&dev, course_body("Intro to UX", &["student"])).await;
    let slug = created["course"]["slug"].as_str().unwrap().to_string();

    for role in ["normal", "student", "social_manager"] {
        let token = app.token_for(role).await;

        let (status, body) = app
            .create_course(&token, course_body("Sneaky Course", &["normal"]))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", role);
        assert_eq!(body["error"], "Access denied. Required roles: developer");

        let uri = format!("/v1/api/courses/{}", slug);
        let (status, _) = app
            .request("PATCH", &uri, Some(&token), Some(json!({ "title": "Renamed" })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.request("DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_create_course_returns_created_document() {
    let app = TestApp::new();
    let dev = app.developer_token().await;

    let (status, body) = app
        .create_course(&dev, course_body("Intro to UX", &["student", "normal", "student"]))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let course = &body["course"];
    assert_eq!(course["slug"], "intro-to-ux");
    assert_eq!(course["audience"], json!(["normal", "student"]));
    assert_eq!(course["modules"][0]["classes"][0]["duration"], 20);
    assert!(course["id"].is_string());
}

#[tokio::test]
async fn test_create_course_validation() {
    let app = TestApp::new();
    let dev = app.developer_token().await;

    let (status, _) = app
        .create_course(&dev, json!({ "title": "UX", "description": "Far too short title here" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut empty_audience = course_body("Intro to UX", &[]);
    empty_audience["audience"] = json!([]);
    let (status, _) = app.create_course(&dev, empty_audience).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut long_class = course_body("Intro to UX", &["normal"]);
    long_class["modules"][0]["classes"][0]["duration"] = json!(481);
    let (status, body) = app.create_course(&dev, long_class).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("modules"));

    let (status, _) = app
        .create_course(&dev, course_body("Intro to UX", &["wizard"]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_course_rejects_padded_text() {
    let app = TestApp::new();
    let dev = app.developer_token().await;

    for title in ["      ", "  ab  "] {
        let (status, body) = app
            .create_course(&dev, course_body(title, &["normal"]))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{:?}", title);
        assert!(body["error"].as_str().unwrap().contains("title"));
    }

    let mut blank_description = course_body("Intro to UX", &["normal"]);
    blank_description["description"] = json!("             ");
    let (status, body) = app.create_course(&dev, blank_description).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("description"));

    let (status, body) = app
        .create_course(&dev, course_body("  Intro to UX  ", &["normal"]))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course"]["slug"], "intro-to-ux");

    let (status, _) = app
        .request(
            "PATCH",
            "/v1/api/courses/intro-to-ux",
            Some(&dev),
            Some(json!({ "title": "    " })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_defaults_audience_to_normal() {
    let app = TestApp::new();
    let dev = app.developer_token().await;

    let (status, body) = app
        .create_course(
            &dev,
            json!({ "title": "Open House", "description": "Everyone is welcome to this one" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course"]["audience"], json!(["normal"]));
    assert_eq!(body["course"]["modules"], json!([]));
}

#[tokio::test]
async fn test_list_is_filtered_by_audience() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    app.create_course(&dev, course_body("UX Fundamentals", &["normal", "student", "social_manager", "developer"]))
        .await;
    app.create_course(&dev, course_body("Modern Web Platform", &["student", "developer"]))
        .await;
    app.create_course(&dev, course_body("Brand Storytelling", &["social_manager", "normal"]))
        .await;

    let student = app.token_for("student").await;
    let (status, body) = app.request("GET", "/v1/api/courses", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(course_titles(&body), vec!["UX Fundamentals", "Modern Web Platform"]);
    assert_eq!(body["meta"]["total"], 2);

    let normal = app.token_for("normal").await;
    let (_, body) = app.request("GET", "/v1/api/courses", Some(&normal), None).await;
    assert_eq!(course_titles(&body), vec!["UX Fundamentals", "Brand Storytelling"]);

    // Developers are filtered like everyone else.
    let (_, body) = app.request("GET", "/v1/api/courses", Some(&dev), None).await;
    assert_eq!(course_titles(&body), vec!["UX Fundamentals", "Modern Web Platform"]);
}

#[tokio::test]
async fn test_list_summaries_and_view_options() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    for title in ["Charlie Course", "Alpha Course", "Bravo Course"] {
        app.create_course(&dev, course_body(title, &["developer"])).await;
    }

    let (status, body) = app
        .request("GET", "/v1/api/courses?sort=title&limit=2", Some(&dev), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(course_titles(&body), vec!["Alpha Course", "Bravo Course"]);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["has_more"], true);

    let summary = &body["courses"][0];
    assert_eq!(summary["module_count"], 1);
    assert_eq!(summary["class_count"], 1);
    assert_eq!(summary["total_duration"], 20);
    assert!(summary.get("modules").is_none());

    let (_, body) = app
        .request("GET", "/v1/api/courses?search=bravo", Some(&dev), None)
        .await;
    assert_eq!(course_titles(&body), vec!["Bravo Course"]);

    let (_, body) = app
        .request("GET", "/v1/api/courses?sort=-title&page=2&limit=2", Some(&dev), None)
        .await;
    assert_eq!(course_titles(&body), vec!["Alpha Course"]);
}

#[tokio::test]
async fn test_list_with_huge_paging_values_is_empty() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    app.create_course(&dev, course_body("Intro to UX", &["developer"])).await;

    for query in ["page=9223372036854775807", "offset=9223372036854775807"] {
        let uri = format!("/v1/api/courses?{}", query);
        let (status, body) = app.request("GET", &uri, Some(&dev), None).await;
        assert_eq!(status, StatusCode::OK, "{}", query);
        assert!(course_titles(&body).is_empty());
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["meta"]["has_more"], false);
    }
}

#[tokio::test]
async fn test_get_course_by_slug_and_id() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    let (_, created) = app.create_course(&dev, course_body("Intro to UX", &["student"])).await;
    let id = created["course"]["id"].as_str().unwrap();

    let student = app.token_for("student").await;
    let (status, by_slug) = app
        .request("GET", "/v1/api/courses/intro-to-ux", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, by_id) = app
        .request("GET", &format!("/v1/api/courses/{}", id), Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug, by_id);
    assert_eq!(by_slug["course"]["modules"][0]["title"], "Getting Started");
}

#[tokio::test]
async fn test_hidden_course_looks_missing() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    let (_, created) = app.create_course(&dev, course_body("Dev Secrets", &["developer"])).await;
    let id = created["course"]["id"].as_str().unwrap();

    let student = app.token_for("student").await;
    let hidden_by_slug = app
        .request("GET", "/v1/api/courses/dev-secrets", Some(&student), None)
        .await;
    let hidden_by_id = app
        .request("GET", &format!("/v1/api/courses/{}", id), Some(&student), None)
        .await;
    let missing = app
        .request("GET", "/v1/api/courses/does-not-exist", Some(&student), None)
        .await;

    assert_eq!(missing.0, StatusCode::NOT_FOUND);
    assert_eq!(missing.1["error"], "Course not found or inaccessible");
    assert_eq!(hidden_by_slug, missing);
    assert_eq!(hidden_by_id, missing);
}

#[tokio::test]
async fn test_update_recomputes_slug_only_on_title_change() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    app.create_course(&dev, course_body("Intro to UX", &["normal"])).await;

    let (status, body) = app
        .request(
            "PATCH",
            "/v1/api/courses/intro-to-ux",
            Some(&dev),
            Some(json!({ "description": "A refreshed description for the course" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["slug"], "intro-to-ux");
    assert_eq!(body["course"]["title"], "Intro to UX");

    let (status, body) = app
        .request(
            "PUT",
            "/v1/api/courses/intro-to-ux",
            Some(&dev),
            Some(json!({ "title": "UX in Practice" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["slug"], "ux-in-practice");
    assert_eq!(
        body["course"]["description"],
        "A refreshed description for the course"
    );

    let (status, _) = app
        .request("GET", "/v1/api/courses/intro-to-ux", Some(&dev), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_course() {
    let app = TestApp::new();
    let dev = app.developer_token().await;

    let (status, body) = app
        .request(
            "PATCH",
            "/v1/api/courses/nope",
            Some(&dev),
            Some(json!({ "title": "Whatever Title" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}

#[tokio::test]
async fn test_delete_course_twice() {
    let app = TestApp::new();
    let dev = app.developer_token().await;
    app.create_course(&dev, course_body("Intro to UX", &["normal"])).await;

    let (status, body) = app
        .request("DELETE", "/v1/api/courses/intro-to-ux", Some(&dev), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = app
        .request("DELETE", "/v1/api/courses/intro-to-ux", Some(&dev), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}
