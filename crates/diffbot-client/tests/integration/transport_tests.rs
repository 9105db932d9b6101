use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use diffbot_client::{ReqwestTransport, TracingInstrumentor};
use diffbot_core::testutil::RecordingInstrumentor;
use diffbot_core::{AppError, ArticleParams, Config, Diffbot, FrontpageParams};

use crate::integration::common::{PAGE, TEST_TOKEN, setup_test_app, setup_with_timeout};

#[tokio::test]
async fn article_fetch_sends_token_url_and_defaults() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .and(path("/api/article"))
        .and(query_param("token", TEST_TOKEN))
        .and(query_param("url", PAGE))
        .and(query_param("maxTags", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"title": "Example", "tags": ["a"]})),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app.diffbot.article().fetch(PAGE, None).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Example");
}

#[tokio::test]
async fn per_call_options_override_defaults() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .and(path("/api/article"))
        .and(query_param("maxTags", "3"))
        .and(query_param("comments", "1"))
        .and(query_param_is_missing("tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&app.server)
        .await;

    let options = ArticleParams::new()
        .with_max_tags(3)
        .with_comments(true)
        .with_tags(false);
    let response = app
        .diffbot
        .article()
        .fetch(PAGE, Some(&options))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn frontpage_fetch_hits_frontpage_endpoint() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .and(path("/api/frontpage"))
        .and(query_param("token", TEST_TOKEN))
        .and(query_param("url", PAGE))
        .and(query_param("format", "json"))
        .and(query_param_is_missing("maxTags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\":[]}"))
        .expect(1)
        .mount(&app.server)
        .await;

    let options = FrontpageParams::new().with_format("json");
    let response = app
        .diffbot
        .frontpage()
        .fetch(PAGE, Some(&options))
        .await
        .unwrap();

    assert_eq!(response.text().await.unwrap(), "{\"items\":[]}");
}

#[tokio::test]
async fn upstream_error_is_a_normal_response() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .and(path("/api/article"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "Not authorized API token."})),
        )
        .mount(&app.server)
        .await;

    let response = app.diffbot.article().fetch(PAGE, None).await.unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn fetch_with_adds_headers() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .and(path("/api/article"))
        .and(header("x-trace-id", "abc"))
        .and(query_param("token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app
        .diffbot
        .article()
        .fetch_with(PAGE, None, |request| {
            request
                .headers
                .insert("X-Trace-Id".to_string(), "abc".to_string());
            request.insert_query("token", "spoofed");
        })
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_mode_never_reaches_the_network() {
    let mut app = setup_test_app().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    app.diffbot.config_mut().set_test_mode(true);

    let err = app.diffbot.article().fetch(PAGE, None).await.unwrap_err();
    assert!(matches!(err, AppError::StubNotFound(_)));

    let err = app.diffbot.frontpage().fetch(PAGE, None).await.unwrap_err();
    assert!(matches!(err, AppError::StubNotFound(_)));
}

#[tokio::test]
async fn instrumentation_events_wrap_the_request() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&app.server)
        .await;

    app.diffbot.article().fetch(PAGE, None).await.unwrap();

    let events = app.events.events();
    let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["diffbot.request", "diffbot.response"]);
    assert_eq!(events[0].1["method"], "GET");
    assert_eq!(events[1].1["status"], 204);
    assert!(!events[0].1.to_string().contains(TEST_TOKEN));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let app = setup_with_timeout(Duration::from_secs(1)).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&app.server)
        .await;

    let err = app.diffbot.article().fetch(PAGE, None).await.unwrap_err();

    assert!(matches!(err, AppError::Timeout(1)));
    assert_eq!(
        app.events.event_names(),
        vec!["diffbot.request", "diffbot.error"]
    );
}

#[tokio::test]
async fn connection_failure_propagates() {
    let events = RecordingInstrumentor::new();
    let config = Config::builder()
        .token(TEST_TOKEN)
        .base_url("http://127.0.0.1:1/api")
        .instrumentor(Arc::new(events.clone()))
        .build();
    let diffbot = Diffbot::new(config, ReqwestTransport::new().unwrap());

    let err = diffbot.article().fetch(PAGE, None).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::NetworkError(_) | AppError::HttpError(_)
    ));
    assert!(!err.is_usage_error());
    assert_eq!(events.event_names().last().map(String::as_str), Some("diffbot.error"));
}

#[tokio::test]
async fn tracing_instrumentor_does_not_disturb_requests() {
    let app = setup_test_app().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut diffbot = app.diffbot.clone();
    diffbot
        .config_mut()
        .set_instrumentor(Arc::new(TracingInstrumentor::new()));

    let response = diffbot.article().fetch(PAGE, None).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(app.events.events().is_empty());
}
