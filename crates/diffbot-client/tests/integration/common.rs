use std::sync::Arc;
use std::time::Duration;

use wiremock::MockServer;

use diffbot_client::{DiffbotClient, ReqwestTransport};
use diffbot_core::testutil::RecordingInstrumentor;
use diffbot_core::{ArticleParams, Config, Diffbot};

pub const TEST_TOKEN: &str = "abc123";
pub const PAGE: &str = "http://example.com/page";

pub struct TestApp {
    pub server: MockServer,
    pub diffbot: DiffbotClient,
    pub events: RecordingInstrumentor,
}

/// Start a mock Diffbot API and a client pointed at it.
///
/// Article defaults carry `max_tags = 10`; every request is instrumented.
pub async fn setup_test_app() -> TestApp {
    setup_with_timeout(Duration::from_secs(5)).await
}

pub async fn setup_with_timeout(timeout: Duration) -> TestApp {
    let server = MockServer::start().await;
    let events = RecordingInstrumentor::new();

    let config = Config::builder()
        .token(TEST_TOKEN)
        .base_url(format!("{}/api", server.uri()))
        .instrumentor(Arc::new(events.clone()))
        .defaults(ArticleParams::new().with_max_tags(10))
        .build();

    let transport = ReqwestTransport::with_timeout(timeout).expect("transport");

    TestApp {
        server,
        diffbot: Diffbot::new(config, transport),
        events,
    }
}
