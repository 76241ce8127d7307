use sampan_api::Configuration;

/// Helper for testing against the auth backend using wiremock.
///
/// Warning: when using `Mock::expect` ensure the returned server is kept alive
/// until the test completes, otherwise the expectation is never verified.
pub async fn start_api_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, Configuration) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let config = Configuration {
        base_path: server.uri(),
        user_agent: Some("test-agent".to_string()),
        client: reqwest::Client::new(),
        access_token: None,
    };

    (server, config)
}
