//! Integration tests for the login strategies and the session lifecycle

use std::sync::Arc;

use sampan_core::{
    Client, ClientSettings, Gender, UserInfoModel,
    auth::{BindPhoneError, LoginError, SendCodeError},
    platform::{PHONE_CONSENT_GRANTED, PhoneConsentEvent, PlatformError, WechatPlatform},
    session::Identity,
};
use sampan_state::{MemoryRepository, repository::Repository};
use sampan_test::{FailingRepository, start_api_mock};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

/// Scripted platform bridge: hands out a fixed login code and either shares
/// the configured profile or declines.
#[derive(Debug)]
struct TestPlatform {
    code: &'static str,
    profile: Option<UserInfoModel>,
}

#[async_trait::async_trait]
impl WechatPlatform for TestPlatform {
    async fn login_code(&self) -> Result<String, PlatformError> {
        Ok(self.code.to_string())
    }

    async fn request_user_profile(&self) -> Result<UserInfoModel, PlatformError> {
        self.profile.clone().ok_or(PlatformError::Declined)
    }
}

fn make_client(mock_server: &MockServer, platform: Arc<dyn WechatPlatform>) -> Client {
    let settings = ClientSettings {
        api_url: mock_server.uri(),
        user_agent: "Sampan Rust-SDK [TEST]".into(),
        ..Default::default()
    };
    Client::new_with_platform(Some(settings), platform)
}

/// [`make_client`] plus a registered in-memory repository, for asserting
/// write-through persistence.
fn make_client_with_storage(
    mock_server: &MockServer,
    platform: Arc<dyn WechatPlatform>,
) -> (Client, Arc<MemoryRepository>) {
    let client = make_client(mock_server, platform);
    let repository = Arc::new(MemoryRepository::default());
    client
        .platform()
        .state()
        .register_client_managed(repository.clone());
    (client, repository)
}

fn silent_platform() -> Arc<TestPlatform> {
    Arc::new(TestPlatform {
        code: "wx-code-1",
        profile: None,
    })
}

fn login_success_body() -> serde_json::Value {
    serde_json::json!({
        "code": 0,
        "message": "ok",
        "data": {
            "token": "token-abc123",
            "userInfo": {
                "avatarUrl": "https://cdn.example.com/a.png",
                "nickName": "River",
                "gender": 1
            }
        }
    })
}

mod silent_login_tests {
    use super::*;

    #[tokio::test]
    async fn silent_login_publishes_and_persists_the_session() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .and(matchers::body_json(serde_json::json!({"code": "wx-code-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()))
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let (client, repository) = make_client_with_storage(&mock_server, silent_platform());

        let identity = client.auth().login_silently().await.unwrap();

        assert_eq!(identity.token.as_deref(), Some("token-abc123"));
        assert_eq!(identity.nick_name, "River");
        assert!(client.session().is_authenticated());

        let record = repository
            .get("userInfo".to_string())
            .await
            .unwrap()
            .expect("session record should be persisted");
        let parsed: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert_eq!(parsed["token"], "token-abc123");
        assert_eq!(parsed["nickName"], "River");

        assert_eq!(
            repository.get("token".to_string()).await.unwrap(),
            Some("token-abc123".to_string())
        );
    }

    #[tokio::test]
    async fn silent_login_without_a_platform_bridge_is_unavailable() {
        let client = Client::new(None);

        let error = client.auth().login_silently().await.unwrap_err();

        assert!(matches!(
            error,
            LoginError::Platform(PlatformError::Unavailable)
        ));
        assert!(client.session().current().is_none());
    }

    #[tokio::test]
    async fn storage_failures_do_not_fail_the_login() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()));
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let client = make_client(&mock_server, silent_platform());
        client
            .platform()
            .state()
            .register_client_managed(Arc::new(FailingRepository));

        let identity = client.auth().login_silently().await.unwrap();

        assert!(identity.is_authenticated());
        assert!(client.session().is_authenticated());
    }
}

mod profile_consent_tests {
    use super::*;

    #[tokio::test]
    async fn profile_consent_login_forwards_the_asserted_profile() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .and(matchers::body_json(serde_json::json!({
                "code": "wx-code-2",
                "userInfo": {
                    "avatarUrl": "https://cdn.example.com/b.png",
                    "nickName": "Shore",
                    "gender": 2
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": {
                    "token": "token-def456",
                    "userInfo": {
                        "avatarUrl": "https://cdn.example.com/b.png",
                        "nickName": "Shore",
                        "gender": 2
                    }
                }
            })))
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let platform = Arc::new(TestPlatform {
            code: "wx-code-2",
            profile: Some(UserInfoModel::new(
                "https://cdn.example.com/b.png".to_string(),
                "Shore".to_string(),
                Gender::Female,
            )),
        });
        let client = make_client(&mock_server, platform);

        let identity = client.auth().login_with_profile_consent().await.unwrap();

        assert_eq!(identity.token.as_deref(), Some("token-def456"));
        assert_eq!(identity.nick_name, "Shore");
        assert_eq!(identity.gender, Gender::Female);
    }

    #[tokio::test]
    async fn declined_consent_leaves_the_session_untouched() {
        let (mock_server, _api_config) = start_api_mock(vec![]).await;

        let client = make_client(&mock_server, silent_platform());

        let error = client.auth().login_with_profile_consent().await.unwrap_err();

        assert!(matches!(
            error,
            LoginError::Platform(PlatformError::Declined)
        ));
        assert!(client.session().current().is_none());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}

mod code_login_tests {
    use super::*;

    #[tokio::test]
    async fn code_login_round_trips_the_credentials() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/code"))
            .and(matchers::body_json(serde_json::json!({
                "username": "13800138000",
                "password": "246810"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()))
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let (client, repository) = make_client_with_storage(&mock_server, silent_platform());

        let identity = client
            .auth()
            .login_with_code("13800138000".to_string(), "246810".to_string())
            .await
            .unwrap();

        assert!(identity.is_authenticated());
        assert!(client.session().is_authenticated());
        assert_eq!(
            repository.get("token".to_string()).await.unwrap(),
            Some("token-abc123".to_string())
        );
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected_locally() {
        let client = Client::new(None);

        let error = client
            .auth()
            .login_with_code(String::new(), "246810".to_string())
            .await
            .unwrap_err();
        assert!(matches!(error, LoginError::MissingCredentials));

        let error = client
            .auth()
            .login_with_code("13800138000".to_string(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(error, LoginError::MissingCredentials));
    }

    #[tokio::test]
    async fn backend_rejection_surfaces_the_business_message() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"code": 40001, "message": "code expired"}),
            ));
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let client = make_client(&mock_server, silent_platform());

        let error = client
            .auth()
            .login_with_code("13800138000".to_string(), "000000".to_string())
            .await
            .unwrap_err();

        match error {
            LoginError::Api(sampan_api::Error::Business { code, message }) => {
                assert_eq!(code, 40001);
                assert_eq!(message, "code expired");
            }
            other => panic!("expected business rejection, got {other:?}"),
        }
        assert!(client.session().current().is_none());
    }
}

mod bind_phone_tests {
    use super::*;

    fn granted_event(code: &str) -> PhoneConsentEvent {
        PhoneConsentEvent {
            err_msg: PHONE_CONSENT_GRANTED.to_string(),
            code: Some(code.to_string()),
        }
    }

    #[tokio::test]
    async fn bind_merges_the_number_and_preserves_the_token() {
        let login_mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()));
        let bind_mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/phone"))
            .and(matchers::header("authorization", "Bearer token-abc123"))
            .and(matchers::body_json(serde_json::json!({"code": "grant"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": {"phoneNumber": "13800138000"}
            })))
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![login_mock, bind_mock]).await;

        let (client, repository) = make_client_with_storage(&mock_server, silent_platform());
        client.auth().login_silently().await.unwrap();

        let merged = client
            .auth()
            .bind_phone_number(granted_event("grant"))
            .await
            .unwrap()
            .expect("granted consent should bind");

        assert_eq!(merged.phone_number.as_deref(), Some("13800138000"));
        assert_eq!(merged.token.as_deref(), Some("token-abc123"));
        assert_eq!(merged.nick_name, "River");
        assert_eq!(client.session().current(), Some(merged));

        let record = repository
            .get("userInfo".to_string())
            .await
            .unwrap()
            .expect("merged record should be persisted");
        let parsed: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert_eq!(parsed["phoneNumber"], "13800138000");
        assert_eq!(parsed["token"], "token-abc123");
    }

    #[tokio::test]
    async fn denied_consent_resolves_to_none_without_any_request() {
        let (mock_server, _api_config) = start_api_mock(vec![]).await;

        let client = make_client(&mock_server, silent_platform());

        let event = PhoneConsentEvent {
            err_msg: "getPhoneNumber:fail user deny".to_string(),
            code: None,
        };
        let bound = client.auth().bind_phone_number(event).await.unwrap();

        assert_eq!(bound, None);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn granted_event_without_a_grant_code_is_rejected() {
        let (mock_server, _api_config) = start_api_mock(vec![]).await;

        let client = make_client(&mock_server, silent_platform());

        let event = PhoneConsentEvent {
            err_msg: PHONE_CONSENT_GRANTED.to_string(),
            code: None,
        };
        let error = client.auth().bind_phone_number(event).await.unwrap_err();

        assert!(matches!(error, BindPhoneError::MissingField(_)));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bind_without_a_session_sends_no_bearer_and_does_not_merge() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/phone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": {"phoneNumber": "13800138000"}
            })));
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let client = make_client(&mock_server, silent_platform());

        let error = client
            .auth()
            .bind_phone_number(granted_event("grant"))
            .await
            .unwrap_err();

        assert!(matches!(error, BindPhoneError::NotAuthenticated(_)));
        assert!(client.session().current().is_none());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }
}

mod logout_tests {
    use super::*;

    #[tokio::test]
    async fn logout_clears_the_session_and_storage_and_is_idempotent() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()));
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let (client, repository) = make_client_with_storage(&mock_server, silent_platform());
        client.auth().login_silently().await.unwrap();

        client.auth().logout().await;

        assert!(client.session().current().is_none());
        assert_eq!(repository.get("userInfo".to_string()).await.unwrap(), None);
        assert_eq!(repository.get("token".to_string()).await.unwrap(), None);

        // A second logout is a no-op.
        client.auth().logout().await;
        assert!(client.session().current().is_none());
    }
}

mod restore_tests {
    use super::*;

    #[tokio::test]
    async fn restore_publishes_the_persisted_record() {
        let (mock_server, _api_config) = start_api_mock(vec![]).await;

        let (client, repository) = make_client_with_storage(&mock_server, silent_platform());
        let record = serde_json::json!({
            "avatarUrl": "https://cdn.example.com/a.png",
            "nickName": "River",
            "gender": 1,
            "phoneNumber": "13800138000",
            "token": "token-abc123"
        });
        repository
            .set("userInfo".to_string(), record.to_string())
            .await
            .unwrap();
        repository
            .set("token".to_string(), "token-abc123".to_string())
            .await
            .unwrap();

        let restored = client
            .auth()
            .restore_session()
            .await
            .expect("record should restore");

        assert_eq!(restored.token.as_deref(), Some("token-abc123"));
        assert_eq!(restored.phone_number.as_deref(), Some("13800138000"));
        assert_eq!(restored.gender, Gender::Male);
        assert_eq!(client.session().current(), Some(restored));
    }

    #[tokio::test]
    async fn tokenless_records_are_discarded() {
        let (mock_server, _api_config) = start_api_mock(vec![]).await;

        let (client, repository) = make_client_with_storage(&mock_server, silent_platform());
        repository
            .set(
                "userInfo".to_string(),
                serde_json::json!({"nickName": "River"}).to_string(),
            )
            .await
            .unwrap();

        assert_eq!(client.auth().restore_session().await, None);
        assert!(client.session().current().is_none());
    }

    #[tokio::test]
    async fn restore_without_a_repository_is_none() {
        let client = Client::new(None);

        assert_eq!(client.auth().restore_session().await, None);
    }
}

mod subscription_tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_login_and_logout() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()));
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let client = make_client(&mock_server, silent_platform());
        let mut receiver = client.session().subscribe();
        assert!(receiver.borrow().is_none());

        client.auth().login_silently().await.unwrap();
        receiver.changed().await.unwrap();
        assert!(
            receiver
                .borrow()
                .as_ref()
                .is_some_and(Identity::is_authenticated)
        );

        client.auth().logout().await;
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_none());
    }
}

mod concurrency_tests {
    use tokio::sync::Semaphore;

    use super::*;

    /// Platform bridge whose `login_code` parks on a semaphore until the test
    /// releases it, keeping a login pinned inside the session guard.
    #[derive(Debug)]
    struct GatedPlatform {
        gate: Arc<Semaphore>,
    }

    #[async_trait::async_trait]
    impl WechatPlatform for GatedPlatform {
        async fn login_code(&self) -> Result<String, PlatformError> {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| PlatformError::Failed(e.to_string()))?;
            Ok("wx-code-1".to_string())
        }

        async fn request_user_profile(&self) -> Result<UserInfoModel, PlatformError> {
            Err(PlatformError::Declined)
        }
    }

    #[tokio::test]
    async fn overlapping_session_operations_run_one_at_a_time() {
        let wx_mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/wx/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body()))
            .expect(1);
        let code_mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": {
                    "token": "token-def456",
                    "userInfo": {"nickName": "River", "gender": 1}
                }
            })))
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![wx_mock, code_mock]).await;

        let gate = Arc::new(Semaphore::new(0));
        let client = make_client(&mock_server, Arc::new(GatedPlatform { gate: gate.clone() }));

        // The silent login takes the session guard, then parks on the gate.
        let silent = tokio::spawn({
            let client = client.clone();
            async move { client.auth().login_silently().await }
        });
        tokio::task::yield_now().await;

        let code_login = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .auth()
                    .login_with_code("13800138000".to_string(), "246810".to_string())
                    .await
            }
        });
        tokio::task::yield_now().await;

        // The code login is queued behind the pinned silent login.
        assert!(!code_login.is_finished());
        assert!(client.session().current().is_none());

        gate.add_permits(1);
        silent.await.unwrap().unwrap();
        let identity = code_login.await.unwrap().unwrap();

        // The operation that entered last is the one left published.
        assert_eq!(identity.token.as_deref(), Some("token-def456"));
        assert_eq!(client.session().current(), Some(identity));

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url.path(), "/auth/wx/login");
        assert_eq!(requests[1].url.path(), "/auth/login/code");
    }
}

mod send_code_tests {
    use super::*;

    #[tokio::test]
    async fn send_code_enters_the_cooldown_and_blocks_a_second_send() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/code"))
            .and(matchers::body_json(
                serde_json::json!({"username": "13800138000"}),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 0})),
            )
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let client = make_client(&mock_server, silent_platform());

        client
            .auth()
            .send_verification_code("13800138000".to_string())
            .await
            .unwrap();

        assert!(client.auth().cooldown_seconds() > 0);
        assert!(*client.auth().subscribe_cooldown().borrow() > 0);

        let error = client
            .auth()
            .send_verification_code("13800138000".to_string())
            .await
            .unwrap_err();
        assert!(matches!(error, SendCodeError::CooldownActive));
    }

    #[tokio::test]
    async fn invalid_numbers_are_rejected_before_any_request() {
        let (mock_server, _api_config) = start_api_mock(vec![]).await;

        let client = make_client(&mock_server, silent_platform());

        let error = client
            .auth()
            .send_verification_code("123".to_string())
            .await
            .unwrap_err();

        assert!(matches!(error, SendCodeError::InvalidPhoneNumber));
        assert_eq!(client.auth().cooldown_seconds(), 0);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_failed_dispatch_releases_the_slot_for_a_retry() {
        let reject = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"code": 42901, "message": "too many requests"}),
            ))
            .up_to_n_times(1)
            .expect(1);
        let accept = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 0})))
            .expect(1);
        let (mock_server, _api_config) = start_api_mock(vec![reject, accept]).await;

        let client = make_client(&mock_server, silent_platform());

        let error = client
            .auth()
            .send_verification_code("13800138000".to_string())
            .await
            .unwrap_err();
        match error {
            SendCodeError::Api(sampan_api::Error::Business { code, message }) => {
                assert_eq!(code, 42901);
                assert_eq!(message, "too many requests");
            }
            other => panic!("expected business rejection, got {other:?}"),
        }
        // No cooldown was consumed by the failure.
        assert_eq!(client.auth().cooldown_seconds(), 0);

        client
            .auth()
            .send_verification_code("13800138000".to_string())
            .await
            .unwrap();
        assert!(client.auth().cooldown_seconds() > 0);
    }

    #[tokio::test]
    async fn logout_stops_a_running_cooldown() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 0})))
            .expect(2);
        let (mock_server, _api_config) = start_api_mock(vec![mock]).await;

        let client = make_client(&mock_server, silent_platform());

        client
            .auth()
            .send_verification_code("13800138000".to_string())
            .await
            .unwrap();
        assert!(client.auth().cooldown_seconds() > 0);

        client.auth().logout().await;
        assert_eq!(client.auth().cooldown_seconds(), 0);

        // The slot reopens immediately.
        client
            .auth()
            .send_verification_code("13800138000".to_string())
            .await
            .unwrap();
        assert!(client.auth().cooldown_seconds() > 0);
    }
}
