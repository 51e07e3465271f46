use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use gritboard_api_types::{graphql::GraphQlResponse, queries};
use gritboard_app::{
    AuthError, DashboardConfig, DashboardController, DashboardError, IdentityProvider,
    MemorySessionStore, MountContent, MountPoint, QueryCollaborator, SessionStore, View,
};
use serde_json::{json, Value};

fn fresh_token() -> String {
    let exp = Utc::now().timestamp() + 3600;
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"42","exp":{exp}}}"#))
    )
}

/// Accepts one password and answers with the given body.
struct Identity {
    password: &'static str,
    body: String,
}

#[async_trait]
impl IdentityProvider for Identity {
    async fn sign_in(&self, _username: &str, password: &str) -> Result<String, AuthError> {
        if password == self.password {
            Ok(self.body.clone())
        } else {
            Err(AuthError::Rejected("Signin failed: 401 Invalid credentials".into()))
        }
    }
}

#[derive(Default)]
struct Platform {
    skills_unavailable: bool,
}

#[async_trait]
impl QueryCollaborator for Platform {
    async fn execute(
        &self,
        query: &str,
        _token: &str,
    ) -> Result<GraphQlResponse<Value>, DashboardError> {
        let data = if query == queries::USER_PROFILE {
            json!({"user": [{"id": 42, "login": "student", "firstName": "Sam", "lastName": "Lee"}]})
        } else if query == queries::XP_TRANSACTIONS {
            json!({"transaction": [
                {"amount": 25000, "createdAt": "2024-03-02T10:00:00Z",
                    "path": "/gritlab/school-curriculum/ascii-art"},
                {"amount": 12000, "createdAt": "2024-02-01T10:00:00Z",
                    "path": "/gritlab/school-curriculum/go-reloaded"},
                {"amount": 900, "createdAt": "2024-01-15T10:00:00Z",
                    "path": "/gritlab/school-curriculum/piscine-go/quest-01"}
            ]})
        } else if self.skills_unavailable {
            return Err(DashboardError::Query("upstream unavailable".into()));
        } else {
            json!({"transaction": [{"type": "skill_prog", "amount": 55}]})
        };
        Ok(GraphQlResponse {
            data: Some(data),
            errors: Vec::new(),
        })
    }
}

#[tokio::test]
async fn login_load_logout() {
    let token = fresh_token();
    let mut controller = DashboardController::new(
        MemorySessionStore::default(),
        Identity {
            password: "hunter2",
            body: format!(r#"{{"token": "{token}"}}"#),
        },
        Platform::default(),
        DashboardConfig::default(),
    );

    assert_eq!(controller.on_load().await, View::Login);

    assert!(controller.login("student", "wrong").await.is_err());
    assert_eq!(controller.store().get(), None);
    assert_eq!(controller.page().view(), View::Login);

    controller.login("student", "hunter2").await.unwrap();
    assert_eq!(controller.store().get(), Some(token.clone()));
    {
        let page = controller.page();
        assert_eq!(page.view(), View::Profile);
        assert_eq!(page.get(MountPoint::LoginError), None);
        match page.get(MountPoint::XpChart) {
            Some(MountContent::Chart { html, summary }) => {
                assert!(html.contains("<svg"));
                assert!(html.contains("go-reloaded (+12000 XP)"));
                assert!(!html.contains("quest-01"));
                assert_eq!(summary.as_deref(), Some("Total XP: 37,000"));
            }
            other => panic!("unexpected xp section {other:?}"),
        }
        let html = page.to_html();
        assert!(html.contains("<h2>Name</h2><p>Sam Lee</p>"));
        assert!(html.contains(r#"<section id="login-page" class="hidden">"#));
    }

    controller.logout();
    assert_eq!(controller.store().get(), None);
    assert_eq!(controller.page().view(), View::Login);
    assert_eq!(controller.page().get(MountPoint::XpChart), None);
}

#[tokio::test]
async fn two_segment_token_is_refused() {
    let mut controller = DashboardController::new(
        MemorySessionStore::default(),
        Identity {
            password: "pw",
            body: "\"abc.def\"".into(),
        },
        Platform::default(),
        DashboardConfig::default(),
    );
    let err = controller.login("student", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid JWT format: abc.def");
    assert_eq!(controller.store().get(), None);
    assert_eq!(controller.page().view(), View::Login);
}

#[tokio::test]
async fn stored_session_resumes_and_failures_stay_local() {
    let mut controller = DashboardController::new(
        MemorySessionStore::with_token(fresh_token()),
        Identity {
            password: "pw",
            body: String::new(),
        },
        Platform {
            skills_unavailable: true,
        },
        DashboardConfig::default(),
    );
    assert_eq!(controller.on_load().await, View::Profile);

    let page = controller.page();
    assert!(matches!(
        page.get(MountPoint::ProfileInfo),
        Some(MountContent::Profile(_))
    ));
    assert!(matches!(
        page.get(MountPoint::XpChart),
        Some(MountContent::Chart { .. })
    ));
    assert_eq!(
        page.get(MountPoint::SkillsChart),
        Some(&MountContent::Error(
            "Failed to load skills data: upstream unavailable".into()
        ))
    );
}
