use intake_client::{
    IdentityError, IdentityProvider, ProjectStore, StoreError, SupabaseConfig, SupabaseIdentity,
    SupabaseProjectStore,
};
use mockito::Matcher;
use shared_types::{AnswerSet, AnswerValue, NewProject, ProjectId};

fn new_project() -> NewProject {
    let answers: AnswerSet = [("project_name".to_string(), AnswerValue::from("Bakery"))]
        .into_iter()
        .collect();
    NewProject::submitted("user-1", answers)
}

fn config(server: &mockito::Server) -> SupabaseConfig {
    SupabaseConfig::new(server.url(), "anon-key").with_access_token("user-jwt")
}

#[tokio::test]
async fn test_insert_sends_postgrest_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/projects")
        .match_query(Matcher::UrlEncoded("select".into(), "id".into()))
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer user-jwt")
        .match_header("prefer", "return=representation")
        .match_header("accept", "application/vnd.pgrst.object+json")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "user_id": "user-1",
            "requirements_json": {"project_name": "Bakery"},
            "status": "submitted"
        })))
        .with_status(201)
        .with_body(r#"{"id": 7}"#)
        .create_async()
        .await;

    let store = SupabaseProjectStore::new(config(&server)).unwrap();
    let id = store.insert_project(new_project()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(id, ProjectId::Integer(7));
}

#[tokio::test]
async fn test_insert_decodes_postgrest_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rest/v1/projects")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(
            r#"{"message":"new row violates row-level security policy for table \"projects\"","code":"42501","details":null,"hint":null}"#,
        )
        .create_async()
        .await;

    let store = SupabaseProjectStore::new(config(&server)).unwrap();
    let err = store.insert_project(new_project()).await.unwrap_err();

    match err {
        StoreError::Api {
            status,
            ref message,
            ref code,
            ..
        } => {
            assert_eq!(status, 403);
            assert!(message.contains("row-level security"));
            assert_eq!(code.as_deref(), Some("42501"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_insert_without_id_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rest/v1/projects")
        .match_query(Matcher::Any)
        .with_status(201)
        .with_body("[]")
        .create_async()
        .await;

    let store = SupabaseProjectStore::new(config(&server)).unwrap();
    let err = store.insert_project(new_project()).await.unwrap_err();
    assert!(matches!(err, StoreError::RowCount { count: 0 }));
}

#[tokio::test]
async fn test_current_user() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", "Bearer user-jwt")
        .with_status(200)
        .with_body(r#"{"id":"user-1","email":"ada@example.com","aud":"authenticated"}"#)
        .create_async()
        .await;

    let identity = SupabaseIdentity::new(config(&server)).unwrap();
    let user = identity.current_user().await.unwrap();

    assert_eq!(user.id, "user-1");
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_expired_session_is_not_authenticated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_body(r#"{"code":401,"msg":"invalid JWT: token is expired"}"#)
        .create_async()
        .await;

    let identity = SupabaseIdentity::new(config(&server)).unwrap();
    let err = identity.current_user().await.unwrap_err();

    match err {
        IdentityError::NotAuthenticated { message } => assert!(message.contains("expired")),
        other => panic!("expected NotAuthenticated, got {:?}", other),
    }
}

#[tokio::test]
async fn test_profile_lookup() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "eq.user-1".into()),
            Matcher::UrlEncoded("select".into(), "*".into()),
        ]))
        .match_header("accept", "application/vnd.pgrst.object+json")
        .with_status(200)
        .with_body(r#"{"id":"user-1","full_name":"Ada Lovelace","avatar_url":null,"updated_at":null}"#)
        .create_async()
        .await;

    let identity = SupabaseIdentity::new(config(&server)).unwrap();
    let profile = identity.profile("user-1").await.unwrap().unwrap();
    assert_eq!(profile.display_name(), Some("Ada Lovelace"));
}

#[tokio::test]
async fn test_missing_profile_row_is_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::Any)
        .with_status(406)
        .with_body(
            r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#,
        )
        .create_async()
        .await;

    let identity = SupabaseIdentity::new(config(&server)).unwrap();
    assert_eq!(identity.profile("user-1").await.unwrap(), None);
}

#[tokio::test]
async fn test_other_profile_errors_are_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"message":"relation \"profiles\" does not exist","code":"42P01"}"#)
        .create_async()
        .await;

    let identity = SupabaseIdentity::new(config(&server)).unwrap();
    let err = identity.profile("user-1").await.unwrap_err();
    assert!(matches!(err, IdentityError::Api { status: 500, .. }));
}
