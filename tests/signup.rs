//! Signup flow against a real database: a valid submission creates the
//! user and establishes a session, a duplicate email is rejected without
//! writing a second row, and an invalid submission writes nothing.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sqlx::PgPool;
use tower::ServiceExt;

use feira_back::{
    app::AppState,
    config::{AuthConfig, BlobConfig, Environment},
    routes,
    services::BlobStore,
};

fn test_app(pool: PgPool) -> Router {
    std::env::set_var("JWT_SECRET", "signup-test-secret");

    let auth = AuthConfig {
        environment: Environment::Development,
        base_url: "http://localhost:3000".to_string(),
    };

    let s3 = aws_sdk_s3::Client::from_conf(
        aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .credentials_provider(aws_sdk_s3::config::Credentials::new(
                "test", "test", None, None, "test",
            ))
            .build(),
    );
    let blob = BlobStore::new(
        s3,
        &BlobConfig {
            bucket: "test".to_string(),
            public_base_url: "https://img.example".to_string(),
        },
    );

    routes::create_router(auth.clone()).with_state(AppState {
        db: pool,
        blob,
        auth,
    })
}

fn signup_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users/signup")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn user_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

const ANA: &str = "email=ana%40example.com&password=hunter22\
                   &display_name=ana&first_name=Ana&last_name=Silva";

#[sqlx::test]
async fn valid_signup_creates_user_and_session(pool: PgPool) {
    let response = test_app(pool.clone())
        .oneshot(signup_request(ANA))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/users/"));
    assert!(location.ends_with("/success"));

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("authjs.session-token="));

    assert_eq!(user_count(&pool).await, 1);

    // The stored credential is a hash, never the submitted password.
    let credential: Option<String> =
        sqlx::query_scalar("SELECT credential FROM users WHERE email = $1")
            .bind("ana@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    let credential = credential.unwrap();
    assert_ne!(credential, "hunter22");
    assert!(bcrypt::verify("hunter22", &credential).unwrap());
}

#[sqlx::test]
async fn duplicate_email_is_rejected_without_a_write(pool: PgPool) {
    let app = test_app(pool.clone());

    let first = app.clone().oneshot(signup_request(ANA)).await.unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    // Same email, otherwise valid fields.
    let second = app
        .oneshot(signup_request(
            "email=ana%40example.com&password=hunter22\
             &display_name=other&first_name=Other&last_name=Person",
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(second).await;
    assert_eq!(body["errors"]["email"][0], "That email is already in use");
    assert_eq!(body["form_data"]["display_name"], "other");

    assert_eq!(user_count(&pool).await, 1);
}

#[sqlx::test]
async fn invalid_signup_writes_nothing(pool: PgPool) {
    let response = test_app(pool.clone())
        .oneshot(signup_request(
            "email=nope&password=abc&display_name=ana\
             &first_name=Ana&last_name=Silva",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    let errors = body["errors"].as_object().unwrap();
    assert_eq!(
        errors.keys().collect::<Vec<_>>(),
        vec!["email", "password"]
    );
    assert_eq!(body["errors"]["email"][0], "Invalid email address");
    assert_eq!(
        body["errors"]["password"][0],
        "Password must be at least 6 characters"
    );

    assert_eq!(user_count(&pool).await, 0);
}
