//! Shared fixture for HTTP integration tests.
//!
//! Builds the full `/api` router over in-memory adapters, a recording mail
//! transport and a mock session validator with two users:
//! `admin-token` (admin-1, admin) and `user-token` (user-1, no profile).

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use quillhouse::adapters::auth::MockSessionValidator;
use quillhouse::adapters::http::{api_router, with_http_layers, AppPorts, AppSettings};
use quillhouse::adapters::mail::MockMailTransport;
use quillhouse::adapters::memory::{
    InMemoryEmailStatRepository, InMemoryLoginAttemptRepository, InMemoryPostRepository,
    InMemoryProfileRepository, InMemorySubscriberRepository,
};
use quillhouse::config::ServerConfig;
use quillhouse::domain::foundation::{EmailAddress, PostId};
use quillhouse::domain::login::ThrottlePolicy;
use quillhouse::domain::newsletter::{LinkSigner, NewsletterPost, Subscriber, TrackingLinks};
use quillhouse::ports::SubscriberRepository;

pub const SITE_URL: &str = "https://blog.example.com";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestApp {
    pub router: Router,
    pub login_attempts: Arc<InMemoryLoginAttemptRepository>,
    pub subscribers: Arc<InMemorySubscriberRepository>,
    pub stats: Arc<InMemoryEmailStatRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub mail: Arc<MockMailTransport>,
    pub links: TrackingLinks,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_mail(MockMailTransport::new()).await
    }

    pub async fn with_mail(mail: MockMailTransport) -> Self {
        Self::build(mail, Duration::ZERO, None).await
    }

    /// Same fixture behind the production tower-http stack and the
    /// configured request timeout.
    pub async fn layered(server: &ServerConfig, send_delay: Duration) -> Self {
        Self::build(MockMailTransport::new(), send_delay, Some(server)).await
    }

    async fn build(
        mail: MockMailTransport,
        send_delay: Duration,
        server: Option<&ServerConfig>,
    ) -> Self {
        let login_attempts = Arc::new(InMemoryLoginAttemptRepository::new());
        let subscribers = Arc::new(InMemorySubscriberRepository::new());
        let stats = Arc::new(InMemoryEmailStatRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let mail = Arc::new(mail);

        profiles.add_admin("admin-1").await;

        let validator = MockSessionValidator::new()
            .with_test_user(ADMIN_TOKEN, "admin-1")
            .with_test_user(USER_TOKEN, "user-1");

        let links = TrackingLinks::new(SITE_URL, LinkSigner::new("integration-test-secret"));

        let router = api_router(
            AppPorts {
                login_attempts: login_attempts.clone(),
                subscribers: subscribers.clone(),
                email_stats: stats.clone(),
                posts: posts.clone(),
                profiles: profiles.clone(),
                mail: mail.clone(),
                session_validator: Arc::new(validator),
            },
            AppSettings {
                throttle: ThrottlePolicy::default(),
                links: links.clone(),
                send_delay,
                request_timeout: server.map(ServerConfig::request_timeout),
            },
        );
        let router = match server {
            Some(server) => with_http_layers(router, server),
            None => router,
        };

        Self {
            router,
            login_attempts,
            subscribers,
            stats,
            posts,
            profiles,
            mail,
            links,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Inserts a subscribed reader directly through the repository.
    pub async fn add_subscriber(&self, email: &str) -> Subscriber {
        let subscriber = Subscriber::new(EmailAddress::parse(email).unwrap());
        self.subscribers.insert(&subscriber).await.unwrap();
        subscriber
    }

    pub async fn add_post(&self, published: bool) -> NewsletterPost {
        let post = NewsletterPost {
            id: PostId::new(),
            title: "Autumn notes".to_string(),
            slug: "autumn-notes".to_string(),
            excerpt: Some("Leaves and light".to_string()),
            content: "Some **markdown** body.".to_string(),
            is_published: published,
            email_sent: false,
            email_sent_at: None,
        };
        self.posts.add(post.clone()).await;
        post
    }
}
