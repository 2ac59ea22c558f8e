//! End-to-end tests against the real router and an in-memory database

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use blogctl_server::db::{create_memory_pool, run_migrations, ContactRepo, PostRepo};
use blogctl_server::models::PostDraft;
use blogctl_server::{build_router, AppState, BlogConfig};

const CONFIG: &str = r#"
    [admin]
    username = "admin"
    password = "secret"

    [site]
    posts_per_page = 2
    blog_name = "Test Blog"
"#;

struct TestApp {
    router: Router,
    pool: SqlitePool,
}

impl TestApp {
    async fn new(upload_dir: Option<&Path>) -> Self {
        let mut config = BlogConfig::from_toml(CONFIG).unwrap();
        if let Some(dir) = upload_dir {
            config.uploads.dir = dir.to_path_buf();
        }

        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let state = Arc::new(AppState::new(pool.clone(), config));
        Self {
            router: build_router(state),
            pool,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_owned())).unwrap()).await
    }

    /// Log in and return the `Cookie` header value for later requests.
    async fn login(&self) -> String {
        let response = self.post_form("/dashboard", "uname=admin&pass=secret", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("login should set a session cookie")
    }

    async fn seed(&self, count: usize) {
        let repo = PostRepo::new(&self.pool);
        for i in 0..count {
            let draft = PostDraft {
                title: Some(format!("Post {i}")),
                slug: Some(format!("post-{i}")),
                content: Some(format!("Body {i}")),
                ..Default::default()
            };
            repo.create(&draft, Utc::now()).await.unwrap();
        }
    }
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("blogctl_session=") && pair.len() > "blogctl_session=".len())
        .map(str::to_owned)
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn home_paginates_with_navigation_links() {
    let app = TestApp::new(None).await;
    app.seed(5).await;

    let page = body_json(app.get("/", None).await).await;
    assert_eq!(page["template"], "index.html");
    assert_eq!(page["params"]["blog_name"], "Test Blog");
    assert_eq!(page["context"]["posts"].as_array().unwrap().len(), 2);
    assert_eq!(page["context"]["prev"], "#");
    assert_eq!(page["context"]["next"], "/?page=2");

    let middle = body_json(app.get("/?page=2", None).await).await;
    assert_eq!(middle["context"]["posts"][0]["title"], "Post 2");
    assert_eq!(middle["context"]["prev"], "/?page=1");
    assert_eq!(middle["context"]["next"], "/?page=3");

    let last = body_json(app.get("/?page=3", None).await).await;
    assert_eq!(last["context"]["posts"].as_array().unwrap().len(), 1);
    assert_eq!(last["context"]["prev"], "/?page=2");
    assert_eq!(last["context"]["next"], "#");
}

#[tokio::test]
async fn junk_page_number_falls_back_to_first_page() {
    let app = TestApp::new(None).await;
    app.seed(3).await;

    let page = body_json(app.get("/?page=abc", None).await).await;
    assert_eq!(page["context"]["posts"][0]["title"], "Post 0");
    assert_eq!(page["context"]["prev"], "#");
}

#[tokio::test]
async fn single_page_still_links_to_empty_second_page() {
    let app = TestApp::new(None).await;
    app.seed(1).await;

    let page = body_json(app.get("/", None).await).await;
    assert_eq!(page["context"]["next"], "/?page=2");

    let beyond = body_json(app.get("/?page=2", None).await).await;
    assert!(beyond["context"]["posts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_slug_renders_empty_post_page() {
    let app = TestApp::new(None).await;

    let response = app.get("/post/missing/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await;
    assert_eq!(page["template"], "post.html");
    assert!(page["context"]["post"].is_null());
}

#[tokio::test]
async fn post_url_without_slash_redirects() {
    let app = TestApp::new(None).await;
    app.seed(1).await;

    let response = app.get("/post/post-0", None).await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location(&response), "/post/post-0/");

    let response = app.get("/post/caf%C3%A9?ref=feed", None).await;
    assert_eq!(location(&response), "/post/caf%C3%A9/?ref=feed");

    let page = body_json(app.get("/post/post-0/", None).await).await;
    assert_eq!(page["context"]["post"]["slug"], "post-0");
}

#[tokio::test]
async fn about_page_renders() {
    let app = TestApp::new(None).await;
    let page = body_json(app.get("/about", None).await).await;
    assert_eq!(page["template"], "about.html");
}

#[tokio::test]
async fn archive_uses_five_per_page() {
    let app = TestApp::new(None).await;
    app.seed(7).await;

    let first = body_json(app.get("/posts", None).await).await;
    assert_eq!(first["template"], "allpost.html");
    assert_eq!(first["context"]["posts"].as_array().unwrap().len(), 5);
    assert_eq!(first["context"]["pagination"]["pages"], 2);
    assert_eq!(first["context"]["pagination"]["next_num"], 2);

    let second = body_json(app.get("/posts?page=2", None).await).await;
    assert_eq!(second["context"]["posts"].as_array().unwrap().len(), 2);
    assert_eq!(second["context"]["pagination"]["has_next"], false);
}

#[tokio::test]
async fn wrong_credentials_rerender_login() {
    let app = TestApp::new(None).await;

    let response = app.post_form("/dashboard", "uname=admin&pass=nope", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());

    let page = body_json(response).await;
    assert_eq!(page["template"], "login.html");
    assert_eq!(page["context"]["error"], "Invalid credentials");
}

#[tokio::test]
async fn anonymous_dashboard_shows_login_form() {
    let app = TestApp::new(None).await;

    let page = body_json(app.get("/dashboard", None).await).await;
    assert_eq!(page["template"], "login.html");
    assert!(page["context"]["error"].is_null());

    let forged = body_json(app.get("/dashboard", Some("blogctl_session=forged")).await).await;
    assert_eq!(forged["template"], "login.html");
}

#[tokio::test]
async fn login_grants_dashboard_until_logout() {
    let app = TestApp::new(None).await;
    app.seed(2).await;
    let cookie = app.login().await;

    let page = body_json(app.get("/dashboard", Some(&cookie)).await).await;
    assert_eq!(page["template"], "dashboard.html");
    assert_eq!(page["context"]["posts"].as_array().unwrap().len(), 2);

    let response = app.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let page = body_json(app.get("/dashboard", Some(&cookie)).await).await;
    assert_eq!(page["template"], "login.html");
}

#[tokio::test]
async fn logout_without_session_is_harmless() {
    let app = TestApp::new(None).await;
    let response = app.get("/logout", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn created_post_is_readable_by_slug() {
    let app = TestApp::new(None).await;
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/edit/0",
            "title=Hello&slug=hello&content=World&tline=Greetings&img_file=hello.png",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let page = body_json(app.get("/post/hello/", None).await).await;
    let post = &page["context"]["post"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["content"], "World");
    assert_eq!(post["tagline"], "Greetings");
    assert_eq!(post["img_file"], "hello.png");
}

#[tokio::test]
async fn create_without_title_reports_generic_error() {
    let app = TestApp::new(None).await;
    let cookie = app.login().await;

    let response = app
        .post_form("/edit/0", "slug=oops&content=no-title", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "An error occurred while adding the post.");

    assert!(PostRepo::new(&app.pool).list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_overwrites_and_redirects_to_form() {
    let app = TestApp::new(None).await;
    app.seed(1).await;
    let cookie = app.login().await;
    let id = PostRepo::new(&app.pool).list_all().await.unwrap()[0].id;

    let response = app
        .post_form(
            &format!("/edit/{id}"),
            "title=Renamed&slug=renamed&content=Fresh",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/edit/{id}"));

    let post = PostRepo::new(&app.pool).get(id).await.unwrap().unwrap();
    assert_eq!(post.title, "Renamed");
    assert_eq!(post.tagline, None);

    let form = body_json(app.get(&format!("/edit/{id}"), Some(&cookie)).await).await;
    assert_eq!(form["template"], "edit.html");
    assert_eq!(form["context"]["id"], id);
    assert_eq!(form["context"]["post"]["slug"], "renamed");
}

#[tokio::test]
async fn update_without_title_rolls_back() {
    let app = TestApp::new(None).await;
    app.seed(1).await;
    let cookie = app.login().await;
    let before = PostRepo::new(&app.pool).list_all().await.unwrap().remove(0);

    let response = app
        .post_form(&format!("/edit/{}", before.id), "slug=x&content=y", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "An error occurred while updating the post.");

    let after = PostRepo::new(&app.pool).get(before.id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn update_of_missing_post_says_not_found() {
    let app = TestApp::new(None).await;
    let cookie = app.login().await;

    let response = app
        .post_form("/edit/77", "title=a&slug=a&content=a", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Post not found.");

    let response = app
        .post_form("/edit/not-a-number", "title=a&slug=a&content=a", Some(&cookie))
        .await;
    assert_eq!(body_text(response).await, "Post not found.");
}

#[tokio::test]
async fn new_post_form_is_blank() {
    let app = TestApp::new(None).await;
    let cookie = app.login().await;

    let form = body_json(app.get("/edit/0", Some(&cookie)).await).await;
    assert_eq!(form["context"]["id"], 0);
    assert!(form["context"]["post"].is_null());
}

#[tokio::test]
async fn anonymous_admin_routes_redirect_to_dashboard() {
    let app = TestApp::new(None).await;
    app.seed(1).await;
    let id = PostRepo::new(&app.pool).list_all().await.unwrap()[0].id;

    for response in [
        app.get("/edit/0", None).await,
        app.post_form("/edit/0", "title=x&slug=x&content=x", None).await,
        app.get(&format!("/delete/{id}"), None).await,
        app.post_form("/uploader", "", None).await,
        app.get("/uploader", None).await,
    ] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }

    assert_eq!(PostRepo::new(&app.pool).list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_removes_post_and_ignores_unknown_ids() {
    let app = TestApp::new(None).await;
    app.seed(2).await;
    let cookie = app.login().await;
    let id = PostRepo::new(&app.pool).list_all().await.unwrap()[0].id;

    let response = app.get(&format!("/delete/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(PostRepo::new(&app.pool).list_all().await.unwrap().len(), 1);

    for uri in ["/delete/9999", "/delete/garbage"] {
        let response = app.post_form(uri, "", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }
    assert_eq!(PostRepo::new(&app.pool).list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn contact_submission_is_stored() {
    let app = TestApp::new(None).await;

    let response = app
        .post_form(
            "/contact",
            "name=Ada&email=ada%40example.com&phone=555&message=Hi+there",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await;
    assert_eq!(page["template"], "contact.html");
    assert_eq!(page["context"]["sent"], true);

    let stored = ContactRepo::new(&app.pool).list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "ada@example.com");
    assert_eq!(stored[0].message, "Hi there");
}

#[tokio::test]
async fn incomplete_contact_submission_reports_error() {
    let app = TestApp::new(None).await;

    let response = app.post_form("/contact", "name=Ada", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "An error occurred while sending the message."
    );
}

fn multipart_body(boundary: &str, field: &str, filename: &str, content: &str) -> String {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: image/png\r\n\
         \r\n\
         {content}\r\n\
         --{boundary}--\r\n"
    )
}

async fn upload(app: &TestApp, cookie: &str, field: &str, filename: &str) -> Response<Body> {
    let boundary = "blogctl-test-boundary";
    let request = Request::builder()
        .method("POST")
        .uri("/uploader")
        .header(COOKIE, cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart_body(boundary, field, filename, "fake-png")))
        .unwrap();
    app.send(request).await
}

#[tokio::test]
async fn upload_writes_sanitised_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(Some(dir.path())).await;
    let cookie = app.login().await;

    let response = upload(&app, &cookie, "file1", "../../my photo.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Uploaded successfully!");

    let stored = std::fs::read_to_string(dir.path().join("my_photo.png")).unwrap();
    assert_eq!(stored, "fake-png");
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(Some(dir.path())).await;
    let cookie = app.login().await;

    let response = upload(&app, &cookie, "other", "a.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = upload(&app, &cookie, "file1", "..").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid filename.");
}

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new(None).await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}
