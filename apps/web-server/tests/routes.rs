//! Route-level tests against a mock database.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult};

use quill_core::ports::SessionService;
use quill_infra::auth::{JwtSessionService, SessionConfig};
use quill_infra::database::entity::{comment, post, user};
use web_server::handlers::configure_routes;
use web_server::middleware::auth::SESSION_COOKIE;
use web_server::state::AppState;

fn sessions() -> Arc<JwtSessionService> {
    Arc::new(JwtSessionService::new(SessionConfig {
        secret: "route-test-secret".to_string(),
        lifetime_hours: 1,
        issuer: "quill-test".to_string(),
    }))
}

fn session_cookie(sessions: &JwtSessionService, name: &str, is_admin: bool) -> Cookie<'static> {
    let token = sessions
        .create_session(uuid::Uuid::new_v4(), name, is_admin)
        .unwrap();
    Cookie::new(SESSION_COOKIE, token)
}

fn post_row(title: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: uuid::Uuid::new_v4(),
        author_id: uuid::Uuid::new_v4(),
        title: title.to_owned(),
        subtitle: "Sub".to_owned(),
        date: "March 04,2024".to_owned(),
        body: "<p>Content</p>".to_owned(),
        img_url: "https://x.com/a.png".to_owned(),
        created_at: now.into(),
    }
}

fn user_row(email: &str) -> user::Model {
    let now = chrono::Utc::now();
    user::Model {
        id: uuid::Uuid::new_v4(),
        name: "Ann".to_owned(),
        email: email.to_owned(),
        password_hash: "$argon2id$placeholder".to_owned(),
        is_admin: false,
        created_at: now.into(),
    }
}

macro_rules! app {
    ($db:expr, $sessions:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::build(Arc::new($db), $sessions)))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn index_lists_all_posts() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_row("Hello")]])
        .into_connection();
    let app = app!(db, sessions());

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("Hello"));
    assert!(html.contains("March 04,2024"));
}

#[actix_web::test]
async fn new_post_without_session_redirects_to_login() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app!(db, sessions());

    let req = test::TestRequest::get().uri("/new_post").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn edit_post_as_non_admin_is_forbidden() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Bob", false);
    let app = app!(db, sessions);

    let req = test::TestRequest::get()
        .uri(&format!("/edit_post/{}", uuid::Uuid::new_v4()))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn delete_as_non_admin_is_forbidden() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Bob", false);
    let app = app!(db, sessions);

    let req = test::TestRequest::get()
        .uri(&format!("/delete/{}/post", uuid::Uuid::new_v4()))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn commenting_on_a_missing_post_is_404_not_a_crash() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Ann", false);
    let app = app!(db, sessions);

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}", uuid::Uuid::new_v4()))
        .cookie(cookie)
        .set_form([("text", "nice post")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn show_post_renders_its_comments() {
    let row = post_row("Hello");
    let post_id = row.id;
    let now = chrono::Utc::now();
    let comment_row = comment::Model {
        id: uuid::Uuid::new_v4(),
        post_id,
        user_id: uuid::Uuid::new_v4(),
        author_name: "Bob".to_owned(),
        text: "great read".to_owned(),
        created_at: now.into(),
    };

    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .append_query_results(vec![vec![comment_row]])
        .into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Ann", false);
    let app = app!(db, sessions);

    let req = test::TestRequest::get()
        .uri(&format!("/post/{post_id}"))
        .cookie(cookie)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("great read"));
    assert!(html.contains("Bob"));
}

#[actix_web::test]
async fn register_with_duplicate_email_redirects_to_login() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_row("ann@example.com")]])
        .into_connection();
    let app = app!(db, sessions());

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("name", "Ann"),
            ("email", "ann@example.com"),
            ("password", "secret1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn first_registered_user_becomes_admin() {
    let mut admin_row = user_row("first@example.com");
    admin_row.is_admin = true;

    let mut count_row = std::collections::BTreeMap::new();
    count_row.insert("num_items", sea_orm::Value::BigInt(Some(0)));

    // No existing account for the email, an empty users table, then the
    // INSERT .. RETURNING row.
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![vec![admin_row]])
            .into_connection(),
    );

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::build(db.clone(), sessions())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("name", "Ann"),
            ("email", "first@example.com"),
            ("password", "secret1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

    drop(resp);
    drop(app);
    let db = Arc::try_unwrap(db).expect("connection still shared after shutdown");
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("INSERT"), "no insert was issued: {log}");
    assert!(
        log.contains("Bool(Some(true))"),
        "inserted user does not carry the admin flag: {log}"
    );
}

#[actix_web::test]
async fn login_with_unknown_email_establishes_no_session() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();
    let app = app!(db, sessions());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "ghost@example.com"), ("password", "secret1")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    assert!(
        resp.response()
            .cookies()
            .all(|c| c.name() != SESSION_COOKIE)
    );
}

#[actix_web::test]
async fn invalid_post_form_rerenders_with_inline_errors() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Ann", false);
    let app = app!(db, sessions);

    let req = test::TestRequest::post()
        .uri("/new_post")
        .cookie(cookie)
        .set_form([
            ("title", "Hello"),
            ("subtitle", ""),
            ("img_url", "not a url"),
            ("body", "text"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Please enter a subtitle"));
    assert!(html.contains("Please enter a valid URL"));
    // submitted values survive the re-render
    assert!(html.contains(r#"value="Hello""#));
}

#[actix_web::test]
async fn delete_post_as_admin_redirects_home() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Ann", true);
    let app = app!(db, sessions);

    let req = test::TestRequest::get()
        .uri(&format!("/delete/{}/post", uuid::Uuid::new_v4()))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[actix_web::test]
async fn delete_with_unknown_kind_is_404() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Ann", true);
    let app = app!(db, sessions);

    let req = test::TestRequest::get()
        .uri(&format!("/delete/{}/banana", uuid::Uuid::new_v4()))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn conflict_notice_renders_on_the_authoring_form() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let sessions = sessions();
    let cookie = session_cookie(&sessions, "Ann", false);
    let app = app!(db, sessions);

    let req = test::TestRequest::get()
        .uri("/new_post")
        .cookie(cookie)
        .cookie(Cookie::new(
            "quill_flash",
            "A+post+with+that+title+already+exists",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .any(|c| c.name() == "quill_flash" && c.value().is_empty());
    assert!(cleared, "conflict notice must be one-time");

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("A post with that title already exists"));
}

#[actix_web::test]
async fn flash_notice_is_rendered_once_and_cleared() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app!(db, sessions());

    let req = test::TestRequest::get()
        .uri("/login")
        .cookie(Cookie::new("quill_flash", "User+not+found"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let cleared = resp
        .response()
        .cookies()
        .any(|c| c.name() == "quill_flash" && c.value().is_empty());
    assert!(cleared, "flash cookie should be removed after render");

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("User not found"));
}

#[actix_web::test]
async fn about_and_contact_render_without_a_session() {
    let db: DbConn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app!(db, sessions());

    for uri in ["/about", "/contact"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}
