//! Registration, login and logout.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::SessionService;
use quill_shared::{LoginForm, RegisterForm};

use crate::flash;
use crate::handlers::{render_invalid, render_ok, see_other, see_other_with_flash};
use crate::middleware::auth::{clear_session_cookie, session_cookie};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

const DUPLICATE_EMAIL_NOTICE: &str = "You've already signed up with that email, log in instead!";

/// GET /register
pub async fn register_form(req: HttpRequest) -> HttpResponse {
    let notice = flash::take(&req);
    render_ok(
        views::register_page(&RegisterForm::default(), None, notice.as_deref()),
        notice.is_some(),
    )
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    if let Err(errors) = form.validate() {
        return Ok(render_invalid(views::register_page(
            &form,
            Some(&errors),
            None,
        )));
    }

    let email = form.email.trim().to_lowercase();
    if state.users.find_by_email(&email).await?.is_some() {
        return Ok(see_other_with_flash("/login", DUPLICATE_EMAIL_NOTICE));
    }

    let password_hash = state.passwords.hash(&form.password)?;

    // The first account ever registered is the administrator. The count and
    // the insert are separate statements, so two simultaneous first
    // registrations are not guarded against here (see DESIGN.md).
    let is_admin = state.users.count().await? == 0;
    let user = User::new(form.name.trim().to_string(), email, password_hash, is_admin);

    tracing::info!(user_id = %user.id, is_admin, "registering user");

    match state.users.insert(user).await {
        Ok(_) => Ok(see_other("/login")),
        // Lost the race on the unique email index.
        Err(RepoError::Constraint(_)) => Ok(see_other_with_flash("/login", DUPLICATE_EMAIL_NOTICE)),
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(req: HttpRequest) -> HttpResponse {
    let notice = flash::take(&req);
    render_ok(
        views::login_page(&LoginForm::default(), None, notice.as_deref()),
        notice.is_some(),
    )
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    if let Err(errors) = form.validate() {
        return Ok(render_invalid(views::login_page(&form, Some(&errors), None)));
    }

    // Emails are stored lowercased at registration.
    let email = form.email.trim().to_lowercase();
    let Some(user) = state.users.find_by_email(&email).await? else {
        return Ok(see_other_with_flash("/login", "User not found"));
    };

    if !state.passwords.verify(&form.password, &user.password_hash)? {
        return Ok(see_other_with_flash("/login", "Invalid email or password"));
    }

    let token = state
        .sessions
        .create_session(user.id, &user.name, user.is_admin)?;

    tracing::info!(user_id = %user.id, "session established");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_cookie(token, state.sessions.lifetime_seconds()))
        .cookie(flash::set("You are now logged in and can create a post"))
        .finish())
}

/// GET /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(clear_session_cookie())
        .cookie(flash::set("You have now been logged out"))
        .finish()
}
