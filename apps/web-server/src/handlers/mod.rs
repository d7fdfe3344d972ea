//! HTTP handlers and route configuration.

mod auth;
mod pages;
mod posts;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::flash;
use crate::views;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/").route(web::get().to(posts::index)),
    )
    .service(
        web::resource("/post/{id}")
            .route(web::get().to(posts::show_post))
            .route(web::post().to(posts::add_comment)),
    )
    .service(
        web::resource("/new_post")
            .route(web::get().to(posts::new_post_form))
            .route(web::post().to(posts::create_post)),
    )
    .service(
        web::resource("/edit_post/{id}")
            .route(web::get().to(posts::edit_post_form))
            .route(web::post().to(posts::update_post)),
    )
    .route("/delete/{id}/{kind}", web::get().to(posts::delete))
    .service(
        web::resource("/register")
            .route(web::get().to(auth::register_form))
            .route(web::post().to(auth::register)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(auth::login_form))
            .route(web::post().to(auth::login)),
    )
    .route("/logout", web::get().to(auth::logout))
    .route("/about", web::get().to(pages::about))
    .route("/contact", web::get().to(pages::contact));
}

/// 200 page; clears the flash cookie when a notice was rendered.
pub(crate) fn render_ok(html: String, consumed_flash: bool) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.content_type(views::CONTENT_TYPE_HTML);
    if consumed_flash {
        builder.cookie(flash::clear());
    }
    builder.body(html)
}

/// 422 form re-render with inline errors; nothing was persisted.
pub(crate) fn render_invalid(html: String) -> HttpResponse {
    HttpResponse::UnprocessableEntity()
        .content_type(views::CONTENT_TYPE_HTML)
        .body(html)
}

/// Post/Redirect/Get.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Redirect carrying a one-time notice for the next page.
pub(crate) fn see_other_with_flash(location: &str, message: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .cookie(flash::set(message))
        .finish()
}
