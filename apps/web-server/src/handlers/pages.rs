//! Static pages.

use actix_web::{HttpRequest, HttpResponse};

use crate::flash;
use crate::handlers::render_ok;
use crate::middleware::auth::OptionalIdentity;
use crate::views;

/// GET /about
pub async fn about(user: OptionalIdentity, req: HttpRequest) -> HttpResponse {
    let notice = flash::take(&req);
    render_ok(
        views::about_page(user.0.as_ref(), notice.as_deref()),
        notice.is_some(),
    )
}

/// GET /contact
pub async fn contact(user: OptionalIdentity, req: HttpRequest) -> HttpResponse {
    let notice = flash::take(&req);
    render_ok(
        views::contact_page(user.0.as_ref(), notice.as_deref()),
        notice.is_some(),
    )
}
