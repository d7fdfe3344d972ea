//! Post listing, detail/commenting, authoring, editing and deletion.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, Post};
use quill_core::error::RepoError;
use quill_shared::{CommentForm, PostForm};

use crate::flash;
use crate::handlers::{render_invalid, render_ok, see_other, see_other_with_flash};
use crate::middleware::auth::{Identity, OptionalIdentity, require_admin};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

const DUPLICATE_TITLE_NOTICE: &str = "A post with that title already exists";

fn post_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("No post with id {id}"))
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    user: OptionalIdentity,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let notice = flash::take(&req);
    Ok(render_ok(
        views::index_page(&posts, user.0.as_ref(), notice.as_deref()),
        notice.is_some(),
    ))
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;
    let comments = state.comments.find_by_post_id(post.id).await?;

    let notice = flash::take(&req);
    Ok(render_ok(
        views::post_page(
            &post,
            &comments,
            &CommentForm::default(),
            None,
            Some(&identity),
            notice.as_deref(),
        ),
        notice.is_some(),
    ))
}

/// POST /post/{id} - submit a comment.
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    let form = body.into_inner();
    if let Err(errors) = form.validate() {
        let comments = state.comments.find_by_post_id(post.id).await?;
        return Ok(render_invalid(views::post_page(
            &post,
            &comments,
            &form,
            Some(&errors),
            Some(&identity),
            None,
        )));
    }

    let comment = Comment::new(
        post.id,
        identity.user_id,
        identity.name.clone(),
        form.text.trim().to_string(),
    );
    state.comments.insert(comment).await?;

    // Re-render with the updated comment list.
    let comments = state.comments.find_by_post_id(post.id).await?;
    Ok(render_ok(
        views::post_page(
            &post,
            &comments,
            &CommentForm::default(),
            None,
            Some(&identity),
            None,
        ),
        false,
    ))
}

/// GET /new_post - any authenticated user may author.
pub async fn new_post_form(identity: Identity, req: HttpRequest) -> AppResult<HttpResponse> {
    let notice = flash::take(&req);
    Ok(render_ok(
        views::post_form_page(
            "New Post",
            "/new_post",
            &PostForm::default(),
            None,
            Some(&identity),
            notice.as_deref(),
        ),
        notice.is_some(),
    ))
}

/// POST /new_post
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    if let Err(errors) = form.validate() {
        return Ok(render_invalid(views::post_form_page(
            "New Post",
            "/new_post",
            &form,
            Some(&errors),
            Some(&identity),
            None,
        )));
    }

    let post = Post::new(
        identity.user_id,
        form.title.trim().to_string(),
        form.subtitle.trim().to_string(),
        form.img_url.trim().to_string(),
        form.body,
    );

    match state.posts.insert(post).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, author_id = %identity.user_id, "post created");
            Ok(see_other("/"))
        }
        Err(RepoError::Constraint(_)) => {
            Ok(see_other_with_flash("/new_post", DUPLICATE_TITLE_NOTICE))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /edit_post/{id} - admin only.
pub async fn edit_post_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    let form = PostForm {
        title: post.title.clone(),
        subtitle: post.subtitle.clone(),
        img_url: post.img_url.clone(),
        body: post.body.clone(),
    };

    let notice = flash::take(&req);
    Ok(render_ok(
        views::post_form_page(
            "Edit Post",
            &format!("/edit_post/{id}"),
            &form,
            None,
            Some(&identity),
            notice.as_deref(),
        ),
        notice.is_some(),
    ))
}

/// POST /edit_post/{id} - admin only. Date and author are never rewritten.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    let id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    let form = body.into_inner();
    if let Err(errors) = form.validate() {
        return Ok(render_invalid(views::post_form_page(
            "Edit Post",
            &format!("/edit_post/{id}"),
            &form,
            Some(&errors),
            Some(&identity),
            None,
        )));
    }

    post.apply_edit(
        form.title.trim().to_string(),
        form.subtitle.trim().to_string(),
        form.img_url.trim().to_string(),
        form.body,
    );

    match state.posts.update(post).await {
        Ok(post) => Ok(see_other(&format!("/post/{}", post.id))),
        Err(RepoError::NotFound) => Err(post_not_found(id)),
        Err(RepoError::Constraint(_)) => Ok(see_other_with_flash(
            &format!("/edit_post/{id}"),
            DUPLICATE_TITLE_NOTICE,
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /delete/{id}/{post|comment} - admin only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, String)>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    let (id, kind) = path.into_inner();
    let result = match kind.as_str() {
        "post" => state.posts.delete(id).await,
        "comment" => state.comments.delete(id).await,
        other => {
            return Err(AppError::NotFound(format!(
                "Nothing to delete of kind '{other}'"
            )));
        }
    };

    match result {
        Ok(()) => {
            tracing::info!(%id, kind, "deleted");
            Ok(see_other("/"))
        }
        Err(RepoError::NotFound) => Err(AppError::NotFound(format!("No {kind} with id {id}"))),
        Err(e) => Err(e.into()),
    }
}
