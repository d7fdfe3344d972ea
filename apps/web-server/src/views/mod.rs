//! HTML rendering boundary.
//!
//! Views are plain functions from view-data to markup. Handlers hand over
//! {post, comments, form, user} structures and get a page back; nothing in
//! here touches persistence or sessions.

use quill_core::domain::{Comment, Post};
use quill_shared::{CommentForm, FormErrors, LoginForm, PostForm, RegisterForm};

use crate::middleware::auth::Identity;

/// Content-Type for every rendered page.
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Escape text for safe interpolation into HTML.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn field_error(errors: Option<&FormErrors>, field: &str) -> String {
    match errors.and_then(|e| e.message_for(field)) {
        Some(message) => format!(r#"<p class="field-error">{}</p>"#, escape(message)),
        None => String::new(),
    }
}

fn nav(user: Option<&Identity>) -> String {
    let account = match user {
        Some(identity) => format!(
            r#"<a href="/new_post">New Post</a> <span class="who">{}</span> <a href="/logout">Log Out</a>"#,
            escape(&identity.name)
        ),
        None => r#"<a href="/login">Log In</a> <a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<nav><a href="/">Home</a> <a href="/about">About</a> <a href="/contact">Contact</a> {account}</nav>"#
    )
}

fn flash_banner(flash: Option<&str>) -> String {
    match flash {
        Some(message) => format!(r#"<div class="flash">{}</div>"#, escape(message)),
        None => String::new(),
    }
}

/// Common page shell.
pub fn layout(title: &str, user: Option<&Identity>, flash: Option<&str>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Quill</title>
</head>
<body>
{nav}
{flash}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        nav = nav(user),
        flash = flash_banner(flash),
        body = body,
    )
}

/// Front page: every post, oldest first.
pub fn index_page(posts: &[Post], user: Option<&Identity>, flash: Option<&str>) -> String {
    let is_admin = user.map(|u| u.is_admin).unwrap_or(false);
    let mut items = String::new();
    for post in posts {
        let admin_links = if is_admin {
            format!(
                r#" <a href="/edit_post/{id}">edit</a> <a href="/delete/{id}/post">&#10008;</a>"#,
                id = post.id
            )
        } else {
            String::new()
        };
        items.push_str(&format!(
            r#"<article>
<h2><a href="/post/{id}">{title}</a></h2>
<p class="subtitle">{subtitle}</p>
<p class="meta">{date}</p>{admin_links}
</article>
"#,
            id = post.id,
            title = escape(&post.title),
            subtitle = escape(&post.subtitle),
            date = escape(&post.date),
        ));
    }
    if posts.is_empty() {
        items.push_str("<p>No posts yet.</p>");
    }
    layout("All Posts", user, flash, &items)
}

/// Post detail page with its comments and the comment form.
pub fn post_page(
    post: &Post,
    comments: &[Comment],
    form: &CommentForm,
    errors: Option<&FormErrors>,
    user: Option<&Identity>,
    flash: Option<&str>,
) -> String {
    let is_admin = user.map(|u| u.is_admin).unwrap_or(false);
    let mut comment_items = String::new();
    for comment in comments {
        let delete_link = if is_admin {
            format!(
                r#" <a href="/delete/{}/comment">&#10008;</a>"#,
                comment.id
            )
        } else {
            String::new()
        };
        comment_items.push_str(&format!(
            r#"<li><strong>{author}</strong>: {text}{delete_link}</li>
"#,
            author = escape(&comment.author_name),
            text = escape(&comment.text),
        ));
    }

    // Post bodies are authored rich text and render unescaped.
    let body = format!(
        r#"<article>
<h1>{title}</h1>
<p class="subtitle">{subtitle}</p>
<p class="meta">{date}</p>
<img src="{img_url}" alt="">
<div class="post-body">{post_body}</div>
</article>
<section id="comments">
<h2>Comments</h2>
<ul>
{comment_items}</ul>
<form method="post" action="/post/{id}">
{text_error}<textarea name="text" required>{text}</textarea>
<button type="submit">Submit Comment</button>
</form>
</section>"#,
        title = escape(&post.title),
        subtitle = escape(&post.subtitle),
        date = escape(&post.date),
        img_url = escape(&post.img_url),
        post_body = post.body,
        id = post.id,
        text_error = field_error(errors, "text"),
        text = escape(&form.text),
    );
    layout(&post.title, user, flash, &body)
}

/// Authoring form, shared by the new-post and edit-post pages.
pub fn post_form_page(
    heading: &str,
    action: &str,
    form: &PostForm,
    errors: Option<&FormErrors>,
    user: Option<&Identity>,
    flash: Option<&str>,
) -> String {
    let body = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
<label>Blog Post Title</label>
{title_error}<input name="title" value="{title}" required>
<label>Subtitle</label>
{subtitle_error}<input name="subtitle" value="{subtitle}" required>
<label>Blog Image URL</label>
{img_url_error}<input name="img_url" value="{img_url}" required>
<label>Blog Content</label>
{body_error}<textarea name="body" required>{form_body}</textarea>
<button type="submit">Submit Post</button>
</form>"#,
        heading = escape(heading),
        action = escape(action),
        title_error = field_error(errors, "title"),
        title = escape(&form.title),
        subtitle_error = field_error(errors, "subtitle"),
        subtitle = escape(&form.subtitle),
        img_url_error = field_error(errors, "img_url"),
        img_url = escape(&form.img_url),
        body_error = field_error(errors, "body"),
        form_body = escape(&form.body),
    );
    layout(heading, user, flash, &body)
}

/// Registration page.
pub fn register_page(
    form: &RegisterForm,
    errors: Option<&FormErrors>,
    flash: Option<&str>,
) -> String {
    let body = format!(
        r#"<h1>Register</h1>
<form method="post" action="/register">
<label>Name</label>
{name_error}<input name="name" value="{name}" required>
<label>Email</label>
{email_error}<input name="email" type="email" value="{email}" required>
<label>Password</label>
{password_error}<input name="password" type="password" required>
<button type="submit">Sign Up</button>
</form>"#,
        name_error = field_error(errors, "name"),
        name = escape(&form.name),
        email_error = field_error(errors, "email"),
        email = escape(&form.email),
        password_error = field_error(errors, "password"),
    );
    layout("Register", None, flash, &body)
}

/// Login page.
pub fn login_page(form: &LoginForm, errors: Option<&FormErrors>, flash: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log In</h1>
<form method="post" action="/login">
<label>Email</label>
{email_error}<input name="email" type="email" value="{email}" required>
<label>Password</label>
{password_error}<input name="password" type="password" required>
<button type="submit">Log In</button>
</form>"#,
        email_error = field_error(errors, "email"),
        email = escape(&form.email),
        password_error = field_error(errors, "password"),
    );
    layout("Log In", None, flash, &body)
}

/// Static about page.
pub fn about_page(user: Option<&Identity>, flash: Option<&str>) -> String {
    layout(
        "About",
        user,
        flash,
        "<h1>About Us</h1>\n<p>Quill is a small blog run by one stubborn administrator.</p>",
    )
}

/// Static contact page.
pub fn contact_page(user: Option<&Identity>, flash: Option<&str>) -> String {
    layout(
        "Contact",
        user,
        flash,
        "<h1>Contact</h1>\n<p>Write to us at hello@quill.example and we will read it eventually.</p>",
    )
}

/// Error page shown for 4xx/5xx outcomes.
pub fn error_page(status: u16, title: &str, detail: &str) -> String {
    let body = format!(
        "<h1>{status} {title}</h1>\n<p>{detail}</p>",
        status = status,
        title = escape(title),
        detail = escape(detail),
    );
    layout(title, None, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn comment_text_is_escaped_on_the_post_page() {
        let post = Post::new(
            uuid::Uuid::new_v4(),
            "Hello".into(),
            "World".into(),
            "https://x.com/a.png".into(),
            "<p>body</p>".into(),
        );
        let comment = Comment::new(
            post.id,
            uuid::Uuid::new_v4(),
            "Mallory".into(),
            "<script>steal()</script>".into(),
        );

        let html = post_page(
            &post,
            std::slice::from_ref(&comment),
            &CommentForm::default(),
            None,
            None,
            None,
        );

        assert!(!html.contains("<script>steal()"));
        assert!(html.contains("&lt;script&gt;steal()"));
        // rich-text post body stays raw
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn index_page_links_every_post() {
        let post = Post::new(
            uuid::Uuid::new_v4(),
            "Hello".into(),
            "World".into(),
            "https://x.com/a.png".into(),
            "text".into(),
        );
        let html = index_page(std::slice::from_ref(&post), None, None);
        assert!(html.contains(&format!("/post/{}", post.id)));
        // no admin controls for anonymous visitors
        assert!(!html.contains("/delete/"));
    }

    #[test]
    fn inline_errors_render_next_to_fields() {
        let form = PostForm::default();
        let errors = form.validate().unwrap_err();
        let html = post_form_page("New Post", "/new_post", &form, Some(&errors), None, None);
        assert!(html.contains("Please enter a title"));
        assert!(html.contains("Please enter a subtitle"));
    }
}
