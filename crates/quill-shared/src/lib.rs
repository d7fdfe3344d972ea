//! # Quill Shared
//!
//! Form types shared between HTTP handlers and the view layer, with the
//! structural validation that runs before anything touches persistence.

pub mod forms;

pub use forms::{CommentForm, FieldError, FormErrors, LoginForm, PostForm, RegisterForm};
