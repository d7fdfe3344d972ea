use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication date format shown on post pages, e.g. "March 04,2024".
const DATE_FORMAT: &str = "%B %d,%Y";

/// Post entity - a published blog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub subtitle: String,
    /// Human-formatted publication date, stamped once at creation.
    pub date: String,
    pub body: String,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post, stamping the current server date.
    pub fn new(
        author_id: Uuid,
        title: String,
        subtitle: String,
        img_url: String,
        body: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            subtitle,
            date: format_publication_date(now),
            body,
            img_url,
            created_at: now,
        }
    }

    /// Apply an edit. The publication date and author are never rewritten.
    pub fn apply_edit(&mut self, title: String, subtitle: String, img_url: String, body: String) {
        self.title = title;
        self.subtitle = subtitle;
        self.img_url = img_url;
        self.body = body;
    }
}

fn format_publication_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}
