//! Envelope behavior of the listing engine over a mocked store.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use civinet_db::entities::{BlogPost, ModerationStatus, PublicationStatus, blog_post};
use civinet_db::listing::{ContentFilter, Listable, list_page};
use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, QueryFilter, Value};

fn french_post(id: &str, title: &str) -> blog_post::Model {
    blog_post::Model {
        id: id.to_string(),
        author_id: "user1".to_string(),
        organisation_id: None,
        title: title.to_string(),
        excerpt: Some("L'accès à l'eau potable".to_string()),
        content: "water".to_string(),
        language: "French".to_string(),
        category_id: None,
        tags: serde_json::json!([]),
        status: PublicationStatus::Published,
        published_at: Some(Utc::now().into()),
        moderation_status: ModerationStatus::Approved,
        moderated_by: None,
        moderated_at: None,
        moderation_notes: None,
        is_featured: false,
        view_count: 0,
        like_count: 0,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

// Fifteen French posts matching "water", page 2 at 12 per page: the last
// three rows come back, and the envelope knows it is the final page.
#[tokio::test]
async fn second_page_of_fifteen_matches() {
    let last_page: Vec<blog_post::Model> = (13..=15)
        .map(|n| french_post(&format!("post{n}"), &format!("Water brief {n}")))
        .collect();

    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(15)]])
            .append_query_results([last_page])
            .into_connection(),
    );

    let filter = ContentFilter {
        search: Some("water".to_string()),
        language: Some("French".to_string()),
        page: Some(2),
        limit: Some(12),
        ..ContentFilter::default()
    };

    let base = BlogPost::find().filter(blog_post::Entity::visible());
    let page = list_page(db.as_ref(), base, &filter).await.unwrap();

    assert_eq!(page.data.len(), 3);
    assert_eq!(page.count, 15);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 2);
    assert!(!page.has_next_page);
    assert!(page.has_prev_page);
}

#[tokio::test]
async fn empty_result_has_zero_pages() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([Vec::<blog_post::Model>::new()])
            .into_connection(),
    );

    let base = BlogPost::find().filter(blog_post::Entity::visible());
    let page = list_page(db.as_ref(), base, &ContentFilter::default())
        .await
        .unwrap();

    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next_page);
    assert!(!page.has_prev_page);
}

#[tokio::test]
async fn malformed_filter_never_reaches_the_store() {
    // No mocked results: a store call would panic the mock.
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let filter = ContentFilter {
        page: Some(0),
        ..ContentFilter::default()
    };

    let result = list_page(db.as_ref(), BlogPost::find(), &filter).await;
    assert!(result.is_err());
}
