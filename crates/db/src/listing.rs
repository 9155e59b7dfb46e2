//! Generic filtered, sorted, paginated listing over content entities.
//!
//! Every public, featured and back-office listing in the platform goes
//! through one engine: a flat [`ContentFilter`] is validated, translated
//! into a composed query against one entity, and the result is wrapped in
//! the [`Page`] envelope. Per-entity knowledge (text-search columns, default
//! sort, entity-specific predicates, the public visibility gate) lives in
//! that entity's [`Listable`] implementation, not in copy-pasted query
//! functions.

use chrono::{DateTime, Utc};
use civinet_common::{AppError, AppResult, Page, PageRequest};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::{Deserialize, Serialize};

use crate::entities::{
    ModerationStatus, PublicationStatus, affiliation_request, blog_post, contact_submission,
    course, event, forum_reply, forum_thread, organisation, project, resource,
};
use crate::store::with_timeout;

/// Sort direction for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Flat filter object accepted by every listing operation.
///
/// All fields are optional. Enum-valued fields accept the sentinel `"all"`,
/// which means "no filter" and is distinct from omitting the field only at
/// the UI layer; both translate to no predicate here. Fields an entity does
/// not carry are ignored by that entity's [`Listable`] implementation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentFilter {
    /// Case-insensitive substring match across the entity's text columns.
    pub search: Option<String>,
    /// Entity lifecycle status (publication state, organisation status, or
    /// affiliation request status, depending on the entity).
    pub status: Option<String>,
    /// Moderation status.
    pub moderation_status: Option<String>,
    /// Owning/authoring organisation.
    pub organisation_id: Option<String>,
    /// Authoring profile.
    pub author_id: Option<String>,
    /// Editorial or forum category.
    pub category_id: Option<String>,
    /// Resource kind (resources only).
    pub resource_type: Option<String>,
    /// Set-overlap match on stored tags.
    pub tags: Vec<String>,
    /// Set-overlap match on countries of operation.
    pub countries: Vec<String>,
    /// Set-overlap match on thematic areas.
    pub thematic_areas: Vec<String>,
    /// Content language.
    pub language: Option<String>,
    /// Inclusive lower bound on the entity's date column.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the entity's date column.
    pub date_to: Option<DateTime<Utc>>,
    /// Promotion flag.
    pub is_featured: Option<bool>,
    /// Sort key; entity-specific default when omitted.
    pub sort_by: Option<String>,
    /// Sort direction; descending when omitted alongside `sort_by`.
    pub sort_order: Option<SortOrder>,
    /// 1-indexed page.
    pub page: Option<u64>,
    /// Rows per page; entity-specific default when omitted.
    pub limit: Option<u64>,
}

impl ContentFilter {
    /// Validate pagination and date bounds, producing the page request.
    /// Malformed input is rejected here, before any query reaches the store.
    pub fn page_request(&self, default_limit: u64) -> AppResult<PageRequest> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(AppError::InvalidFilter(
                "dateFrom must not be after dateTo".to_string(),
            ));
        }

        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(default_limit))
    }

    /// Resolve an enum-valued field: `None` and the `"all"` sentinel both
    /// mean "no filter".
    #[must_use]
    pub fn effective(value: Option<&str>) -> Option<&str> {
        value.filter(|v| *v != "all")
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Entity descriptor for the generic listing engine.
pub trait Listable: EntityTrait {
    /// Columns OR-matched by the free-text search.
    fn search_columns() -> Vec<Self::Column>;

    /// Default sort when the filter names none. Most-recent-first for most
    /// entities; replies are chronological and the directory alphabetical.
    fn default_sort() -> (Self::Column, Order);

    /// Resolve a caller-supplied sort key to a column.
    fn sort_column(key: &str) -> Option<Self::Column>;

    /// Id column, appended to every sort as the stable tiebreaker so pages
    /// stay disjoint when sort values collide.
    fn id_column() -> Self::Column;

    /// Column the `date_from`/`date_to` bounds apply to.
    fn date_column() -> Self::Column;

    /// Default rows per page.
    fn default_limit() -> u64 {
        12
    }

    /// Apply entity-specific predicates from the filter. Unparseable enum
    /// values are an [`AppError::InvalidFilter`].
    fn apply_filter(select: Select<Self>, filter: &ContentFilter) -> AppResult<Select<Self>>;

    /// Predicate limiting rows to publicly listable ones. Composes the
    /// publication state and the approval gate with AND semantics in one
    /// place; public listings must not re-derive it.
    fn visible() -> Condition;
}

/// Set-overlap predicate over a JSON array column: any element of `values`
/// present in the stored array satisfies the filter.
#[must_use]
pub fn json_overlap(column: &str, values: &[String]) -> Condition {
    let mut cond = Condition::any();
    for value in values {
        let element = serde_json::json!([value]).to_string();
        cond = cond.add(Expr::cust_with_values(
            format!("\"{column}\" @> ?::jsonb"),
            [element],
        ));
    }
    cond
}

/// Compose the full query for one listing: entity predicates, search,
/// date bounds, deterministic ordering.
fn build_query<E: Listable>(base: Select<E>, filter: &ContentFilter) -> AppResult<Select<E>> {
    let mut select = E::apply_filter(base, filter)?;

    if let Some(term) = filter.search_term() {
        let pattern = format!("%{term}%");
        let mut cond = Condition::any();
        for col in E::search_columns() {
            cond = cond.add(Expr::col(col).ilike(pattern.clone()));
        }
        select = select.filter(cond);
    }

    if let Some(from) = filter.date_from {
        select = select.filter(E::date_column().gte(from));
    }
    if let Some(to) = filter.date_to {
        select = select.filter(E::date_column().lte(to));
    }

    let (sort_col, order) = match filter.sort_by.as_deref() {
        Some(key) => {
            let col = E::sort_column(key).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown sort key: {key}"))
            })?;
            (col, filter.sort_order.unwrap_or(SortOrder::Desc).order())
        }
        None => E::default_sort(),
    };

    Ok(select
        .order_by(sort_col, order.clone())
        .order_by(E::id_column(), order))
}

/// Execute a listing: count matching rows, fetch the requested page, wrap
/// both in the envelope. Two queries, both under the store deadline.
pub async fn list_page<E>(
    db: &DatabaseConnection,
    base: Select<E>,
    filter: &ContentFilter,
) -> AppResult<Page<E::Model>>
where
    E: Listable,
    E::Model: FromQueryResult + Send + Sync,
{
    let page_request = filter.page_request(E::default_limit())?;
    let select = build_query(base, filter)?;

    let count = with_timeout("count rows", select.clone().count(db)).await?;
    let rows = with_timeout(
        "select page",
        select
            .offset(page_request.offset())
            .limit(page_request.limit)
            .all(db),
    )
    .await?;

    Ok(Page::new(rows, count, page_request))
}

// ==================== Entity descriptors ====================

impl Listable for blog_post::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![
            blog_post::Column::Title,
            blog_post::Column::Excerpt,
            blog_post::Column::Content,
        ]
    }

    fn default_sort() -> (Self::Column, Order) {
        (blog_post::Column::CreatedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(blog_post::Column::CreatedAt),
            "published_at" => Some(blog_post::Column::PublishedAt),
            "title" => Some(blog_post::Column::Title),
            "view_count" => Some(blog_post::Column::ViewCount),
            "like_count" => Some(blog_post::Column::LikeCount),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        blog_post::Column::Id
    }

    fn date_column() -> Self::Column {
        blog_post::Column::CreatedAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = PublicationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown status: {value}"))
            })?;
            select = select.filter(blog_post::Column::Status.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.moderation_status.as_deref()) {
            let status = ModerationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown moderation status: {value}"))
            })?;
            select = select.filter(blog_post::Column::ModerationStatus.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.language.as_deref()) {
            select = select.filter(blog_post::Column::Language.eq(value));
        }
        if let Some(id) = &filter.organisation_id {
            select = select.filter(blog_post::Column::OrganisationId.eq(id));
        }
        if let Some(id) = &filter.author_id {
            select = select.filter(blog_post::Column::AuthorId.eq(id));
        }
        if let Some(id) = &filter.category_id {
            select = select.filter(blog_post::Column::CategoryId.eq(id));
        }
        if let Some(flag) = filter.is_featured {
            select = select.filter(blog_post::Column::IsFeatured.eq(flag));
        }
        if !filter.tags.is_empty() {
            select = select.filter(json_overlap("tags", &filter.tags));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all()
            .add(blog_post::Column::Status.eq(PublicationStatus::Published))
            .add(blog_post::Column::ModerationStatus.eq(ModerationStatus::Approved))
    }
}

impl Listable for forum_thread::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![forum_thread::Column::Title, forum_thread::Column::Content]
    }

    fn default_sort() -> (Self::Column, Order) {
        (forum_thread::Column::CreatedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(forum_thread::Column::CreatedAt),
            "last_reply_at" => Some(forum_thread::Column::LastReplyAt),
            "reply_count" => Some(forum_thread::Column::ReplyCount),
            "view_count" => Some(forum_thread::Column::ViewCount),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        forum_thread::Column::Id
    }

    fn date_column() -> Self::Column {
        forum_thread::Column::CreatedAt
    }

    fn default_limit() -> u64 {
        20
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.moderation_status.as_deref()) {
            let status = ModerationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown moderation status: {value}"))
            })?;
            select = select.filter(forum_thread::Column::ModerationStatus.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.language.as_deref()) {
            select = select.filter(forum_thread::Column::Language.eq(value));
        }
        if let Some(id) = &filter.author_id {
            select = select.filter(forum_thread::Column::AuthorId.eq(id));
        }
        if let Some(category) = &filter.category_id {
            select = select.filter(forum_thread::Column::Category.eq(category));
        }
        if let Some(flag) = filter.is_featured {
            select = select.filter(forum_thread::Column::IsPinned.eq(flag));
        }
        if !filter.tags.is_empty() {
            select = select.filter(json_overlap("tags", &filter.tags));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all().add(forum_thread::Column::ModerationStatus.eq(ModerationStatus::Approved))
    }
}

impl Listable for forum_reply::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![forum_reply::Column::Content]
    }

    // Replies read top to bottom.
    fn default_sort() -> (Self::Column, Order) {
        (forum_reply::Column::CreatedAt, Order::Asc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(forum_reply::Column::CreatedAt),
            "like_count" => Some(forum_reply::Column::LikeCount),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        forum_reply::Column::Id
    }

    fn date_column() -> Self::Column {
        forum_reply::Column::CreatedAt
    }

    fn default_limit() -> u64 {
        20
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.moderation_status.as_deref()) {
            let status = ModerationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown moderation status: {value}"))
            })?;
            select = select.filter(forum_reply::Column::ModerationStatus.eq(status));
        }
        if let Some(id) = &filter.author_id {
            select = select.filter(forum_reply::Column::AuthorId.eq(id));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all().add(forum_reply::Column::ModerationStatus.eq(ModerationStatus::Approved))
    }
}

impl Listable for organisation::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![organisation::Column::Name, organisation::Column::Description]
    }

    // The directory is alphabetical.
    fn default_sort() -> (Self::Column, Order) {
        (organisation::Column::Name, Order::Asc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "name" => Some(organisation::Column::Name),
            "created_at" => Some(organisation::Column::CreatedAt),
            "view_count" => Some(organisation::Column::ViewCount),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        organisation::Column::Id
    }

    fn date_column() -> Self::Column {
        organisation::Column::CreatedAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = organisation::OrganisationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown status: {value}"))
            })?;
            select = select.filter(organisation::Column::Status.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.moderation_status.as_deref()) {
            let status = ModerationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown moderation status: {value}"))
            })?;
            select = select.filter(organisation::Column::ModerationStatus.eq(status));
        }
        if let Some(flag) = filter.is_featured {
            select = select.filter(organisation::Column::IsFeatured.eq(flag));
        }
        if !filter.countries.is_empty() {
            select = select.filter(json_overlap("countries", &filter.countries));
        }
        if !filter.thematic_areas.is_empty() {
            select = select.filter(json_overlap("thematic_areas", &filter.thematic_areas));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all()
            .add(organisation::Column::Status.eq(organisation::OrganisationStatus::Active))
            .add(organisation::Column::ModerationStatus.eq(ModerationStatus::Approved))
    }
}

impl Listable for event::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![
            event::Column::Title,
            event::Column::Description,
            event::Column::Location,
        ]
    }

    // Upcoming events first.
    fn default_sort() -> (Self::Column, Order) {
        (event::Column::StartsAt, Order::Asc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "starts_at" => Some(event::Column::StartsAt),
            "created_at" => Some(event::Column::CreatedAt),
            "title" => Some(event::Column::Title),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        event::Column::Id
    }

    // Date bounds select events by when they happen, not when they were
    // entered.
    fn date_column() -> Self::Column {
        event::Column::StartsAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = PublicationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown status: {value}"))
            })?;
            select = select.filter(event::Column::Status.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.language.as_deref()) {
            select = select.filter(event::Column::Language.eq(value));
        }
        if let Some(id) = &filter.organisation_id {
            select = select.filter(event::Column::OrganisationId.eq(id));
        }
        if let Some(flag) = filter.is_featured {
            select = select.filter(event::Column::IsFeatured.eq(flag));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all().add(event::Column::Status.eq(PublicationStatus::Published))
    }
}

impl Listable for course::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![course::Column::Title, course::Column::Description]
    }

    fn default_sort() -> (Self::Column, Order) {
        (course::Column::CreatedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(course::Column::CreatedAt),
            "title" => Some(course::Column::Title),
            "view_count" => Some(course::Column::ViewCount),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        course::Column::Id
    }

    fn date_column() -> Self::Column {
        course::Column::CreatedAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = PublicationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown status: {value}"))
            })?;
            select = select.filter(course::Column::Status.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.language.as_deref()) {
            select = select.filter(course::Column::Language.eq(value));
        }
        if let Some(id) = &filter.organisation_id {
            select = select.filter(course::Column::OrganisationId.eq(id));
        }
        if let Some(flag) = filter.is_featured {
            select = select.filter(course::Column::IsFeatured.eq(flag));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all().add(course::Column::Status.eq(PublicationStatus::Published))
    }
}

impl Listable for resource::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![resource::Column::Title, resource::Column::Description]
    }

    fn default_sort() -> (Self::Column, Order) {
        (resource::Column::CreatedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(resource::Column::CreatedAt),
            "title" => Some(resource::Column::Title),
            "download_count" => Some(resource::Column::DownloadCount),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        resource::Column::Id
    }

    fn date_column() -> Self::Column {
        resource::Column::CreatedAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = PublicationStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown status: {value}"))
            })?;
            select = select.filter(resource::Column::Status.eq(status));
        }
        if let Some(value) = ContentFilter::effective(filter.resource_type.as_deref()) {
            let kind = resource::ResourceType::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown resource type: {value}"))
            })?;
            select = select.filter(resource::Column::ResourceType.eq(kind));
        }
        if let Some(value) = ContentFilter::effective(filter.language.as_deref()) {
            select = select.filter(resource::Column::Language.eq(value));
        }
        if let Some(id) = &filter.organisation_id {
            select = select.filter(resource::Column::OrganisationId.eq(id));
        }
        if let Some(flag) = filter.is_featured {
            select = select.filter(resource::Column::IsFeatured.eq(flag));
        }

        Ok(select)
    }

    fn visible() -> Condition {
        Condition::all().add(resource::Column::Status.eq(PublicationStatus::Published))
    }
}

impl Listable for project::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![project::Column::Title, project::Column::Summary]
    }

    fn default_sort() -> (Self::Column, Order) {
        (project::Column::CreatedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(project::Column::CreatedAt),
            "title" => Some(project::Column::Title),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        project::Column::Id
    }

    fn date_column() -> Self::Column {
        project::Column::CreatedAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = project::ProjectStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown status: {value}"))
            })?;
            select = select.filter(project::Column::Status.eq(status));
        }
        if let Some(id) = &filter.organisation_id {
            select = select.filter(project::Column::OrganisationId.eq(id));
        }

        Ok(select)
    }

    // Projects are dashboard-scoped, not publicly gated.
    fn visible() -> Condition {
        Condition::all()
    }
}

impl Listable for affiliation_request::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![affiliation_request::Column::RequestMessage]
    }

    fn default_sort() -> (Self::Column, Order) {
        (affiliation_request::Column::RequestedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "requested_at" => Some(affiliation_request::Column::RequestedAt),
            "responded_at" => Some(affiliation_request::Column::RespondedAt),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        affiliation_request::Column::Id
    }

    fn date_column() -> Self::Column {
        affiliation_request::Column::RequestedAt
    }

    fn apply_filter(
        mut select: Select<Self>,
        filter: &ContentFilter,
    ) -> AppResult<Select<Self>> {
        if let Some(value) = ContentFilter::effective(filter.status.as_deref()) {
            let status = affiliation_request::RequestStatus::parse(value).ok_or_else(|| {
                AppError::InvalidFilter(format!("unknown request status: {value}"))
            })?;
            select = select.filter(affiliation_request::Column::RequestStatus.eq(status));
        }
        if let Some(id) = &filter.organisation_id {
            select = select.filter(affiliation_request::Column::OrganisationId.eq(id));
        }
        if let Some(id) = &filter.author_id {
            select = select.filter(affiliation_request::Column::UserId.eq(id));
        }

        Ok(select)
    }

    // Requests are never public; callers scope them by organisation or user.
    fn visible() -> Condition {
        Condition::all()
    }
}

impl Listable for contact_submission::Entity {
    fn search_columns() -> Vec<Self::Column> {
        vec![
            contact_submission::Column::Name,
            contact_submission::Column::Subject,
            contact_submission::Column::Message,
        ]
    }

    fn default_sort() -> (Self::Column, Order) {
        (contact_submission::Column::CreatedAt, Order::Desc)
    }

    fn sort_column(key: &str) -> Option<Self::Column> {
        match key {
            "created_at" => Some(contact_submission::Column::CreatedAt),
            _ => None,
        }
    }

    fn id_column() -> Self::Column {
        contact_submission::Column::Id
    }

    fn date_column() -> Self::Column {
        contact_submission::Column::CreatedAt
    }

    fn apply_filter(select: Select<Self>, _filter: &ContentFilter) -> AppResult<Select<Self>> {
        Ok(select)
    }

    // Admin inbox only.
    fn visible() -> Condition {
        Condition::all()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::BlogPost;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(base: Select<blog_post::Entity>, filter: &ContentFilter) -> String {
        build_query(base, filter)
            .unwrap()
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_public_listing_carries_approval_gate() {
        let sql = sql_for(
            BlogPost::find().filter(blog_post::Entity::visible()),
            &ContentFilter::default(),
        );

        assert!(sql.contains("\"status\" = 'published'"));
        assert!(sql.contains("\"moderation_status\" = 'approved'"));
    }

    #[test]
    fn test_featured_carousel_keeps_the_approval_gate() {
        // A featured-but-unapproved post must not slip into the carousel:
        // the featured predicate layers on top of the visibility gate.
        let filter = ContentFilter {
            is_featured: Some(true),
            ..ContentFilter::default()
        };
        let sql = sql_for(
            BlogPost::find().filter(blog_post::Entity::visible()),
            &filter,
        );

        assert!(sql.contains("\"status\" = 'published'"));
        assert!(sql.contains("\"moderation_status\" = 'approved'"));
        assert!(sql.contains("\"is_featured\" = TRUE"));
    }

    #[test]
    fn test_search_is_case_insensitive_or_across_columns() {
        let filter = ContentFilter {
            search: Some("water".to_string()),
            ..ContentFilter::default()
        };
        let sql = sql_for(BlogPost::find(), &filter);

        assert!(sql.contains("ILIKE '%water%'"));
        assert!(sql.contains("\"title\""));
        assert!(sql.contains("\"excerpt\""));
        assert!(sql.contains("\"content\""));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ContentFilter {
            search: Some("   ".to_string()),
            ..ContentFilter::default()
        };
        let sql = sql_for(BlogPost::find(), &filter);

        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn test_all_sentinel_means_no_filter() {
        let filter = ContentFilter {
            language: Some("all".to_string()),
            status: Some("all".to_string()),
            ..ContentFilter::default()
        };
        let sql = sql_for(BlogPost::find(), &filter);

        assert!(!sql.contains("\"language\""));
        assert!(!sql.contains("\"status\" ="));
    }

    #[test]
    fn test_language_equality_filter() {
        let filter = ContentFilter {
            language: Some("French".to_string()),
            ..ContentFilter::default()
        };
        let sql = sql_for(BlogPost::find(), &filter);

        assert!(sql.contains("\"language\" = 'French'"));
    }

    #[test]
    fn test_tags_use_set_overlap() {
        let filter = ContentFilter {
            tags: vec!["water".to_string(), "health".to_string()],
            ..ContentFilter::default()
        };
        let sql = sql_for(BlogPost::find(), &filter);

        assert!(sql.contains("\"tags\" @>"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_sort_always_has_id_tiebreaker() {
        let sql = sql_for(BlogPost::find(), &ContentFilter::default());
        assert!(
            sql.contains("ORDER BY \"blog_post\".\"created_at\" DESC, \"blog_post\".\"id\" DESC")
        );

        let filter = ContentFilter {
            sort_by: Some("title".to_string()),
            sort_order: Some(SortOrder::Asc),
            ..ContentFilter::default()
        };
        let sql = sql_for(BlogPost::find(), &filter);
        assert!(sql.contains("ORDER BY \"blog_post\".\"title\" ASC, \"blog_post\".\"id\" ASC"));
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        let filter = ContentFilter {
            sort_by: Some("moderated_by".to_string()),
            ..ContentFilter::default()
        };

        assert!(matches!(
            build_query(BlogPost::find(), &filter),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let filter = ContentFilter {
            moderation_status: Some("escalated".to_string()),
            ..ContentFilter::default()
        };

        assert!(matches!(
            build_query(BlogPost::find(), &filter),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_inverted_date_range_is_rejected() {
        let filter = ContentFilter {
            date_from: Some(Utc::now()),
            date_to: Some(Utc::now() - chrono::Duration::days(1)),
            ..ContentFilter::default()
        };

        assert!(matches!(
            filter.page_request(12),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_zero_page_is_rejected_before_querying() {
        let filter = ContentFilter {
            page: Some(0),
            ..ContentFilter::default()
        };

        assert!(matches!(
            filter.page_request(12),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_replies_default_to_chronological_order() {
        let select = build_query(
            crate::entities::ForumReply::find(),
            &ContentFilter::default(),
        )
        .unwrap();
        let sql = select.build(DbBackend::Postgres).to_string();

        assert!(
            sql.contains("ORDER BY \"forum_reply\".\"created_at\" ASC, \"forum_reply\".\"id\" ASC")
        );
    }
}
