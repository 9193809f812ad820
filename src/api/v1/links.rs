//! Link endpoint handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::link::{
    validate_title, validate_url, Link, LinkId, NewLink, ReadFilter,
};
use crate::domain::user::User;

const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 100;

/// Query parameters for GET /api/links
///
/// Kept as raw strings so malformed values produce a 400 instead of a
/// framework-level rejection.
#[derive(Debug, Deserialize, Default)]
pub struct ListLinksParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub show: Option<String>,
}

/// Response for GET /api/links
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    /// All links saved by the user, regardless of the `show` filter
    pub total_links: u64,
    pub page: u32,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    pub per_page: u32,
    pub links: Vec<Link>,
}

/// JSON body for POST /api/links
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    pub title: Option<String>,
    #[serde(default)]
    pub read: bool,
}

/// JSON body for PATCH /api/links/{id}; absent fields are left unmodified
#[derive(Debug, Deserialize, Default)]
pub struct UpdateLinkRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub read: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_paging(params: &ListLinksParams) -> Result<(u32, u32, ReadFilter), ApiError> {
    let page = match &params.page {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ApiError::bad_request("The page and per_page parameters must be integers")
        })?,
        None => 1,
    };

    let per_page = match &params.per_page {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ApiError::bad_request("The page and per_page parameters must be integers")
        })?,
        None => DEFAULT_PER_PAGE,
    };

    if page < 1 || per_page < 1 || per_page > MAX_PER_PAGE {
        return Err(ApiError::bad_request(format!(
            "The page parameter must be positive and per_page between 1 and {}",
            MAX_PER_PAGE
        )));
    }

    let filter = match params.show.as_deref() {
        None => ReadFilter::Unread,
        Some(raw) => ReadFilter::parse(raw).ok_or_else(|| {
            ApiError::bad_request("The show parameter must be either unread, read or all.")
        })?,
    };

    Ok((page, per_page, filter))
}

/// Fetch a link and confirm the current user may access it
async fn owned_link(state: &AppState, user: &User, id: i64) -> Result<Link, ApiError> {
    let link = state
        .links
        .get(LinkId::new(id))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Requested resource was not found in the database"))?;

    if !link.owned_by(user.id()) {
        return Err(ApiError::forbidden(
            "You are not authorized to access this item",
        ));
    }

    Ok(link)
}

/// GET /api/links
///
/// Returns one page of the user's links, newest first. The `show`
/// parameter controls read-status filtering and defaults to `unread`.
pub async fn list_links(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListLinksParams>,
) -> Result<Json<LinkListResponse>, ApiError> {
    let (page, per_page, filter) = parse_paging(&params)?;

    let result = state
        .links
        .list_for_user(user.id(), filter, page, per_page)
        .await
        .map_err(ApiError::from)?;

    let total_links = state
        .links
        .count_for_user(user.id(), ReadFilter::All)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(LinkListResponse {
        total_links,
        page: result.page,
        total_pages: result.total_pages(),
        next_page: result.next_page(),
        per_page: result.per_page,
        links: result.items,
    }))
}

/// POST /api/links
///
/// Creates a new link for the current user. When no title is supplied the
/// page title is inferred from the URL; inference failure leaves it null.
pub async fn create_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_url(&body.url).map_err(|e| {
        ApiError::validation("The submitted data failed validation checks")
            .with_issues(serde_json::json!({ "url": [e.to_string()] }))
    })?;

    let title = match body.title {
        Some(title) => {
            validate_title(&title).map_err(|e| {
                ApiError::validation("The submitted data failed validation checks")
                    .with_issues(serde_json::json!({ "title": [e.to_string()] }))
            })?;
            Some(title)
        }
        None => {
            debug!(url = %body.url, "Inferring title from page");
            state.titles.fetch_title(&body.url).await
        }
    };

    let link = state
        .links
        .create(NewLink {
            user_id: user.id(),
            url: body.url,
            title,
            read: body.read,
        })
        .await
        .map_err(ApiError::from)?;

    let location = format!("/api/links/{}", link.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(link),
    ))
}

/// GET /api/links/{id}
pub async fn get_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Link>, ApiError> {
    let link = owned_link(&state, &user, id).await?;
    Ok(Json(link))
}

/// PATCH /api/links/{id}
///
/// Updates any of url, title, and read that appear in the payload; other
/// fields are left unmodified.
pub async fn update_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<UpdateLinkRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut link = owned_link(&state, &user, id).await?;

    if let Some(url) = body.url {
        validate_url(&url).map_err(|e| {
            ApiError::validation("The submitted data failed validation checks")
                .with_issues(serde_json::json!({ "url": [e.to_string()] }))
        })?;
        link.set_url(url);
    }

    if let Some(title) = body.title {
        validate_title(&title).map_err(|e| {
            ApiError::validation("The submitted data failed validation checks")
                .with_issues(serde_json::json!({ "title": [e.to_string()] }))
        })?;
        link.set_title(Some(title));
    }

    if let Some(read) = body.read {
        link.set_read(read);
    }

    state.links.update(&link).await.map_err(ApiError::from)?;

    Ok(Json(MessageResponse {
        message: format!("Link with ID {} updated successfully", id),
    }))
}

/// DELETE /api/links/{id}
pub async fn delete_link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let link = owned_link(&state, &user, id).await?;

    state.links.delete(link.id()).await.map_err(ApiError::from)?;

    Ok(Json(MessageResponse {
        message: format!("Link with ID {} deleted successfully", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paging_defaults() {
        let (page, per_page, filter) = parse_paging(&ListLinksParams::default()).unwrap();
        assert_eq!(page, 1);
        assert_eq!(per_page, DEFAULT_PER_PAGE);
        assert_eq!(filter, ReadFilter::Unread);
    }

    #[test]
    fn test_parse_paging_non_integer() {
        let params = ListLinksParams {
            page: Some("two".to_string()),
            ..Default::default()
        };
        let err = parse_paging(&params).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_paging_bad_show() {
        let params = ListLinksParams {
            show: Some("archived".to_string()),
            ..Default::default()
        };
        let err = parse_paging(&params).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_paging_bounds() {
        let params = ListLinksParams {
            per_page: Some("0".to_string()),
            ..Default::default()
        };
        assert!(parse_paging(&params).is_err());

        let params = ListLinksParams {
            per_page: Some("1000".to_string()),
            ..Default::default()
        };
        assert!(parse_paging(&params).is_err());
    }
}
