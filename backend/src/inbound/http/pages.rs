//! Site page resolution handler.
//!
//! ```text
//! GET /api/v1/pages/resolve?path=/case-studies
//! ```
//!
//! Lets the front end or an edge proxy ask which page a browser path maps
//! to, including the legacy alias, without duplicating the routing table.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

use crate::domain::site_route::resolve;

/// Query parameters for page resolution.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolvePageQuery {
    /// Browser path, optionally with query string or fragment.
    #[param(example = "/case-studies")]
    pub path: String,
}

/// Resolution outcome.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPageResponse {
    /// Page to render.
    #[schema(example = "projects")]
    pub page: String,
    /// Canonical path for the page.
    #[schema(example = "/projects")]
    pub canonical_path: String,
    /// Whether the request used a legacy alias.
    pub legacy_alias: bool,
    /// 200 for a known page, 404 otherwise.
    #[schema(example = 200)]
    pub status: u16,
}

/// Resolve a browser path to a site page.
///
/// Always answers `200`; the `status` field carries the page status so
/// callers can distinguish the not-found page from a transport error.
#[utoipa::path(
    get,
    path = "/api/v1/pages/resolve",
    params(ResolvePageQuery),
    responses(
        (status = 200, description = "Path resolved", body = ResolvedPageResponse)
    ),
    tags = ["pages"],
    operation_id = "resolvePage"
)]
#[get("/pages/resolve")]
pub async fn resolve_page(query: web::Query<ResolvePageQuery>) -> HttpResponse {
    let route = resolve(&query.path);
    HttpResponse::Ok().json(ResolvedPageResponse {
        page: route.page().as_str().to_owned(),
        canonical_path: route.canonical_path().to_owned(),
        legacy_alias: route.legacy_alias(),
        status: if route.is_found() { 200 } else { 404 },
    })
}
