//! Parcel HTTP handlers.
//!
//! ```text
//! GET    /api/v1/parcels
//! POST   /api/v1/parcels
//! GET    /api/v1/parcels/{id}
//! PUT    /api/v1/parcels/{id}
//! DELETE /api/v1/parcels/{id}
//! ```
//!
//! Every handler requires a session; the session's user is the owner scope
//! for the operation. A parcel owned by someone else answers exactly like a
//! missing one.

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::parcels_dto::{ParcelRequestBody, ParcelResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_parcel_id;

/// Public URL of a parcel, used for the `Location` header.
pub fn parcel_location(id: i64) -> String {
    format!("/api/v1/parcels/{id}")
}

/// List the caller's parcels, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/parcels",
    responses(
        (status = 200, description = "Parcels owned by the caller", body = [ParcelResponse]),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["parcels"],
    operation_id = "listParcels"
)]
#[get("/parcels")]
pub async fn list_parcels(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ParcelResponse>>> {
    let owner = session.require_user_id()?;
    let parcels = state.parcels_query.list(&owner).await?;
    Ok(web::Json(parcels.iter().map(ParcelResponse::from).collect()))
}

/// Store a new parcel.
#[utoipa::path(
    post,
    path = "/api/v1/parcels",
    request_body = ParcelRequestBody,
    responses(
        (status = 201, description = "Parcel created", body = ParcelResponse,
            headers(("Location" = String, description = "URL of the new parcel"))),
        (status = 400, description = "Invalid outline or name", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema)
    ),
    tags = ["parcels"],
    operation_id = "createParcel"
)]
#[post("/parcels")]
pub async fn create_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ParcelRequestBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let parcel = state
        .parcels
        .create(&owner, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, parcel_location(parcel.id().value())))
        .json(ParcelResponse::from(&parcel)))
}

/// Fetch one of the caller's parcels.
#[utoipa::path(
    get,
    path = "/api/v1/parcels/{id}",
    params(("id" = i64, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Parcel", body = ParcelResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 404, description = "No such parcel for this user", body = ErrorSchema)
    ),
    tags = ["parcels"],
    operation_id = "getParcel"
)]
#[get("/parcels/{id}")]
pub async fn get_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ParcelResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_parcel_id(&path)?;
    let parcel = state.parcels_query.get(&owner, id).await?;
    Ok(web::Json(ParcelResponse::from(&parcel)))
}

/// Replace the name, description and outline of one of the caller's parcels.
#[utoipa::path(
    put,
    path = "/api/v1/parcels/{id}",
    params(("id" = i64, Path, description = "Parcel identifier")),
    request_body = ParcelRequestBody,
    responses(
        (status = 200, description = "Parcel updated", body = ParcelResponse),
        (status = 400, description = "Invalid outline, name or id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 404, description = "No such parcel for this user", body = ErrorSchema)
    ),
    tags = ["parcels"],
    operation_id = "updateParcel"
)]
#[put("/parcels/{id}")]
pub async fn update_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ParcelRequestBody>,
) -> ApiResult<web::Json<ParcelResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_parcel_id(&path)?;
    let parcel = state
        .parcels
        .update(&owner, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ParcelResponse::from(&parcel)))
}

/// Delete one of the caller's parcels.
#[utoipa::path(
    delete,
    path = "/api/v1/parcels/{id}",
    params(("id" = i64, Path, description = "Parcel identifier")),
    responses(
        (status = 204, description = "Parcel deleted"),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 404, description = "No such parcel for this user", body = ErrorSchema)
    ),
    tags = ["parcels"],
    operation_id = "deleteParcel"
)]
#[delete("/parcels/{id}")]
pub async fn delete_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_parcel_id(&path)?;
    state.parcels.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "parcels_tests.rs"]
mod tests;
