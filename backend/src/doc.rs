//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every versioned endpoint plus the health probes, and
//! registers the schema wrappers from [`crate::inbound::http::schemas`] so
//! domain types stay free of utoipa. Served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, GeoPointSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Parcel backend API",
        description = "Owner-scoped storage of polygon land parcels and an address search proxy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::parcels::list_parcels,
        crate::inbound::http::parcels::create_parcel,
        crate::inbound::http::parcels::get_parcel,
        crate::inbound::http::parcels::update_parcel,
        crate::inbound::http::parcels::delete_parcel,
        crate::inbound::http::geocode::geocode,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, GeoPointSchema)),
    tags(
        (name = "auth", description = "Accounts and sessions"),
        (name = "parcels", description = "Parcels owned by the signed-in user"),
        (name = "geocode", description = "Address search"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
