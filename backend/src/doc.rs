//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health probes, and the
//! error envelope schemas from [`crate::inbound::http::schemas`]. Routes are
//! guarded by a bearer token unless they opt out with `security([])`.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{
    BloodRequest, BloodType, Donation, DonationReceipt, DonationWithDonor, InventoryRecord,
    RequestWithRequester, User, UserSummary,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Signed token returned by POST /api/auth/register or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blood bank API",
        description = "Donor, recipient, and admin workflows over a shared blood inventory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::donor::donate,
        crate::inbound::http::donor::history,
        crate::inbound::http::recipient::create_request,
        crate::inbound::http::recipient::list_requests,
        crate::inbound::http::admin::pending_requests,
        crate::inbound::http::admin::set_request_status,
        crate::inbound::http::admin::users,
        crate::inbound::http::admin::donations,
        crate::inbound::http::blood::availability,
        crate::inbound::http::blood::compatible,
        crate::inbound::http::inventory::list_inventory,
        crate::inbound::http::inventory::adjust_inventory,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        User,
        UserSummary,
        BloodType,
        InventoryRecord,
        Donation,
        DonationReceipt,
        DonationWithDonor,
        BloodRequest,
        RequestWithRequester
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "donor", description = "Donation recording and history"),
        (name = "recipient", description = "Blood requests raised by recipients"),
        (name = "admin", description = "Request review and listings for administrators"),
        (name = "blood", description = "Availability and compatibility lookups"),
        (name = "inventory", description = "Raw stock records and manual adjustments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
