//! Assembles handler state from the configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use parcel_backend::domain::ports::{ParcelRepository, UserRepository};
use parcel_backend::domain::{AccountService, GeocodingService, ParcelService};
use parcel_backend::inbound::http::state::HttpState;
use parcel_backend::outbound::memory::{InMemoryParcelRepository, InMemoryUserRepository};
use parcel_backend::outbound::nominatim::NominatimHttpSource;
use parcel_backend::outbound::persistence::{DieselParcelRepository, DieselUserRepository};
use parcel_backend::outbound::security::Argon2PasswordHasher;

/// Wire the services over one pair of repositories.
fn services_over<U, P>(users: U, parcels: P, geocoder: NominatimHttpSource) -> HttpState
where
    U: UserRepository + 'static,
    P: ParcelRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        Arc::new(users),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let parcel_service = Arc::new(ParcelService::new(Arc::new(parcels), Arc::new(DefaultClock)));
    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        parcels: parcel_service.clone(),
        parcels_query: parcel_service,
        geocoding: Arc::new(GeocodingService::new(Arc::new(geocoder))),
    }
}

/// Build handler state, using PostgreSQL when a pool is configured and
/// process memory otherwise.
pub(super) fn build_http_state(
    db_pool: Option<parcel_backend::outbound::persistence::DbPool>,
    geocoder: NominatimHttpSource,
) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => services_over(
            DieselUserRepository::new(pool.clone()),
            DieselParcelRepository::new(pool),
            geocoder,
        ),
        None => {
            info!("no database configured; accounts and parcels are kept in memory");
            services_over(
                InMemoryUserRepository::new(),
                InMemoryParcelRepository::new(),
                geocoder,
            )
        }
    };
    web::Data::new(state)
}
