//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised with in-memory adapters or mocks.

use std::sync::Arc;

use crate::domain::ports::{
    GeocodingQuery, LoginService, ParcelCommand, ParcelQuery, RegistrationService,
    UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use parcel_backend::domain::ports::{GeocodingSource, GeocodingSourceError};
/// use parcel_backend::domain::{
///     AccountService, GeocodeCandidate, GeocodeQuery, GeocodingService, ParcelService,
/// };
/// use parcel_backend::inbound::http::state::HttpState;
/// use parcel_backend::outbound::memory::{InMemoryParcelRepository, InMemoryUserRepository};
/// use parcel_backend::outbound::security::Argon2PasswordHasher;
///
/// struct Offline;
///
/// #[async_trait::async_trait]
/// impl GeocodingSource for Offline {
///     async fn search(
///         &self,
///         _query: &GeocodeQuery,
///     ) -> Result<Vec<GeocodeCandidate>, GeocodingSourceError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let accounts = Arc::new(AccountService::new(
///     Arc::new(InMemoryUserRepository::new()),
///     Arc::new(Argon2PasswordHasher::new()),
/// ));
/// let parcels = Arc::new(ParcelService::new(
///     Arc::new(InMemoryParcelRepository::new()),
///     Arc::new(DefaultClock),
/// ));
/// let state = HttpState {
///     login: accounts.clone(),
///     registration: accounts.clone(),
///     profile: accounts,
///     parcels: parcels.clone(),
///     parcels_query: parcels,
///     geocoding: Arc::new(GeocodingService::new(Arc::new(Offline))),
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
    /// Owner-scoped parcel writes.
    pub parcels: Arc<dyn ParcelCommand>,
    /// Owner-scoped parcel reads.
    pub parcels_query: Arc<dyn ParcelQuery>,
    pub geocoding: Arc<dyn GeocodingQuery>,
}
