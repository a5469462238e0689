use crate::dto::HealthRes;

/// Health service shared by the API surfaces.
///
/// This service provides a standardised way to check the health status of the content service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ArtWeb content service is alive".into(),
        }
    }
}
