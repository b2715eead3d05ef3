//! # Public Wall Module
//!
//! Read-only endpoint behind the public page.
//!
//! ## Sub-modules:
//! - `get`: Loads the stored document and returns it with stats and display strings.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for the public wall endpoint.
const API_PATH: &str = "/api/influencers";

/// Configures and returns the Actix `Scope` for the public wall.
///
/// # Registered Routes:
///
/// *   **`GET /api/influencers`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the settings, the aggregate stats (raw and formatted) and
///       every record with its `followersDisplay` string. Always answers `200 OK`; a failing
///       backend yields the default, empty wall.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(get::process))
}
