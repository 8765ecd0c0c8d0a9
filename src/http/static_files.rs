//! Static asset serving.
//!
//! Files under the configured static directory are served beneath `/static`.
//! Content types are guessed from the file extension; missing files yield a
//! plain 404.

use tower_http::services::ServeDir;

/// Create the static file service rooted at `dir`.
pub fn create_static_service(dir: &str) -> ServeDir {
    ServeDir::new(dir)
}
