//! HTTP API for managing the resources in the DNS database.
//!
//! Every request must carry the configured shared-secret token (header
//! `X-AUTH-TOKEN` by default); requests without it are rejected with
//! HTTP 401 before any handler runs. All responses, success and failure
//! alike, carry a JSON body. Failures use the form:
//!
//! ```json
//! { "error": "not found" }
//! ```
//!
//! # API Endpoints
//!
//! ## `/records` (GET)
//!
//!   Returns HTTP 200 (OK) and the full list of resources. Without options
//!   the answer detail is stripped and only domains are returned; pass
//!   `?full=true` for complete detail.
//!
//! ## `/records` (POST)
//!
//!   Expects a JSON resource of the form:
//!
//!   ```json
//!   { "domain": "example.com", "answers": [ { "type": "A", "value": "1.2.3.4", "ttl": 300 } ] }
//!   ```
//!
//!   Stores the resource and returns HTTP 201 (Created) echoing the stored
//!   value. Creating a domain that already exists overwrites it.
//!
//! ## `/records` (PUT)
//!
//!   Expects a JSON array of resources. Replaces the entire record set with
//!   exactly that array; previously stored domains absent from it are
//!   deleted. Returns HTTP 200 (OK) echoing the new set.
//!
//! ## `/records/{domain}` (GET)
//!
//!   Returns HTTP 200 (OK) and the resource for `domain`, or HTTP 404.
//!
//! ## `/records/{domain}` (PUT)
//!
//!   Replaces the answer set of an existing resource. The domain in the path
//!   is authoritative; a domain in the body is ignored. HTTP 404 when the
//!   domain isn't stored.
//!
//! ## `/records/{domain}` (DELETE)
//!
//!   Removes the resource and returns HTTP 200 (OK) with
//!   `{"msg":"success"}`. Deleting an absent domain returns HTTP 404 rather
//!   than succeeding silently.

mod api_error;
mod routes;
pub mod server;

pub use server::{new, router};
