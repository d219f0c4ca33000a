//! TLS certificate material for the API listener.
//!
//! Certificates either come from PEM files on disk or are generated
//! self-signed for the configured API domain. Only
//! [`api::server`][crate::api] consumes the resulting rustls config; handlers
//! never see the transport.

use crate::error::Error;
use axum_server::tls_rustls::RustlsConfig;
use trust_dns_client::rr::LowerName;

/// Load a PEM certificate chain and matching private key from disk.
///
/// # Errors
///
/// Returns [`Error::IO`] when either path can't be read or doesn't contain
/// usable PEM material.
pub async fn load(cert_path: &str, key_path: &str) -> Result<RustlsConfig, Error> {
    Ok(RustlsConfig::from_pem_file(cert_path, key_path).await?)
}

/// Generate a self-signed certificate for the given domain.
///
/// # Errors
///
/// Returns [`Error::Tls`] when certificate generation fails, or
/// [`Error::IO`] when the generated material is rejected by rustls.
pub async fn generate(domain: &LowerName) -> Result<RustlsConfig, Error> {
    let name = domain.to_string();
    let subject = name.trim_end_matches('.');
    let params = rcgen::CertificateParams::new(vec![subject.to_string()]);
    let cert = rcgen::Certificate::from_params(params)?;
    let cert_der = cert.serialize_der()?;
    let key_der = cert.serialize_private_key_der();
    Ok(RustlsConfig::from_der(vec![cert_der], key_der).await?)
}
