//! TLS trust store inspection.

use std::path::PathBuf;

use bundlecheck_types::LoadError;
use rustls_pki_types::CertificateDer;
use rustls_pki_types::pem::PemObject;

/// A source of trusted root certificates.
pub trait TrustStore {
    /// Where the roots come from, for reports.
    fn describe(&self) -> String;

    /// Number of trusted root certificates.
    fn root_count(&self) -> Result<usize, LoadError>;
}

/// A PEM bundle shipped with the build.
#[derive(Debug, Clone)]
pub struct PemBundle {
    path: PathBuf,
}

impl PemBundle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TrustStore for PemBundle {
    fn describe(&self) -> String {
        format!("bundled trust store {}", self.path.display())
    }

    fn root_count(&self) -> Result<usize, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::NotFound(self.path.clone()));
        }
        let certs = CertificateDer::pem_file_iter(&self.path)
            .map_err(|e| LoadError::Invalid(format!("{}: {e}", self.path.display())))?;

        let mut count = 0;
        for cert in certs {
            cert.map_err(|e| LoadError::Invalid(format!("{}: {e}", self.path.display())))?;
            count += 1;
        }
        Ok(count)
    }
}

/// The platform's default trust store.
///
/// Honors `SSL_CERT_FILE` / `SSL_CERT_DIR` like other TLS clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRoots;

impl TrustStore for NativeRoots {
    fn describe(&self) -> String {
        "platform trust store".to_string()
    }

    fn root_count(&self) -> Result<usize, LoadError> {
        let result = rustls_native_certs::load_native_certs();
        for err in &result.errors {
            tracing::warn!(error = %err, "error loading platform certificates");
        }
        if result.certs.is_empty() {
            if let Some(err) = result.errors.first() {
                return Err(LoadError::Invalid(err.to_string()));
            }
        }
        Ok(result.certs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Contents are never parsed as DER, only counted.
    const CERT: &str = "-----BEGIN CERTIFICATE-----\nAAECAwQFBgcICQ==\n-----END CERTIFICATE-----\n";

    #[test]
    fn counts_certificates_in_bundle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cacert.pem");
        std::fs::write(&path, CERT.repeat(3)).expect("write");
        assert_eq!(PemBundle::new(&path).root_count().expect("count"), 3);
    }

    #[test]
    fn empty_bundle_has_no_roots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cacert.pem");
        std::fs::write(&path, "").expect("write");
        assert_eq!(PemBundle::new(&path).root_count().expect("count"), 0);
    }

    #[test]
    fn missing_bundle_is_not_found() {
        let err = PemBundle::new("/no/cacert.pem").root_count().expect_err("missing");
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn corrupt_bundle_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cacert.pem");
        std::fs::write(
            &path,
            "-----BEGIN CERTIFICATE-----\n!!!not base64!!!\n-----END CERTIFICATE-----\n",
        )
        .expect("write");
        let err = PemBundle::new(&path).root_count().expect_err("corrupt");
        assert!(matches!(err, LoadError::Invalid(_)));
    }
}
