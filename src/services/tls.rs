//! PEM material checks for the HTTPS certificate/key pair.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use ring::rand::SystemRandom;
use ring::signature::{self, KeyPair};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use x509_parser::prelude::*;

use crate::services::{ValidationError, ValidationResult};

/// Read the PEM certificate chain at `path`.
pub fn load_cert_chain(path: &Path) -> ValidationResult<Vec<CertificateDer<'static>>> {
    let file = fs::File::open(path).map_err(ValidationError::ReadCert)?;
    let mut reader = io::BufReader::new(file);

    let chain = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ValidationError::ReadCert)?;

    if chain.is_empty() {
        return Err(ValidationError::MissingCert);
    }

    Ok(chain)
}

/// Read the PEM private key at `path` (PKCS#8, SEC1 or PKCS#1).
pub fn load_private_key(path: &Path) -> ValidationResult<PrivateKeyDer<'static>> {
    let file = fs::File::open(path).map_err(ValidationError::ReadKey)?;
    let mut reader = io::BufReader::new(file);

    let key = rustls_pemfile::private_key(&mut reader)
        .map_err(ValidationError::ReadKey)?
        .ok_or(ValidationError::MissingKey)?;

    // Reject key types no TLS stack would accept.
    rustls::crypto::ring::sign::any_supported_type(&key)
        .map_err(|e| ValidationError::InvalidKey(e.to_string()))?;

    Ok(key)
}

/// Confirm the public key embedded in the leaf certificate corresponds to
/// the private key.
pub fn check_pair(
    chain: &[CertificateDer<'static>],
    key: &PrivateKeyDer<'static>,
) -> ValidationResult<()> {
    let leaf = chain.first().ok_or(ValidationError::MissingCert)?;
    let (_, parsed) = X509Certificate::from_der(leaf.as_ref())
        .map_err(|e| ValidationError::InvalidCert(e.to_string()))?;

    // Self-signed dev certificates routinely outlive their validity window;
    // warn instead of failing.
    if !parsed.validity().is_valid() {
        warn!("certificate is outside its validity period");
    }

    let cert_spki = parsed.public_key().subject_public_key.data.as_ref();

    match public_key_bits(key) {
        Some(derived) if derived == cert_spki => Ok(()),
        Some(_) => Err(ValidationError::KeyMismatch),
        None => {
            debug!("skipping key correspondence check for non-PKCS#8 key material");
            Ok(())
        }
    }
}

/// Derive the raw public key bits from PKCS#8 private key material.
///
/// Returns `None` for encodings or algorithms the check cannot reconstruct;
/// those passed structural validation already.
fn public_key_bits(key: &PrivateKeyDer<'_>) -> Option<Vec<u8>> {
    let PrivateKeyDer::Pkcs8(der) = key else {
        return None;
    };
    let der = der.secret_pkcs8_der();
    let rng = SystemRandom::new();

    if let Ok(pair) =
        signature::EcdsaKeyPair::from_pkcs8(&signature::ECDSA_P256_SHA256_ASN1_SIGNING, der, &rng)
    {
        return Some(pair.public_key().as_ref().to_vec());
    }
    if let Ok(pair) =
        signature::EcdsaKeyPair::from_pkcs8(&signature::ECDSA_P384_SHA384_ASN1_SIGNING, der, &rng)
    {
        return Some(pair.public_key().as_ref().to_vec());
    }
    if let Ok(pair) = signature::Ed25519KeyPair::from_pkcs8_maybe_unchecked(der) {
        return Some(pair.public_key().as_ref().to_vec());
    }
    if let Ok(pair) = signature::RsaKeyPair::from_pkcs8(der) {
        return Some(pair.public_key().as_ref().to_vec());
    }

    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;
    use crate::services::fixtures::{CERT_PEM, KEY_PEM, MISMATCHED_KEY_PEM};

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_matching_pair() {
        let dir = tempdir().unwrap();
        let cert = write_file(dir.path(), "cert.crt", CERT_PEM);
        let key = write_file(dir.path(), "cert.key", KEY_PEM);

        let chain = load_cert_chain(&cert).unwrap();
        assert_eq!(chain.len(), 1);

        let key = load_private_key(&key).unwrap();
        check_pair(&chain, &key).unwrap();
    }

    #[test]
    fn rejects_mismatched_key() {
        let dir = tempdir().unwrap();
        let cert = write_file(dir.path(), "cert.crt", CERT_PEM);
        let key = write_file(dir.path(), "other.key", MISMATCHED_KEY_PEM);

        let chain = load_cert_chain(&cert).unwrap();
        let key = load_private_key(&key).unwrap();

        let err = check_pair(&chain, &key).unwrap_err();
        assert!(matches!(err, ValidationError::KeyMismatch));
    }

    #[test]
    fn missing_cert_file_is_an_io_error() {
        let dir = tempdir().unwrap();

        let err = load_cert_chain(&dir.path().join("nope.crt")).unwrap_err();
        assert!(matches!(err, ValidationError::ReadCert(_)));
    }

    #[test]
    fn cert_file_without_certificates_is_rejected() {
        let dir = tempdir().unwrap();
        let cert = write_file(dir.path(), "cert.crt", "just some text\n");

        let err = load_cert_chain(&cert).unwrap_err();
        assert!(matches!(err, ValidationError::MissingCert));
    }

    #[test]
    fn key_file_without_keys_is_rejected() {
        let dir = tempdir().unwrap();
        // A certificate is not a private key.
        let key = write_file(dir.path(), "cert.key", CERT_PEM);

        let err = load_private_key(&key).unwrap_err();
        assert!(matches!(err, ValidationError::MissingKey));
    }

    #[test]
    fn garbage_der_in_certificate_is_rejected() {
        let dir = tempdir().unwrap();
        let cert = write_file(
            dir.path(),
            "cert.crt",
            "-----BEGIN CERTIFICATE-----\naGVsbG8gd29ybGQ=\n-----END CERTIFICATE-----\n",
        );
        let key = write_file(dir.path(), "cert.key", KEY_PEM);

        let chain = load_cert_chain(&cert).unwrap();
        let key = load_private_key(&key).unwrap();

        let err = check_pair(&chain, &key).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCert(_)));
    }
}
