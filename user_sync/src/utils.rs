use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}

pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Password placeholder for records whose credentials live with the identity provider.
///
/// The backend schema requires a password on create. Nobody ever learns this
/// value, so it cannot be used to sign in.
pub(crate) fn gen_unusable_password(external_id: &str) -> Result<String, UtilError> {
    Ok(format!("idp_managed_{external_id}_{}", gen_random_string(32)?))
}
