use rand::rngs::OsRng;

use strata_core::{application::ports::SecretSource, domain::SecretKey};

/// Secrets drawn from the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretSource;

impl SecretSource for OsSecretSource {
    fn generate(&self) -> SecretKey {
        SecretKey::generate(&mut OsRng)
    }
}
