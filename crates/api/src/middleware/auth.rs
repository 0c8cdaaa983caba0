//! # Password Hashing
//!
//! Student passwords are stored as Argon2 PHC strings. Login is handled
//! elsewhere; this crate only ever hashes.

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use eyre::Result;

/// Hashes a password with a fresh random salt and default Argon2 parameters.
///
/// The returned string carries algorithm, parameters and salt, so it can be
/// verified later without any other state.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}
