//! Variable resolution: environment and `.env` secrets into the flat
//! mapping consumed by both builders.

use std::collections::BTreeMap;
use std::env;

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::AppError;

/// Flat mapping of lowercase variable names to values.
///
/// Built once per invocation and immutable thereafter.
pub type VarMap = BTreeMap<String, String>;

/// Environment variables recognized by the build.
pub const ENV_VARS: &[&str] = &[
    "ROOT_PASSWD",
    "ADMIN_PASSWD",
    "ADMIN_SSH_KEYS",
    "ADMIN_TOTP",
    "DISK_PASSWD",
    "ADGUARD_MAC",
];

/// The one recognized key that may be synthesized instead of supplied.
const MAC_VAR: &str = "ADGUARD_MAC";

/// Generate a random locally administered MAC address in the form
/// `02:00:00:xx:xx:xx`.
///
/// This is the only place randomness enters the build, and it uses the
/// OS entropy source.
pub fn random_locally_administered_mac() -> String {
    let mut octets = [0u8; 3];
    OsRng.fill_bytes(&mut octets);
    format!(
        "02:00:00:{:02x}:{:02x}:{:02x}",
        octets[0], octets[1], octets[2]
    )
}

/// Build the variable mapping from the process environment.
///
/// Loads `.env` from the working directory (best effort), lower-cases the
/// recognized keys, and synthesizes the MAC address when it was not
/// supplied. Every other recognized key is required.
pub fn load_variables() -> Result<VarMap, AppError> {
    dotenvy::dotenv().ok();

    let mut vars = VarMap::new();
    for &name in ENV_VARS {
        match env::var(name) {
            Ok(value) => {
                vars.insert(name.to_lowercase(), value);
            }
            Err(_) if name == MAC_VAR => {}
            Err(_) => return Err(AppError::MissingEnvVar(name.to_string())),
        }
    }
    vars.entry(MAC_VAR.to_lowercase())
        .or_insert_with(random_locally_administered_mac);

    Ok(vars)
}
