//! ignitool: build and inspect Ignition-style provisioning configs.
//!
//! Forward direction: render Jinja templates against environment-supplied
//! secrets into a JSON config with embedded file contents, plus a flat
//! first-boot script. Inverse direction: decode the embedded contents back
//! into readable text for review.

pub mod build;
pub mod document;
pub mod embed;
pub mod error;
pub mod inspect;
pub mod template;
pub mod vars;

use std::path::Path;

use build::{BuildLayout, CombustionBuilder, IgnitionBuilder};
use inspect::{Inspector, strip_files_prefix};

pub use error::AppError;

/// Build both artifacts from the conventional layout in the current
/// directory: `ignition/config.ign` and `combustion/script` templates,
/// `files/` and `systemd/` asset trees, outputs under `_build/`.
pub fn build() -> Result<(), AppError> {
    let vars = vars::load_variables()?;
    let layout = BuildLayout::new(".");

    let ignition = IgnitionBuilder::new(&vars, &layout).build()?;
    println!("Wrote {}", ignition.display());

    let combustion = CombustionBuilder::new(&vars, &layout).build()?;
    println!("Wrote {}", combustion.display());

    Ok(())
}

/// Decode and print file entries from a built config.
///
/// With no `paths`, prints every entry; otherwise only entries whose path
/// matches one of the given paths after stripping a literal `files` prefix.
pub fn print_files(config: &Path, paths: &[String]) -> Result<(), AppError> {
    let inspector = Inspector::load(config)?;

    if paths.is_empty() {
        for file in inspector.files() {
            print!("{}", inspector.format_file(file)?);
        }
        println!("Decoded all files from ignition config.");
    } else {
        let wanted: Vec<String> = paths
            .iter()
            .map(|p| strip_files_prefix(p).to_string())
            .collect();
        for file in inspector.files_by_path(&wanted) {
            print!("{}", inspector.format_file(file)?);
        }
    }

    Ok(())
}

/// Print systemd dropins from a built config, all of them or only those
/// belonging to the named units.
pub fn print_systemd_dropins(config: &Path, units: &[String]) -> Result<(), AppError> {
    let inspector = Inspector::load(config)?;

    if units.is_empty() {
        for (unit, dropin) in inspector.systemd_dropins() {
            print!("{}", inspector.format_dropin(unit, dropin));
        }
    } else {
        for (unit, dropin) in inspector.systemd_dropins_by_unit(units) {
            print!("{}", inspector.format_dropin(unit, dropin));
        }
    }

    Ok(())
}
