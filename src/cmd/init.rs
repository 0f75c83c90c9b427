use crate::data::{AppSettings, Persistable};
use anyhow::Result;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    let path = dir.join(AppSettings::filename());
    if run_in_dir(dir)? {
        println!("Wrote default settings to {}", path.display());
    } else {
        println!("Kept existing {}", path.display());
    }
    Ok(())
}

/// Writes the default settings file into `dir`, keeping an existing one.
pub(crate) fn run_in_dir(dir: &Path) -> Result<bool> {
    if dir.join(AppSettings::filename()).exists() {
        log::info!("{} already present in {}", AppSettings::filename(), dir.display());
        return Ok(false);
    }
    AppSettings::default().save_to(dir)?;
    Ok(true)
}
