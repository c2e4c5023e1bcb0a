use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use std::path::PathBuf;

pub const CONFIG_TEMPLATE: &str = include_str!("../../../config-templates/waflens.hcl");

pub fn init(path: PathBuf) -> Result<()> {
    write_template(&path)?;

    println!("✔ Wrote default configuration to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  waflens config check {}", path.display());
    println!("  waflens analyze --config {} <logs.ndjson>", path.display());

    Ok(())
}

/// Refuses to overwrite anything that already exists.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(path, CONFIG_TEMPLATE.trim_start())
        .with_context(|| format!("failed to create {}", path.display()))
}
