use crate::error::{AuditError, Result};
use crate::types::config::{AuditConfig, TaxonomySource};
use crate::types::taxonomy::Taxonomy;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "webaudit.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".webaudit/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/webaudit/config.toml";

/// Loads and validates the layered config rooted at `root`. Missing files fall
/// back to defaults.
pub fn load_config(root: &Path) -> Result<AuditConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<AuditConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let mut cfg: AuditConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| AuditError::ConfigParse(e.to_string()))?;
    cfg.validate()?;

    if let Some(storage) = cfg.storage.as_mut() {
        if let Some(dir) = storage.dir.as_mut() {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
    }
    if let Some(taxonomy) = cfg.taxonomy.as_mut() {
        if let Some(path) = taxonomy.path.as_mut() {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
    Ok(cfg)
}

/// Builds the single taxonomy the engine is bound to for this process.
pub fn load_taxonomy(cfg: &AuditConfig) -> Result<Taxonomy> {
    match cfg.taxonomy_source() {
        TaxonomySource::Builtin(variant) => Taxonomy::builtin(variant),
        TaxonomySource::File(path) => Taxonomy::load(&path),
    }
}

/// Storage dir, resolved against `root` when the config left it at the default.
pub fn storage_dir(root: &Path, cfg: &AuditConfig) -> PathBuf {
    let dir = cfg.storage_dir();
    if dir.is_relative() {
        root.join(dir)
    } else {
        dir
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AuditError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
