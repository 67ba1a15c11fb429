//! Layering of configuration sources.
//!
//! Settings come from three places, later ones winning:
//! 1. `venvup.yml` (committed, shared by the team)
//! 2. `venvup.local.yml` (uncommitted, per-developer)
//! 3. Command-line flags
//!
//! The two files are merged as YAML with [`deep_merge`]; flags are applied to
//! the typed result with [`overlay`].

use serde_yaml::Value;

use crate::config::schema::VenvupConfig;

/// Merge `layer` over `base`.
///
/// Mappings merge key by key, a `null` in `layer` removes the key (so a local
/// file can reset a shared setting to its default), and anything else in
/// `layer` replaces what `base` had. Sequences are replaced, not appended.
pub fn deep_merge(base: &Value, layer: &Value) -> Value {
    let (Value::Mapping(base_map), Value::Mapping(layer_map)) = (base, layer) else {
        return layer.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in layer_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let next = match base_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Mapping(merged)
}

/// Apply every field set in `flags` on top of `config`.
pub fn overlay(config: VenvupConfig, flags: VenvupConfig) -> VenvupConfig {
    VenvupConfig {
        env_dir: flags.env_dir.or(config.env_dir),
        manifest: flags.manifest.or(config.manifest),
        python: flags.python.or(config.python),
        keep_going: flags.keep_going.or(config.keep_going),
        pause: flags.pause.or(config.pause),
        installer_args: if flags.installer_args.is_empty() {
            config.installer_args
        } else {
            flags.installer_args
        },
        output: flags.output.or(config.output),
    }
}
