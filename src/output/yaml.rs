//
//  argocd-rs
//  output/yaml.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! YAML output helpers.

use serde::Serialize;

/// Serializes `value` as YAML without the trailing newline.
pub fn to_yaml_string<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let yaml = serde_yaml::to_string(value)?;
    Ok(yaml.trim_end().to_string())
}

/// Converts a manifest string from JSON to YAML.
///
/// Argo CD returns rendered manifests as JSON strings. Anything that is not
/// JSON is returned unchanged.
pub fn manifest_to_yaml(manifest: &str) -> String {
    serde_json::from_str::<serde_json::Value>(manifest)
        .ok()
        .and_then(|value| to_yaml_string(&value).ok())
        .unwrap_or_else(|| manifest.to_string())
}
