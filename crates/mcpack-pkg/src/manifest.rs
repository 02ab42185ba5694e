use mcpack_codegen::{BuildOptions, OptimizeOptions, PackMeta};
use mcpack_common::IdPrefix;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "mcpack.toml";

/// Represents a parsed mcpack.toml manifest file.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub pack: Pack,
    #[serde(default)]
    pub optimize: OptimizeOptions,
    #[serde(default)]
    pub output: Output,
}

/// Pack metadata from the [pack] section of mcpack.toml.
#[derive(Debug, Deserialize)]
pub struct Pack {
    pub pack_format: u32,
    #[serde(default)]
    pub description: String,
    /// Namespace or identifier prefix for anonymous functions.
    #[serde(default)]
    pub internal: Option<String>,
    /// Emit `"replace": true` in the load tag.
    #[serde(default)]
    pub replace_load: bool,
    #[serde(default)]
    pub replace_tick: bool,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "build".to_string()
}

impl Manifest {
    /// Read and parse an mcpack.toml manifest from a file path.
    pub fn from_file(path: &Path) -> Result<Manifest, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    /// Parse an mcpack.toml manifest from a string.
    pub fn from_str(content: &str) -> Result<Manifest, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse manifest: {}", e))
    }

    /// Build options for this pack. Fails if `internal` is not a valid
    /// namespace or identifier.
    pub fn build_options(&self) -> Result<BuildOptions, String> {
        let internal = match &self.pack.internal {
            Some(text) => Some(
                IdPrefix::parse(text)
                    .map_err(|e| format!("Invalid internal prefix '{}': {}", text, e))?,
            ),
            None => None,
        };
        Ok(BuildOptions {
            internal,
            optimize: self.optimize,
            pack_meta: Some(PackMeta::new(
                self.pack.pack_format,
                self.pack.description.clone(),
            )),
            replace_load: self.pack.replace_load,
            replace_tick: self.pack.replace_tick,
        })
    }

    /// The output directory, resolved against the directory holding the
    /// manifest.
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output.dir)
    }
}
