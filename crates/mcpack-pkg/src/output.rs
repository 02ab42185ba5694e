//! Writing a built file set to disk.

use mcpack_codegen::BuildOutput;
use std::path::Path;

/// Write every file of `output` below `dir`, creating directories as needed.
/// Returns the number of files written. Existing files are overwritten;
/// nothing else in `dir` is touched.
pub fn write_output(output: &BuildOutput, dir: &Path) -> Result<usize, String> {
    for (relative, content) in &output.files {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    }
    tracing::debug!(files = output.files.len(), dir = %dir.display(), "output written");
    Ok(output.files.len())
}
