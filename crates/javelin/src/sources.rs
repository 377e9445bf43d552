use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use javelin_inputs::SourceFile;
use walkdir::WalkDir;

/// Reads the named files and every `.java` file below the named directories.
pub(crate) fn load(db: &dyn salsa::Database, paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<SourceFile>> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            found.extend(java_files(path)?);
        } else {
            found.push(path.clone());
        }
    }

    found
        .into_iter()
        .map(|path| {
            let text = std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
            Ok(SourceFile::new(db, path, text))
        })
        .collect()
}

fn java_files(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to search `{dir}`"))?;
        if !entry.file_type().is_file() || entry.path().extension().is_none_or(|extension| extension != "java") {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|path| anyhow::anyhow!("`{}` is not valid UTF-8", path.display()))?;
        files.push(path);
    }
    Ok(files)
}
