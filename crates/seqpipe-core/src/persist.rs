//! Stage result persistence
//!
//! Each completed stage is written to `<run dir>/<stage name>`. Text results
//! are written verbatim; anything else is written as tab-indented JSON. Both
//! end with a single newline. Existing files are overwritten.

use crate::error::{SeqpipeError, SeqpipeResult};
use crate::protocol::StageResult;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes stage results into one per-run directory
#[derive(Debug, Clone)]
pub struct ResultPersister {
    dir: PathBuf,
}

impl ResultPersister {
    /// Persister writing directly into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persister for one input file: `<output_root>/<basename(input)>`
    pub fn for_input(output_root: &Path, input: &Path) -> SeqpipeResult<Self> {
        let base = input.file_name().ok_or_else(|| {
            SeqpipeError::invalid_input(format!(
                "input path '{}' has no file name",
                input.display()
            ))
        })?;
        Ok(Self::new(output_root.join(base)))
    }

    /// Directory stage files are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the run directory and its parents
    pub fn prepare(&self) -> SeqpipeResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SeqpipeError::filesystem_at(
                format!("failed to create output directory: {}", e),
                &self.dir,
            )
        })?;
        debug!("Prepared output directory {}", self.dir.display());
        Ok(())
    }

    /// Write one stage result, returning the file path
    pub fn persist(&self, stage: &str, result: &StageResult) -> SeqpipeResult<PathBuf> {
        check_stage_name(stage)?;
        let path = self.dir.join(stage);
        let content = render(result)?;

        fs::write(&path, content).map_err(|e| {
            SeqpipeError::filesystem_at(format!("failed to write stage '{}': {}", stage, e), &path)
        })?;
        debug!("Wrote stage '{}' to {}", stage, path.display());
        Ok(path)
    }
}

/// File content for a stage result, trailing newline included
pub fn render(result: &StageResult) -> SeqpipeResult<String> {
    let mut out = match result {
        StageResult::Text(text) => text.clone(),
        StageResult::Structured(value) => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut serializer)?;
            String::from_utf8(buf)
                .map_err(|e| SeqpipeError::protocol(format!("non UTF-8 JSON output: {}", e)))?
        }
    };
    out.push('\n');
    Ok(out)
}

/// Stage names become file names and must not leave the run directory
fn check_stage_name(stage: &str) -> SeqpipeResult<()> {
    if stage.is_empty() || stage == "." || stage == ".." || stage.contains(['/', '\\']) {
        return Err(SeqpipeError::filesystem(format!(
            "stage name '{}' is not a valid file name",
            stage
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn create_test_persister() -> (ResultPersister, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let persister = ResultPersister::new(temp_dir.path());
        (persister, temp_dir)
    }

    #[test]
    fn test_text_result_gets_single_newline() {
        let (persister, _temp) = create_test_persister();
        let path = persister
            .persist("align", &StageResult::Text("ACGT".to_string()))
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "ACGT\n");
    }

    #[test]
    fn test_text_result_is_verbatim() {
        let (persister, _temp) = create_test_persister();
        let text = "line one\nline two\n";
        let path = persister
            .persist("notes", &StageResult::Text(text.to_string()))
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "line one\nline two\n\n");
    }

    #[test]
    fn test_structured_result_is_tab_indented() {
        let (persister, _temp) = create_test_persister();
        let value = json!({"topology": [1, 2]});
        let path = persister
            .persist("tree", &StageResult::Structured(value.clone()))
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "{\n\t\"topology\": [\n\t\t1,\n\t\t2\n\t]\n}\n");

        let parsed: Value = serde_json::from_str(content.strip_suffix('\n').unwrap()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_structured_scalar_values() {
        assert_eq!(render(&StageResult::Structured(json!(42))).unwrap(), "42\n");
        assert_eq!(render(&StageResult::Structured(Value::Null)).unwrap(), "null\n");
    }

    #[test]
    fn test_last_write_wins() {
        let (persister, _temp) = create_test_persister();
        persister
            .persist("align", &StageResult::Text("first".to_string()))
            .unwrap();
        let path = persister
            .persist("align", &StageResult::Text("second".to_string()))
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second\n");
    }

    #[test]
    fn test_for_input_uses_basename() {
        let temp = TempDir::new().unwrap();
        let persister =
            ResultPersister::for_input(temp.path(), Path::new("data/runs/ecoli.gb")).unwrap();
        assert_eq!(persister.dir(), temp.path().join("ecoli.gb"));

        persister.prepare().unwrap();
        persister.prepare().unwrap();
        assert!(persister.dir().is_dir());
    }

    #[test]
    fn test_rejects_path_like_stage_names() {
        let (persister, _temp) = create_test_persister();
        let result = StageResult::Text("x".to_string());
        for stage in ["", ".", "..", "../escape", "a/b"] {
            let err = persister.persist(stage, &result).unwrap_err();
            assert_eq!(err.error_code(), "FILESYSTEM", "stage: {:?}", stage);
        }
    }

    #[test]
    fn test_missing_directory_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let persister = ResultPersister::new(temp.path().join("never-created"));
        let err = persister
            .persist("align", &StageResult::Text("ACGT".to_string()))
            .unwrap_err();
        assert!(matches!(err, SeqpipeError::Filesystem { path: Some(_), .. }));
    }
}
