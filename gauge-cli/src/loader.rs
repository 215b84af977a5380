//! Job folder loader
//!
//! Each job folder holds exactly four artifacts: `create.json`,
//! `data.jsonl`, `prompt.txt`, and `run.json`. Presence is checked up
//! front so a missing file is reported before anything is parsed or any
//! remote call is made.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use gauge_core::dto::SpecError;
use gauge_core::dto::eval::EvalSpec;
use gauge_core::dto::run::RunSpec;

pub const EVAL_SPEC_FILE: &str = "create.json";
pub const DATASET_FILE: &str = "data.jsonl";
pub const PROMPT_FILE: &str = "prompt.txt";
pub const RUN_SPEC_FILE: &str = "run.json";

const REQUIRED_FILES: [&str; 4] = [EVAL_SPEC_FILE, DATASET_FILE, PROMPT_FILE, RUN_SPEC_FILE];

/// Everything read from one job folder
#[derive(Debug, Clone)]
pub struct JobBundle {
    pub eval_spec: EvalSpec,
    pub run_spec: RunSpec,
    pub prompt: String,
    pub dataset_path: PathBuf,
    pub sample_count: usize,
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("required file {file} not found in {}", folder.display())]
    MissingArtifact {
        file: &'static str,
        folder: PathBuf,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid descriptor {}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: SpecError,
    },
}

/// Load and validate the four artifacts of a job folder
pub fn load_job(folder: &Path) -> Result<JobBundle, LoaderError> {
    for file in REQUIRED_FILES {
        if !folder.join(file).is_file() {
            return Err(LoaderError::MissingArtifact {
                file,
                folder: folder.to_path_buf(),
            });
        }
    }

    let eval_spec_path = folder.join(EVAL_SPEC_FILE);
    let eval_spec: EvalSpec = read_json(&eval_spec_path)?;
    eval_spec.validate().map_err(|source| LoaderError::Invalid {
        path: eval_spec_path,
        source,
    })?;

    let run_spec_path = folder.join(RUN_SPEC_FILE);
    let run_spec: RunSpec = read_json(&run_spec_path)?;
    run_spec.validate().map_err(|source| LoaderError::Invalid {
        path: run_spec_path,
        source,
    })?;

    let prompt = read_text(&folder.join(PROMPT_FILE))?.trim().to_string();

    let dataset_path = folder.join(DATASET_FILE);
    let dataset = read_text(&dataset_path)?;
    let sample_count = dataset.lines().filter(|line| !line.trim().is_empty()).count();

    Ok(JobBundle {
        eval_spec,
        run_spec,
        prompt,
        dataset_path,
        sample_count,
    })
}

/// List job subdirectories under the jobs root, sorted by name
pub fn list_job_folders(root: &Path) -> Result<Vec<String>, LoaderError> {
    let entries = fs::read_dir(root).map_err(|source| LoaderError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoaderError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                folders.push(name.to_string());
            }
        }
    }

    folders.sort();
    Ok(folders)
}

fn read_text(path: &Path) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoaderError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| LoaderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_job_folder(dir: &Path) {
        fs::write(
            dir.join(EVAL_SPEC_FILE),
            r#"{
                "data_source_config": { "type": "custom", "item_schema": { "type": "object" } },
                "testing_criteria": [{ "type": "string_check", "operation": "eq" }]
            }"#,
        )
        .unwrap();
        fs::write(
            dir.join(RUN_SPEC_FILE),
            r#"{
                "name": "sentiment-run",
                "data_source": {
                    "type": "completions",
                    "model": "gpt-4o-mini",
                    "input_messages": { "type": "template" }
                }
            }"#,
        )
        .unwrap();
        fs::write(dir.join(PROMPT_FILE), "Grade the sentiment.\n").unwrap();
        fs::write(
            dir.join(DATASET_FILE),
            "{\"item\": {\"input\": \"good\"}}\n{\"item\": {\"input\": \"bad\"}}\n\n",
        )
        .unwrap();
    }

    #[test]
    fn test_loads_complete_folder() {
        let dir = tempfile::tempdir().unwrap();
        write_job_folder(dir.path());

        let bundle = load_job(dir.path()).unwrap();

        assert_eq!(bundle.prompt, "Grade the sentiment.");
        assert_eq!(bundle.sample_count, 2);
        assert_eq!(bundle.run_spec.data_source.model, "gpt-4o-mini");
        assert!(bundle.dataset_path.ends_with(DATASET_FILE));
    }

    #[test]
    fn test_missing_dataset_names_file_and_folder() {
        let dir = tempfile::tempdir().unwrap();
        write_job_folder(dir.path());
        fs::remove_file(dir.path().join(DATASET_FILE)).unwrap();

        let err = load_job(dir.path()).unwrap_err();

        match err {
            LoaderError::MissingArtifact { file, folder } => {
                assert_eq!(file, DATASET_FILE);
                assert_eq!(folder, dir.path());
            }
            other => panic!("expected MissingArtifact, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_descriptor_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_job_folder(dir.path());
        fs::write(dir.path().join(EVAL_SPEC_FILE), "{ not json").unwrap();

        assert!(matches!(
            load_job(dir.path()).unwrap_err(),
            LoaderError::Parse { .. }
        ));
    }

    #[test]
    fn test_invalid_descriptor_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_job_folder(dir.path());
        fs::write(
            dir.path().join(EVAL_SPEC_FILE),
            r#"{ "data_source_config": { "type": "custom" }, "testing_criteria": [] }"#,
        )
        .unwrap();

        assert!(matches!(
            load_job(dir.path()).unwrap_err(),
            LoaderError::Invalid { .. }
        ));
    }

    #[test]
    fn test_lists_folders_sorted() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("zeta")).unwrap();
        fs::create_dir(root.path().join("alpha")).unwrap();
        fs::write(root.path().join("stray.txt"), "not a folder").unwrap();

        let folders = list_job_folders(root.path()).unwrap();
        assert_eq!(folders, vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
