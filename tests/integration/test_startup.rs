//! Startup tests: config and schema loading from files.

use std::fs::File;
use std::io::Write;

use tempfile::TempDir;

use neuroquery::{Config, Schema};

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_config_and_schema_from_files() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_file(
        &dir,
        "lab_schema.toml",
        r#"
        [models]
        Subject = ["name", "state"]
        Recording = ["subject", "brain_region", "probe_type", "subject__state"]

        [aliases]
        hippo = "Hippocampus"
        "dentate gyrus" = "DG"
        "#,
    );
    let config_path = write_file(
        &dir,
        "neuroquery.toml",
        &format!(
            r#"
            [extractor]
            base_url = "http://localhost:11434/v1"
            model = "llama3"
            api_key = "unused"

            [schema]
            path = "{}"
            "#,
            schema_path.display()
        ),
    );

    let config = Config::from_file(&config_path).unwrap();
    let schema = Schema::from_file(config.schema_path().unwrap()).unwrap();

    assert!(schema.has_model("Recording"));
    assert_eq!(schema.alias_lookup("Dentate Gyrus"), Some("DG"));
}

#[test]
fn test_schema_missing_tables_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad_schema.toml", "[models]\nSubject = [\"state\"]\n");
    assert!(Schema::from_file(&path).is_err());
}

#[test]
fn test_schema_file_missing_aborts_startup() {
    let dir = TempDir::new().unwrap();
    assert!(Schema::from_file(dir.path().join("nope.toml")).is_err());
}

#[test]
fn test_malformed_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "neuroquery.toml", "extractor = 5\n");
    assert!(Config::from_file(&path).is_err());
}
