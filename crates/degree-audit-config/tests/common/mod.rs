// crates/degree-audit-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for degree-audit-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use degree_audit_config::ConfigError;

/// Minimal valid catalog in JSON form.
pub const CATALOG_JSON: &str = r#"{
  "majors": {
    "CS": {
      "name": "Computer Science",
      "requirements": [{
        "name": "Core",
        "fulfilled_by": "courses",
        "checkers": [["CS 2110"]],
        "per_slot_min_count": [1],
        "slot_names": ["Course"]
      }]
    }
  }
}"#;

/// Writes a file under `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, String> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok(path)
}

/// Asserts that a result is an error containing a specific substring.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected an error".to_string()),
    }
}
