// crates/degree-audit-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example mirrors the built-in defaults so `degree-audit config example`
//! prints a file that validates unchanged.

/// Returns a canonical example `degree-audit.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"log_filter = "degree_audit=info"

[catalog]
path = "catalog.json"

[exams]
path = "exams.json"

[total_credits]
enabled = true
required = 120

[[total_credits.colleges]]
college = "AG"
eligibility = "exclude-pe-and-intro"

[[total_credits.colleges]]
college = "AS1"
eligibility = "exclude-pe-and-intro"

[[total_credits.colleges]]
college = "BU"
eligibility = "exclude-pe-and-intro"

[[total_credits.colleges]]
college = "HE"
eligibility = "exclude-pe-and-intro"

[[total_credits.colleges]]
college = "IL"
eligibility = "exclude-pe-and-intro"

[swim_test]
enabled = true
"#,
    )
}
