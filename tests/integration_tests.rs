//! End-to-end integration tests
//!
//! Drives the full selection → brief → generate workflow through the CLI
//! against the bundled demo catalog with zero generator latency.

mod common;

use common::TestEnvironment;
use predicates::prelude::*;

// ─────────────────────────────────────────────────────────────────
// Generate
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_generate_two_concepts_offline() {
    let env = TestEnvironment::new();

    env.generate_cmd()
        .args([
            "--company",
            "acme",
            "--product",
            "acme-coldbrew",
            "--persona",
            "acme-commuter",
            "--no-brief",
            "--count",
            "2",
        ])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 concept(s):"))
        .stdout(predicate::str::contains(
            "AI concept 1: Cold Brew Kit for Busy Commuter",
        ))
        .stdout(predicate::str::contains(
            "AI concept 2: Cold Brew Kit for Busy Commuter",
        ))
        .stdout(predicate::str::contains(
            "Discover how Cold Brew Kit transforms the life of Busy Commuter.",
        ))
        .stdout(predicate::str::contains("Learn more about Cold Brew Kit"));
}

#[test]
fn test_generate_accepts_display_names() {
    let env = TestEnvironment::new();

    env.generate_cmd()
        .args([
            "--company",
            "Acme Coffee",
            "--product",
            "Cold Brew Kit",
            "--persona",
            "Busy Commuter",
            "--brief",
            "Focus on morning routines",
            "--count",
            "1",
        ])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 concept(s):"));
}

#[test]
fn test_generate_uses_configured_default_count() {
    let env = TestEnvironment::new();

    // default_count = 2 in the test configuration
    env.generate_cmd()
        .args([
            "--company",
            "acme",
            "--product",
            "acme-espresso",
            "--persona",
            "acme-student",
            "--no-brief",
        ])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 concept(s):"));
}

#[test]
fn test_generate_json_output() {
    let env = TestEnvironment::new();

    env.generate_cmd()
        .args([
            "--company",
            "borealis",
            "--product",
            "borealis-band",
            "--persona",
            "borealis-runner",
            "--no-brief",
            "--count",
            "2",
            "--json",
        ])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"copyOut\""))
        .stdout(predicate::str::contains("\"copyIn\""))
        .stdout(predicate::str::contains("Pulse Band is for you!"));
}

// ─────────────────────────────────────────────────────────────────
// Validation Errors
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_generate_without_brief_or_opt_out_refused() {
    let env = TestEnvironment::new();

    env.generate_cmd()
        .args([
            "--company",
            "acme",
            "--product",
            "acme-coldbrew",
            "--persona",
            "acme-commuter",
        ])
        .arg("--quiet")
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("E401"))
        .stderr(predicate::str::contains("--no-brief"));
}

#[test]
fn test_generate_unknown_product_refused() {
    let env = TestEnvironment::new();

    env.generate_cmd()
        .args([
            "--company",
            "acme",
            "--product",
            "borealis-band", // belongs to the other company
            "--persona",
            "acme-commuter",
            "--no-brief",
        ])
        .arg("--quiet")
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("E403"));
}

#[test]
fn test_generate_count_above_max_refused() {
    let env = TestEnvironment::new();

    // max_count = 10 in the test configuration
    env.generate_cmd()
        .args([
            "--company",
            "acme",
            "--product",
            "acme-coldbrew",
            "--persona",
            "acme-commuter",
            "--no-brief",
            "--count",
            "11",
        ])
        .arg("--quiet")
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("E402"));
}

// ─────────────────────────────────────────────────────────────────
// Catalog Listing
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_catalog_companies_offline() {
    let env = TestEnvironment::new();

    env.catalog_cmd()
        .arg("companies")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Coffee"))
        .stdout(predicate::str::contains("Borealis Fitness"));
}

#[test]
fn test_catalog_products_scoped_to_company() {
    let env = TestEnvironment::new();

    env.catalog_cmd()
        .args(["products", "--company", "acme"])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cold Brew Kit"))
        .stdout(predicate::str::contains("Espresso Subscription"))
        .stdout(predicate::str::contains("Pulse Band").not());
}

#[test]
fn test_catalog_personas_scoped_to_company() {
    let env = TestEnvironment::new();

    env.catalog_cmd()
        .args(["personas", "--company", "Borealis Fitness"])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekend Runner"))
        .stdout(predicate::str::contains("Busy Commuter").not());
}

#[test]
fn test_catalog_unknown_company_refused() {
    let env = TestEnvironment::new();

    env.catalog_cmd()
        .args(["products", "--company", "nope"])
        .arg("--quiet")
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("E403"));
}
