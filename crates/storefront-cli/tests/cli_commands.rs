#![allow(deprecated)] // cargo_bin is deprecated but still functional

/// End-to-end tests for the storefront binary
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("storefront").unwrap();
        cmd.current_dir(self.root());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn init(&self) {
        self.cmd().arg("init").assert().success();
    }
}

// -- Init and config --

#[test]
fn init_writes_default_config() {
    let ctx = TestContext::new();

    ctx.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized storefront"))
        .stdout(predicate::str::contains("hello@brewandsculpt.com"));

    assert!(ctx.root().join(".storefront/config.toml").exists());
}

#[test]
fn init_twice_requires_force() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cmd().arg("init").assert().failure();
    ctx.cmd().args(["init", "--force"]).assert().success();
}

#[test]
fn config_requires_init() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["config", "get", "contact_email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Website features temporarily unavailable"))
        .stderr(predicate::str::contains("storefront init"));
}

#[test]
fn config_set_then_get() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cmd()
        .args(["config", "set", "search.debounce_ms", "150"])
        .assert()
        .success();
    ctx.cmd()
        .args(["config", "get", "search.debounce_ms"])
        .assert()
        .success()
        .stdout("150\n");
}

#[test]
fn config_show_prints_json() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cache_name\": \"brew-sculpt-v1.0.0\""));
}

// -- Validate --

#[test]
fn validate_accepts_good_email() {
    TestContext::new()
        .cmd()
        .args(["validate", "--kind", "email", "name@example.com"])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_rejects_short_phone() {
    TestContext::new()
        .cmd()
        .args(["validate", "--kind", "tel", "123"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("South African phone number"));
}

#[test]
fn validate_required_uses_label() {
    TestContext::new()
        .cmd()
        .args(["validate", "--required", "--label", "Full name", "   "])
        .assert()
        .failure()
        .stdout("Full name is required.\n");
}

#[test]
fn validate_unknown_kind_is_reported() {
    TestContext::new()
        .cmd()
        .args(["validate", "--kind", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid field kind"));
}

// -- Search --

#[test]
fn search_lists_matches_in_catalog_order() {
    TestContext::new()
        .cmd()
        .args(["search", "latte"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signature Latte"))
        .stdout(predicate::str::contains("1 matching"));
}

#[test]
fn search_without_matches_shows_empty_state() {
    TestContext::new()
        .cmd()
        .args(["search", "xyz123"])
        .assert()
        .success()
        .stdout("No products matching \"xyz123\" were found.\n");
}

#[test]
fn search_reads_json_catalog() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.root().join("menu.json"),
        r#"[
            {"id": "flat-white", "title": "Flat White", "description": "Velvety microfoam", "price": "R40"},
            {"id": "mocha", "title": "Mocha", "description": "Chocolate and espresso", "tags": ["sweet"]}
        ]"#,
    )
    .unwrap();

    ctx.cmd()
        .args(["search", "SWEET", "--catalog", "menu.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mocha  Mocha"))
        .stdout(predicate::str::contains("Flat White").not());
}

#[test]
fn search_rejects_unknown_catalog_format() {
    let ctx = TestContext::new();
    std::fs::write(ctx.root().join("menu.csv"), "id,title\n").unwrap();

    ctx.cmd()
        .args(["search", "latte", "--catalog", "menu.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported catalog format"));
}

#[test]
fn interactive_search_reports_last_query_only() {
    TestContext::new()
        .cmd()
        .args(["search", "--interactive"])
        .write_stdin("c\nco\ncold\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("> cold"))
        .stdout(predicate::str::contains("> co\n").not())
        .stdout(predicate::str::contains("Cold Brew Tonic"));
}

// -- Submit --

#[test]
fn contact_submission_shows_modal() {
    TestContext::new()
        .cmd()
        .args([
            "submit",
            "contact",
            "--delay-ms",
            "0",
            "--field",
            "name=Lerato",
            "--field",
            "email=lerato@example.com",
            "--field",
            "subject=Opening hours",
            "--field",
            "message=Are you open on public holidays?",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("button: Sending... (disabled)"))
        .stdout(predicate::str::contains("Message Sent Successfully!"))
        .stdout(predicate::str::contains("* Learn About Us -> about.html"))
        .stdout(predicate::str::contains("button: Send Message (enabled)"));
}

#[test]
fn invalid_submission_lists_field_errors() {
    TestContext::new()
        .cmd()
        .args([
            "submit",
            "contact",
            "--field",
            "name=",
            "--field",
            "email=lerato",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error name: Full name is required."))
        .stdout(predicate::str::contains("error email: Please enter a valid email address"))
        .stdout(predicate::str::contains("Please fix the errors before submitting"))
        .stdout(predicate::str::contains("[contactForm] submitting").not());
}

#[test]
fn empty_submission_is_rejected() {
    TestContext::new()
        .cmd()
        .args(["submit", "contact", "--delay-ms", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error name: Full name is required."))
        .stdout(predicate::str::contains("error subject: Subject is required."))
        .stdout(predicate::str::contains("error message: Message is required."))
        .stdout(predicate::str::contains("Message Sent Successfully!").not());
}

#[test]
fn failed_delivery_reports_retry_notice() {
    TestContext::new()
        .cmd()
        .args([
            "submit",
            "enquiry",
            "--fail",
            "--delay-ms",
            "0",
            "--type",
            "coffee",
            "--field",
            "name=Sam",
            "--field",
            "email=sam@example.com",
            "--field",
            "message=Please send the wholesale list.",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error: Sorry, there was an error submitting your enquiry. Please try again.",
        ));
}

#[test]
fn product_link_prefills_enquiry() {
    TestContext::new()
        .cmd()
        .args([
            "submit",
            "enquiry",
            "--json",
            "--delay-ms",
            "0",
            "--product",
            "Geometric Ceramic",
            "--field",
            "name=Sam",
            "--field",
            "email=sam@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Artwork Purchase Enquiry Received!"))
        .stdout(predicate::str::contains("\"kind\": \"artwork\""))
        .stdout(predicate::str::contains("I'm interested in the Geometric Ceramic."));
}

// -- Gallery --

#[test]
fn gallery_wraps_in_both_directions() {
    TestContext::new()
        .cmd()
        .args([
            "gallery",
            "images/steel-abstract.jpg",
            "images/wood-form.jpg",
            "images/ceramic.jpg",
            "--open",
            "3",
            "--nav",
            "next",
            "--nav",
            "prev",
            "--nav",
            "prev",
        ])
        .assert()
        .success()
        .stdout("3 / 3  images/ceramic.jpg  (ceramic)\n1 / 3  images/steel-abstract.jpg  (steel abstract)\n3 / 3  images/ceramic.jpg  (ceramic)\n2 / 3  images/wood-form.jpg  (wood form)\n");
}

#[test]
fn gallery_rejects_out_of_range_jump() {
    TestContext::new()
        .cmd()
        .args(["gallery", "a.jpg", "b.jpg", "--nav", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// -- Precache --

#[test]
fn precache_rejects_invalid_base_url() {
    TestContext::new()
        .cmd()
        .args(["precache", "--base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
