// tests/cli_orchestration_test.rs
mod common;

use build_publish::changelog::NOT_GENERATED_MESSAGE;
use build_publish::cli::{VariantWorkflowArgs, Workflow};
use build_publish::domain::BuildTagSnapshot;
use build_publish::outputs;
use common::TestRepo;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn args(repo: &TestRepo, output: &TempDir, config: Option<&NamedTempFile>) -> VariantWorkflowArgs {
    VariantWorkflowArgs {
        config_path: config.map(|file| file.path().to_path_buf()),
        repo_path: repo.path().to_path_buf(),
        output_dir: Some(output.path().to_path_buf()),
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn release_history() -> TestRepo {
    let mut repo = TestRepo::new();
    let c1 = repo.commit("Initial commit");
    repo.tag("v2.1.7-release", c1);
    repo.commit("Checkout\n\nCHANGELOG: [SHOP-10] New checkout");
    repo.commit("Checkout fix\n\nCHANGELOG: [SHOP-10] Checkout fix");
    let c4 = repo.commit("Search\n\nCHANGELOG: [SHOP-11] Search by barcode");
    repo.tag("v2.1.8-release", c4);
    repo
}

#[test]
fn test_variant_workflow_args_creation() {
    let args = VariantWorkflowArgs {
        config_path: None,
        repo_path: ".".into(),
        output_dir: None,
    };
    assert_eq!(args.repo_path.to_str(), Some("."));
    assert!(args.config_path.is_none());
}

#[test]
fn test_run_all_against_real_repository() {
    let repo = release_history();
    let output = TempDir::new().unwrap();
    let config = config_file("[output]\nbase_file_name = \"shop\"\n");

    let workflow = Workflow::open(&args(&repo, &output, Some(&config))).unwrap();
    let result = workflow.run_all("release", "app-release.aab").unwrap();

    assert_eq!(result.tag, "v2.1.8-release");
    assert_eq!(result.version_code, Some(8));
    assert_eq!(result.version_name.as_deref(), Some("2.1"));
    assert_eq!(result.output_file_name, "shop.aab");
    // Newest commit wins for a repeated issue key
    assert_eq!(
        result.changelog,
        "• [SHOP-11] Search by barcode\n• [SHOP-10] Checkout fix"
    );

    let paths = workflow.paths();
    let snapshot = BuildTagSnapshot::read_from(&paths.snapshot("release"))
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.current.build_number, 8);
    assert_eq!(
        snapshot.previous_in_order.map(|tag| tag.name).as_deref(),
        Some("v2.1.7-release")
    );
    assert_eq!(
        outputs::read_value(&paths.version_code("release")).unwrap().as_deref(),
        Some("8")
    );
    assert_eq!(
        fs::read_to_string(paths.changelog("release")).unwrap(),
        result.changelog
    );
}

#[test]
fn test_steps_read_the_written_snapshot() {
    let mut repo = release_history();
    let output = TempDir::new().unwrap();
    let workflow = Workflow::open(&args(&repo, &output, None)).unwrap();

    workflow.write_snapshot("release").unwrap();

    // A tag created after the snapshot does not change later steps
    let c5 = repo.commit("Later work");
    repo.tag("v2.1.9-release", c5);

    assert_eq!(workflow.write_version_code("release").unwrap(), Some(8));
    assert_eq!(workflow.last_tag("release").unwrap().name, "v2.1.9-release");
}

#[test]
fn test_changelog_without_snapshot() {
    let repo = release_history();
    let output = TempDir::new().unwrap();
    let workflow = Workflow::open(&args(&repo, &output, None)).unwrap();

    assert_eq!(workflow.write_changelog("release").unwrap(), NOT_GENERATED_MESSAGE);
}

#[test]
fn test_untagged_repository_uses_stub() {
    let mut repo = TestRepo::new();
    repo.commit("Initial commit\n\nCHANGELOG: [SHOP-1] First build");
    let output = TempDir::new().unwrap();
    let workflow = Workflow::open(&args(&repo, &output, None)).unwrap();

    let result = workflow.run_all("debug", "app-debug.aab").unwrap();
    assert_eq!(result.version_code, Some(1));
    assert_eq!(result.version_name.as_deref(), Some("0.0"));
    assert_eq!(result.changelog, "• [SHOP-1] First build");
}

#[test]
fn test_untagged_repository_without_stub_fails() {
    let mut repo = TestRepo::new();
    repo.commit("Initial commit");
    let output = TempDir::new().unwrap();
    let config = config_file("[tag]\nuse_stubs_for_tag_as_fallback = false\n");
    let workflow = Workflow::open(&args(&repo, &output, Some(&config))).unwrap();

    let err = workflow.run_all("debug", "app.apk").unwrap_err();
    assert!(format!("{:#}", err).contains("debug"));
    assert_eq!(
        fs::read_to_string(workflow.paths().version_code("debug")).unwrap(),
        "1"
    );
}

#[test]
fn test_next_tag() {
    let repo = release_history();
    let output = TempDir::new().unwrap();
    let workflow = Workflow::open(&args(&repo, &output, None)).unwrap();

    assert_eq!(workflow.next_tag("release").unwrap(), "v2.1.9-release");
}
