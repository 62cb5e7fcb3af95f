//! Tests for BranchService over file and in-memory sources

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use branchtree::application::services::BranchService;
use branchtree::application::ApplicationError;
use branchtree::config::Settings;
use branchtree::domain::{DomainError, OrphanPolicy, TreeBuilder};
use branchtree::infrastructure::{
    BranchSource, RealFileSystem, ServiceContainer, StaticSource, TomlFileSource,
};
use branchtree::util::testing::{init_test_setup, sample_branches};

fn resource(name: &str) -> PathBuf {
    Path::new("tests/resources/branches").join(name)
}

fn file_service(path: PathBuf, policy: OrphanPolicy) -> BranchService {
    let source = TomlFileSource::new(Arc::new(RealFileSystem), path);
    BranchService::new(
        Arc::new(source),
        TreeBuilder::new().with_orphan_policy(policy),
    )
}

#[test]
fn given_project_file_when_listing_roots_then_returns_both_projects() {
    init_test_setup();
    // Arrange
    let service = file_service(resource("project.toml"), OrphanPolicy::Drop);

    // Act
    let roots = service.roots().unwrap();

    // Assert
    let display: Vec<_> = roots.iter().map(|r| r.to_display_string()).collect();
    assert_eq!(
        display,
        vec!["$/Project/Main [2 children]", "$/Other/Main [0 children]"]
    );
}

#[test]
fn given_project_file_when_finding_folder_above_branches_then_returns_root() {
    let service = file_service(resource("project.toml"), OrphanPolicy::Drop);

    let exact = service.find_root("$/Project", true).unwrap();
    let contains = service.find_root("$/Project", false).unwrap();

    assert!(exact.is_none());
    assert_eq!(contains.unwrap().path(), "$/Project/Main");
}

#[test]
fn given_project_file_when_listing_descendants_then_returns_subtree() {
    let service = file_service(resource("project.toml"), OrphanPolicy::Drop);

    let below: Vec<_> = service
        .descendants("$/Project/Dev", None)
        .unwrap()
        .iter()
        .map(|n| n.path().to_string())
        .collect();

    assert_eq!(below, vec!["$/Project/Feature"]);
}

#[test]
fn given_orphan_file_when_building_then_reports_orphans() {
    let service = file_service(resource("orphans.toml"), OrphanPolicy::Drop);

    assert_eq!(service.orphans().unwrap(), vec!["$/Lost/Dev"]);
    assert_eq!(service.roots().unwrap().len(), 1);
}

#[test]
fn given_orphan_file_and_promote_policy_when_building_then_orphan_becomes_root() {
    let service = file_service(resource("orphans.toml"), OrphanPolicy::Promote);

    let roots = service.roots().unwrap();

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[1].path(), "$/Lost/Dev");
    assert_eq!(roots[1].children()[0].path(), "$/Lost/Dev/Hotfix");
}

#[test]
fn given_ambiguous_file_when_building_then_fails_with_domain_error() {
    let service = file_service(resource("ambiguous.toml"), OrphanPolicy::Drop);

    let result = service.roots();

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::ParentAmbiguity { .. }))
    ));
}

#[test]
fn given_missing_file_when_reading_then_error_is_not_found() {
    let service = file_service(resource("does-not-exist.toml"), OrphanPolicy::Drop);

    let err = service.roots().unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("read branches"));
}

#[test]
fn given_malformed_file_when_reading_then_fails_without_not_found() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[[branch]]\nparent_path = 3\n").unwrap();
    let service = file_service(path, OrphanPolicy::Drop);

    // Act
    let err = service.roots().unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(!err.is_not_found());
}

#[test]
fn given_static_source_when_querying_then_builds_fresh_forest_each_call() {
    let source = Arc::new(StaticSource::new(sample_branches()));
    assert_eq!(source.branches().unwrap().len(), 5);
    let service = BranchService::new(source, TreeBuilder::new());

    let first = service.roots().unwrap();
    let second = service.roots().unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_container_with_branches_file_when_wiring_then_uses_settings() {
    // Arrange
    let settings = Settings {
        branches_file: Some(resource("orphans.toml")),
        exact_match: true,
        orphan_policy: OrphanPolicy::Promote,
    };

    // Act
    let service = ServiceContainer::new(settings).branch_service().unwrap();

    // Assert
    assert_eq!(service.roots().unwrap().len(), 2);
}
