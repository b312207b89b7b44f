//! Commit failures and rollback

mod common;

use bundle_core::{ErrorKind, ImportMode, TransferEngine, TransferError};
use bundle_fs::MemoryGateway;
use bundle_test_utils::fixtures;
use bundle_test_utils::gateway::FaultyGateway;
use common::{android_gateway, entries};
use pretty_assertions::assert_eq;

fn faulty_engine(
    configure: impl FnOnce(FaultyGateway<MemoryGateway>) -> FaultyGateway<MemoryGateway>,
) -> TransferEngine<FaultyGateway<MemoryGateway>> {
    TransferEngine::new(configure(FaultyGateway::new(android_gateway())))
}

#[tokio::test]
async fn test_failed_write_restores_files_already_written() {
    let engine = faulty_engine(|g| g.fail_write("converter/duration_rules.toml", "disk full"));

    let report = engine
        .import_report(&entries(fixtures::updated_android_files()), ImportMode::Full)
        .await;

    assert!(!report.ok);
    assert_eq!(report.error_kind, Some(ErrorKind::Write));
    assert_eq!(
        report.message,
        "Import failed: converter/duration_rules.toml -> disk full"
    );
    assert!(report.manual_recovery.is_empty());
    // Every file holds its pre-import content again
    assert_eq!(
        engine.gateway().inner().snapshot().await,
        android_gateway().snapshot().await
    );
}

#[tokio::test]
async fn test_rollback_restores_in_reverse_write_order() {
    let engine = faulty_engine(|g| g.fail_write("converter/duration_rules.toml", "disk full"));

    let err = engine
        .import(&entries(fixtures::updated_android_files()), ImportMode::Full)
        .await
        .unwrap_err();

    assert_eq!(
        engine.gateway().writes(),
        vec![
            "config.toml",
            "meta/bundle.toml",
            "converter/interval_processor_config.toml",
            "converter/alias_mapping.toml",
            "converter/duration_rules.toml",
            "converter/alias_mapping.toml",
            "converter/interval_processor_config.toml",
            "meta/bundle.toml",
            "config.toml",
        ]
    );
    let TransferError::Write { rollback, .. } = err else {
        panic!("expected a write error");
    };
    let restored: Vec<_> = rollback.restored.iter().map(|p| p.as_str()).collect();
    assert_eq!(
        restored,
        vec![
            "converter/alias_mapping.toml",
            "converter/interval_processor_config.toml",
            "meta/bundle.toml",
            "config.toml",
        ]
    );
}

#[tokio::test]
async fn test_first_write_failure_needs_no_rollback() {
    let engine = faulty_engine(|g| g.fail_write("config.toml", "read-only file system"));

    let err = engine
        .import(&entries(fixtures::updated_android_files()), ImportMode::Full)
        .await
        .unwrap_err();

    let TransferError::Write { rollback, .. } = err else {
        panic!("expected a write error");
    };
    assert!(rollback.restored.is_empty());
    assert!(!rollback.needs_manual_recovery());
    assert_eq!(engine.gateway().writes(), vec!["config.toml"]);
}

#[tokio::test]
async fn test_failed_restore_is_reported_for_manual_recovery() {
    let engine = faulty_engine(|g| {
        g.fail_write("converter/duration_rules.toml", "disk full")
            .fail_write_attempt("meta/bundle.toml", 2, "disk full")
    });

    let report = engine
        .import_report(&entries(fixtures::updated_android_files()), ImportMode::Full)
        .await;

    assert!(!report.ok);
    assert_eq!(
        report.message,
        "Import failed: converter/duration_rules.toml -> disk full \
         (rollback failed for meta/bundle.toml; manual recovery required)"
    );
    assert_eq!(report.manual_recovery.len(), 1);
    assert_eq!(report.manual_recovery[0].as_str(), "meta/bundle.toml");

    let inner = engine.gateway().inner();
    // The manifest keeps its new content; the others were restored
    let manifest = inner.get("meta/bundle.toml").await.unwrap();
    assert!(manifest.contains("bundle_name = \"updated\""));
    assert_eq!(
        inner.get("config.toml").await,
        android_gateway().get("config.toml").await
    );
}

#[tokio::test]
async fn test_rollback_continues_past_failed_restore() {
    let engine = faulty_engine(|g| {
        g.fail_write("reports/markdown/day.toml", "quota exceeded")
            .fail_write_attempt("converter/alias_mapping.toml", 2, "io error")
    });

    let err = engine
        .import(&entries(fixtures::updated_android_files()), ImportMode::Full)
        .await
        .unwrap_err();

    let TransferError::Write { rollback, .. } = err else {
        panic!("expected a write error");
    };
    assert_eq!(rollback.failed.len(), 1);
    assert_eq!(rollback.restored.len(), 4);
    assert!(rollback.restored.iter().all(|p| p.as_str() != "converter/alias_mapping.toml"));
}

#[tokio::test]
async fn test_partial_import_rollback_only_touches_targets() {
    let engine = faulty_engine(|g| g.fail_write("reports/markdown/week.toml", "disk full"));
    let supplied = entries(vec![
        ("day.toml".into(), "title = \"D\"\n".into()),
        ("week.toml".into(), "title = \"W\"\n".into()),
    ]);

    let err = engine.import(&supplied, ImportMode::Partial).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Write);
    assert_eq!(
        engine.gateway().writes(),
        vec![
            "reports/markdown/day.toml",
            "reports/markdown/week.toml",
            "reports/markdown/day.toml",
        ]
    );
    assert_eq!(
        engine.gateway().inner().snapshot().await,
        android_gateway().snapshot().await
    );
}
