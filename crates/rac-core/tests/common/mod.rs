use rac_core::WizardBuilder;
use tempfile::TempDir;

/// Helper function to create a test wizard
pub async fn create_test_wizard() -> (TempDir, rac_core::Wizard) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let wizard = WizardBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create wizard");
    (temp_dir, wizard)
}
