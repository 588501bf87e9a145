//! Existence service
//!
//! Decides whether a data manager's output is already present in its lookup
//! tables so the job can be skipped. Tables are fetched fresh on every check.

use async_trait::async_trait;
use datamgr_core::domain::job::ResolvedInputs;
use datamgr_core::domain::table::VALUE_COLUMN;
use std::sync::Arc;
use tracing::debug;

use crate::config::SkipPolicy;
use crate::error::ProvisionError;
use crate::repository::TableRepository;

/// Service trait for lookup table existence checks
#[async_trait]
pub trait ExistenceService: Send + Sync {
    /// Checks whether `value` is present in the "value" column of `table`
    ///
    /// # Errors
    /// `TableNotFound` when the platform does not know the table and
    /// `ValueColumnMissing` when it has no "value" column. Both abort the run.
    async fn value_exists(&self, table: &str, value: &str) -> Result<bool, ProvisionError>;

    /// Checks whether every resolved input value is already in the tables
    ///
    /// Returns `false` when there are no tables or no inputs to look for.
    async fn already_provisioned(
        &self,
        tables: &[String],
        inputs: &ResolvedInputs,
    ) -> Result<bool, ProvisionError>;
}

/// Standard implementation of ExistenceService
pub struct StandardExistenceService {
    tables: Arc<dyn TableRepository>,
    policy: SkipPolicy,
}

impl StandardExistenceService {
    pub fn new(tables: Arc<dyn TableRepository>, policy: SkipPolicy) -> Self {
        Self { tables, policy }
    }

    /// Whether all input values are in one table, stopping at the first miss
    async fn table_holds_all(
        &self,
        table: &str,
        inputs: &ResolvedInputs,
    ) -> Result<bool, ProvisionError> {
        for value in inputs.values() {
            if !self.value_exists(table, value).await? {
                debug!("'{}' not found in table {}", value, table);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ExistenceService for StandardExistenceService {
    async fn value_exists(&self, table: &str, value: &str) -> Result<bool, ProvisionError> {
        let snapshot = self
            .tables
            .describe_table(table)
            .await
            .map_err(|e| ProvisionError::from_table_lookup(table, e))?;

        let index = snapshot
            .column_index(VALUE_COLUMN)
            .ok_or_else(|| ProvisionError::ValueColumnMissing {
                table: table.to_string(),
            })?;

        Ok(snapshot.has_value_at(index, value))
    }

    async fn already_provisioned(
        &self,
        tables: &[String],
        inputs: &ResolvedInputs,
    ) -> Result<bool, ProvisionError> {
        if inputs.is_empty() {
            return Ok(false);
        }

        match self.policy {
            SkipPolicy::LastTableWins => {
                // Each table overwrites the previous answer; only the last one counts.
                let mut present = false;
                for table in tables {
                    present = self.table_holds_all(table, inputs).await?;
                }
                Ok(present)
            }
            SkipPolicy::AllTables => {
                if tables.is_empty() {
                    return Ok(false);
                }
                for table in tables {
                    if !self.table_holds_all(table, inputs).await? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, FakePlatform};

    fn inputs(pairs: &[(&str, &str)]) -> ResolvedInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tables(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn service(platform: Arc<FakePlatform>, policy: SkipPolicy) -> StandardExistenceService {
        StandardExistenceService::new(platform, policy)
    }

    fn fasta_platform() -> FakePlatform {
        FakePlatform::new().with_table(
            "all_fasta",
            &["id", "value", "path"],
            &[&["1", "hg38", "/data/hg38.fa"]],
        )
    }

    #[tokio::test]
    async fn test_value_exists_in_value_column() {
        let svc = service(Arc::new(fasta_platform()), SkipPolicy::LastTableWins);

        assert!(svc.value_exists("all_fasta", "hg38").await.unwrap());
        assert!(!svc.value_exists("all_fasta", "hg19").await.unwrap());
        assert!(!svc.value_exists("all_fasta", "/data/hg38.fa").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_value_column() {
        let platform = FakePlatform::new().with_table(
            "bwa_indexes",
            &["id", "dbkey", "path"],
            &[&["hg38", "hg38", "/data/bwa/hg38"]],
        );
        let svc = service(Arc::new(platform), SkipPolicy::LastTableWins);

        let err = svc.value_exists("bwa_indexes", "hg38").await.unwrap_err();
        assert!(matches!(err, ProvisionError::ValueColumnMissing { ref table } if table == "bwa_indexes"));
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let svc = service(Arc::new(fasta_platform()), SkipPolicy::LastTableWins);

        let err = svc.value_exists("no_such_table", "hg38").await.unwrap_err();
        assert!(matches!(err, ProvisionError::TableNotFound { .. }));
        assert_eq!(err.to_string(), "Table no_such_table does not exist");
    }

    #[tokio::test]
    async fn test_every_check_fetches_fresh_snapshot() {
        let platform = Arc::new(fasta_platform());
        let svc = service(platform.clone(), SkipPolicy::LastTableWins);

        svc.value_exists("all_fasta", "hg38").await.unwrap();
        svc.value_exists("all_fasta", "hg38").await.unwrap();

        let describes = platform
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Describe(_)))
            .count();
        assert_eq!(describes, 2);
    }

    #[tokio::test]
    async fn test_all_inputs_must_be_present() {
        let platform = FakePlatform::new().with_table(
            "all_fasta",
            &["value", "name"],
            &[&["hg38", "Human"], &["Human (hg38)", ""]],
        );
        let svc = service(Arc::new(platform), SkipPolicy::LastTableWins);
        let targets = tables(&["all_fasta"]);

        let both = inputs(&[("dbkey", "hg38"), ("name", "Human (hg38)")]);
        assert!(svc.already_provisioned(&targets, &both).await.unwrap());

        let partial = inputs(&[("dbkey", "hg38"), ("name", "Human (GRCh38)")]);
        assert!(!svc.already_provisioned(&targets, &partial).await.unwrap());
    }

    #[tokio::test]
    async fn test_last_table_wins() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_table("a", &["value"], &[&["hg38"]])
                .with_table("b", &["value"], &[]),
        );
        let svc = service(platform, SkipPolicy::LastTableWins);
        let item = inputs(&[("dbkey", "hg38")]);

        // A present, B absent: B's answer overrides A's.
        assert!(!svc.already_provisioned(&tables(&["a", "b"]), &item).await.unwrap());
        // A absent, B present: still decided by the last table.
        assert!(svc.already_provisioned(&tables(&["b", "a"]), &item).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_tables_policy() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_table("a", &["value"], &[&["hg38"]])
                .with_table("b", &["value"], &[])
                .with_table("c", &["value"], &[&["hg38"]]),
        );
        let svc = service(platform, SkipPolicy::AllTables);
        let item = inputs(&[("dbkey", "hg38")]);

        assert!(!svc.already_provisioned(&tables(&["a", "b"]), &item).await.unwrap());
        assert!(!svc.already_provisioned(&tables(&["b", "a"]), &item).await.unwrap());
        assert!(svc.already_provisioned(&tables(&["a", "c"]), &item).await.unwrap());
        assert!(!svc.already_provisioned(&[], &item).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_inputs_never_provisioned() {
        let platform = Arc::new(fasta_platform());
        let svc = service(platform.clone(), SkipPolicy::LastTableWins);

        let provisioned = svc
            .already_provisioned(&tables(&["all_fasta"]), &ResolvedInputs::new())
            .await
            .unwrap();

        assert!(!provisioned);
        assert!(platform.events().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_table_aborts_check() {
        let svc = service(Arc::new(fasta_platform()), SkipPolicy::LastTableWins);
        let item = inputs(&[("dbkey", "hg38")]);

        let err = svc
            .already_provisioned(&tables(&["all_fasta", "missing"]), &item)
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::TableNotFound { ref table, .. } if table == "missing"));
    }
}
