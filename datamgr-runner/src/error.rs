//! Fatal run errors
//!
//! Everything in here aborts the run. Per-job problems (a failed submission,
//! an `error` outcome, a failed reload) are logged and recorded in the run
//! report instead.

use datamgr_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The platform does not know the table (misconfiguration)
    #[error("Table {table} does not exist")]
    TableNotFound {
        table: String,
        #[source]
        source: ClientError,
    },

    /// The table has no column named "value" (misconfiguration)
    #[error("Table {table} has no 'value' column")]
    ValueColumnMissing { table: String },

    /// The platform could not be reached while checking a table
    #[error("Failed to query table {table}")]
    TableQuery {
        table: String,
        #[source]
        source: ClientError,
    },
}

impl ProvisionError {
    /// Classifies a failed table lookup
    ///
    /// Any answer from the platform means the table is unknown to it; no
    /// answer at all is a connectivity problem.
    pub fn from_table_lookup(table: &str, source: ClientError) -> Self {
        if source.is_api_response() {
            ProvisionError::TableNotFound {
                table: table.to_string(),
                source,
            }
        } else {
            ProvisionError::TableQuery {
                table: table.to_string(),
                source,
            }
        }
    }
}
