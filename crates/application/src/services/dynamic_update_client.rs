use ferrous_zone_domain::{CatalogEntry, DomainError, RecordType, UpdateAction};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::{ExternalTool, ToolOutput};

/// Applies dynamic updates through nsupdate.
///
/// Catalog membership is one PTR record per member zone; host records go
/// through [`DynamicUpdateClient::send_update`]. A lookup tool is optional and
/// only backs [`DynamicUpdateClient::query_dig`].
pub struct DynamicUpdateClient {
    updater: Arc<dyn ExternalTool>,
    lookup: Option<Arc<dyn ExternalTool>>,
}

impl DynamicUpdateClient {
    pub fn new(updater: Arc<dyn ExternalTool>, lookup: Option<Arc<dyn ExternalTool>>) -> Self {
        Self { updater, lookup }
    }

    pub fn can_query(&self) -> bool {
        self.lookup.is_some()
    }

    #[instrument(skip(self))]
    pub async fn add_zone(&self, catalog_zone: &str, domain: &str) -> Result<(), DomainError> {
        self.update_catalog(catalog_zone, domain, UpdateAction::Add).await
    }

    #[instrument(skip(self))]
    pub async fn delete_zone(&self, catalog_zone: &str, domain: &str) -> Result<(), DomainError> {
        self.update_catalog(catalog_zone, domain, UpdateAction::Delete).await
    }

    async fn update_catalog(
        &self,
        catalog_zone: &str,
        domain: &str,
        action: UpdateAction,
    ) -> Result<(), DomainError> {
        let script = CatalogEntry::new(catalog_zone, domain).render_update(action);
        debug!(script = %script, "Catalog update transaction");

        let output = self
            .updater
            .run(&[], Some(&script))
            .await
            .map_err(|e| DomainError::CatalogSyncError(e.to_string()))?;

        if output.success {
            debug!(stdout = %output.stdout, "nsupdate completed successfully");
            Ok(())
        } else {
            debug!(stderr = %output.stderr, "nsupdate failed");
            Err(DomainError::CatalogSyncError(output.stderr))
        }
    }

    /// Feeds an arbitrary update script to nsupdate. Errors carry nsupdate's
    /// stderr verbatim.
    #[instrument(skip(self, script))]
    pub async fn send_update(&self, script: &str) -> Result<(), DomainError> {
        debug!(script = %script, "Dynamic update transaction");
        let output = self.updater.run(&[], Some(script)).await?;
        if output.success {
            Ok(())
        } else {
            Err(DomainError::UpdateRejected(output.stderr))
        }
    }

    /// Raw lookup output for `record`. Types other than A, AAAA, PTR and
    /// CNAME are dropped.
    #[instrument(skip(self))]
    pub async fn query_dig(
        &self,
        record: &str,
        query_type: Option<&str>,
    ) -> Result<ToolOutput, DomainError> {
        let Some(lookup) = &self.lookup else {
            debug!("No lookup tool configured, unable to run queries");
            return Err(DomainError::LookupUnavailable);
        };

        let mut args = vec![record.to_string()];
        if let Some(record_type) = query_type.and_then(RecordType::from_str) {
            args.push(record_type.as_str().to_string());
        }
        args.push("+noall".to_string());
        args.push("+answer".to_string());

        debug!(args = ?args, "Calling lookup tool");
        lookup.run(&args, None).await
    }
}
