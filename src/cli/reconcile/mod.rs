//! Reconcile command - walks every team and repairs member back-references

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::organization::OrganizationId;
use crate::infrastructure::logging;

/// Arguments for the reconcile command
#[derive(Args, Clone, Debug)]
pub struct ReconcileArgs {
    /// Only reconcile the teams of this organization
    #[arg(long)]
    pub organization_id: Option<String>,
}

/// Run one reconciliation pass against the configured store
pub async fn run(args: ReconcileArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let organization_id = args
        .organization_id
        .map(OrganizationId::new)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let store = crate::open_store(&config).await?;
    let state = crate::create_app_state(store);

    let report = state
        .team_service
        .reconcile(organization_id.as_ref())
        .await?;

    info!(
        teams_checked = report.teams_checked,
        links_added = report.links_added,
        links_removed = report.links_removed,
        "Reconciliation finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
