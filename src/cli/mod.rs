//! CLI module for Internhub
//!
//! - `serve`: run the HTTP API
//! - `reconcile`: repair team membership back-references

pub mod reconcile;
pub mod serve;

use clap::{Parser, Subcommand};

/// Internhub - internship and mentorship management API
#[derive(Parser)]
#[command(name = "internhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Re-sync team membership on member records
    Reconcile(reconcile::ReconcileArgs),
}
