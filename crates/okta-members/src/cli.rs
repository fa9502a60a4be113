use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "okta-members")]
#[command(version)]
#[command(about = "Add and remove single list entries on Okta objects", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Provider config file (TOML); OKTA_* environment variables override it
    #[arg(short, long, global = true, env = "OKTA_MEMBERS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a value to its parent's list
    Create(MemberArgs),

    /// Show the member as last written (no remote call)
    Read(MemberArgs),

    /// Add a new value in place of a previous one
    Update {
        #[command(flatten)]
        member: MemberArgs,

        /// Value currently recorded for this member
        #[arg(long)]
        previous_value: String,
    },

    /// Remove a value from its parent's list
    Delete(MemberArgs),

    /// Resolve an import id of the form <parent_id>/<value>
    Import {
        /// Resource type name
        resource_type: String,

        /// Import id
        id: String,
    },

    /// List the resource types
    Resources,
}

#[derive(Args)]
pub struct MemberArgs {
    /// Resource type name, e.g. okta_app_oauth_post_logout_redirect_uri
    pub resource_type: String,

    /// Id of the application or authorization server
    #[arg(long)]
    pub parent_id: String,

    /// The list entry
    #[arg(long)]
    pub value: String,
}
