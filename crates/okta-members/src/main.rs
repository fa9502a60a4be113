mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Command, MemberArgs};
use member_framework::tracing::setup_tracing;
use member_framework::{ManagedResource, MemberConfig, MemberHandle};
use okta_members::config::ProviderConfig;
use okta_members::lifecycle::Provider;
use okta_members::resources::TYPE_NAMES;
use tracing::info;

fn lookup<'a>(provider: &'a Provider, type_name: &str) -> Result<&'a dyn ManagedResource> {
    provider.resource(type_name).ok_or_else(|| {
        anyhow!(
            "unknown resource type {:?}, expected one of: {}",
            type_name,
            TYPE_NAMES.join(", ")
        )
    })
}

fn config_of(args: &MemberArgs) -> MemberConfig {
    MemberConfig::new(args.parent_id.clone(), args.value.clone())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    if let Command::Resources = cli.command {
        for name in TYPE_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let config = ProviderConfig::load(cli.config.as_deref()).context("loading provider config")?;
    let provider = Provider::new(config).context("building Okta client")?;

    match cli.command {
        Command::Create(args) => {
            let resource = lookup(&provider, &args.resource_type)?;
            let handle = resource
                .create(config_of(&args))
                .await
                .with_context(|| format!("creating {}", args.resource_type))?;
            info!(%handle, "Created");
            println!("{}", handle.id());
        }
        Command::Read(args) => {
            let resource = lookup(&provider, &args.resource_type)?;
            let handle = resource
                .read(MemberHandle::new(args.parent_id, args.value))
                .await?;
            println!("{handle}");
        }
        Command::Update {
            member,
            previous_value,
        } => {
            let resource = lookup(&provider, &member.resource_type)?;
            let previous = MemberHandle::new(member.parent_id.clone(), previous_value);
            let handle = resource
                .update(&previous, config_of(&member))
                .await
                .with_context(|| format!("updating {}", member.resource_type))?;
            info!(%handle, "Updated");
            println!("{}", handle.id());
        }
        Command::Delete(args) => {
            let resource = lookup(&provider, &args.resource_type)?;
            resource
                .delete(&MemberHandle::new(args.parent_id, args.value))
                .await
                .with_context(|| format!("deleting {}", args.resource_type))?;
            info!("Deleted");
        }
        Command::Import { resource_type, id } => {
            let resource = lookup(&provider, &resource_type)?;
            let handle = resource.import(&id)?;
            println!("parent_id = {}\nvalue = {}", handle.parent_id, handle.value);
        }
        Command::Resources => {}
    }

    Ok(())
}
