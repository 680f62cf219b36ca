//! Subcommand handlers.

use std::path::Path;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tfdkron_core::ProviderHost;
use tfdkron_protocols::error::Diagnostics;

use crate::state_file::{
    load_resource_config, load_state, remove_state, require_state, save_state,
};

fn report(diags: &Diagnostics) {
    for diagnostic in diags.iter() {
        eprintln!("{}", diagnostic);
    }
}

pub(crate) fn schema(host: &ProviderHost) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&host.schemas())?);
    Ok(())
}

pub(crate) fn validate(host: &ProviderHost, file: &Path, type_name: &str) -> Result<()> {
    let config = load_resource_config(file)?;
    let diags = host.validate(type_name, &config);
    report(&diags);
    if diags.has_error() {
        anyhow::bail!("{} is not a valid {} configuration", file.display(), type_name);
    }
    println!("{} is valid", file.display());
    Ok(())
}

pub(crate) async fn apply(
    host: &ProviderHost,
    file: &Path,
    state_path: &Path,
    type_name: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let config = load_resource_config(file)?;
    let state = match load_state(state_path)? {
        Some(prior) => {
            if prior.type_name != type_name {
                warn!(
                    "State tracks a {}, applying as that type instead of {}",
                    prior.type_name, type_name
                );
            }
            host.update(&prior, &config, cancel).await
        }
        None => host.create(type_name, &config, cancel).await,
    }?;

    save_state(state_path, &state)?;
    info!("Applied {} {}", state.type_name, state.id);
    Ok(())
}

pub(crate) async fn refresh(
    host: &ProviderHost,
    state_path: &Path,
    cancel: &CancellationToken,
) -> Result<()> {
    let prior = require_state(state_path)?;
    let state = host.read(&prior, cancel).await?;
    if state != prior {
        info!("{} {} changed remotely", state.type_name, state.id);
    }
    save_state(state_path, &state)?;
    Ok(())
}

pub(crate) async fn import(
    host: &ProviderHost,
    id: &str,
    state_path: &Path,
    type_name: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Some(existing) = load_state(state_path)? {
        anyhow::bail!(
            "{} already tracks {} {}",
            state_path.display(),
            existing.type_name,
            existing.id
        );
    }
    let state = host.import(type_name, id, cancel).await?;
    save_state(state_path, &state)?;
    info!("Imported {} {}", state.type_name, state.id);
    Ok(())
}

pub(crate) async fn destroy(
    host: &ProviderHost,
    state_path: &Path,
    cancel: &CancellationToken,
) -> Result<()> {
    let state = require_state(state_path)?;
    host.delete(&state, cancel).await?;
    remove_state(state_path)?;
    info!("Destroyed {} {}", state.type_name, state.id);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
