//! Subcommand implementations

use ipgeo_core::{GeoOracle, MaxMindOracle, SkillConfig, SkillConfigBuilder, SkillRouter};
use ipgeo_http::{HttpRuntimeConfigBuilder, SkillRuntime};
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

use crate::error::CliError;

/// Skill settings from the environment, with the database path flag
/// taking precedence.
fn skill_config(database: Option<PathBuf>) -> Result<SkillConfig, CliError> {
    let mut builder = SkillConfigBuilder::from_env()?;
    if let Some(path) = database {
        builder = builder.database_path(path);
    }
    Ok(builder.build()?)
}

fn maxmind_router(database: Option<PathBuf>) -> Result<SkillRouter<MaxMindOracle>, CliError> {
    let config = skill_config(database)?;
    let oracle = MaxMindOracle::from_config(&config)?;
    Ok(SkillRouter::new(oracle, config))
}

pub async fn serve(bind: Option<SocketAddr>, database: Option<PathBuf>) -> Result<(), CliError> {
    let router = maxmind_router(database)?;

    let mut http = HttpRuntimeConfigBuilder::from_env()?;
    if let Some(addr) = bind {
        http = http.bind_addr(addr);
    }
    let http = http.build()?;

    let runtime = SkillRuntime::new(router).map_err(|e| CliError::Metrics(e.to_string()))?;
    runtime.serve(http).await.map_err(CliError::Server)
}

pub async fn invoke(event: &str, database: Option<PathBuf>) -> Result<String, CliError> {
    let body = read_event(event)?;
    let router = maxmind_router(database)?;
    invoke_with(&router, &body).await
}

pub async fn lookup(address: &str, database: Option<PathBuf>) -> Result<String, CliError> {
    let router = maxmind_router(database)?;
    lookup_with(&router, address).await
}

/// Route one raw envelope and pretty-print the outbound envelope.
pub async fn invoke_with<O: GeoOracle>(
    router: &SkillRouter<O>,
    body: &[u8],
) -> Result<String, CliError> {
    let (outcome, response) = router.handle_json(body).await?;
    info!(outcome = %outcome, "Invocation finished");
    Ok(serde_json::to_string_pretty(&response)?)
}

/// The sentence the skill would speak for one typed address.
pub async fn lookup_with<O: GeoOracle>(
    router: &SkillRouter<O>,
    address: &str,
) -> Result<String, CliError> {
    let turn = router.lookup_dotted(address.trim()).await?;
    info!(address, outcome = %turn.outcome, "Lookup finished");
    Ok(turn.speech.text)
}

/// Read an event from a file, or from stdin when the path is `-`.
fn read_event(path: &str) -> Result<Vec<u8>, CliError> {
    let read_error = |error| CliError::ReadEvent {
        path: path.to_string(),
        error,
    };

    if path == "-" {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .map_err(read_error)?;
        Ok(body)
    } else {
        std::fs::read(path).map_err(read_error)
    }
}
