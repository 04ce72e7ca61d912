use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use atlassian::confluence;
use debian::creator::{AssemblyError, DebPackageCreator, PackageCreator};
use types::config::{resolve_config, PackageConfig, ResolveError};
use types::version::upstream_version;

use super::args::CreateDebArgs;

#[derive(Debug, Error)]
pub enum CreateDebError {
    #[error("parameter {0} missing")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

type Result<T> = std::result::Result<T, CreateDebError>;

pub fn run_create_deb() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CreateDebArgs::parse();
    let creator = DebPackageCreator::new();
    execute(&args, confluence::default_config(), &creator)
}

/// Resolves the package configuration and hands the archive to the creator.
///
/// The archive path is checked before anything else. The application version
/// naming the directory inside the archive comes from `--atlassian-version`,
/// or failing that is derived from `--version` by cutting at the first `-`,
/// so "6.1.2-1" unpacks as "atlassian-confluence-6.1.2".
pub fn execute(
    args: &CreateDebArgs,
    default: PackageConfig,
    creator: &dyn PackageCreator,
) -> Result<()> {
    let archive_path = match args.path.as_deref() {
        Some(path) if !path.is_empty() => path,
        _ => return Err(CreateDebError::MissingParameter("path")),
    };

    let app_version = match args.atlassian_version.as_deref() {
        Some(version) if !version.is_empty() => version.to_string(),
        _ => upstream_version(args.version.as_deref().unwrap_or("")).to_string(),
    };

    let config_path = args
        .config
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| PathBuf::from(shellexpand::tilde(path).to_string()));
    let config = resolve_config(
        default,
        config_path.as_deref(),
        args.version.as_deref(),
    )?;

    let source_dir_name = format!("{}-{}", config.name, app_version);
    let archive = PathBuf::from(shellexpand::tilde(archive_path).to_string());
    let target_dir = PathBuf::from(shellexpand::tilde(&args.target).to_string());

    let package_path = creator.create_package(&archive, &config, &source_dir_name, &target_dir)?;
    info!("Created {}", package_path.display());
    Ok(())
}
