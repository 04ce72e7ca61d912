use log::info;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use types::config::PackageConfig;

use crate::control::render_control;
use crate::execute::{execute_command, ExecuteError};

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Command(#[from] ExecuteError),

    #[error("source directory '{0}' not found in archive")]
    SourceDirMissing(String),
}

/// Turns an archive plus a resolved configuration into an installable
/// package file inside `target_dir`, returning the written package path.
pub trait PackageCreator {
    fn create_package(
        &self,
        archive_path: &Path,
        config: &PackageConfig,
        source_dir_name: &str,
        target_dir: &Path,
    ) -> Result<PathBuf, AssemblyError>;
}

/// Everything the assembly steps need to know, fixed before the pipeline
/// runs. `extract_dir` and `package_root` live inside one temporary workdir
/// so staging is a rename, not a copy.
#[derive(Debug, Default, Clone)]
pub struct AssemblyContext {
    pub archive_path: PathBuf,
    pub source_dir_name: String,
    pub extract_dir: PathBuf,
    pub package_root: PathBuf,
    pub output_path: PathBuf,
    pub config: PackageConfig,
}

pub trait AssemblyStep {
    fn step(&self) -> Result<(), AssemblyError>;
}

#[derive(Default)]
pub struct AssemblyPipeline {
    steps: Vec<Box<dyn AssemblyStep>>,
}

impl AssemblyPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step<T: AssemblyStep + 'static>(&mut self, step: T) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn execute(&self) -> Result<(), AssemblyError> {
        for step in &self.steps {
            step.step()?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ExtractArchive {
    archive_path: PathBuf,
    extract_dir: PathBuf,
}

impl From<AssemblyContext> for ExtractArchive {
    fn from(context: AssemblyContext) -> Self {
        ExtractArchive {
            archive_path: context.archive_path.clone(),
            extract_dir: context.extract_dir.clone(),
        }
    }
}

impl AssemblyStep for ExtractArchive {
    fn step(&self) -> Result<(), AssemblyError> {
        info!(
            "Extracting {} to {}",
            self.archive_path.display(),
            self.extract_dir.display()
        );
        fs::create_dir_all(&self.extract_dir)?;
        execute_command(
            "tar",
            [
                OsStr::new("zxf"),
                self.archive_path.as_os_str(),
                OsStr::new("-C"),
                self.extract_dir.as_os_str(),
            ],
            None,
        )?;
        Ok(())
    }
}

#[derive(Default)]
pub struct StagePayload {
    extract_dir: PathBuf,
    source_dir_name: String,
    package_root: PathBuf,
    package_name: String,
}

impl From<AssemblyContext> for StagePayload {
    fn from(context: AssemblyContext) -> Self {
        StagePayload {
            extract_dir: context.extract_dir.clone(),
            source_dir_name: context.source_dir_name.clone(),
            package_root: context.package_root.clone(),
            package_name: context.config.name.clone(),
        }
    }
}

impl AssemblyStep for StagePayload {
    fn step(&self) -> Result<(), AssemblyError> {
        let source_dir = self.extract_dir.join(&self.source_dir_name);
        if !source_dir.is_dir() {
            return Err(AssemblyError::SourceDirMissing(
                self.source_dir_name.clone(),
            ));
        }
        let payload_dir = self.package_root.join("opt").join(&self.package_name);
        // extract_dir and package_root share a workdir, so this stays a
        // same-filesystem rename
        fs::create_dir_all(self.package_root.join("opt"))?;
        fs::rename(&source_dir, &payload_dir)?;
        info!("Staged payload at {}", payload_dir.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct WriteControl {
    package_root: PathBuf,
    config: PackageConfig,
}

impl From<AssemblyContext> for WriteControl {
    fn from(context: AssemblyContext) -> Self {
        WriteControl {
            package_root: context.package_root.clone(),
            config: context.config.clone(),
        }
    }
}

impl AssemblyStep for WriteControl {
    fn step(&self) -> Result<(), AssemblyError> {
        let debian_dir = self.package_root.join("DEBIAN");
        fs::create_dir_all(&debian_dir)?;
        fs::write(debian_dir.join("control"), render_control(&self.config))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct BuildDeb {
    package_root: PathBuf,
    output_path: PathBuf,
}

impl From<AssemblyContext> for BuildDeb {
    fn from(context: AssemblyContext) -> Self {
        BuildDeb {
            package_root: context.package_root.clone(),
            output_path: context.output_path.clone(),
        }
    }
}

impl AssemblyStep for BuildDeb {
    fn step(&self) -> Result<(), AssemblyError> {
        if let Some(parent) = self.output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Building package {}", self.output_path.display());
        execute_command(
            "dpkg-deb",
            [
                OsStr::new("--build"),
                OsStr::new("--root-owner-group"),
                self.package_root.as_os_str(),
                self.output_path.as_os_str(),
            ],
            None,
        )?;
        Ok(())
    }
}

pub fn deb_file_name(config: &PackageConfig) -> String {
    format!(
        "{}_{}_{}.deb",
        config.name, config.version, config.architecture
    )
}

#[derive(Default)]
pub struct DebPackageCreator;

impl DebPackageCreator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PackageCreator for DebPackageCreator {
    fn create_package(
        &self,
        archive_path: &Path,
        config: &PackageConfig,
        source_dir_name: &str,
        target_dir: &Path,
    ) -> Result<PathBuf, AssemblyError> {
        let workdir = TempDir::new()?;
        let output_path = target_dir.join(deb_file_name(config));
        let context = AssemblyContext {
            archive_path: archive_path.to_path_buf(),
            source_dir_name: source_dir_name.to_string(),
            extract_dir: workdir.path().join("extract"),
            package_root: workdir.path().join("pkgroot"),
            output_path: output_path.clone(),
            config: config.clone(),
        };
        info!("Using assembly context: {:#?}", context);

        let mut pipeline = AssemblyPipeline::new();
        pipeline
            .add_step(ExtractArchive::from(context.clone()))
            .add_step(StagePayload::from(context.clone()))
            .add_step(WriteControl::from(context.clone()))
            .add_step(BuildDeb::from(context));
        pipeline.execute()?;

        info!("Created package {}", output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    // Builds a small tar.gz holding <source_dir_name>/confluence.cfg so the
    // extraction and staging steps have something real to work on.
    fn create_archive(dir: &Path, source_dir_name: &str) -> PathBuf {
        let source_dir = dir.join(source_dir_name);
        fs::create_dir_all(&source_dir).unwrap();
        let mut file = File::create(source_dir.join("confluence.cfg")).unwrap();
        writeln!(file, "test content").unwrap();

        let archive_path = dir.join("app.tar.gz");
        execute_command(
            "tar",
            [
                OsStr::new("czf"),
                archive_path.as_os_str(),
                OsStr::new("-C"),
                dir.as_os_str(),
                OsStr::new(source_dir_name),
            ],
            None,
        )
        .unwrap();
        archive_path
    }

    fn sample_config() -> PackageConfig {
        PackageConfig {
            name: "atlassian-confluence".to_string(),
            version: "6.1.2-1".to_string(),
            architecture: "all".to_string(),
            section: "web".to_string(),
            priority: "optional".to_string(),
            maintainer: "Atlassian Deb Tools <packages@localhost>".to_string(),
            description: "Atlassian Confluence".to_string(),
            depends: None,
            homepage: None,
        }
    }

    #[test]
    fn extract_archive_unpacks_into_extract_dir() {
        let dir = tempdir().unwrap();
        let archive_path = create_archive(dir.path(), "atlassian-confluence-6.1.2");

        let mut context = AssemblyContext::default();
        context.archive_path = archive_path;
        context.extract_dir = dir.path().join("extract");
        let step = ExtractArchive::from(context.clone());

        step.step().unwrap();
        assert!(context
            .extract_dir
            .join("atlassian-confluence-6.1.2/confluence.cfg")
            .exists());
    }

    #[test]
    fn stage_payload_moves_source_dir_under_opt() {
        let dir = tempdir().unwrap();
        let extract_dir = dir.path().join("extract");
        fs::create_dir_all(extract_dir.join("atlassian-confluence-6.1.2")).unwrap();

        let mut context = AssemblyContext::default();
        context.extract_dir = extract_dir;
        context.source_dir_name = "atlassian-confluence-6.1.2".to_string();
        context.package_root = dir.path().join("pkgroot");
        context.config = sample_config();
        let step = StagePayload::from(context.clone());

        step.step().unwrap();
        assert!(context
            .package_root
            .join("opt/atlassian-confluence")
            .is_dir());
        assert!(!context
            .extract_dir
            .join("atlassian-confluence-6.1.2")
            .exists());
    }

    #[test]
    fn stage_payload_fails_on_missing_source_dir() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("extract")).unwrap();

        let mut context = AssemblyContext::default();
        context.extract_dir = dir.path().join("extract");
        context.source_dir_name = "atlassian-confluence-6.1.2".to_string();
        context.package_root = dir.path().join("pkgroot");
        context.config = sample_config();
        let step = StagePayload::from(context);

        match step.step() {
            Err(AssemblyError::SourceDirMissing(name)) => {
                assert_eq!(name, "atlassian-confluence-6.1.2");
            }
            other => panic!("expected SourceDirMissing, got {:?}", other),
        }
    }

    #[test]
    fn write_control_creates_the_control_file() {
        let dir = tempdir().unwrap();

        let mut context = AssemblyContext::default();
        context.package_root = dir.path().to_path_buf();
        context.config = sample_config();
        let step = WriteControl::from(context);

        step.step().unwrap();
        let control = fs::read_to_string(dir.path().join("DEBIAN/control")).unwrap();
        assert!(control.starts_with("Package: atlassian-confluence\n"));
        assert!(control.contains("Version: 6.1.2-1\n"));
    }

    #[test]
    fn deb_file_name_joins_name_version_arch() {
        assert_eq!(
            deb_file_name(&sample_config()),
            "atlassian-confluence_6.1.2-1_all.deb"
        );
    }

    #[test]
    #[ignore] // needs dpkg-deb installed
    fn create_package_builds_a_deb() {
        let dir = tempdir().unwrap();
        let archive_path = create_archive(dir.path(), "atlassian-confluence-6.1.2");
        let target_dir = dir.path().join("out");

        let creator = DebPackageCreator::new();
        let deb_path = creator
            .create_package(
                &archive_path,
                &sample_config(),
                "atlassian-confluence-6.1.2",
                &target_dir,
            )
            .unwrap();

        assert_eq!(
            deb_path,
            target_dir.join("atlassian-confluence_6.1.2-1_all.deb")
        );
        assert!(deb_path.exists());
    }

    #[test]
    fn create_package_relays_missing_source_dir() {
        let dir = tempdir().unwrap();
        let archive_path = create_archive(dir.path(), "some-other-dir");
        let target_dir = dir.path().join("out");

        let creator = DebPackageCreator::new();
        let result = creator.create_package(
            &archive_path,
            &sample_config(),
            "atlassian-confluence-6.1.2",
            &target_dir,
        );

        assert!(matches!(result, Err(AssemblyError::SourceDirMissing(_))));
        assert!(!target_dir.exists());
    }
}
