//! Command handlers

use anyhow::{Context, Result, bail};
use colored::Colorize;
use pagesmith_builder::{
    BuilderConfig, BuilderStore, CreditWallet, FileProjectService, Gateway, HttpServices,
};
use pagesmith_builder::services::ProjectService;
use pagesmith_ir::serialization::{
    default_file_name, is_project_file, load_project, preview_project, save_project,
};
use pagesmith_ir::{Category, ComponentKind, Framework, Project, ProjectId, Validator};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

// =============================================================================
// CATALOG
// =============================================================================

/// List component kinds, optionally one category or one kind's fields
pub fn catalog(out: &mut impl Write, category: Option<&str>, kind: Option<&str>) -> Result<()> {
    if let Some(name) = kind {
        let kind = ComponentKind::from_name(name)
            .with_context(|| format!("Unknown component type '{}'", name))?;
        writeln!(out, "{} ({}, {})", kind.label().bold(), kind, kind.category())?;
        for spec in kind.fields() {
            writeln!(out, "  {:<22} {:<12} {}", spec.key, spec.kind.expected(), spec.label)?;
        }
        return Ok(());
    }

    let categories: Vec<Category> = match category {
        Some(name) => vec![
            Category::parse(name).with_context(|| format!("Unknown category '{}'", name))?,
        ],
        None => Category::all().to_vec(),
    };

    for category in categories {
        let kinds = ComponentKind::by_category(category);
        if kinds.is_empty() {
            continue;
        }
        writeln!(out, "{}", category.display_name().bold())?;
        for kind in kinds {
            writeln!(out, "  {:<22} {}", kind.name().cyan(), kind.label())?;
        }
    }
    Ok(())
}

// =============================================================================
// LOCAL PROJECTS
// =============================================================================

/// Create an empty project file
pub fn new_project(out: &mut impl Write, name: &str, dir: &Path) -> Result<PathBuf> {
    if name.trim().is_empty() {
        bail!("Project name cannot be empty");
    }
    let path = dir.join(default_file_name(name));
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let project = Project::new(name);
    save_project(&project, &path)?;
    info!(id = %project.id, path = %path.display(), "project created");
    writeln!(out, "{} {} ({})", "Created".green(), path.display(), project.id)?;
    Ok(path)
}

/// Print a summary of a project file
pub fn info(out: &mut impl Write, path: &Path) -> Result<()> {
    let project = load_project(path)?;
    let preview = preview_project(path)?;

    writeln!(out, "{}", preview.name.bold())?;
    writeln!(out, "  id:          {}", project.id)?;
    writeln!(out, "  components:  {}", preview.component_count)?;
    if !preview.categories.is_empty() {
        let names: Vec<&str> = preview.categories.iter().map(|c| c.display_name()).collect();
        writeln!(out, "  categories:  {}", names.join(", "))?;
    }
    if let Some(updated) = preview.updated_at {
        writeln!(out, "  updated:     {}", updated.format("%Y-%m-%d %H:%M"))?;
    }
    Ok(())
}

/// Validate a project file, or every project file under a directory
///
/// Returns the number of files with errors.
pub fn validate(out: &mut impl Write, path: &Path, strict: bool) -> Result<usize> {
    let files: Vec<PathBuf> = if path.is_dir() {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_project_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect()
    } else {
        vec![path.to_path_buf()]
    };

    if files.is_empty() {
        writeln!(out, "{}", "No project files found".yellow())?;
        return Ok(0);
    }

    let validator = Validator::with_default_rules();
    let mut failed = 0;

    for file in &files {
        let result = match load_project(file) {
            Ok(project) => validator.validate_project(&project),
            Err(e) => {
                failed += 1;
                writeln!(out, "{} {}: {}", "✗".red(), file.display(), e)?;
                continue;
            }
        };

        let failing = result.has_errors() || (strict && result.has_warnings());
        if failing {
            failed += 1;
            writeln!(out, "{} {}", "✗".red(), file.display())?;
        } else {
            writeln!(out, "{} {}", "✓".green(), file.display())?;
        }
        for error in &result.errors {
            writeln!(out, "    {} {}", "error:".red(), error)?;
            if let Some(suggestion) = &error.suggestion {
                writeln!(out, "      {}", suggestion.dimmed())?;
            }
        }
        for warning in &result.warnings {
            writeln!(out, "    {}", warning.to_string().yellow())?;
        }
    }

    writeln!(out, "{} checked, {} failed", files.len(), failed)?;
    Ok(failed)
}

// =============================================================================
// REMOTE
// =============================================================================

/// Fetch a project from the API into the local projects directory
pub async fn pull(out: &mut impl Write, config: &BuilderConfig, id: ProjectId) -> Result<PathBuf> {
    let remote = HttpServices::new(config)?;
    let project = remote.fetch_project(id).await?;
    // Decode once so a broken payload fails here rather than in the shell
    project.decoded_content()?;

    let path = FileProjectService::new(&config.projects_dir).insert(&project)?;
    writeln!(out, "{} {} -> {}", "Pulled".green(), project.name, path.display())?;
    Ok(path)
}

/// Upload a local project file's content
pub async fn push(out: &mut impl Write, config: &BuilderConfig, path: &Path) -> Result<()> {
    let gateway = Gateway::from_config(config)?;
    push_with(out, &gateway, config, path).await
}

/// Upload through an existing gateway
pub async fn push_with(
    out: &mut impl Write,
    gateway: &Gateway,
    config: &BuilderConfig,
    path: &Path,
) -> Result<()> {
    let project = load_project(path)?;
    let mut store = BuilderStore::create(config);
    store.initialize_from_project(&project)?;

    gateway.save(project.id, &mut store).await?;
    writeln!(out, "{} {} ({} components)", "Pushed".green(), project.name, store.len())?;
    Ok(())
}

/// Save and export a local project through the API
pub async fn export(
    out: &mut impl Write,
    config: &BuilderConfig,
    path: &Path,
    framework: Option<Framework>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let gateway = Gateway::from_config(config)?;
    export_with(out, &gateway, config, path, framework, out_dir).await
}

/// Export through an existing gateway
pub async fn export_with(
    out: &mut impl Write,
    gateway: &Gateway,
    config: &BuilderConfig,
    path: &Path,
    framework: Option<Framework>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let project = load_project(path)?;
    let mut store = BuilderStore::create(config);
    store.initialize_from_project(&project)?;

    let mut wallet = CreditWallet::new(0);
    gateway.refresh_balance(&mut wallet).await?;
    writeln!(
        out,
        "Balance: {} credits, export costs {}",
        wallet.balance,
        gateway.export_cost()
    )?;

    let artifact = gateway
        .export(project.id, framework, &mut store, &mut wallet)
        .await?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let written = artifact.write_to(out_dir)?;

    if !wallet.reconciled {
        warn!(balance = wallet.balance, "credit balance not confirmed by server");
    }
    writeln!(
        out,
        "{} {} ({} bytes), {} credits left",
        "Exported".green(),
        written.display(),
        artifact.len(),
        wallet.balance
    )?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_builder::{CreditsService, ExportArtifact, ExportService};
    use pagesmith_ir::{BuilderError, BuilderResult, Component, ComponentId, ProjectContent};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Hosted API stand-in with a fixed balance
    struct FakeApi {
        balance: u64,
        fail_saves: bool,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn new(balance: u64) -> Arc<Self> {
            Arc::new(Self {
                balance,
                fail_saves: false,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl ProjectService for FakeApi {
        async fn fetch_project(&self, id: ProjectId) -> BuilderResult<Project> {
            Err(BuilderError::ProjectNotFound(id.to_string()))
        }

        async fn update_project(
            &self,
            _id: ProjectId,
            content: ProjectContent,
        ) -> BuilderResult<Project> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_saves {
                return Err(BuilderError::network("connection refused"));
            }
            Ok(Project::new("Remote").with_content(content))
        }
    }

    #[async_trait::async_trait]
    impl ExportService for FakeApi {
        async fn generate_export(
            &self,
            id: ProjectId,
            framework: Framework,
        ) -> BuilderResult<ExportArtifact> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExportArtifact::new(
                ExportArtifact::default_file_name(id, framework),
                b"zip".to_vec(),
            ))
        }
    }

    #[async_trait::async_trait]
    impl CreditsService for FakeApi {
        async fn balance(&self) -> BuilderResult<u64> {
            Ok(self.balance)
        }

        async fn deduct(&self, amount: u64) -> BuilderResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.balance.saturating_sub(amount))
        }
    }

    fn gateway(api: &Arc<FakeApi>, config: &BuilderConfig) -> Gateway {
        Gateway::new(api.clone(), api.clone(), api.clone(), config)
    }

    fn landing(dir: &Path) -> PathBuf {
        let path = dir.join("landing.pgs");
        let project = Project::new("Landing").with_content(ProjectContent::new(vec![
            Component::with_defaults(ComponentId::from("hero-1"), ComponentKind::Hero),
        ]));
        save_project(&project, &path).unwrap();
        path
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn catalog_filters_by_category() {
        let text = output(|out| catalog(out, Some("footer"), None));
        assert!(text.contains("footer"));
        assert!(!text.contains("navbar"));
    }

    #[test]
    fn catalog_kind_lists_fields() {
        let text = output(|out| catalog(out, None, Some("hero")));
        assert!(text.contains("title"));
        assert!(text.contains("buttonText"));
        assert!(catalog(&mut Vec::new(), None, Some("nope")).is_err());
        assert!(catalog(&mut Vec::new(), Some("nope"), None).is_err());
    }

    #[test]
    fn new_project_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = new_project(&mut Vec::new(), "My Site", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("my_site.pgs"));
        assert_eq!(load_project(&path).unwrap().name, "My Site");

        assert!(new_project(&mut Vec::new(), "My Site", dir.path()).is_err());
        assert!(new_project(&mut Vec::new(), "  ", dir.path()).is_err());
    }

    #[test]
    fn info_summarizes_project() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.pgs");
        let project = Project::new("Site").with_content(ProjectContent::new(vec![
            Component::with_defaults(ComponentId::from("hero-1"), ComponentKind::Hero),
        ]));
        save_project(&project, &path).unwrap();

        let text = output(|out| info(out, &path));
        assert!(text.contains("Site"));
        assert!(text.contains(&project.id.to_string()));
    }

    #[test]
    fn validate_walks_directories() {
        let dir = TempDir::new().unwrap();
        let good = Project::new("Good").with_content(ProjectContent::new(vec![
            Component::with_defaults(ComponentId::from("hero-1"), ComponentKind::Hero),
        ]));
        save_project(&good, dir.path().join("good.pgs")).unwrap();

        let nested = dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        let bad = Project::new("").with_content(ProjectContent::new(vec![
            Component::with_defaults(ComponentId::from("hero-1"), ComponentKind::Hero),
            Component::with_defaults(ComponentId::from("hero-1"), ComponentKind::Hero),
        ]));
        save_project(&bad, nested.join("bad.pgs")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let failed = validate(&mut Vec::new(), dir.path(), false).unwrap();
        assert_eq!(failed, 1);
    }

    #[test]
    fn strict_validation_fails_on_warnings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.pgs");
        save_project(&Project::new("Empty"), &path).unwrap();

        assert_eq!(validate(&mut Vec::new(), &path, false).unwrap(), 0);
        assert_eq!(validate(&mut Vec::new(), &path, true).unwrap(), 1);
    }

    #[tokio::test]
    async fn export_with_insufficient_credits_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = landing(dir.path());
        let config = BuilderConfig::default();
        let api = FakeApi::new(150);

        let err = export_with(
            &mut Vec::new(),
            &gateway(&api, &config),
            &config,
            &path,
            None,
            &dir.path().join("dist"),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BuilderError>(),
            Some(BuilderError::InsufficientCredits {
                balance: 150,
                cost: 200
            })
        ));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(!dir.path().join("dist").exists());
    }

    #[tokio::test]
    async fn export_with_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let path = landing(dir.path());
        let config = BuilderConfig::default();
        let api = FakeApi::new(500);
        let mut out = Vec::new();

        let written = export_with(
            &mut out,
            &gateway(&api, &config),
            &config,
            &path,
            Some(Framework::Bootstrap),
            &dir.path().join("dist"),
        )
        .await
        .unwrap();

        assert!(written.ends_with(format!("{}-bootstrap.zip", load_project(&path).unwrap().id)));
        assert_eq!(std::fs::read(&written).unwrap(), b"zip");
        assert!(String::from_utf8(out).unwrap().contains("300 credits left"));
    }

    #[tokio::test]
    async fn push_with_surfaces_save_failure() {
        let dir = TempDir::new().unwrap();
        let path = landing(dir.path());
        let config = BuilderConfig::default();
        let api = Arc::new(FakeApi {
            balance: 0,
            fail_saves: true,
            calls: AtomicUsize::new(0),
        });

        let err = push_with(&mut Vec::new(), &gateway(&api, &config), &config, &path)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<BuilderError>().is_some_and(BuilderError::is_network));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }
}
