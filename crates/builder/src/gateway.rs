//! Persistence and export gateway
//!
//! Connects a [`BuilderStore`] to the project, export and credits services.
//! Network failures never roll back in-memory edits: a failed save leaves
//! the session dirty and a failed export leaves the wallet untouched.

use crate::config::BuilderConfig;
use crate::services::{CreditsService, ExportArtifact, ExportService, HttpServices, ProjectService};
use crate::store::BuilderStore;
use pagesmith_core::{BuilderError, BuilderResult, Framework, ProjectId};
use pagesmith_ir::Project;
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// CREDIT WALLET
// =============================================================================

/// Local mirror of the account's credit balance
///
/// The credits service is authoritative. After an export the balance is
/// deducted locally first, then replaced by the server's answer; if that
/// answer never arrives the wallet is flagged as unreconciled until the next
/// [`Gateway::refresh_balance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditWallet {
    pub balance: u64,
    pub reconciled: bool,
}

impl CreditWallet {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            reconciled: true,
        }
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.balance >= cost
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

pub struct Gateway {
    projects: Arc<dyn ProjectService>,
    exports: Arc<dyn ExportService>,
    credits: Arc<dyn CreditsService>,
    export_cost: u64,
    default_framework: Framework,
}

impl Gateway {
    pub fn new(
        projects: Arc<dyn ProjectService>,
        exports: Arc<dyn ExportService>,
        credits: Arc<dyn CreditsService>,
        config: &BuilderConfig,
    ) -> Self {
        Self {
            projects,
            exports,
            credits,
            export_cost: config.export_cost,
            default_framework: config.default_framework,
        }
    }

    /// Gateway talking to the hosted API for all three services
    pub fn from_config(config: &BuilderConfig) -> BuilderResult<Self> {
        let http = Arc::new(HttpServices::new(config)?);
        Ok(Self::new(http.clone(), http.clone(), http, config))
    }

    /// Credits one export costs
    pub fn export_cost(&self) -> u64 {
        self.export_cost
    }

    /// Fetch a project and hydrate the store from it
    pub async fn load(&self, id: ProjectId, store: &mut BuilderStore) -> BuilderResult<Project> {
        let project = self.projects.fetch_project(id).await?;
        store.initialize_from_project(&project)?;
        info!(%id, name = %project.name, components = store.len(), "project loaded");
        Ok(project)
    }

    /// Persist the store's current content
    pub async fn save(&self, id: ProjectId, store: &mut BuilderStore) -> BuilderResult<Project> {
        let ticket = store.begin_save()?;
        let content = store.serialize();
        info!(%id, components = content.len(), "saving project");

        match self.projects.update_project(id, content).await {
            Ok(project) => {
                let clean = store.finish_save(ticket, true);
                info!(%id, clean, "project saved");
                Ok(project)
            }
            Err(e) => {
                store.finish_save(ticket, false);
                warn!(%id, error = %e, "save failed, changes kept locally");
                Err(e)
            }
        }
    }

    /// Save, generate an export and charge for it
    ///
    /// Rejects with `InsufficientCredits` before any network call when the
    /// wallet cannot cover the cost.
    pub async fn export(
        &self,
        id: ProjectId,
        framework: Option<Framework>,
        store: &mut BuilderStore,
        wallet: &mut CreditWallet,
    ) -> BuilderResult<ExportArtifact> {
        let cost = self.export_cost;
        if !wallet.can_afford(cost) {
            warn!(balance = wallet.balance, cost, "export rejected, insufficient credits");
            return Err(BuilderError::InsufficientCredits {
                balance: wallet.balance,
                cost,
            });
        }

        store.begin_export()?;
        let result = self
            .run_export(id, framework.unwrap_or(self.default_framework), store, wallet)
            .await;
        store.finish_export();
        result
    }

    async fn run_export(
        &self,
        id: ProjectId,
        framework: Framework,
        store: &mut BuilderStore,
        wallet: &mut CreditWallet,
    ) -> BuilderResult<ExportArtifact> {
        self.save(id, store).await?;

        info!(%id, %framework, "generating export");
        let artifact = self
            .exports
            .generate_export(id, framework)
            .await
            .inspect_err(|e| warn!(%id, error = %e, "export failed"))?;

        let cost = self.export_cost;
        wallet.balance = wallet.balance.saturating_sub(cost);
        wallet.reconciled = false;

        match self.credits.deduct(cost).await {
            Ok(balance) => {
                if balance != wallet.balance {
                    info!(local = wallet.balance, server = balance, "credit balance corrected by server");
                }
                wallet.balance = balance;
                wallet.reconciled = true;
            }
            Err(e) => warn!(error = %e, balance = wallet.balance, "credit deduction not confirmed"),
        }

        info!(%id, file = %artifact.file_name, bytes = artifact.len(), "export ready");
        Ok(artifact)
    }

    /// Replace the wallet balance with the server's
    pub async fn refresh_balance(&self, wallet: &mut CreditWallet) -> BuilderResult<u64> {
        let balance = self.credits.balance().await?;
        wallet.balance = balance;
        wallet.reconciled = true;
        Ok(balance)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_ir::{Component, ComponentId, ComponentKind, PersistedContent, ProjectContent};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // =========================================================================
    // Fakes
    // =========================================================================

    #[derive(Default)]
    struct FakeProjects {
        projects: Mutex<HashMap<ProjectId, Project>>,
        fail_updates: AtomicBool,
        updates: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ProjectService for FakeProjects {
        async fn fetch_project(&self, id: ProjectId) -> BuilderResult<Project> {
            self.projects
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| BuilderError::ProjectNotFound(id.to_string()))
        }

        async fn update_project(
            &self,
            id: ProjectId,
            content: ProjectContent,
        ) -> BuilderResult<Project> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(BuilderError::network("connection reset"));
            }
            let mut projects = self.projects.lock().unwrap();
            let project = projects
                .get_mut(&id)
                .ok_or_else(|| BuilderError::ProjectNotFound(id.to_string()))?;
            project.content = content.into();
            Ok(project.clone())
        }
    }

    #[derive(Default)]
    struct FakeExports {
        fail: AtomicBool,
        calls: AtomicUsize,
        last_framework: Mutex<Option<Framework>>,
    }

    #[async_trait::async_trait]
    impl ExportService for FakeExports {
        async fn generate_export(
            &self,
            id: ProjectId,
            framework: Framework,
        ) -> BuilderResult<ExportArtifact> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_framework.lock().unwrap() = Some(framework);
            if self.fail.load(Ordering::SeqCst) {
                return Err(BuilderError::ServiceStatus {
                    status: 502,
                    body: "bad gateway".into(),
                });
            }
            Ok(ExportArtifact::new(
                ExportArtifact::default_file_name(id, framework),
                b"zip".to_vec(),
            ))
        }
    }

    struct FakeCredits {
        balance: Mutex<u64>,
        fail_deduct: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeCredits {
        fn new(balance: u64) -> Self {
            Self {
                balance: Mutex::new(balance),
                fail_deduct: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl CreditsService for FakeCredits {
        async fn balance(&self) -> BuilderResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(*self.balance.lock().unwrap())
        }

        async fn deduct(&self, amount: u64) -> BuilderResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_deduct.load(Ordering::SeqCst) {
                return Err(BuilderError::network("timeout"));
            }
            let mut balance = self.balance.lock().unwrap();
            *balance = balance.saturating_sub(amount);
            Ok(*balance)
        }
    }

    struct Harness {
        projects: Arc<FakeProjects>,
        exports: Arc<FakeExports>,
        credits: Arc<FakeCredits>,
        gateway: Gateway,
        store: BuilderStore,
        project_id: ProjectId,
    }

    fn harness(server_balance: u64) -> Harness {
        let config = BuilderConfig::default();
        let projects = Arc::new(FakeProjects::default());
        let exports = Arc::new(FakeExports::default());
        let credits = Arc::new(FakeCredits::new(server_balance));

        let content = ProjectContent::new(vec![Component::with_defaults(
            ComponentId::from("hero-1"),
            ComponentKind::Hero,
        )]);
        let project =
            Project::new("Landing").with_content(PersistedContent::Encoded(content.encode().unwrap()));
        let project_id = project.id;
        projects.projects.lock().unwrap().insert(project_id, project);

        let gateway = Gateway::new(projects.clone(), exports.clone(), credits.clone(), &config);
        Harness {
            projects,
            exports,
            credits,
            gateway,
            store: BuilderStore::create(&config),
            project_id,
        }
    }

    async fn loaded(server_balance: u64) -> Harness {
        let mut h = harness(server_balance);
        h.gateway.load(h.project_id, &mut h.store).await.unwrap();
        let spacer = h.store.mint_component(ComponentKind::Spacer);
        h.store.add_component(spacer, None).unwrap();
        h
    }

    // =========================================================================
    // Load / Save
    // =========================================================================

    #[tokio::test]
    async fn load_hydrates_store() {
        let mut h = harness(0);
        let project = h.gateway.load(h.project_id, &mut h.store).await.unwrap();
        assert_eq!(project.name, "Landing");
        assert_eq!(h.store.len(), 1);
        assert!(!h.store.has_unsaved_changes());
        assert!(!h.store.can_undo());
    }

    #[tokio::test]
    async fn load_missing_project() {
        let mut h = harness(0);
        let err = h
            .gateway
            .load(uuid::Uuid::new_v4(), &mut h.store)
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn save_persists_and_marks_clean() {
        let mut h = loaded(0).await;
        assert!(h.store.has_unsaved_changes());

        let saved = h.gateway.save(h.project_id, &mut h.store).await.unwrap();
        assert_eq!(saved.decoded_content().unwrap(), h.store.serialize());
        assert!(!h.store.has_unsaved_changes());
        assert!(!h.store.is_saving());
    }

    #[tokio::test]
    async fn failed_save_keeps_changes() {
        let mut h = loaded(0).await;
        h.projects.fail_updates.store(true, Ordering::SeqCst);
        let before = h.store.serialize();

        let err = h.gateway.save(h.project_id, &mut h.store).await.unwrap_err();
        assert!(err.is_network());
        assert!(h.store.has_unsaved_changes());
        assert!(!h.store.is_saving());
        assert_eq!(h.store.serialize(), before);
    }

    // =========================================================================
    // Export
    // =========================================================================

    #[tokio::test]
    async fn export_with_insufficient_credits_makes_no_calls() {
        let mut h = loaded(1000).await;
        let mut wallet = CreditWallet::new(150);

        let err = h
            .gateway
            .export(h.project_id, None, &mut h.store, &mut wallet)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BuilderError::InsufficientCredits {
                balance: 150,
                cost: 200
            }
        ));
        assert_eq!(wallet, CreditWallet::new(150));
        assert_eq!(h.projects.updates.load(Ordering::SeqCst), 0);
        assert_eq!(h.exports.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.credits.calls.load(Ordering::SeqCst), 0);
        assert!(h.store.has_unsaved_changes());
        assert!(!h.store.is_exporting());
    }

    #[tokio::test]
    async fn export_saves_generates_and_reconciles() {
        let mut h = loaded(450).await;
        let mut wallet = CreditWallet::new(500);

        let artifact = h
            .gateway
            .export(h.project_id, Some(Framework::Bootstrap), &mut h.store, &mut wallet)
            .await
            .unwrap();

        assert!(artifact.file_name.ends_with("-bootstrap.zip"));
        assert_eq!(*h.exports.last_framework.lock().unwrap(), Some(Framework::Bootstrap));
        // Server balance wins over the local mirror
        assert_eq!(wallet, CreditWallet { balance: 250, reconciled: true });
        assert!(!h.store.has_unsaved_changes());
        assert!(!h.store.is_exporting());
    }

    #[tokio::test]
    async fn export_uses_default_framework() {
        let mut h = loaded(1000).await;
        let mut wallet = CreditWallet::new(1000);
        h.gateway
            .export(h.project_id, None, &mut h.store, &mut wallet)
            .await
            .unwrap();
        assert_eq!(*h.exports.last_framework.lock().unwrap(), Some(Framework::Tailwind));
    }

    #[tokio::test]
    async fn export_with_unconfirmed_deduction() {
        let mut h = loaded(1000).await;
        h.credits.fail_deduct.store(true, Ordering::SeqCst);
        let mut wallet = CreditWallet::new(300);

        h.gateway
            .export(h.project_id, None, &mut h.store, &mut wallet)
            .await
            .unwrap();
        assert_eq!(wallet, CreditWallet { balance: 100, reconciled: false });

        let balance = h.gateway.refresh_balance(&mut wallet).await.unwrap();
        assert_eq!(balance, 1000);
        assert!(wallet.reconciled);
    }

    #[tokio::test]
    async fn failed_export_charges_nothing() {
        let mut h = loaded(1000).await;
        h.exports.fail.store(true, Ordering::SeqCst);
        let mut wallet = CreditWallet::new(300);

        let err = h
            .gateway
            .export(h.project_id, None, &mut h.store, &mut wallet)
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert_eq!(wallet, CreditWallet::new(300));
        assert!(!h.store.is_exporting());
        // The save step already went through
        assert!(!h.store.has_unsaved_changes());
    }

    #[tokio::test]
    async fn failed_save_aborts_export() {
        let mut h = loaded(1000).await;
        h.projects.fail_updates.store(true, Ordering::SeqCst);
        let mut wallet = CreditWallet::new(300);

        assert!(h
            .gateway
            .export(h.project_id, None, &mut h.store, &mut wallet)
            .await
            .is_err());
        assert_eq!(h.exports.calls.load(Ordering::SeqCst), 0);
        assert_eq!(wallet.balance, 300);
        assert!(h.store.has_unsaved_changes());
        assert!(!h.store.is_exporting());
    }

    #[tokio::test]
    async fn export_while_exporting_is_rejected() {
        let mut h = loaded(1000).await;
        let mut wallet = CreditWallet::new(300);
        h.store.begin_export().unwrap();

        let err = h
            .gateway
            .export(h.project_id, None, &mut h.store, &mut wallet)
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::ExportInProgress));
        assert!(h.store.is_exporting());
    }

    #[test]
    fn refresh_balance_blocking() {
        let h = harness(725);
        let mut wallet = CreditWallet {
            balance: 0,
            reconciled: false,
        };
        let balance = tokio_test::block_on(h.gateway.refresh_balance(&mut wallet)).unwrap();
        assert_eq!(balance, 725);
        assert_eq!(wallet, CreditWallet::new(725));
    }
}
