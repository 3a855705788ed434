//! Client-side controller for the config editor.
//!
//! Holds the last document the server confirmed, a phase flag that blocks
//! overlapping edits, and a log of status messages. Edits are merged into a
//! candidate with pure functions, PUT to the server, and then replaced by
//! the server's echo. Any failed mutation ends in a full reload, so the
//! local copy never outlives a rejected candidate.

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::{ClientError, ControllerError};
use crate::models::{
    Category, ConfigDocument, ConfigResponse, LintReport, Severity, UpdateResponse,
};

#[async_trait]
/// Transport used by the controller; `HttpBackend` in production.
pub trait Backend: Send + Sync {
    async fn fetch_config(&self) -> Result<ConfigResponse, ClientError>;
    async fn put_config(&self, doc: &ConfigDocument) -> Result<UpdateResponse, ClientError>;
    async fn run_lint(&self) -> Result<LintReport, ClientError>;
}

/// Talks to a running service over HTTP.
pub struct HttpBackend {
    base: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[derive(Deserialize)]
struct RejectionBody {
    message: Option<String>,
    error: Option<String>,
}

/// Turn a non-2xx response into `ClientError::Rejected`, preferring a JSON
/// `message`/`error` field over the raw body text.
async fn rejection(res: reqwest::Response) -> ClientError {
    let status = res.status().as_u16();
    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<RejectionBody>(&text)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or(text);
    ClientError::Rejected { status, message }
}

async fn decode<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    if !res.status().is_success() {
        return Err(rejection(res).await);
    }
    let text = res.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_config(&self) -> Result<ConfigResponse, ClientError> {
        let res = self.client.get(self.url("/config")).send().await?;
        decode(res).await
    }

    async fn put_config(&self, doc: &ConfigDocument) -> Result<UpdateResponse, ClientError> {
        let res = self.client.put(self.url("/config")).json(doc).send().await?;
        decode(res).await
    }

    async fn run_lint(&self) -> Result<LintReport, ClientError> {
        let res = self.client.get(self.url("/lint")).send().await?;
        decode(res).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One severity selector in the view.
pub struct SelectorRow {
    pub name: String,
    pub category: Category,
    pub value: Severity,
    pub disabled: bool,
}

/// Candidate with `rules[rule] = severity`.
pub fn merge_rule(doc: &ConfigDocument, rule: &str, severity: Severity) -> ConfigDocument {
    let mut next = doc.clone();
    next.set_rule(rule, severity);
    next
}

/// Candidate with `categories[category] = severity`, cascading the same
/// severity onto every catalog rule of that category.
pub fn merge_category(
    doc: &ConfigDocument,
    catalog: &Catalog,
    category: Category,
    severity: Severity,
) -> ConfigDocument {
    let mut next = doc.clone();
    next.set_category(category, severity);
    for rule in catalog.rules_in(category) {
        next.set_rule(rule, severity);
    }
    next
}

pub struct Controller<B: Backend> {
    backend: B,
    catalog: Catalog,
    document: ConfigDocument,
    phase: Phase,
    loaded: bool,
    messages: Vec<String>,
}

impl<B: Backend> Controller<B> {
    pub fn new(backend: B, catalog: Catalog) -> Self {
        Self {
            backend,
            catalog,
            document: ConfigDocument::new(),
            phase: Phase::Idle,
            loaded: false,
            messages: Vec::new(),
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether any fetch of `/config` has succeeded yet.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Latest status message, as the results box would show it.
    pub fn status(&self) -> &str {
        self.messages.last().map(String::as_str).unwrap_or("")
    }

    /// Every status message shown so far, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn show(&mut self, message: String) {
        tracing::debug!(phase = ?self.phase, "{}", message);
        self.messages.push(message);
    }

    /// Initial load; also the resynchronization path after failures.
    pub async fn mount(&mut self) {
        self.reload().await;
    }

    async fn reload(&mut self) {
        self.phase = Phase::Loading;
        match self.backend.fetch_config().await {
            Ok(res) => {
                self.document = res.contents.unwrap_or_default();
                self.loaded = true;
                self.show("Loading config and running lint...".to_string());
                self.run_lint_and_display().await;
            }
            Err(e) => self.show(format!("Error loading config: {}", e)),
        }
        self.phase = Phase::Idle;
    }

    async fn run_lint_and_display(&mut self) {
        match self.backend.run_lint().await {
            Ok(report) => {
                let msg = match (report.summary.is_empty(), report.error) {
                    (false, _) => report.summary,
                    (true, Some(err)) => format!("Error running lint: {}", err),
                    (true, None) => "No summary available".to_string(),
                };
                self.show(msg);
            }
            Err(e) => self.show(format!("Error running lint: {}", e)),
        }
    }

    /// Set one rule's severity.
    pub async fn set_rule(&mut self, rule: &str, severity: Severity) -> Result<(), ControllerError> {
        self.begin_edit()?;
        let candidate = merge_rule(&self.document, rule, severity);
        let done = format!("Rule \"{}\" updated to \"{}\"! Running lint...", rule, severity);
        self.save(candidate, done, "rule").await;
        Ok(())
    }

    /// Set a category's severity and cascade it to all of its rules.
    pub async fn set_category(
        &mut self,
        category: Category,
        severity: Severity,
    ) -> Result<(), ControllerError> {
        self.begin_edit()?;
        let candidate = merge_category(&self.document, &self.catalog, category, severity);
        let done = format!(
            "Category \"{c}\" updated to \"{s}\"! All rules in this category set to \"{s}\". Running lint...",
            c = category,
            s = severity
        );
        self.save(candidate, done, "category").await;
        Ok(())
    }

    fn begin_edit(&mut self) -> Result<(), ControllerError> {
        if self.phase != Phase::Idle {
            return Err(ControllerError::Busy);
        }
        self.phase = Phase::Saving;
        Ok(())
    }

    async fn save(&mut self, candidate: ConfigDocument, done: String, what: &str) {
        match self.backend.put_config(&candidate).await {
            Ok(res) => {
                self.document = res.contents;
                self.show(done);
                self.run_lint_and_display().await;
            }
            Err(ClientError::Rejected { message, .. }) => {
                self.show(format!("Error: {}", message));
                self.reload().await;
            }
            Err(e) => {
                self.show(format!("Error updating {}: {}", what, e));
                self.reload().await;
            }
        }
        self.phase = Phase::Idle;
    }

    /// One selector per category; unset categories read as `off`.
    pub fn category_rows(&self) -> Vec<SelectorRow> {
        Category::ALL
            .into_iter()
            .map(|c| SelectorRow {
                name: c.to_string(),
                category: c,
                value: self.document.category_severity(c).unwrap_or(Severity::Off),
                disabled: self.phase != Phase::Idle,
            })
            .collect()
    }

    /// One selector per catalog rule; falls back to the category, then `off`.
    pub fn rule_rows(&self) -> Vec<SelectorRow> {
        let mut rows = Vec::new();
        for (category, rules) in self.catalog.iter() {
            let fallback = self.document.category_severity(category);
            for rule in rules {
                rows.push(SelectorRow {
                    name: rule.clone(),
                    category,
                    value: self
                        .document
                        .rule_severity(rule)
                        .or(fallback)
                        .unwrap_or(Severity::Off),
                    disabled: self.phase != Phase::Idle,
                });
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn doc(v: serde_json::Value) -> ConfigDocument {
        ConfigDocument::from_value(v).unwrap()
    }

    /// In-memory server: stores what it is given, optionally failing PUTs.
    struct FakeBackend {
        stored: Mutex<ConfigDocument>,
        fail_put: Option<ClientError>,
        lint: Result<LintReport, String>,
        puts: Mutex<Vec<ConfigDocument>>,
    }

    impl FakeBackend {
        fn new(initial: ConfigDocument) -> Self {
            Self {
                stored: Mutex::new(initial),
                fail_put: None,
                lint: Ok(LintReport {
                    summary: "Found 0 warnings and 6 errors".into(),
                    full_output: String::new(),
                    error: None,
                }),
                puts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn fetch_config(&self) -> Result<ConfigResponse, ClientError> {
            Ok(ConfigResponse {
                contents: Some(self.stored.lock().unwrap().clone()),
            })
        }

        async fn put_config(&self, doc: &ConfigDocument) -> Result<UpdateResponse, ClientError> {
            self.puts.lock().unwrap().push(doc.clone());
            match &self.fail_put {
                Some(ClientError::Rejected { status, message }) => Err(ClientError::Rejected {
                    status: *status,
                    message: message.clone(),
                }),
                Some(ClientError::Decode(m)) => Err(ClientError::Decode(m.clone())),
                Some(other) => Err(ClientError::Decode(other.to_string())),
                None => {
                    *self.stored.lock().unwrap() = doc.clone();
                    Ok(UpdateResponse {
                        message: "Config updated successfully".into(),
                        contents: doc.clone(),
                    })
                }
            }
        }

        async fn run_lint(&self) -> Result<LintReport, ClientError> {
            self.lint.clone().map_err(ClientError::Decode)
        }
    }

    fn small_catalog() -> Catalog {
        let mut ov = std::collections::HashMap::new();
        ov.insert("style".to_string(), vec!["r1".to_string(), "r2".to_string()]);
        Catalog::with_overrides(&ov).unwrap()
    }

    #[test]
    fn test_merge_category_cascades_only_inside_category() {
        let base = doc(json!({
            "categories": { "style": "error" },
            "rules": { "r1": "error", "r2": "off", "no-console": "error" },
            "plugins": ["react"]
        }));
        let next = merge_category(&base, &small_catalog(), Category::Style, Severity::Warn);
        assert_eq!(
            next.into_value(),
            json!({
                "categories": { "style": "warn" },
                "rules": { "r1": "warn", "r2": "warn", "no-console": "error" },
                "plugins": ["react"]
            })
        );
        // the input is untouched
        assert_eq!(base.rule_severity("r2"), Some(Severity::Off));
    }

    #[test]
    fn test_merge_rule_creates_rules_section() {
        let next = merge_rule(&ConfigDocument::new(), "eqeqeq", Severity::Error);
        assert_eq!(next.into_value(), json!({ "rules": { "eqeqeq": "error" } }));
    }

    #[tokio::test]
    async fn test_mount_loads_document_and_shows_summary() {
        let backend = FakeBackend::new(doc(json!({ "rules": { "r1": "warn" } })));
        let mut ctl = Controller::new(backend, small_catalog());
        assert!(!ctl.loaded());
        ctl.mount().await;
        assert!(ctl.loaded());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.document().rule_severity("r1"), Some(Severity::Warn));
        assert_eq!(
            ctl.messages(),
            &["Loading config and running lint...", "Found 0 warnings and 6 errors"]
        );
    }

    #[tokio::test]
    async fn test_successful_edit_adopts_server_echo() {
        let backend = FakeBackend::new(doc(json!({ "$schema": "s" })));
        let mut ctl = Controller::new(backend, small_catalog());
        ctl.mount().await;
        ctl.set_category(Category::Style, Severity::Error).await.unwrap();
        assert_eq!(
            ctl.document().clone().into_value(),
            json!({
                "$schema": "s",
                "categories": { "style": "error" },
                "rules": { "r1": "error", "r2": "error" }
            })
        );
        assert!(ctl.messages().iter().any(|m| m.starts_with("Category \"style\" updated to \"error\"!")));
        assert_eq!(ctl.status(), "Found 0 warnings and 6 errors");
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failed_put_resyncs_from_server() {
        let mut backend = FakeBackend::new(doc(json!({ "rules": { "r1": "off" } })));
        backend.fail_put = Some(ClientError::Rejected {
            status: 500,
            message: "Could not write config: disk full".into(),
        });
        let mut ctl = Controller::new(backend, small_catalog());
        ctl.mount().await;

        // another writer changes the file after our load
        let theirs = doc(json!({ "categories": { "perf": "warn" }, "rules": { "r2": "error" } }));
        *ctl.backend.stored.lock().unwrap() = theirs.clone();
        ctl.set_rule("r1", Severity::Error).await.unwrap();

        assert_eq!(ctl.document(), &theirs);
        assert!(ctl
            .messages()
            .contains(&"Error: Could not write config: disk full".to_string()));
        assert_eq!(ctl.status(), "Found 0 warnings and 6 errors");
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_transport_fault_message_and_resync() {
        let mut backend = FakeBackend::new(ConfigDocument::new());
        backend.fail_put = Some(ClientError::Decode("connection reset".into()));
        let mut ctl = Controller::new(backend, small_catalog());
        ctl.set_rule("r2", Severity::Warn).await.unwrap();
        assert!(ctl.messages()[0].starts_with("Error updating rule: "));
        assert_eq!(ctl.document(), &ConfigDocument::new());
    }

    #[tokio::test]
    async fn test_lint_messages() {
        let mut backend = FakeBackend::new(ConfigDocument::new());
        backend.lint = Ok(LintReport::spawn_failed("failed to start lint command 'npx'"));
        let mut ctl = Controller::new(backend, small_catalog());
        ctl.mount().await;
        assert_eq!(ctl.status(), "Error running lint: failed to start lint command 'npx'");

        let mut backend = FakeBackend::new(ConfigDocument::new());
        backend.lint = Ok(LintReport {
            summary: String::new(),
            full_output: String::new(),
            error: None,
        });
        let mut ctl = Controller::new(backend, small_catalog());
        ctl.mount().await;
        assert_eq!(ctl.status(), "No summary available");
    }

    #[tokio::test]
    async fn test_edit_rejected_while_busy() {
        let backend = FakeBackend::new(ConfigDocument::new());
        let mut ctl = Controller::new(backend, small_catalog());
        ctl.phase = Phase::Loading;
        assert_eq!(
            ctl.set_rule("r1", Severity::Warn).await,
            Err(ControllerError::Busy)
        );
        assert!(ctl.backend.puts.lock().unwrap().is_empty());
        assert!(ctl.category_rows().iter().all(|r| r.disabled));
    }

    #[test]
    fn test_rows_fall_back_to_category_then_off() {
        let mut ctl = Controller::new(FakeBackend::new(ConfigDocument::new()), small_catalog());
        ctl.document = doc(json!({
            "categories": { "style": "warn" },
            "rules": { "r1": ["error", { "allow": [] }] }
        }));
        let rules = ctl.rule_rows();
        let r1 = rules.iter().find(|r| r.name == "r1").unwrap();
        let r2 = rules.iter().find(|r| r.name == "r2").unwrap();
        assert_eq!(r1.value, Severity::Error);
        assert_eq!(r2.value, Severity::Warn);
        let perf = rules.iter().find(|r| r.category == Category::Perf).unwrap();
        assert_eq!(perf.value, Severity::Off);

        let cats = ctl.category_rows();
        assert_eq!(cats.len(), 7);
        assert_eq!(cats.iter().find(|c| c.category == Category::Style).unwrap().value, Severity::Warn);
        assert!(cats.iter().all(|c| !c.disabled));
    }

    mod wire {
        use super::*;
        use crate::lint::{LintCommand, LintRunner};
        use crate::server::{self, AppState};
        use crate::store::ConfigStore;
        use axum::http::StatusCode;
        use axum::routing::get;
        use axum::Router;
        use std::path::Path;
        use std::sync::Arc;

        async fn spawn(app: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{}", addr)
        }

        fn service(config: &Path, workdir: &Path, dist: Option<&Path>) -> Router {
            let state = Arc::new(AppState::new(
                ConfigStore::new(config),
                LintRunner::new(
                    LintCommand {
                        program: "oxlint-manager-definitely-missing-binary".into(),
                        args: vec![],
                    },
                    workdir,
                ),
            ));
            server::router(state, dist)
        }

        #[tokio::test]
        async fn test_json_error_body_becomes_message() {
            let dir = tempfile::tempdir().unwrap();
            let base = spawn(service(&dir.path().join(".oxlintrc.json"), dir.path(), None)).await;

            let err = HttpBackend::new(&base).fetch_config().await.unwrap_err();
            match err {
                ClientError::Rejected { status, message } => {
                    assert_eq!(status, 500);
                    assert_eq!(message, "Could not read .oxlintrc.json");
                }
                other => panic!("expected rejection, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_failed_mount_stays_unloaded() {
            let dir = tempfile::tempdir().unwrap();
            let base = spawn(service(&dir.path().join(".oxlintrc.json"), dir.path(), None)).await;

            let mut ctl = Controller::new(HttpBackend::new(&base), small_catalog());
            ctl.mount().await;
            assert!(!ctl.loaded());
            assert_eq!(ctl.messages(), &["Error loading config: Could not read .oxlintrc.json"]);
        }

        #[tokio::test]
        async fn test_plain_text_error_body_becomes_message() {
            let dir = tempfile::tempdir().unwrap();
            let config = dir.path().join("missing/.oxlintrc.json");
            let base = spawn(service(&config, dir.path(), None)).await;

            let err = HttpBackend::new(&base)
                .put_config(&ConfigDocument::new())
                .await
                .unwrap_err();
            match err {
                ClientError::Rejected { status, message } => {
                    assert_eq!(status, 500);
                    assert!(message.starts_with("Could not write config: "), "{}", message);
                }
                other => panic!("expected rejection, got {:?}", other),
            }

            let app = Router::new().route(
                "/config",
                get(|| async { (StatusCode::BAD_REQUEST, "Invalid request: nope") }),
            );
            let base = spawn(app).await;
            let err = HttpBackend::new(&base).fetch_config().await.unwrap_err();
            assert!(matches!(
                err,
                ClientError::Rejected { status: 400, ref message } if message == "Invalid request: nope"
            ));
        }

        #[tokio::test]
        async fn test_non_json_success_body_is_decode_error() {
            let dir = tempfile::tempdir().unwrap();
            let dist = dir.path().join("dist");
            std::fs::create_dir_all(&dist).unwrap();
            std::fs::write(dist.join("index.html"), "<div id=\"root\"></div>").unwrap();
            let base = spawn(service(&dir.path().join(".oxlintrc.json"), dir.path(), Some(&dist))).await;

            // unknown paths fall back to index.html with a 200
            let backend = HttpBackend::new(&format!("{}/ui/", base));
            assert!(matches!(backend.run_lint().await, Err(ClientError::Decode(_))));
        }

        #[tokio::test]
        async fn test_controller_edits_through_http() {
            let dir = tempfile::tempdir().unwrap();
            let config = dir.path().join(".oxlintrc.json");
            std::fs::write(&config, r#"{"plugins":["react"],"rules":{}}"#).unwrap();
            let base = spawn(service(&config, dir.path(), None)).await;

            let mut ctl = Controller::new(HttpBackend::new(&base), small_catalog());
            ctl.mount().await;
            assert!(ctl.loaded());
            ctl.set_category(Category::Style, Severity::Warn).await.unwrap();

            let on_disk: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
            assert_eq!(
                on_disk,
                json!({
                    "plugins": ["react"],
                    "rules": { "r1": "warn", "r2": "warn" },
                    "categories": { "style": "warn" }
                })
            );
            assert_eq!(ctl.document().clone().into_value(), on_disk);
            assert!(ctl.status().starts_with("Error running lint: "));
        }
    }
}
