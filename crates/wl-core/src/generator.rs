//! One white-label generation run.
//!
//! Only a bad config stops a run (it never reaches this module). Template
//! reads, output writes and splices that fail are logged, recorded in the
//! [`GenerationReport`] and skipped so the rest of the run still produces
//! its files.

use crate::config::WhiteLabelConfig;
use crate::error::Result;
use crate::paths::{
    self, path_to_package, TemplateKey, Workspace, CONST_JS, CONST_JS_PATH, DOMAIN_TYPE_PACKAGE,
    DOMAIN_TYPE_SUFFIX, NEW_WHITE_LABEL_MARKER, SETTING_1_MARKER, SETTING_2_MARKER, SETTING_PATH,
    WEBSITE_PAGE_PACKAGE, WEBSITE_PAGE_SUFFIX, WEBSITE_TYPE_PATH,
};
use crate::replacements::ReplacementCache;
use crate::splice::{insert_at_marker, insert_import_statement};
use crate::sql::new_group_replacements;
use crate::template::{fill, fill_file, write_to_file};
use crate::transform::snake_to_camel;
use crate::types::{Database, Environment};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub step: String,
    pub path: PathBuf,
    pub error: String,
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub spliced: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Generator<'w, 'c> {
    workspace: &'w Workspace,
    cache: ReplacementCache<'c>,
    report: GenerationReport,
}

impl<'w, 'c> Generator<'w, 'c> {
    pub fn new(workspace: &'w Workspace, config: &'c WhiteLabelConfig) -> Self {
        Self {
            workspace,
            cache: ReplacementCache::new(config),
            report: GenerationReport::default(),
        }
    }

    fn config(&self) -> &'c WhiteLabelConfig {
        self.cache.config()
    }

    /// SQL for every environment, then (unless `sqlOnly`) the Java classes
    /// and the splices into the sibling checkout.
    pub fn run(mut self) -> GenerationReport {
        self.cache.clear();
        let config = self.config();
        tracing::info!(
            ticket = %config.ticket_no,
            site = %config.web_site_name,
            api = config.api_white_label,
            "generating white label"
        );

        self.generate_sql_files();

        if config.sql_only {
            tracing::info!("sqlOnly set, skipping java sources and splices");
        } else {
            let page = if config.api_white_label {
                TemplateKey::ApiWalletWebSitePage
            } else {
                self.generate_from_template(
                    TemplateKey::DomainType,
                    DOMAIN_TYPE_PACKAGE,
                    DOMAIN_TYPE_SUFFIX,
                );
                TemplateKey::WebSitePage
            };
            self.generate_from_template(page, WEBSITE_PAGE_PACKAGE, WEBSITE_PAGE_SUFFIX);

            if let Err(e) = self.insert_into_java() {
                tracing::error!(error = %e, "splicing into java sources failed, remaining splices skipped");
            }
        }

        self.cache.clear();
        self.report
    }

    // -----------------------------------------------------------------------
    // SQL
    // -----------------------------------------------------------------------

    pub fn generate_sql_files(&mut self) {
        let ticket = self.config().ticket_no.clone();
        for &env in Environment::all() {
            for &db in Database::all() {
                let content = self.render_sql(env, db);
                let path = self.workspace.sql_output_path(&ticket, env, db);
                self.write("sql", path, &content);
            }
        }
    }

    /// One migration file: the environment's SQL template, plus the group
    /// block on DB-01 for API white labels.
    pub fn render_sql(&mut self, env: Environment, db: Database) -> String {
        let config = self.config();
        let template = self
            .workspace
            .template_path(TemplateKey::sql(db, config.api_white_label));
        let mut content = fill_file(&template, self.cache.for_env(env));

        if db.is_db01() {
            content.push('\n');
            if let Some((wallet, info)) = config.new_group_info() {
                let map = new_group_replacements(config, self.cache.base(), wallet, info, env);
                let template = self.workspace.template_path(TemplateKey::new_group_sql(env));
                content.push_str(&fill_file(&template, &map));
            } else if config.api_white_label {
                let template = self.workspace.template_path(TemplateKey::UpdateGroupSql);
                content.push_str(&fill_file(&template, self.cache.base()));
            }
        }
        content
    }

    // -----------------------------------------------------------------------
    // Java sources
    // -----------------------------------------------------------------------

    /// Render `key` into `<package_dir><ClassName><suffix>`.
    pub fn generate_from_template(&mut self, key: TemplateKey, package_dir: &str, suffix: &str) {
        let class_name = snake_to_camel(&self.config().web_site_name);
        let path = self.workspace.class_file(package_dir, &class_name, suffix);
        tracing::debug!(template = %key, path = %path.display(), "rendering class file");
        let content = fill_file(&self.workspace.template_path(key), self.cache.base());
        self.write("template", path, &content);
    }

    /// Fully qualified classes WebSiteType.java must import.
    pub fn required_imports(&self) -> Result<Vec<String>> {
        let config = self.config();
        let class_name = snake_to_camel(&config.web_site_name);
        let mut imports = vec![path_to_package(
            WEBSITE_PAGE_PACKAGE,
            &format!("{class_name}{WEBSITE_PAGE_SUFFIX}"),
        )?];
        if !config.api_white_label {
            imports.push(path_to_package(
                DOMAIN_TYPE_PACKAGE,
                &format!("{class_name}{DOMAIN_TYPE_SUFFIX}"),
            )?);
        }
        Ok(imports)
    }

    /// Splice the enum entry, imports, settings and JS constant into the
    /// sibling checkout. The first failure stops the remaining splices.
    pub fn insert_into_java(&mut self) -> Result<()> {
        let config = self.config();
        let other = if config.api_white_label {
            TemplateKey::ApiOther
        } else {
            TemplateKey::NewSiteOther
        };
        let base = self.cache.base().clone();
        let enum_entry = fill_file(&self.workspace.template_path(other), &base);
        let enabled = !config.api_white_label;

        let web_site_type = self.workspace.resolve(WEBSITE_TYPE_PATH);
        let setting = self.workspace.resolve(SETTING_PATH);
        let const_js = self.workspace.resolve(CONST_JS_PATH);

        self.splice(&web_site_type, || {
            insert_at_marker(&web_site_type, NEW_WHITE_LABEL_MARKER, &enum_entry, false)
        })?;
        for import in self.required_imports()? {
            self.splice(&web_site_type, || insert_import_statement(&web_site_type, &import))?;
        }

        let setting_1 = fill(&paths::ts_financial_snippet(enabled), &base);
        self.splice(&setting, || insert_at_marker(&setting, SETTING_1_MARKER, &setting_1, false))?;
        let setting_2 = fill(&paths::election_fancy_bet_snippet(enabled), &base);
        self.splice(&setting, || insert_at_marker(&setting, SETTING_2_MARKER, &setting_2, false))?;

        let js = fill(CONST_JS, &base);
        self.splice(&const_js, || insert_at_marker(&const_js, NEW_WHITE_LABEL_MARKER, &js, false))?;
        Ok(())
    }

    /// Run one splice against `path`, recording the outcome.
    fn splice<T>(&mut self, path: &Path, op: impl FnOnce() -> Result<T>) -> Result<T> {
        match op() {
            Ok(v) => {
                if !self.report.spliced.iter().any(|p| p == path) {
                    self.report.spliced.push(path.to_path_buf());
                }
                Ok(v)
            }
            Err(e) => {
                self.report.failures.push(Failure {
                    step: "splice".to_string(),
                    path: path.to_path_buf(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn write(&mut self, step: &str, path: PathBuf, content: &str) {
        match write_to_file(&path, content) {
            Ok(()) => self.report.written.push(path),
            Err(e) => self.report.failures.push(Failure {
                step: step.to_string(),
                path,
                error: e.to_string(),
            }),
        }
    }
}

/// Run a full generation for an already validated config.
pub fn generate(workspace: &Workspace, config: &WhiteLabelConfig) -> GenerationReport {
    Generator::new(workspace, config).run()
}
