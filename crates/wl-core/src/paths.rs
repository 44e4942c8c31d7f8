use crate::error::{Result, WlError};
use crate::types::{Database, Environment};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

pub const OUTPUT_DIR: &str = "result";
pub const PROJECT_PREFIX: &str = "SACRIC-";

// ---------------------------------------------------------------------------
// Sibling checkout (relative to the tool's working directory)
// ---------------------------------------------------------------------------

pub const DOMAIN_TYPE_PACKAGE: &str = "../src/main/java/com/nv/commons/code/domain/";
pub const WEBSITE_PAGE_PACKAGE: &str = "../src/main/java/com/nv/commons/website/page/";
pub const WEBSITE_TYPE_PATH: &str = "../src/main/java/com/nv/commons/code/WebSiteType.java";
pub const SETTING_PATH: &str = "../src/main/java/com/nv/commons/model/Setting.java";
pub const CONST_JS_PATH: &str = "../src/main/webapp/js/const/Const.js";

pub const NEW_WHITE_LABEL_MARKER: &str = "// insert New White Label";
pub const SETTING_1_MARKER: &str = "// insert New White Label setting-1";
pub const SETTING_2_MARKER: &str = "// insert New White Label setting-2";

pub const DOMAIN_TYPE_SUFFIX: &str = "DomainType.java";
pub const WEBSITE_PAGE_SUFFIX: &str = "WebSitePage.java";

// ---------------------------------------------------------------------------
// Domain allow-lists applied to UAT new-group SQL
// ---------------------------------------------------------------------------

/// Public (`backup`) domains that are always active in UAT.
pub const UAT_PUBLIC_DOMAIN_LIST: &[&str] = &["qqkk77.net", "qqkk77.live"];
/// Private (`privateIp`) domains that are always active in UAT.
pub const UAT_PRIVATE_DOMAIN_LIST: &[&str] = &["cckk77.net", "cckk77.live"];

// ---------------------------------------------------------------------------
// Inline snippets
// ---------------------------------------------------------------------------

pub const CONST_JS: &str = "WebSiteType.{$webSiteName} = {\n\
\t\"value\": {$webSiteValue},\n\
\t\"shortCode\": \"{$webSiteName}\",\n\
\t\"displayName\": \"{$webSiteName}\"\n\
};\n";

pub fn ts_financial_snippet(enabled: bool) -> String {
    format!("\n@HttpUpdate\npublic static boolean ENABLE_TS_FINANCIAL_{{$webSiteName}} = {enabled};\n\n")
}

pub fn election_fancy_bet_snippet(enabled: bool) -> String {
    format!(
        "\n@HttpUpdate\npublic static boolean ENABLE_ELECTION_FANCY_BET_{{$webSiteName}} = {enabled};\n\n"
    )
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Logical template names and the files they live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    Db01,
    Db41,
    ApiDb01,
    ApiDb41,
    DomainType,
    WebSitePage,
    ApiWalletWebSitePage,
    NewSiteOther,
    ApiOther,
    UpdateGroupSql,
    NewGroupSqlDev,
    NewGroupSqlUat,
    NewGroupSqlSim,
}

impl TemplateKey {
    pub fn all() -> &'static [TemplateKey] {
        &[
            TemplateKey::Db01,
            TemplateKey::Db41,
            TemplateKey::ApiDb01,
            TemplateKey::ApiDb41,
            TemplateKey::DomainType,
            TemplateKey::WebSitePage,
            TemplateKey::ApiWalletWebSitePage,
            TemplateKey::NewSiteOther,
            TemplateKey::ApiOther,
            TemplateKey::UpdateGroupSql,
            TemplateKey::NewGroupSqlDev,
            TemplateKey::NewGroupSqlUat,
            TemplateKey::NewGroupSqlSim,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKey::Db01 => "DB_01",
            TemplateKey::Db41 => "DB_41",
            TemplateKey::ApiDb01 => "API_DB_01",
            TemplateKey::ApiDb41 => "API_DB_41",
            TemplateKey::DomainType => "DOMAIN_TYPE",
            TemplateKey::WebSitePage => "WEB_SITE_PAGE",
            TemplateKey::ApiWalletWebSitePage => "API_WALLET_WEB_SITE_PAGE",
            TemplateKey::NewSiteOther => "NEW_SITE_OTHER",
            TemplateKey::ApiOther => "API_OTHER",
            TemplateKey::UpdateGroupSql => "UPDATE_GROUP_SQL",
            TemplateKey::NewGroupSqlDev => "NEW_GROUP_SQL_DEV",
            TemplateKey::NewGroupSqlUat => "NEW_GROUP_SQL_UAT",
            TemplateKey::NewGroupSqlSim => "NEW_GROUP_SQL_SIM",
        }
    }

    /// Path of the template file relative to the workspace root.
    pub fn relative_path(self) -> &'static str {
        match self {
            TemplateKey::Db01 => "template/NewSite-DB-01-template.txt",
            TemplateKey::Db41 => "template/NewSite-DB-41-template.txt",
            TemplateKey::ApiDb01 => "template/ApiWallet-DB-01-template.txt",
            TemplateKey::ApiDb41 => "template/ApiWallet-DB-41-template.txt",
            TemplateKey::DomainType => "template/DomainTypeTemplate.txt",
            TemplateKey::WebSitePage => "template/WebSitePageTemplate.txt",
            TemplateKey::ApiWalletWebSitePage => "template/ApiWalletWebSitePageTemplate.txt",
            TemplateKey::NewSiteOther => "template/NewSite-WST.txt",
            TemplateKey::ApiOther => "template/ApiWallet-WST.txt",
            TemplateKey::UpdateGroupSql => "template/UpdateGroup-SQL-template.txt",
            TemplateKey::NewGroupSqlDev => "template/NewGroup-SQL-DEV-template.txt",
            TemplateKey::NewGroupSqlUat => "template/NewGroup-SQL-UAT-template.txt",
            TemplateKey::NewGroupSqlSim => "template/NewGroup-SQL-SIM-template.txt",
        }
    }

    /// Four-way lookup for the per-environment SQL template.
    pub fn sql(db: Database, api_white_label: bool) -> TemplateKey {
        match (db.is_db01(), api_white_label) {
            (true, false) => TemplateKey::Db01,
            (false, false) => TemplateKey::Db41,
            (true, true) => TemplateKey::ApiDb01,
            (false, true) => TemplateKey::ApiDb41,
        }
    }

    pub fn new_group_sql(env: Environment) -> TemplateKey {
        match env {
            Environment::Dev => TemplateKey::NewGroupSqlDev,
            Environment::Uat => TemplateKey::NewGroupSqlUat,
            Environment::Sim => TemplateKey::NewGroupSqlSim,
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// Resolves the fixed relative locations against the directory the tool runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_path(&self, key: TemplateKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// `result/SACRIC-<ticketNo>-<ENV>-DB-0x.sql`
    pub fn sql_output_path(&self, ticket_no: &str, env: Environment, db: Database) -> PathBuf {
        self.output_dir().join(format!(
            "{PROJECT_PREFIX}{ticket_no}-{}-{}",
            env.as_str(),
            db.file_suffix()
        ))
    }

    /// Resolve one of the sibling-checkout constants above.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// `<package dir><ClassName><suffix>`
    pub fn class_file(&self, package_dir: &str, class_name: &str, suffix: &str) -> PathBuf {
        self.resolve(package_dir).join(format!("{class_name}{suffix}"))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(".")
    }
}

// ---------------------------------------------------------------------------
// Package derivation
// ---------------------------------------------------------------------------

/// Turn a source directory plus a class file name into a fully qualified
/// class name, starting at the `com` package root.
///
/// `("../src/main/java/com/nv/page/", "FooWebSitePage.java")` becomes
/// `com.nv.page.FooWebSitePage`.
pub fn path_to_package(path: &str, class_file: &str) -> Result<String> {
    let normalized = path.replace('\\', "/");
    let start = normalized
        .find("com/")
        .or_else(|| normalized.find("com"))
        .ok_or_else(|| WlError::PackageRootNotFound(path.to_string()))?;

    let mut package = normalized[start..].trim_end_matches('/').replace('/', ".");
    if !class_file.is_empty() {
        package.push('.');
        package.push_str(&class_file.replace(".java", ""));
    }
    Ok(package)
}
