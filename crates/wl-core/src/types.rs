use std::fmt;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Deployment tier an SQL migration is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Dev,
    Uat,
    Sim,
}

impl Environment {
    /// Every environment, in generation order.
    pub fn all() -> &'static [Environment] {
        &[Environment::Dev, Environment::Uat, Environment::Sim]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Uat => "UAT",
            Environment::Sim => "SIM",
        }
    }

    pub fn sub_domain_static(self) -> &'static str {
        match self {
            Environment::Dev => "devnginx",
            Environment::Uat => "tberwxsjyk",
            Environment::Sim => "www",
        }
    }

    pub fn sub_domain_api(self) -> &'static str {
        match self {
            Environment::Dev => "dev9wapi",
            Environment::Uat => "uat9wapi",
            Environment::Sim => "saapipl",
        }
    }

    pub fn is_uat(self) -> bool {
        self == Environment::Uat
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// Which database an SQL file targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Db01,
    Db41,
}

impl Database {
    /// DB-01 first, then DB-41.
    pub fn all() -> &'static [Database] {
        &[Database::Db01, Database::Db41]
    }

    pub fn is_db01(self) -> bool {
        self == Database::Db01
    }

    pub fn file_suffix(self) -> &'static str {
        match self {
            Database::Db01 => "DB-01.sql",
            Database::Db41 => "DB-41.sql",
        }
    }
}
