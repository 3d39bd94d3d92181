//! Build and questionnaire identity
//!
//! What `persona-quiz version` prints, and the User-Agent the persona
//! client sends so the service can tell quiz builds apart.

use std::fmt;

use crate::config::DEFAULT_BASE_URL;
use crate::quiz::Catalog;

/// Values stamped in by build.rs
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Short commit hash, "unknown" outside a checkout
    pub git_hash: &'static str,
    git_dirty: &'static str,
    pub build_timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("PERSONA_QUIZ_GIT_HASH"),
            git_dirty: env!("PERSONA_QUIZ_GIT_DIRTY"),
            build_timestamp: env!("PERSONA_QUIZ_BUILD_TIMESTAMP"),
            target: env!("PERSONA_QUIZ_TARGET"),
            profile: env!("PERSONA_QUIZ_PROFILE"),
            rustc_version: env!("PERSONA_QUIZ_RUSTC_VERSION"),
        }
    }

    pub fn git_dirty(&self) -> bool {
        self.git_dirty == "true"
    }

    /// "0.1.0-abc1234", with "-dirty" for uncommitted builds
    pub fn full_version(&self) -> String {
        let dirty = if self.git_dirty() { "-dirty" } else { "" };
        format!("{}-{}{}", self.version, self.git_hash, dirty)
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = Catalog::investor();
        writeln!(f, "{} {}", self.name, self.full_version())?;
        writeln!(f)?;
        writeln!(f, "Questionnaire:")?;
        writeln!(f, "  Steps:      {}", catalog.step_count())?;
        writeln!(f, "  Questions:  {}", catalog.questions().count())?;
        writeln!(f, "  Service:    {}", DEFAULT_BASE_URL)?;
        writeln!(f)?;
        writeln!(f, "Build Information:")?;
        writeln!(f, "  Git Hash:   {}{}", self.git_hash, if self.git_dirty() { " (dirty)" } else { "" })?;
        writeln!(f, "  Built:      {} ({})", self.build_timestamp, self.profile)?;
        writeln!(f, "  Target:     {}", self.target)?;
        writeln!(f, "  Compiler:   {}", self.rustc_version)?;
        Ok(())
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::current()
}

/// User-Agent header for persona service calls
pub fn user_agent() -> String {
    let info = build_info();
    format!("{}/{} ({})", info.name, info.version, info.git_hash)
}

pub fn print_version() {
    print!("{}", build_info());
}
