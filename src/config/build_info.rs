/// Version metadata baked in at compile time.
///
/// Release builds export `VERSION_NUMBER`, `GIT_COMMIT` and `BUILD_DATE`
/// before invoking cargo; local builds fall back to the crate version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: match option_env!("VERSION_NUMBER") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    },
    git_commit: match option_env!("GIT_COMMIT") {
        Some(commit) => commit,
        None => "unknown",
    },
    build_date: match option_env!("BUILD_DATE") {
        Some(date) => date,
        None => "unknown",
    },
};

impl BuildInfo {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Version: {}", self.version),
            format!("Git Commit: {}", self.git_commit),
            format!("Build Date: {}", self.build_date),
        ]
    }
}
