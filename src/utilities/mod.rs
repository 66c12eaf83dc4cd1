pub mod fetch_versions;
pub mod update_version;
