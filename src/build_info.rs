//! Commit hash and build date, generated by build.rs.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `"<commit> <date>"`, as shown by `packforge --version`.
pub fn build_stamp() -> String {
    format!("{} {}", BUILD_COMMIT, BUILD_DATE)
}
