pub mod app;
pub mod core;
pub mod maps;
pub mod markers;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Long version string shown by `marker-replay --version`
pub fn long_version() -> String {
    format!(
        "{} (built {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_TIME,
        GIT_HASH
    )
}
