//! # Observability & Tracing
//!
//! Relation operations are instrumented with `tracing` spans named after the
//! operation (`get_relation`, `add_relation`, ...) carrying the relation name.
//! Inside them the helper logs every dispatched request at `debug` and every
//! typed failure at `warn`.
//!
//! ```bash
//! RUST_LOG=hal_resource=debug cargo test -- --nocapture
//! ```

/// Initializes a compact `tracing-subscriber` filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
