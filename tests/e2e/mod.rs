//! End-to-end workflow tests, driven against the real in-memory storage and
//! file-store implementations through a full [`LifecycleEngine`] /
//! [`SerDesBindingManager`] pair — no mocks.

mod search_and_compatibility;
mod serdes;
mod support;

#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
