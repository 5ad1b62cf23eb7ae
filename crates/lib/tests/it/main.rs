/*! Integration tests for Converge.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - opset: Tests for the append-only operation log and its invariants
 * - interp: Tests for the replay fold and the materialized view
 * - determinism: Arrival-order permutation tests for replay convergence
 * - concurrency: Multi-threaded insert and interpret tests
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("converge=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod determinism;
mod opset;
