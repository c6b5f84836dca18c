/*! Integration tests for Hexframe.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - coord: Tests for the string-level address algebra in CoordSystem
 * - validation: Tests for MapItem construction and the neighbor rules
 * - backend: Tests for the NodeStore/NodeTransaction implementations
 * - migration: Tests for the container collapse against real stores
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("hexframe=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod backend;
mod coord;
mod helpers;
