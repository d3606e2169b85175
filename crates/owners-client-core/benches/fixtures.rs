//! Benchmark fixtures, generated at runtime.
//!
//! Fixtures are generated lazily on first access and cached for the
//! duration of the benchmark run. All generation is deterministic.

use owners_client_core::generate::{GeneratorConfig, OwnersFixture, generate};
use std::sync::LazyLock;

static SMALL: LazyLock<OwnersFixture> = LazyLock::new(|| generate(&GeneratorConfig::small()));
static MEDIUM: LazyLock<OwnersFixture> = LazyLock::new(|| generate(&GeneratorConfig::medium()));
static LARGE: LazyLock<OwnersFixture> = LazyLock::new(|| generate(&GeneratorConfig::large()));

/// Standard fixtures for regular benchmarks.
pub fn fixtures() -> &'static [(&'static str, &'static OwnersFixture)] {
    static FIXTURES: LazyLock<Vec<(&'static str, &'static OwnersFixture)>> = LazyLock::new(|| {
        vec![
            ("small", &*SMALL),
            ("medium", &*MEDIUM),
            ("large", &*LARGE),
        ]
    });
    FIXTURES.as_slice()
}
