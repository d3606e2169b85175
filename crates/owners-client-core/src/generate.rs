//! Random owners data for benchmarking and testing.
//!
//! Generation is deterministic for a given seed.

use crate::identity::{Identity, OwnersByPath};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Configuration for generating owners fixtures.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of changed paths.
    pub num_paths: usize,
    /// Size of the pool owners are drawn from.
    pub num_owners: usize,
    /// Maximum owners per path.
    pub max_owners_per_path: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_paths: 20,
            num_owners: 12,
            max_owners_per_path: 3,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a config for `num_paths` paths with the default owner pool.
    pub fn new(num_paths: usize) -> Self {
        Self {
            num_paths,
            ..Default::default()
        }
    }

    /// Small fixture (5 paths, 6 owners).
    pub fn small() -> Self {
        Self::new(5).with_owner_pool(6)
    }

    /// Medium fixture (20 paths, 12 owners).
    pub fn medium() -> Self {
        Self::new(20)
    }

    /// Large fixture (100 paths, 16 owners).
    pub fn large() -> Self {
        Self::new(100).with_owner_pool(16)
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the owner pool size.
    pub fn with_owner_pool(mut self, num_owners: usize) -> Self {
        self.num_owners = num_owners.max(1);
        self
    }

    /// Set the maximum owners per path.
    pub fn with_max_owners(mut self, max: usize) -> Self {
        self.max_owners_per_path = max.max(1);
        self
    }
}

mod vocabulary {
    pub const DIRECTORIES: &[&str] = &[
        "base", "build", "chrome/browser", "components", "net", "third_party", "tools", "ui",
    ];
    pub const NAMES: &[&str] = &["main", "util", "handler", "service", "config", "README"];
    pub const EXTENSIONS: &[&str] = &["cc", "h", "py", "rs", "md", "gn"];
    pub const USERNAMES: &[&str] = &["alice", "bob", "chris", "dave", "emily", "frank"];
}

/// Generated paths and their owners.
#[derive(Debug, Clone)]
pub struct OwnersFixture {
    /// Paths in change order.
    pub paths: Vec<String>,
    /// Owners of each path, better owners first.
    pub owners_by_path: OwnersByPath,
}

fn owner_pool(size: usize) -> Vec<Identity> {
    use vocabulary::USERNAMES;
    (0..size.max(1))
        .map(|i| {
            let name = USERNAMES[i % USERNAMES.len()];
            match i / USERNAMES.len() {
                0 => Identity::new(format!("{name}@example.com")),
                n => Identity::new(format!("{name}{n}@example.com")),
            }
        })
        .collect()
}

/// Generates random paths with owners.
///
/// Every path gets at least one owner, so the fixture is always coverable.
pub fn generate(config: &GeneratorConfig) -> OwnersFixture {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let pool = owner_pool(config.num_owners);
    let max_owners = config.max_owners_per_path.clamp(1, pool.len());

    let mut paths = Vec::with_capacity(config.num_paths);
    let mut owners_by_path = OwnersByPath::new();
    for i in 0..config.num_paths {
        let dir = DIRECTORIES[rng.random_range(0..DIRECTORIES.len())];
        let name = NAMES[rng.random_range(0..NAMES.len())];
        let ext = EXTENSIONS[rng.random_range(0..EXTENSIONS.len())];
        let path = format!("{dir}/{name}_{i}.{ext}");

        let count = rng.random_range(1..=max_owners);
        let owners: Vec<Identity> = pool.choose_multiple(&mut rng, count).cloned().collect();

        owners_by_path.insert(path.clone(), owners);
        paths.push(path);
    }

    OwnersFixture {
        paths,
        owners_by_path,
    }
}

/// Renders a fixture as a single OWNERS file, one `per-file` line per path.
pub fn generate_owners_file(fixture: &OwnersFixture) -> String {
    let mut out = String::from("# Generated OWNERS file\n");
    for path in &fixture.paths {
        let name = path.rsplit('/').next().unwrap_or(path);
        let owners: Vec<&str> = fixture.owners_by_path[path]
            .iter()
            .map(Identity::as_str)
            .collect();
        out.push_str(&format!("per-file {}={}\n", name, owners.join(",")));
    }
    out
}
