//! Runtime configuration from flags, environment and `.env`.

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::posts::PostRegistry;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Every flag can also be set through the environment variable shown in
/// `--help`. A `.env` file in the working directory is read first.
#[derive(Debug, Parser)]
#[command(name = "posts-api", version, about = "In-memory CRUD service for posts")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "POSTS_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// tracing filter directive, e.g. `info` or `posts_api=debug`
    #[arg(long = "log", env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    /// Seed for the post id generator; ids are unpredictable when unset
    #[arg(long, env = "POSTS_ID_SEED")]
    pub id_seed: Option<u64>,

    /// Start with an empty registry instead of the two seed posts
    #[arg(long, env = "POSTS_NO_SEED")]
    pub no_seed_posts: bool,
}

impl Config {
    /// Loads `.env` (if present) and parses the process arguments.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// Builds the registry the service starts with.
    pub fn registry(&self) -> PostRegistry {
        let rng = match self.id_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if self.no_seed_posts {
            PostRegistry::new(Vec::new(), rng)
        } else {
            PostRegistry::with_seed_posts(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "posts-api",
            "--bind",
            "0.0.0.0:9000",
            "--id-seed",
            "7",
            "--no-seed-posts",
        ])
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.id_seed, Some(7));
        assert!(config.registry().is_empty().unwrap());
    }

    #[test]
    fn registry_is_seeded_by_default() {
        let config = Config::try_parse_from(["posts-api", "--id-seed", "1"]).unwrap();
        assert_eq!(config.registry().len().unwrap(), 2);
    }
}
