use crate::color::cache::DEFAULT_CACHE_CAPACITY;
use crate::persistence::overrides::STORE_FILE;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub store_path: PathBuf,
    pub stylesheet_path: PathBuf,
    pub cache_capacity: usize,
    /// Chat command given on the command line; `None` reads stdin.
    pub command: Option<String>,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        if args.len() < 2 {
            return Err("usage: chatcolors <data-root> [command...]".to_string());
        }

        let root = Path::new(&args[1]).to_path_buf();
        let store_path = env_path("CHATCOLORS_STORE").unwrap_or_else(|| root.join(STORE_FILE));
        let stylesheet_path = env_path("CHATCOLORS_STYLESHEET")
            .unwrap_or_else(|| root.join("config").join("custom.css"));
        let cache_capacity = match std::env::var("CHATCOLORS_CACHE_CAPACITY") {
            Ok(value) => parse_capacity(&value).unwrap_or_else(|| {
                eprintln!(
                    "chatcolors: invalid CHATCOLORS_CACHE_CAPACITY '{}', using {}",
                    value, DEFAULT_CACHE_CAPACITY
                );
                DEFAULT_CACHE_CAPACITY
            }),
            Err(_) => DEFAULT_CACHE_CAPACITY,
        };
        let command = if args.len() > 2 {
            Some(args[2..].join(" "))
        } else {
            None
        };
        Ok(Self {
            root,
            store_path,
            stylesheet_path,
            cache_capacity,
            command,
        })
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    })
}

fn parse_capacity(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|capacity| *capacity > 0)
}
