use crate::storage::partitioner::DEFAULT_NUM_PARTITIONS;

use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Name of the database holding the contact container
    pub database_name: String,
    /// Name of the container holding contact documents
    pub container_name: String,
    /// Number of physical partitions in the in-memory store
    pub num_partitions: u32,
    /// Optional JSON file of contacts loaded at startup
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let database_name = lookup("DATABASE_NAME")
            .filter(|v| !v.is_empty())
            .context("DATABASE_NAME must be provided")?;

        let container_name = lookup("CONTAINER_NAME")
            .filter(|v| !v.is_empty())
            .context("CONTAINER_NAME must be provided")?;

        let num_partitions: u32 = match lookup("NUM_PARTITIONS") {
            Some(raw) => raw
                .parse()
                .context("NUM_PARTITIONS must be a positive integer")?,
            None => DEFAULT_NUM_PARTITIONS,
        };
        if num_partitions == 0 {
            bail!("NUM_PARTITIONS must be greater than zero");
        }

        let seed_path = lookup("CONTACTS_SEED_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            bind_addr,
            database_name,
            container_name,
            num_partitions,
            seed_path,
        })
    }
}
