use crate::errors::StoreError;
use std::collections::BTreeMap;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Clientes,
    Obras,
    Registros,
    Productos,
}

impl DataKind {
    pub const ALL: [Self; 4] = [Self::Clientes, Self::Obras, Self::Registros, Self::Productos];

    pub fn key_name(self) -> &'static str {
        match self {
            Self::Clientes => "clientes",
            Self::Obras => "obras",
            Self::Registros => "registros",
            Self::Productos => "productos",
        }
    }
}

/// Legacy entries sit under bare kind names; per-user entries under
/// `{username}_{kind}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    Legacy,
    User(String),
}

impl Namespace {
    pub fn user(name: impl Into<String>) -> Self {
        Self::User(name.into())
    }

    pub fn key(&self, kind: DataKind) -> String {
        match self {
            Self::Legacy => kind.key_name().to_string(),
            Self::User(name) => format!("{}_{}", name, kind.key_name()),
        }
    }
}

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse store file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read store file: {err}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(&self.entries).map_err(StoreError::internal)?;
        fs::write(&self.path, payload).await.map_err(StoreError::internal)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, namespace: &Namespace, kind: DataKind) -> Option<&str> {
        self.entries.get(&namespace.key(kind)).map(String::as_str)
    }

    pub fn set(&mut self, namespace: &Namespace, kind: DataKind, value: impl Into<String>) {
        self.entries.insert(namespace.key(kind), value.into());
    }

    pub fn contains(&self, namespace: &Namespace, kind: DataKind) -> bool {
        self.entries.contains_key(&namespace.key(kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn resolve_store_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("FINTRACK_STORE_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/local_store.json"))
}
