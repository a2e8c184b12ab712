use crate::storage::{DataKind, LocalStore, Namespace};
use tracing::info;

/// Business name whose per-user keys receive the legacy data.
pub const MIGRATION_TARGET: &str = "Panchita's Catering";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub copied: Vec<DataKind>,
    pub missing: Vec<DataKind>,
}

impl MigrationReport {
    pub fn changed(&self) -> bool {
        !self.copied.is_empty()
    }
}

/// Copies every legacy dataset to the target user's namespace; legacy
/// entries stay in place.
pub fn migrate_user_data(store: &mut LocalStore) -> MigrationReport {
    let target = Namespace::user(MIGRATION_TARGET);
    let mut report = MigrationReport::default();

    for kind in DataKind::ALL {
        let legacy = store.get(&Namespace::Legacy, kind).map(str::to_string);
        match legacy {
            Some(value) => {
                store.set(&target, kind, value);
                info!(
                    "Datos de {} migrados para {}",
                    kind.key_name(),
                    MIGRATION_TARGET
                );
                report.copied.push(kind);
            }
            None => {
                info!("No se encontraron datos de {}", kind.key_name());
                report.missing.push(kind);
            }
        }
    }

    if report.changed() {
        info!("Migración completada: {} claves copiadas", report.copied.len());
    } else {
        info!("No se encontraron datos para migrar");
    }

    report
}
