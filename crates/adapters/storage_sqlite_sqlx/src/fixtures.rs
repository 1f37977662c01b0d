//! Shared setup for repository tests.

use munihub_app::ports::CemeteryRepository;
use munihub_domain::cemetery::{Block, Cemetery, Section};
use munihub_domain::id::{BlockId, CemeteryId};

use crate::cemetery_repo::SqliteCemeteryRepository;
use crate::pool::{Config, Database};

pub(crate) async fn database() -> Database {
    Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .unwrap()
}

/// A cemetery with one section "A" holding one block "1".
pub(crate) async fn layout(db: &Database) -> (CemeteryId, BlockId) {
    let repo = SqliteCemeteryRepository::new(db.pool().clone());
    let cemetery = Cemetery::builder().name("San Isidro").build().unwrap();
    let section = Section::builder(cemetery.id).name("A").build().unwrap();
    let block = Block::builder(section.id).name("1").build().unwrap();
    let ids = (cemetery.id, block.id);
    repo.create_cemetery(cemetery).await.unwrap();
    repo.create_section(section).await.unwrap();
    repo.create_block(block).await.unwrap();
    ids
}
