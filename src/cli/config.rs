use std::sync::Arc;

use crate::client::HttpClient;
use crate::config::{config, AppConfig};
use crate::models::BoardId;
use crate::persist::{FileStorage, Persistence, Storage};
use crate::store::Store;

pub type CliStore = Store<HttpClient>;

/// Open the store backed by the config directory, state already rehydrated
pub fn open_store() -> anyhow::Result<CliStore> {
    open_store_with(config())
}

pub fn open_store_with(config: &AppConfig) -> anyhow::Result<CliStore> {
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.storage.dir)?);
    let client = HttpClient::from_config(&config.api, Arc::clone(&storage))?;
    let persistence = Persistence::new(storage, config.storage.state_key.clone());
    Ok(Store::open(client, persistence))
}

/// Use the given board id or fall back to the selected board
pub fn resolve_board(store: &CliStore, provided: Option<BoardId>) -> anyhow::Result<BoardId> {
    match provided {
        Some(id) => Ok(id),
        None => match store.selected_board() {
            Some(board) => Ok(board.id),
            None => Err(anyhow::anyhow!("No board selected; pass --board or run `vuello board use <id>`")),
        },
    }
}
