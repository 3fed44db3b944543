use crate::board::{ProjectCollection, StatusBoard, TaskCollection};
use crate::config::Config;
use crate::error::TaskboardError;
use crate::store::HttpStore;

/// Load configuration and apply the `--store-url` override.
pub fn load_config(store_url: Option<&str>) -> Result<Config, TaskboardError> {
    let config = Config::load_with_dotenv()?.with_store_url(store_url);
    config.validate()?;
    Ok(config)
}

pub fn open_tasks(config: &Config) -> Result<TaskCollection<HttpStore>, TaskboardError> {
    let store = HttpStore::from_config(&config.store)?;
    let statuses = config.board.status_set()?;
    Ok(TaskCollection::new(store, statuses, config.sync.clone()))
}

/// Open the task collection and load it, ready for board operations.
pub async fn open_board(config: &Config) -> Result<StatusBoard<HttpStore>, TaskboardError> {
    let mut tasks = open_tasks(config)?;
    tasks.load().await?;
    Ok(StatusBoard::new(tasks))
}

pub fn open_projects(config: &Config) -> Result<ProjectCollection<HttpStore>, TaskboardError> {
    Ok(ProjectCollection::new(HttpStore::from_config(&config.store)?))
}
