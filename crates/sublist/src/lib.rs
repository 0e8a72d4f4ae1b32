pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod lister;
pub mod model;
pub mod playlist;

pub use client::FsClient;
pub use config::{Config, Folder, PlaylistMode};
pub use error::{SublistError, SublistResult};
pub use generate::Generator;
pub use lister::{collect, Collection, FolderOutcome};
pub use playlist::{ExtInfStyle, Playlist, Tag, Track};

/// ┌──────────┐  one task per folder  ┌────────────┐
/// │  Config  ├───────────────────────►  FsClient  │ POST /api/fs/list
/// └──────────┘                        └─────┬──────┘
///                                           │ FolderOutcome
///                                     ┌─────▼──────┐
///                                     │ Collection │ (after every task joined)
///                                     └─────┬──────┘
///                                     ┌─────▼──────┐
///                                     │ Generator  │ POST /api/fs/get (raw mode)
///                                     └─────┬──────┘
///                                           ▼
///                                      <name>.m3u
pub async fn run(
    config: &Config,
    generator: &Generator,
) -> SublistResult<(Collection, Vec<std::path::PathBuf>)> {
    let collection = collect(generator.client(), &config.folders).await;
    let written = generator.generate(&collection).await?;
    Ok((collection, written))
}
