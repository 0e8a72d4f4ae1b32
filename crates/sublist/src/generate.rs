use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use futures::{stream, StreamExt};

use crate::{
    client::FsClient,
    config::{Config, Folder, PlaylistMode, DEFAULT_PROXY_TEMPLATE},
    error::SublistResult,
    lister::Collection,
    playlist::{ExtInfStyle, Playlist, Tag, Track},
};

pub const DEFAULT_RESOLVE_JOBS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(3);

impl PlaylistMode {
    pub fn ext_inf_style(self) -> ExtInfStyle {
        match self {
            PlaylistMode::Proxy => ExtInfStyle::Comma,
            PlaylistMode::Raw => ExtInfStyle::Spaced,
        }
    }
}

/// Builds and writes one playlist per non-empty folder of a [Collection].
pub struct Generator {
    client: FsClient,
    mode: PlaylistMode,
    proxy: String,
    output_dir: PathBuf,
    resolve_jobs: NonZeroUsize,
}

impl Generator {
    pub fn new(client: FsClient) -> Self {
        Self {
            client,
            mode: PlaylistMode::default(),
            proxy: DEFAULT_PROXY_TEMPLATE.to_string(),
            output_dir: PathBuf::from("."),
            resolve_jobs: DEFAULT_RESOLVE_JOBS,
        }
    }

    pub fn from_config(client: FsClient, config: &Config) -> Self {
        Self::new(client)
            .mode(config.mode)
            .proxy_template(config.proxy.clone())
    }

    pub fn mode(mut self, mode: PlaylistMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn proxy_template(mut self, template: impl Into<String>) -> Self {
        self.proxy = template.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Maximum number of raw url lookups running at once for one folder.
    pub fn resolve_jobs(mut self, jobs: NonZeroUsize) -> Self {
        self.resolve_jobs = jobs;
        self
    }

    pub fn client(&self) -> &FsClient {
        &self.client
    }

    pub fn playlist_path(&self, folder: &Folder) -> PathBuf {
        self.output_dir.join(folder.playlist_file_name())
    }

    /// Builds the playlist of a single folder from its remote file paths.
    pub async fn playlist(&self, folder: &Folder, files: &[String]) -> Playlist {
        match self.mode {
            PlaylistMode::Proxy => {
                let tracks = files
                    .iter()
                    .map(|path| {
                        Track::new(
                            display_name(path),
                            proxy_uri(&self.proxy, &folder.host, path),
                        )
                        .with_tag(Tag::group_title(&folder.name))
                    })
                    .collect();

                let mut playlist = Playlist::new(tracks);
                playlist.sort_by_name_desc();
                playlist
            }
            PlaylistMode::Raw => {
                let mut files = files.to_vec();
                files.sort();

                let tracks: Vec<Track> = stream::iter(files)
                    .map(|path| async move {
                        let uri = self.client.resolve(folder, &path).await;
                        (path, uri)
                    })
                    .buffered(self.resolve_jobs.get())
                    .filter_map(|(path, uri)| async move {
                        if uri.is_empty() {
                            log::warn!("{}: skipping {path}, no url resolved.", folder.name);
                            None
                        } else {
                            Some(Track::new(display_name(&path), uri))
                        }
                    })
                    .collect()
                    .await;

                Playlist::new(tracks)
            }
        }
    }

    /// Writes `<name>.m3u` for every folder with at least one file.
    ///
    /// Returns the paths of the written playlists.
    pub async fn generate(&self, collection: &Collection) -> SublistResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for (folder, files) in collection.non_empty() {
            let playlist = self.playlist(folder, files).await;
            if playlist.is_empty() {
                log::warn!("{}: no playable track, playlist skipped.", folder.name);
                continue;
            }

            let path = self.playlist_path(folder);
            write_playlist(&path, &playlist, self.mode.ext_inf_style()).await?;
            log::info!(
                "{}: {} track(s) written to {}",
                folder.name,
                playlist.len(),
                path.display()
            );
            written.push(path);
        }

        Ok(written)
    }
}

async fn write_playlist(path: &Path, playlist: &Playlist, style: ExtInfStyle) -> SublistResult<()> {
    tokio::fs::write(path, playlist.render(style)).await?;
    Ok(())
}

/// Fills `{host}` and `{path}` of a proxy template.
pub fn proxy_uri(template: &str, host: &str, path: &str) -> String {
    template.replace("{host}", host).replace("{path}", path)
}

/// Last component of a remote path.
pub fn display_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
