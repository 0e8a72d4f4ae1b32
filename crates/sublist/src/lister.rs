use std::collections::HashSet;

use crate::{
    client::FsClient,
    config::Folder,
    error::{SublistError, SublistResult},
};

/// Result of listing one folder.
#[derive(Debug)]
pub struct FolderOutcome {
    pub folder: Folder,
    pub result: SublistResult<Vec<String>>,
}

impl FolderOutcome {
    /// Remote paths of the listed files. Empty when listing failed.
    pub fn files(&self) -> &[String] {
        match &self.result {
            Ok(files) => files,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&SublistError> {
        self.result.as_ref().err()
    }
}

/// Files collected from every configured folder, in configuration order.
#[derive(Debug, Default)]
pub struct Collection {
    outcomes: Vec<FolderOutcome>,
}

impl Collection {
    pub fn outcomes(&self) -> &[FolderOutcome] {
        &self.outcomes
    }

    pub fn get(&self, folder: &Folder) -> Option<&FolderOutcome> {
        self.outcomes.iter().find(|o| &o.folder == folder)
    }

    /// Folders which were listed successfully and contain at least one file.
    pub fn non_empty(&self) -> impl Iterator<Item = (&Folder, &[String])> {
        self.outcomes
            .iter()
            .filter(|o| !o.files().is_empty())
            .map(|o| (&o.folder, o.files()))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Folder, &SublistError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error().map(|e| (&o.folder, e)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Lists every folder concurrently, one task per folder, and waits for all of them.
///
/// Identical folders are only listed once. A failing folder never affects the others.
pub async fn collect(client: &FsClient, folders: &[Folder]) -> Collection {
    let mut seen = HashSet::new();
    let folders: Vec<Folder> = folders
        .iter()
        .filter(|f| seen.insert(*f))
        .cloned()
        .collect();

    log::info!("Listing {} folder(s).", folders.len());

    let handles: Vec<_> = folders
        .iter()
        .map(|folder| {
            let client = client.clone();
            let folder = folder.clone();
            tokio::spawn(async move { client.list(&folder).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(folders.len());
    for (folder, handle) in folders.into_iter().zip(handles) {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SublistError::TaskPanicked(e.to_string())),
        };

        match &result {
            Ok(files) if files.is_empty() => {
                log::info!("{}: folder {} is empty.", folder.name, folder.path)
            }
            Ok(files) => log::info!("{}: {} file(s) found.", folder.name, files.len()),
            Err(e) => log::error!("{}: failed to list {}: {e}", folder.name, folder.path),
        }
        outcomes.push(FolderOutcome { folder, result });
    }

    Collection { outcomes }
}
