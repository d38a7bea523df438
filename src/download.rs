use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use rfd::FileDialog;

use crate::upload::{ExtractorClient, FrameDescriptor};

/// Outcome of one save-to-disk operation, reported back to the footer.
#[derive(Debug, Clone)]
pub struct DownloadStatus {
    pub label: String,
    pub result: Result<PathBuf, String>,
}

/// Issues single-frame and bulk archive downloads against the service.
pub struct DownloadCoordinator {
    client: ExtractorClient,
}

impl DownloadCoordinator {
    pub fn new(client: ExtractorClient) -> Self {
        Self { client }
    }

    pub fn archive_file_name(token: &str) -> String {
        format!("frames_{}.zip", token)
    }

    /// Saves one frame's asset, suggesting the frame's display name.
    pub fn download_frame(&self, frame: &FrameDescriptor, status: Sender<DownloadStatus>) {
        let target = match FileDialog::new().set_file_name(&frame.name).save_file() {
            Some(target) => target,
            None => {
                log::info!("Frame download cancelled: {}", frame.name);
                return;
            }
        };

        spawn_fetch(
            frame.name.clone(),
            self.client.static_url(&frame.path),
            target,
            status,
        );
    }

    /// Saves the zip archive for the given output directory token.
    pub fn download_archive(&self, token: &str, status: Sender<DownloadStatus>) {
        let file_name = Self::archive_file_name(token);
        let target = match FileDialog::new().set_file_name(&file_name).save_file() {
            Some(target) => target,
            None => {
                log::info!("Archive download cancelled: {}", file_name);
                return;
            }
        };

        spawn_fetch(file_name, self.client.archive_url(token), target, status);
    }
}

fn spawn_fetch(label: String, url: String, target: PathBuf, status: Sender<DownloadStatus>) {
    std::thread::spawn(move || {
        let result = fetch_to_file(&url, &target);
        match &result {
            Ok(path) => log::info!("Saved {} to {}", label, path.display()),
            Err(e) => log::error!("Download of {} failed: {}", label, e),
        }
        status.send(DownloadStatus { label, result }).unwrap_or_default();
    });
}

fn fetch_to_file(url: &str, target: &Path) -> Result<PathBuf, String> {
    let response =
        reqwest::blocking::get(url).map_err(|e| format!("Falha no download: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Download falhou com status: {}", status));
    }

    let bytes = response
        .bytes()
        .map_err(|e| format!("Falha no download: {}", e))?;
    fs::write(target, &bytes).map_err(|e| format!("Não foi possível salvar o arquivo: {}", e))?;

    Ok(target.to_path_buf())
}
