mod state;
mod ui;

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use eframe::{egui, App};

use crate::download::{DownloadCoordinator, DownloadStatus};
use crate::upload::{
    decode_rgba, normalized_frame_name, ExtractorClient, FrameImage, UploadError, UploadFinished,
    GENERIC_UPLOAD_ERROR,
};
use crate::utils::validate::validate_candidate_name;
pub use state::{CandidateFile, SessionEvent, SessionPhase, SessionState};

/// Extraction service address. The service exposes no other configuration
/// surface; everything else is negotiated per request.
const SERVER_URL: &str = "http://127.0.0.1:5000";

/// Preview slot for one rendered frame entry.
pub enum FramePreview {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

pub struct GifConverter {
    state: SessionState,
    custom_name: String,
    client: ExtractorClient,
    downloads: DownloadCoordinator,
    frame_previews: Vec<FramePreview>,
    upload_receiver: Option<Receiver<UploadFinished>>,
    frame_receiver: Option<Receiver<FrameImage>>,
    health_receiver: Option<Receiver<bool>>,
    download_sender: Sender<DownloadStatus>,
    download_receiver: Receiver<DownloadStatus>,
    server_online: Option<bool>,
    last_download: Option<DownloadStatus>,
    scroll_to_results: bool,
    scroll_to_picker: bool,
}

impl GifConverter {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        log::info!("Initializing GIF converter client for {}", SERVER_URL);
        let (download_sender, download_receiver) = channel();
        let client = ExtractorClient::new(SERVER_URL);

        let mut app = Self {
            state: SessionState::default(),
            custom_name: String::new(),
            client: client.clone(),
            downloads: DownloadCoordinator::new(client),
            frame_previews: Vec::new(),
            upload_receiver: None,
            frame_receiver: None,
            health_receiver: None,
            download_sender,
            download_receiver,
            server_online: None,
            last_download: None,
            scroll_to_results: false,
            scroll_to_picker: false,
        };
        app.probe_health();
        app
    }

    fn probe_health(&mut self) {
        let client = self.client.clone();
        let (sender, receiver) = channel();
        self.health_receiver = Some(receiver);

        std::thread::spawn(move || {
            sender.send(client.probe_health()).unwrap_or_default();
        });
    }

    /// Single entry point for both selection triggers (picker and drop).
    pub fn select_candidate(&mut self, path: PathBuf) {
        if self.state.phase == SessionPhase::Uploading {
            return;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Err(message) = validate_candidate_name(&name) {
            log::warn!("Rejected candidate {:?}: {}", name, message);
            self.state.apply(SessionEvent::LocalError(message));
            return;
        }

        let size_bytes = match std::fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                log::warn!("Could not stat {:?}: {}", path, e);
                self.state.apply(SessionEvent::LocalError(format!(
                    "Não foi possível ler o arquivo: {}",
                    e
                )));
                return;
            }
        };

        log::info!("Candidate accepted: {} ({} bytes)", name, size_bytes);
        self.custom_name.clear();
        self.state.apply(SessionEvent::FileAccepted(CandidateFile {
            name,
            size_bytes,
            path,
        }));
    }

    pub fn open_picker(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("GIF", &["gif"])
            .pick_file()
        {
            self.select_candidate(path);
        }
    }

    /// Consumes the first dropped file; extra files are silently ignored.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next() {
            if let Some(path) = file.path {
                self.select_candidate(path);
            }
        }
    }

    pub fn start_upload(&mut self) {
        let candidate = match self.state.candidate.clone() {
            Some(candidate) => candidate,
            None => {
                self.state
                    .apply(SessionEvent::LocalError(UploadError::NoFileSelected.to_string()));
                return;
            }
        };

        self.state.apply(SessionEvent::UploadStarted);
        if self.state.phase != SessionPhase::Uploading {
            return;
        }

        log::info!("Uploading {} for extraction", candidate.name);
        let generation = self.state.generation;
        let frame_name = normalized_frame_name(&self.custom_name);
        let client = self.client.clone();

        let (sender, receiver) = channel();
        self.upload_receiver = Some(receiver);
        self.frame_receiver = None;
        self.frame_previews.clear();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let result = client
                    .extract_frames(&candidate.path, &candidate.name, frame_name)
                    .await;
                sender
                    .send(UploadFinished { generation, result })
                    .unwrap_or_default();
            });
        });
    }

    /// Fetches every frame asset in the background. Each arrives tagged with
    /// its entry index and the generation of the upload it belongs to.
    fn begin_frame_fetch(&mut self, generation: u64) {
        let frames = match &self.state.result {
            Some(result) => result.frames.clone(),
            None => return,
        };
        self.frame_previews = frames.iter().map(|_| FramePreview::Loading).collect();

        let client = self.client.clone();
        let (sender, receiver) = channel();
        self.frame_receiver = Some(receiver);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                for (index, frame) in frames.iter().enumerate() {
                    let image = match client.fetch_frame(&frame.path).await {
                        Ok(bytes) => decode_rgba(&bytes),
                        Err(e) => Err(e.to_string()),
                    };
                    if sender.send(FrameImage { generation, index, image }).is_err() {
                        break;
                    }
                }
            });
        });
    }

    pub fn download_one(&mut self, index: usize) {
        let frame = match self.state.result.as_ref().and_then(|r| r.frames.get(index)) {
            Some(frame) => frame.clone(),
            None => return,
        };
        self.downloads
            .download_frame(&frame, self.download_sender.clone());
    }

    pub fn download_all(&mut self) {
        match self.state.folder_token.clone() {
            Some(token) if !token.is_empty() => {
                self.downloads
                    .download_archive(&token, self.download_sender.clone());
            }
            _ => {
                log::warn!("Bulk download requested without an output folder token");
                self.state
                    .apply(SessionEvent::LocalError("Erro: pasta não encontrada".to_string()));
            }
        }
    }

    pub fn reset(&mut self) {
        log::info!("Resetting session");
        self.state.apply(SessionEvent::ResetRequested);
        self.custom_name.clear();
        self.frame_previews.clear();
        self.upload_receiver = None;
        self.frame_receiver = None;
        self.last_download = None;
        self.scroll_to_picker = true;
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        self.handle_dropped_files(ctx);

        if let Some(receiver) = self.health_receiver.take() {
            match receiver.try_recv() {
                Ok(online) => {
                    log::info!(
                        "Extraction service is {}",
                        if online { "online" } else { "offline" }
                    );
                    self.server_online = Some(online);
                }
                Err(TryRecvError::Empty) => self.health_receiver = Some(receiver),
                Err(TryRecvError::Disconnected) => self.server_online = Some(false),
            }
        }

        if let Some(receiver) = self.upload_receiver.take() {
            match receiver.try_recv() {
                Ok(finished) => match finished.result {
                    Ok(result) => {
                        log::info!(
                            "Extraction succeeded: {} frames in {}",
                            result.total_frames,
                            result.output_dir
                        );
                        let generation = finished.generation;
                        self.state
                            .apply(SessionEvent::UploadSucceeded { generation, result });
                        if self.state.phase == SessionPhase::Success
                            && self.state.generation == generation
                        {
                            self.begin_frame_fetch(generation);
                            self.scroll_to_results = true;
                        }
                    }
                    Err(e) => {
                        log::error!("Extraction failed: {}", e);
                        self.state.apply(SessionEvent::UploadFailed {
                            generation: finished.generation,
                            message: e.to_string(),
                        });
                    }
                },
                Err(TryRecvError::Empty) => self.upload_receiver = Some(receiver),
                Err(TryRecvError::Disconnected) => {
                    log::error!("Upload worker exited without reporting a result");
                    self.state.apply(SessionEvent::UploadFailed {
                        generation: self.state.generation,
                        message: GENERIC_UPLOAD_ERROR.to_string(),
                    });
                }
            }
        }

        let mut frames_disconnected = false;
        if let Some(receiver) = &self.frame_receiver {
            loop {
                match receiver.try_recv() {
                    Ok(frame) => {
                        if frame.generation != self.state.generation {
                            continue;
                        }
                        let preview = match frame.image {
                            Ok(decoded) => {
                                let color = egui::ColorImage::from_rgba_unmultiplied(
                                    [decoded.width, decoded.height],
                                    &decoded.rgba,
                                );
                                let texture = ctx.load_texture(
                                    format!("frame-{}-{}", frame.generation, frame.index),
                                    color,
                                    egui::TextureOptions::LINEAR,
                                );
                                FramePreview::Ready(texture)
                            }
                            Err(e) => {
                                log::warn!("Preview for frame {} failed: {}", frame.index, e);
                                FramePreview::Failed
                            }
                        };
                        if let Some(slot) = self.frame_previews.get_mut(frame.index) {
                            *slot = preview;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        frames_disconnected = true;
                        break;
                    }
                }
            }
        }
        if frames_disconnected {
            self.frame_receiver = None;
        }

        while let Ok(status) = self.download_receiver.try_recv() {
            self.last_download = Some(status);
        }

        if self.upload_receiver.is_some()
            || self.frame_receiver.is_some()
            || self.health_receiver.is_some()
        {
            ctx.request_repaint();
        } else {
            // low-rate keepalive so download completions surface promptly
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }
}

impl App for GifConverter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
