use serde::Deserialize;
use thiserror::Error;

/// One extracted frame as reported by the extraction service.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameDescriptor {
    pub name: String,
    /// Relative to the service's static asset root.
    pub path: String,
}

/// Successful `/upload` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    pub total_frames: u32,
    pub frames: Vec<FrameDescriptor>,
    pub output_dir: String,
}

/// Failure response body, `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Nenhum arquivo selecionado")]
    NoFileSelected,
    #[error("Não foi possível ler o arquivo: {0}")]
    Read(#[from] std::io::Error),
    #[error("Falha na comunicação com o servidor: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-2xx response; carries the server's own message when it sent one.
    #[error("{0}")]
    Server(String),
    #[error("Resposta inválida do servidor")]
    InvalidBody,
}

/// Outcome of one upload attempt, tagged with the generation it was
/// dispatched under.
pub struct UploadFinished {
    pub generation: u64,
    pub result: Result<UploadResult, UploadError>,
}

/// RGBA pixels of one decoded frame asset.
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Fetch-and-decode result for the frame at `index`.
pub struct FrameImage {
    pub generation: u64,
    pub index: usize,
    pub image: Result<DecodedImage, String>,
}
