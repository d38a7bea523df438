mod client;
mod types;

pub use client::{
    decode_rgba, normalized_frame_name, server_error_message, ExtractorClient,
    GENERIC_UPLOAD_ERROR,
};
pub use types::{
    DecodedImage, FrameDescriptor, FrameImage, UploadError, UploadFinished, UploadResult,
};
