pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Binary megabytes with two decimal places, the same figure the web
    /// service reports for uploads.
    pub fn format_mb(size: u64) -> String {
        format!("{:.2} MB", size as f64 / 1_048_576.0)
    }
}
