use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when storing or serving gift images
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote server returned status {0}")]
    RemoteStatus(u16),

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Image exceeds maximum size of {0} bytes")]
    TooLarge(usize),

    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("Image not found: {0}")]
    NotFound(String),
}

/// Filesystem store for gift images
///
/// Images arrive either as raw upload bytes or by fetching an admin
/// supplied URL. Files are kept flat under one directory and named
/// `<uuid>.<ext>`, so the stored name alone is enough to serve them.
pub struct ImageStore {
    root: PathBuf,
    client: Client,
    max_bytes: usize,
}

impl ImageStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(
        dir: impl Into<PathBuf>,
        max_bytes: usize,
        fetch_timeout_secs: u64,
    ) -> Result<Self, ImageError> {
        let root = dir.into();
        std::fs::create_dir_all(&root)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(fetch_timeout_secs))
            .build()?;

        Ok(Self {
            root,
            client,
            max_bytes,
        })
    }

    /// Persist uploaded bytes, returning the generated file name
    pub async fn save_upload(&self, bytes: &[u8], content_type: &str) -> Result<String, ImageError> {
        if bytes.len() > self.max_bytes {
            return Err(ImageError::TooLarge(self.max_bytes));
        }

        let ext = extension_for(content_type)
            .ok_or_else(|| ImageError::UnsupportedType(content_type.to_string()))?;

        let name = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::write(self.root.join(&name), bytes).await?;

        tracing::debug!("Stored uploaded image {} ({} bytes)", name, bytes.len());

        Ok(name)
    }

    /// Download an image from a URL and persist it
    ///
    /// The Content-Length header is checked before the body is pulled;
    /// the header is optional, so the cap is enforced again while the
    /// body streams in.
    pub async fn fetch_remote(&self, url: &str) -> Result<String, ImageError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::RemoteStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let ext = extension_for(&content_type)
            .ok_or_else(|| ImageError::UnsupportedType(content_type.clone()))?;

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(ImageError::TooLarge(self.max_bytes));
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(ImageError::TooLarge(self.max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        let name = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::write(self.root.join(&name), &bytes).await?;

        tracing::debug!("Fetched remote image {} ({} bytes)", name, bytes.len());

        Ok(name)
    }

    /// Read a stored image, returning its bytes and MIME type
    pub async fn open(&self, name: &str) -> Result<(Vec<u8>, &'static str), ImageError> {
        validate_name(name)?;

        let bytes = tokio::fs::read(self.root.join(name)).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ImageError::NotFound(name.to_string())
            } else {
                ImageError::Io(err)
            }
        })?;

        Ok((bytes, mime_for(name)))
    }

    /// Delete a stored image; a file that is already gone is not an error
    pub async fn remove(&self, name: &str) -> Result<(), ImageError> {
        validate_name(name)?;

        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Image {} already removed", name);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Map a Content-Type value to a file extension
fn extension_for(content_type: &str) -> Option<&'static str> {
    // Drop parameters such as "; charset=binary"
    let essence = content_type.split(';').next().unwrap_or("").trim();

    match essence.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Map a stored file name back to a MIME type for serving
fn mime_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Reject names that could escape the image directory
fn validate_name(name: &str) -> Result<(), ImageError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ImageError::InvalidName(name.to_string()));
    }
    Ok(())
}
