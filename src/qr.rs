use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qrcode::{EcLevel, QrCode};
use tokio::task;
use tracing::debug;

use crate::entities::outing_passes;

/// Renders pass verification QR images into the static content directory,
/// one PNG per pass, named by the pass token.
#[derive(Debug, Clone)]
pub struct QrGenerator {
    static_dir: PathBuf,
    base_url: String,
}

impl QrGenerator {
    pub fn new(static_dir: impl AsRef<Path>, base_url: impl Into<String>) -> Self {
        Self {
            static_dir: static_dir.as_ref().to_path_buf(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn image_path(&self, token: &str) -> PathBuf {
        self.static_dir.join(format!("{token}.png"))
    }

    /// Verification URL followed by the human-readable pass fields, as a
    /// single text payload.
    #[must_use]
    pub fn payload(&self, pass: &outing_passes::Model) -> String {
        format!(
            "{base}/outing_pass/{token}\n\
             Class: {ban}\n\
             Name: {name}\n\
             Issued: {issued}\n\
             Reason: {reason}\n\
             Valid until: {expiry}\n\
             Issued by: {teacher}\n",
            base = self.base_url,
            token = pass.unique_id,
            ban = pass.ban,
            name = pass.name,
            issued = pass.issue_date,
            reason = pass.reason,
            expiry = pass.expiry_date,
            teacher = pass.teacher,
        )
    }

    /// Encode the pass payload at error-correction level M and write the
    /// rendered PNG. Returns the path of the written image.
    pub async fn generate(&self, pass: &outing_passes::Model) -> Result<PathBuf> {
        let payload = self.payload(pass);
        let path = self.image_path(&pass.unique_id);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create static dir: {}", parent.display()))?;
        }

        let out = path.clone();
        task::spawn_blocking(move || {
            let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
                .map_err(|e| anyhow::anyhow!("Failed to encode QR payload: {e}"))?;

            let image = code
                .render::<image::Luma<u8>>()
                .min_dimensions(320, 320)
                .build();

            image
                .save(&out)
                .with_context(|| format!("Failed to write QR image: {}", out.display()))?;

            Ok::<(), anyhow::Error>(())
        })
        .await
        .context("QR rendering task panicked")??;

        debug!("QR image written: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pass() -> outing_passes::Model {
        outing_passes::Model {
            id: 1,
            name: "Kim".to_string(),
            issue_date: "2024-04-02 09:15:00".to_string(),
            reason: "Clinic".to_string(),
            expiry_date: "2024-05-01".to_string(),
            teacher: "alice".to_string(),
            ban: "3-2".to_string(),
            unique_id: "0123456789abcdef0123456789abcdef".to_string(),
        }
    }

    #[test]
    fn test_payload_contains_url_and_fields() {
        let qr = QrGenerator::new("static", "http://localhost:10000");
        let payload = qr.payload(&sample_pass());

        assert!(payload.starts_with(
            "http://localhost:10000/outing_pass/0123456789abcdef0123456789abcdef\n"
        ));
        assert!(payload.contains("Name: Kim"));
        assert!(payload.contains("Class: 3-2"));
        assert!(payload.contains("Reason: Clinic"));
        assert!(payload.contains("Valid until: 2024-05-01"));
        assert!(payload.contains("Issued by: alice"));
    }

    #[test]
    fn test_image_path_is_token_addressed() {
        let qr = QrGenerator::new("static", "http://localhost:10000");
        let path = qr.image_path("deadbeef");
        assert_eq!(path, PathBuf::from("static/deadbeef.png"));
    }

    #[tokio::test]
    async fn test_generate_writes_png() {
        let dir = std::env::temp_dir().join(format!("outpass-qr-test-{}", std::process::id()));
        let qr = QrGenerator::new(&dir, "http://localhost:10000");
        let pass = sample_pass();

        let path = qr.generate(&pass).await.unwrap();

        assert!(path.exists());
        assert_eq!(path, dir.join(format!("{}.png", pass.unique_id)));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
