use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// Lower-case hex SHA-256, the checksum format the vault stores.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// An encrypted container for matter documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub object_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVaultRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateVaultRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

optional_setters!(CreateVaultRequest {
    with_description => description: String,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultObject {
    pub id: String,
    pub vault_id: String,
    pub key: String,
    pub content_type: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub checksum_sha256: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadObjectRequest {
    pub key: String,
    pub content_type: String,
    /// Base64 of the object bytes.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_sha256: Option<String>,
}

impl UploadObjectRequest {
    /// Encode `bytes` and attach their SHA-256 so the vault can verify them.
    pub fn from_bytes(key: impl Into<String>, content_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            key: key.into(),
            content_type: content_type.into(),
            content: STANDARD.encode(bytes),
            checksum_sha256: Some(sha256_hex(bytes)),
        }
    }
}

/// A downloaded object: metadata plus base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectContent {
    pub object: VaultObject,
    pub content: String,
}

impl ObjectContent {
    pub fn decode(&self) -> Result<Vec<u8>, ApiError> {
        STANDARD
            .decode(&self.content)
            .map_err(|e| ApiError::Deserialization(format!("object content is not base64: {e}")))
    }

    /// Decode and check the bytes against the stored checksum, when there is one.
    pub fn verify_checksum(&self) -> Result<Vec<u8>, ApiError> {
        let bytes = self.decode()?;
        if let Some(expected) = &self.object.checksum_sha256 {
            let actual = sha256_hex(&bytes);
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(ApiError::Deserialization(format!(
                    "checksum mismatch for {}: expected {expected}, got {actual}",
                    self.object.key
                )));
            }
        }
        Ok(bytes)
    }
}
