use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::vault::{CreateVaultRequest, ObjectContent, UploadObjectRequest, Vault, VaultObject};
use crate::models::{ListParams, Page};

/// Encrypted document vaults and the objects inside them.
pub trait VaultApi {
    fn create_vault(&self, input: &CreateVaultRequest) -> Result<Vault, ApiError>;

    fn list_vaults(&self, params: &ListParams) -> Result<Page<Vault>, ApiError>;

    fn get_vault(&self, vault_id: &str) -> Result<Vault, ApiError>;

    fn delete_vault(&self, vault_id: &str) -> Result<(), ApiError>;

    fn upload_object(&self, vault_id: &str, input: &UploadObjectRequest) -> Result<VaultObject, ApiError>;

    fn list_objects(&self, vault_id: &str, params: &ListParams) -> Result<Page<VaultObject>, ApiError>;

    /// Fetch an object with its content. Use `ObjectContent::verify_checksum`
    /// to decode and check the bytes.
    fn download_object(&self, vault_id: &str, object_id: &str) -> Result<ObjectContent, ApiError>;

    fn delete_object(&self, vault_id: &str, object_id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct VaultService<'a> {
    client: &'a ApiClient,
}

impl<'a> VaultService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl VaultApi for VaultService<'_> {
    fn create_vault(&self, input: &CreateVaultRequest) -> Result<Vault, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("vault name is empty".into()));
        }
        self.client.send_json(HttpMethod::Post, &["v1", "vaults"], input, 201)
    }

    fn list_vaults(&self, params: &ListParams) -> Result<Page<Vault>, ApiError> {
        self.client.get(&["v1", "vaults"], &params.to_query())
    }

    fn get_vault(&self, vault_id: &str) -> Result<Vault, ApiError> {
        self.client.get(&["v1", "vaults", vault_id], &[])
    }

    fn delete_vault(&self, vault_id: &str) -> Result<(), ApiError> {
        self.client.delete(&["v1", "vaults", vault_id])
    }

    fn upload_object(&self, vault_id: &str, input: &UploadObjectRequest) -> Result<VaultObject, ApiError> {
        if input.key.is_empty() {
            return Err(ApiError::InvalidRequest("object key is empty".into()));
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "vaults", vault_id, "objects"], input, 201)
    }

    fn list_objects(&self, vault_id: &str, params: &ListParams) -> Result<Page<VaultObject>, ApiError> {
        self.client
            .get(&["v1", "vaults", vault_id, "objects"], &params.to_query())
    }

    fn download_object(&self, vault_id: &str, object_id: &str) -> Result<ObjectContent, ApiError> {
        self.client
            .get(&["v1", "vaults", vault_id, "objects", object_id], &[])
    }

    fn delete_object(&self, vault_id: &str, object_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&["v1", "vaults", vault_id, "objects", object_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vault::sha256_hex;
    use crate::services::test_support::{client_returning, client_without_calls, json_body};

    #[test]
    fn upload_sends_base64_and_checksum() {
        let client = client_returning(
            |req| {
                let body = json_body(req);
                req.url == "http://api.test/v1/vaults/vlt_1/objects"
                    && body["content"] == "aGVsbG8="
                    && body["checksum_sha256"] == sha256_hex(b"hello")
            },
            201,
            r#"{"id":"obj_1","vault_id":"vlt_1","key":"nda.txt","content_type":"text/plain","size_bytes":5,"created_at":"2026-03-01T09:00:00Z"}"#,
        );
        let object = client
            .vault()
            .upload_object("vlt_1", &UploadObjectRequest::from_bytes("nda.txt", "text/plain", b"hello"))
            .unwrap();
        assert_eq!(object.size_bytes, 5);
    }

    #[test]
    fn download_then_verify() {
        let client = client_returning(
            |req| req.method == HttpMethod::Get && req.url == "http://api.test/v1/vaults/vlt_1/objects/obj_1",
            200,
            r#"{"object":{"id":"obj_1","vault_id":"vlt_1","key":"nda.txt","content_type":"text/plain","size_bytes":5,
                "checksum_sha256":"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824","created_at":"2026-03-01T09:00:00Z"},
                "content":"aGVsbG8="}"#,
        );
        let content = client.vault().download_object("vlt_1", "obj_1").unwrap();
        assert_eq!(content.verify_checksum().unwrap(), b"hello");
    }

    #[test]
    fn empty_object_id_never_reaches_transport() {
        let client = client_without_calls();
        assert!(matches!(
            client.vault().delete_object("vlt_1", ""),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn blank_vault_name_is_rejected() {
        let client = client_without_calls();
        assert!(matches!(
            client.vault().create_vault(&CreateVaultRequest::new("  ")),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn parent_references_never_reach_the_collection() {
        let client = client_without_calls();
        assert!(matches!(client.vault().get_vault(".."), Err(ApiError::InvalidRequest(_))));
        assert!(matches!(client.vault().delete_object("vlt_1", ".."), Err(ApiError::InvalidRequest(_))));
    }
}
