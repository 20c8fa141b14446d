// Request signing for the execution agent boundary
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature, `X-Signature: sha256=<hex>`.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Operator-held shared secret used to sign agent requests. The secret is
/// generated and rotated locally and is never transmitted; only the
/// HMAC-SHA256 signature over the request body goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmacSecret(String);

impl HmacSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        HmacSecret(secret.into())
    }

    /// Fresh 32-byte secret, hex-encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        HmacSecret(hex::encode(bytes))
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// Signature for a request body in the `sha256=<hex>` header form.
    /// The key is the UTF-8 encoding of the secret string, matching the
    /// webhook-style convention the agent backend verifies against.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.0.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }
}
