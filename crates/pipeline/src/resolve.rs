use bytes::Bytes;
use tracing::debug;

use tryon_core::{EncodedImage, ImageRole};
use tryon_store::TryOnStore;

use crate::error::TryOnError;
use crate::request::{ImageSource, TryOnRequest};

/// Raw bytes of both sides, ready for sniffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImages {
    pub subject: Bytes,
    pub garment: Bytes,
}

/// Turn a validated request into raw image bytes.
///
/// Upload tokens are looked up in the store, subject first. Bytes are passed
/// on without any format or content check.
pub async fn resolve(
    store: &dyn TryOnStore,
    request: &TryOnRequest,
) -> Result<ResolvedImages, TryOnError> {
    let subject = resolve_side(store, ImageRole::Person, &request.subject).await?;
    let garment = resolve_side(store, ImageRole::Garment, &request.garment).await?;
    Ok(ResolvedImages { subject, garment })
}

async fn resolve_side(
    store: &dyn TryOnStore,
    role: ImageRole,
    source: &ImageSource,
) -> Result<Bytes, TryOnError> {
    match source {
        ImageSource::Inline(image) => decode(image)
            .map_err(|reason| TryOnError::InvalidRequest(format!("{role} image {reason}"))),
        ImageSource::Upload(token) => {
            let payload = store.upload_payload(token).await?.ok_or_else(|| {
                TryOnError::UploadNotFound {
                    role,
                    token: token.clone(),
                }
            })?;
            debug!(%role, %token, "resolved upload");
            decode(&payload).map_err(|reason| {
                TryOnError::PersistenceFailed(format!("stored {role} upload {token} {reason}"))
            })
        }
    }
}

fn decode(image: &EncodedImage) -> Result<Bytes, String> {
    image.decode().map_err(|e| format!("could not be decoded: {e}"))
}
