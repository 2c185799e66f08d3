use sha2::{Digest, Sha256};

/// Compute the content hash identifying one imported row.
///
/// The raw field strings are joined with `|` in column order and hashed with
/// SHA-256, so two imports of the same logical row always agree on the id.
/// This is the sole de-duplication mechanism; the hash is order-sensitive by
/// design.
pub fn set_id<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Sha256::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(field.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
