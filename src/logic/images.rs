use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::model::NewImage;
use crate::store::traits::ObjectStore;

/// Object-name prefix per entity type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageKind {
    Category,
    Product,
}

impl ImageKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ImageKind::Category => "categories",
            ImageKind::Product => "products",
        }
    }
}

/// Storage-relative path of a URL served from our bucket, or `None` for
/// external URLs. Detection is by sentinel domain substring; the path is
/// whatever follows the bucket segment.
pub fn storage_object_path(url: &str, sentinel: &str, bucket: &str) -> Option<String> {
    if !url.contains(sentinel) {
        return None;
    }
    let marker = format!("/{bucket}/");
    let (_, path) = url.split_once(&marker)?;
    if path.is_empty() {
        return None;
    }
    Some(path.to_string())
}

/// Uploads form images and cleans up stored objects when records go away.
pub struct ImageLifecycle {
    objects: Arc<dyn ObjectStore>,
    sentinel: String,
    bucket: String,
}

impl ImageLifecycle {
    pub fn new(objects: Arc<dyn ObjectStore>, sentinel: &str, bucket: &str) -> Self {
        Self {
            objects,
            sentinel: sentinel.to_string(),
            bucket: bucket.to_string(),
        }
    }

    /// Upload each image and return its public URL.
    ///
    /// Uploads run one at a time; the returned order is the submission
    /// order, which becomes the stored array order. The first failure
    /// aborts the batch and leaves earlier uploads in storage.
    pub async fn upload_images(
        &self,
        kind: ImageKind,
        images: &[NewImage],
    ) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(images.len());

        for image in images {
            let bytes = image
                .decoded_bytes()
                .with_context(|| format!("Invalid image payload '{}'", image.file_name))?;
            let path = format!("{}/{}.{}", kind.prefix(), Uuid::new_v4(), image.extension());
            self.objects
                .upload(&path, bytes, &image.content_type)
                .await?;
            urls.push(self.objects.public_url(&path));
        }

        Ok(urls)
    }

    /// Paths of the given URLs that live in our bucket.
    pub fn object_paths(&self, urls: &[String]) -> Vec<String> {
        urls.iter()
            .filter_map(|url| storage_object_path(url, &self.sentinel, &self.bucket))
            .collect()
    }

    /// Best-effort removal of the stored objects behind `urls`. Failures
    /// are logged and never propagated; record deletion proceeds anyway.
    pub async fn remove_for_urls(&self, urls: &[String]) {
        let paths = self.object_paths(urls);
        if paths.is_empty() {
            return;
        }

        if let Err(error) = self.objects.remove(&paths).await {
            log::error!("Error deleting images from storage: {error:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_path_extracted_from_bucket_url() {
        let url = "https://demo.supabase.co/storage/v1/object/public/images/categories/abc.jpg";
        assert_eq!(
            storage_object_path(url, "supabase.co", "images"),
            Some("categories/abc.jpg".to_string())
        );
    }

    #[test]
    fn test_external_urls_are_ignored() {
        let url = "https://cdn.example.com/images/products/abc.jpg";
        assert_eq!(storage_object_path(url, "supabase.co", "images"), None);
    }

    #[test]
    fn test_sentinel_url_without_bucket_segment_is_ignored() {
        let url = "https://demo.supabase.co/storage/v1/object/public/avatars/abc.jpg";
        assert_eq!(storage_object_path(url, "supabase.co", "images"), None);
    }

    #[test]
    fn test_mixed_urls_filter_to_store_paths_only() {
        let lifecycle = ImageLifecycle::new(
            Arc::new(NullObjectStore),
            "supabase.co",
            "images",
        );
        let urls = vec![
            "https://demo.supabase.co/storage/v1/object/public/images/products/a.jpg".to_string(),
            "https://cdn.example.com/external.jpg".to_string(),
            "https://demo.supabase.co/storage/v1/object/public/images/products/b.png".to_string(),
        ];
        assert_eq!(
            lifecycle.object_paths(&urls),
            vec!["products/a.jpg".to_string(), "products/b.png".to_string()]
        );
    }

    struct NullObjectStore;

    #[async_trait::async_trait]
    impl ObjectStore for NullObjectStore {
        async fn upload(&self, _path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<()> {
            Ok(())
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://demo.supabase.co/storage/v1/object/public/images/{path}")
        }

        async fn remove(&self, _paths: &[String]) -> Result<()> {
            Ok(())
        }
    }
}
