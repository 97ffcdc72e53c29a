use crate::config::AssetsConfig;

/// Turns stored upload paths (profile photos, complaint attachments) into
/// public URLs under the configured uploads base.
#[derive(Clone, Debug)]
pub struct AssetUrlHelper {
    base_url_with_slash: String,
}

impl AssetUrlHelper {
    pub fn new(assets_config: &AssetsConfig) -> Self {
        let base_url = &assets_config.base_url;
        let base_url_with_slash = if base_url.ends_with('/') {
            base_url.clone()
        } else {
            format!("{}/", base_url)
        };

        Self {
            base_url_with_slash,
        }
    }

    /// 构建完整的资源 URL
    ///
    /// ```ignore
    /// let helper = AssetUrlHelper::new(&assets_config);
    /// helper.build_url("profiles/user123.jpg");
    /// // "http://localhost:5000/uploads/profiles/user123.jpg"
    /// ```
    pub fn build_url(&self, path: &str) -> String {
        let clean_path = path.trim_start_matches('/');
        format!("{}{}", self.base_url_with_slash, clean_path)
    }

    pub fn is_absolute_url(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Absolute URLs pass through untouched; relative paths are resolved
    /// against the uploads base.
    pub fn process_url(&self, url: &str) -> String {
        if Self::is_absolute_url(url) {
            url.to_string()
        } else {
            self.build_url(url)
        }
    }
}
