use regex::Regex;
use std::fmt;

use crate::common::error::RoomserviceError;
use crate::common::result::RoomserviceResult;

/// デバイスリポジトリ名の接頭辞
pub const DEVICE_REPO_PREFIX: &str = "android_device_";

/// ビルド対象のプロダクト（例: `du_taimen`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTarget {
    /// 入力されたプロダクト名
    product: String,

    /// 最初の `_` 以降の文字列（デバイス名）
    device: String,
}

impl ProductTarget {
    /// プロダクト名を解析する
    ///
    /// `_` を含まない、または `_` の後ろが空の場合はエラー。エラーメッセージでは
    /// `prefix` を使った正しい形式を提案する。
    pub fn parse(product: &str, prefix: &str) -> RoomserviceResult<Self> {
        let device = product
            .split_once('_')
            .map(|(_, device)| device)
            .filter(|device| !device.is_empty())
            .ok_or_else(|| RoomserviceError::invalid_product_target(product, prefix))?;

        Ok(Self {
            product: product.to_string(),
            device: device.to_string(),
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl fmt::Display for ProductTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.product)
    }
}

/// `android_device_<vendor>_<device>` 形式のリポジトリ名を判定する
#[derive(Debug, Clone)]
pub struct DeviceRepoMatcher {
    regex: Regex,
}

impl DeviceRepoMatcher {
    /// デバイス名からマッチャーを作成
    pub fn new(device: &str) -> RoomserviceResult<Self> {
        let pattern = format!("^{}.*_{}$", DEVICE_REPO_PREFIX, regex::escape(device));
        let regex = Regex::new(&pattern).map_err(|e| {
            RoomserviceError::validation_error("device", e.to_string(), Some(device.to_string()))
        })?;
        Ok(Self { regex })
    }

    /// リポジトリ名（組織を含まない）が一致するか
    pub fn is_match(&self, repo_name: &str) -> bool {
        self.regex.is_match(repo_name)
    }

    /// マニフェストの `name` 属性（`org/name`）が一致するか
    ///
    /// 最後のパス要素のみを比較する。
    pub fn matches_project_name(&self, project_name: &str) -> bool {
        let last = project_name.rsplit('/').next().unwrap_or(project_name);
        self.is_match(last)
    }

    /// リポジトリ名からベンダー名を取り出す
    ///
    /// `android_device_google_taimen` -> `google`
    pub fn vendor_of(repo_name: &str) -> Option<&str> {
        repo_name.split('_').nth(2).filter(|vendor| !vendor.is_empty())
    }

    /// デバイスツリーの配置先 `device/<vendor>/<device>`
    pub fn tree_path(repo_name: &str, device: &str) -> Option<String> {
        Self::vendor_of(repo_name).map(|vendor| format!("device/{}/{}", vendor, device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_takes_text_after_first_underscore() {
        let target = ProductTarget::parse("du_taimen", "du").unwrap();
        assert_eq!(target.product(), "du_taimen");
        assert_eq!(target.device(), "taimen");

        let target = ProductTarget::parse("du_walleye_eng", "du").unwrap();
        assert_eq!(target.device(), "walleye_eng");
    }

    #[test]
    fn test_parse_rejects_missing_device() {
        let error = ProductTarget::parse("taimen", "du").unwrap_err();
        assert_eq!(
            error.to_string(),
            "The target you entered wouldn't work, use instead du_taimen"
        );
        assert!(ProductTarget::parse("du_", "du").is_err());
    }

    #[test]
    fn test_matcher_is_suffix_anchored() {
        let matcher = DeviceRepoMatcher::new("taimen").unwrap();
        assert!(matcher.is_match("android_device_google_taimen"));
        assert!(!matcher.is_match("android_device_google_taimen_kernel"));
        assert!(!matcher.is_match("android_kernel_google_taimen"));
        assert!(!matcher.is_match("android_device_google_nottaimen"));
    }

    #[test]
    fn test_matcher_escapes_device() {
        let matcher = DeviceRepoMatcher::new("a.b").unwrap();
        assert!(matcher.is_match("android_device_x_a.b"));
        assert!(!matcher.is_match("android_device_x_axb"));
    }

    #[test]
    fn test_matches_project_name_with_org() {
        let matcher = DeviceRepoMatcher::new("taimen").unwrap();
        assert!(matcher.matches_project_name("DirtyUnicorns/android_device_google_taimen"));
        assert!(matcher.matches_project_name("android_device_google_taimen"));
        assert!(!matcher.matches_project_name("DirtyUnicorns/android_device_google_walleye"));
    }

    #[test]
    fn test_tree_path_uses_vendor_component() {
        assert_eq!(
            DeviceRepoMatcher::tree_path("android_device_google_taimen", "taimen"),
            Some("device/google/taimen".to_string())
        );
        assert_eq!(DeviceRepoMatcher::tree_path("android_device", "taimen"), None);
    }
}
