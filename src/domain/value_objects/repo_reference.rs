use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// `[https://][www.]<host>.<tld>/<org>/<name>` 形式
const URL_FORM: &str =
    r"^(?:https?://)?(?:www\.)?(?P<remote>[A-Za-z0-9_]+)\.[A-Za-z0-9_]+/(?P<org>[A-Za-z0-9_-]+)/(?P<name>[A-Za-z0-9_-]+)$";

/// `<org>/<name>` 形式
const SHORTHAND_FORM: &str = r"^(?P<org>[A-Za-z0-9_-]+)/(?P<name>[A-Za-z0-9_-]+)$";

fn url_form() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_FORM).expect("URL_FORM is a valid pattern"))
}

fn shorthand_form() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SHORTHAND_FORM).expect("SHORTHAND_FORM is a valid pattern"))
}

/// 解析済みリポジトリの座標（組織、名前、リモート別名）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoCoordinates {
    /// 組織名
    pub org: String,

    /// リポジトリ名
    pub name: String,

    /// リモート別名（マニフェストの `remote` 属性）
    pub remote: String,
}

impl RepoCoordinates {
    /// 新しいRepoCoordinatesインスタンスを作成
    pub fn new(
        org: impl Into<String>,
        name: impl Into<String>,
        remote: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
            remote: remote.into(),
        }
    }

    /// マニフェストで使用する `org/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}

/// リポジトリ参照文字列の解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoReference {
    Valid(RepoCoordinates),
    Invalid,
}

impl RepoReference {
    /// 参照文字列を解析する
    ///
    /// URL形式を先に試し、次に短縮形式を試す。どちらにも一致しない場合は
    /// `Invalid` を返す。短縮形式のリモート別名は `default_remote` になる。
    pub fn parse(raw: &str, default_remote: &str) -> Self {
        // A single trailing newline is ignored
        let raw = raw.strip_suffix('\n').unwrap_or(raw);

        if let Some(caps) = url_form().captures(raw) {
            return Self::Valid(RepoCoordinates::new(
                &caps["org"],
                &caps["name"],
                &caps["remote"],
            ));
        }

        if let Some(caps) = shorthand_form().captures(raw) {
            return Self::Valid(RepoCoordinates::new(
                &caps["org"],
                &caps["name"],
                default_remote,
            ));
        }

        Self::Invalid
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn as_valid(&self) -> Option<&RepoCoordinates> {
        match self {
            Self::Valid(coords) => Some(coords),
            Self::Invalid => None,
        }
    }

    pub fn into_valid(self) -> Option<RepoCoordinates> {
        match self {
            Self::Valid(coords) => Some(coords),
            Self::Invalid => None,
        }
    }
}
