use serde::{Deserialize, Serialize};
use std::fmt;

/// 蔵書ID - 呼び出し側が採番する文字列ID
///
/// 慣例として大文字に正規化する（"b001" → "B001"）。
/// 生成後は不変。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// 前後の空白を除去し、大文字に正規化して作成する
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    /// 永続化データから読み込んだ値をそのまま使う
    ///
    /// 保存されたIDは保存時点で正規化済みのため、再正規化しない。
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員ID - 呼び出し側が採番する整数ID
///
/// 負の値も有効なIDとして扱う。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MemberId(i32);

impl MemberId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 在庫数
///
/// 印刷本は「貸出可能数/総数」を持つ。
/// 電子書籍は上限なし（番兵値ではなく専用のバリアントで表す）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Copies {
    Limited { available: u32, total: u32 },
    Unlimited,
}

impl Copies {
    /// 貸出可能な在庫があるか
    pub fn has_available(&self) -> bool {
        match self {
            Copies::Limited { available, .. } => *available > 0,
            Copies::Unlimited => true,
        }
    }
}

impl fmt::Display for Copies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Copies::Limited { available, total } => write!(f, "{}/{}", available, total),
            Copies::Unlimited => f.write_str("unlimited"),
        }
    }
}
