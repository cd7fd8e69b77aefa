use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Copies, ItemId};

/// 蔵書の形態ごとの在庫ポリシー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ItemFormat {
    /// 印刷本：冊数を管理する
    ///
    /// 不変条件：0 <= available_copies <= total_copies
    Printed {
        total_copies: u32,
        available_copies: u32,
    },
    /// 電子書籍：在庫上限なし、貸出・返却で数は変わらない
    Electronic,
}

/// 蔵書 - 1タイトル分の在庫レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub format: ItemFormat,
}

impl CatalogItem {
    /// 印刷本を作成する（全冊貸出可能な状態）
    pub fn printed(
        id: ItemId,
        title: impl Into<String>,
        author: impl Into<String>,
        total_copies: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            format: ItemFormat::Printed {
                total_copies,
                available_copies: total_copies,
            },
        }
    }

    /// 電子書籍を作成する
    pub fn electronic(id: ItemId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            format: ItemFormat::Electronic,
        }
    }

    pub fn is_electronic(&self) -> bool {
        matches!(self.format, ItemFormat::Electronic)
    }

    /// 現在の在庫数
    pub fn copies(&self) -> Copies {
        match self.format {
            ItemFormat::Printed {
                total_copies,
                available_copies,
            } => Copies::Limited {
                available: available_copies,
                total: total_copies,
            },
            ItemFormat::Electronic => Copies::Unlimited,
        }
    }

    /// 貸出可能か
    pub fn can_borrow(&self) -> bool {
        self.copies().has_available()
    }

    /// 1冊貸し出す
    ///
    /// 在庫がない場合は何もしない（0未満にはならない）。
    /// 電子書籍は常に何もしない。
    pub fn borrow_one(&mut self) {
        if let ItemFormat::Printed {
            available_copies, ..
        } = &mut self.format
        {
            *available_copies = available_copies.saturating_sub(1);
        }
    }

    /// 1冊返却する
    ///
    /// 総数を超えては増えない。電子書籍は常に何もしない。
    pub fn return_one(&mut self) {
        if let ItemFormat::Printed {
            total_copies,
            available_copies,
        } = &mut self.format
        {
            if *available_copies < *total_copies {
                *available_copies += 1;
            }
        }
    }

    /// タイトルの部分一致（大文字小文字を区別しない）
    pub fn matches_title(&self, keyword: &str) -> bool {
        self.title
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            ItemFormat::Printed { .. } => write!(
                f,
                "ID:{} [Print] {} by {} ({} copies)",
                self.id,
                self.title,
                self.author,
                self.copies()
            ),
            ItemFormat::Electronic => write!(
                f,
                "ID:{} [E-Book] {} (E-Book) by {} (unlimited)",
                self.id, self.title, self.author
            ),
        }
    }
}
