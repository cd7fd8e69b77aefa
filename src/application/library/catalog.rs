use serde::Serialize;
use std::fmt;

use crate::domain::{CatalogItem, ItemId, Library, Member};

use super::errors::{LibraryApplicationError, Result};
use super::statistics::BorrowCount;

/// 蔵書一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemListing {
    pub items: Vec<CatalogItem>,
}

impl fmt::Display for ItemListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        write!(f, "Total books: {}", self.items.len())
    }
}

/// 会員一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberListing {
    pub members: Vec<Member>,
}

impl fmt::Display for MemberListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for member in &self.members {
            writeln!(f, "{}", member)?;
        }
        write!(f, "Total members: {}", self.members.len())
    }
}

/// タイトル検索の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub keyword: String,
    pub items: Vec<CatalogItem>,
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Search results for \"{}\":", self.keyword)?;
        if self.items.is_empty() {
            return write!(f, "\nNo books found.");
        }
        for item in &self.items {
            write!(f, "\n{}", item)?;
        }
        Ok(())
    }
}

/// 並び替えのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Author,
}

/// 並び替えた蔵書一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortedItems {
    pub key: SortKey,
    pub items: Vec<CatalogItem>,
}

impl fmt::Display for SortedItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = match self.key {
            SortKey::Title => "Books sorted by title:",
            SortKey::Author => "Books sorted by author:",
        };
        f.write_str(heading)?;
        for item in &self.items {
            write!(f, "\n{}", item)?;
        }
        Ok(())
    }
}

/// 未返却の貸出が最も多い会員
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostActiveBorrower {
    pub member: Option<Member>,
}

impl fmt::Display for MostActiveBorrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "Most active borrower: {}", member.name),
            None => write!(f, "Most active borrower: none"),
        }
    }
}

/// 全蔵書の一覧（ID昇順）
pub fn list_items(library: &Library) -> ItemListing {
    ItemListing {
        items: library.list_items(),
    }
}

/// 全会員の一覧（ID昇順）
pub fn list_members(library: &Library) -> MemberListing {
    MemberListing {
        members: library.list_members(),
    }
}

/// タイトルの部分一致で検索する（大文字小文字を区別しない）
///
/// 該当なしはエラーではなく空の結果。
pub fn search_items(library: &Library, keyword: &str) -> SearchResults {
    SearchResults {
        keyword: keyword.to_string(),
        items: library.search_by_title(keyword),
    }
}

pub fn sorted_items(library: &Library, key: SortKey) -> SortedItems {
    let items = match key {
        SortKey::Title => library.sorted_by_title(),
        SortKey::Author => library.sorted_by_author(),
    };
    SortedItems { key, items }
}

/// 蔵書の累計貸出回数
///
/// # エラー
/// - ItemNotFound: 蔵書が存在しない
pub fn borrow_count(library: &Library, item_id: &ItemId) -> Result<BorrowCount> {
    let item = library
        .item(item_id)
        .ok_or_else(|| LibraryApplicationError::ItemNotFound(item_id.clone()))?;

    Ok(BorrowCount {
        item_id: item.id.clone(),
        title: item.title.clone(),
        count: library.borrow_count_of(item_id),
    })
}

pub fn most_active_borrower(library: &Library) -> MostActiveBorrower {
    MostActiveBorrower {
        member: library.most_active_borrower(),
    }
}
