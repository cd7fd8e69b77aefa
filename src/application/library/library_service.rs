use crate::domain::{
    BorrowError, CatalogItem, ItemId, Library, Member, MemberId, ReturnError, codec::LoadReport,
    commands::*, events::*,
};
use crate::ports::*;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

use super::errors::{LibraryApplicationError, Result};
use super::sample::sample_library;

/// サービスの依存関係
///
/// 振る舞いは持たず、各ユースケース関数に明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub repository: Arc<dyn LibraryRepository>,
}

/// 今日の日付（ローカル時刻）
///
/// 貸出コマンドを組み立てる呼び出し側が使う。
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ============================================================================
// 起動と終了
// ============================================================================

/// 集約を開く（読み込み、または新規作成）
///
/// - 保存データがあれば読み込む。不正な行は読み飛ばし、警告を記録する
/// - 保存データがなければ空の集約（`seed_when_empty` なら見本データ入り）
///
/// # エラー
/// - Persistence: 保存先の読み込み失敗
pub async fn open_library(
    deps: &ServiceDependencies,
    seed_when_empty: bool,
) -> Result<(Library, LoadReport)> {
    let loaded = deps
        .repository
        .load()
        .await
        .map_err(LibraryApplicationError::Persistence)?;

    let Some((library, report)) = loaded else {
        tracing::info!("No saved library found, starting fresh");
        let library = if seed_when_empty {
            sample_library()
        } else {
            Library::new()
        };
        return Ok((library, LoadReport::default()));
    };

    for skipped in &report.skipped {
        tracing::warn!(
            "Skipped line {} ({}): {}",
            skipped.line_number,
            skipped.reason,
            skipped.line
        );
    }
    tracing::info!(
        "Library loaded: {} books, {} members, {} borrow records, {} lines skipped",
        library.list_items().len(),
        library.list_members().len(),
        library.ledger().len(),
        report.skipped_count()
    );

    Ok((library, report))
}

/// 集約全体を保存する
///
/// 失敗しても集約はそのまま使い続けられる。
pub async fn save_library(deps: &ServiceDependencies, library: &Library) -> Result<()> {
    if let Err(e) = deps.repository.save(library).await {
        tracing::error!("Failed to save library: {}", e);
        return Err(LibraryApplicationError::Persistence(e));
    }

    tracing::info!("Library saved");
    Ok(())
}

// ============================================================================
// 登録
// ============================================================================

/// 蔵書の登録結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRegistered {
    pub item: CatalogItem,
}

impl fmt::Display for ItemRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added book: {}", self.item)
    }
}

/// 会員の登録結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRegistered {
    pub member: Member,
}

impl fmt::Display for MemberRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added member: {}", self.member)
    }
}

/// 蔵書を登録する
///
/// ビジネスルール：
/// - IDは大文字に正規化する
/// - ID・タイトル・著者は空でないこと、区切り文字を含まないこと
/// - IDが未登録であること（集約自体は上書きを許すため、ここで拒否する）
pub fn register_item(library: &mut Library, cmd: RegisterItem) -> Result<ItemRegistered> {
    let id = ItemId::new(&cmd.id);
    require_text("book ID", id.value())?;
    let title = require_text("title", &cmd.title)?;
    let author = require_text("author", &cmd.author)?;

    if library.has_item(&id) {
        return Err(LibraryApplicationError::DuplicateItem(id));
    }

    let item = match cmd.format {
        NewItemFormat::Printed { total_copies } => {
            CatalogItem::printed(id, title, author, total_copies)
        }
        NewItemFormat::Electronic => CatalogItem::electronic(id, title, author),
    };
    library.add_item(item.clone());

    tracing::info!("Book registered: {}", item.id);
    Ok(ItemRegistered { item })
}

/// 会員を登録する
///
/// ビジネスルール：
/// - 名前は空でないこと、区切り文字を含まないこと
/// - IDが未登録であること
pub fn register_member(library: &mut Library, cmd: RegisterMember) -> Result<MemberRegistered> {
    let name = require_text("name", &cmd.name)?;

    if library.has_member(cmd.id) {
        return Err(LibraryApplicationError::DuplicateMember(cmd.id));
    }

    let member = Member::new(cmd.id, name);
    library.add_member(member.clone());

    tracing::info!("Member registered: {}", cmd.id);
    Ok(MemberRegistered { member })
}

/// 前後の空白を除いた値を返す。空、または保存形式で表せない文字を含む場合はエラー
fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LibraryApplicationError::InvalidInput(format!(
            "{} must not be empty.",
            field
        )));
    }
    if value.contains([',', '\n', '\r']) {
        return Err(LibraryApplicationError::InvalidInput(format!(
            "{} must not contain commas or line breaks.",
            field
        )));
    }
    Ok(value)
}

// ============================================================================
// 貸出と返却
// ============================================================================

/// 貸出の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowReceipt {
    pub member: Member,
    pub item: CatalogItem,
    pub event: ItemBorrowed,
}

impl fmt::Display for BorrowReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success! Member \"{}\" borrowed \"{}\". Remaining copies: {}",
            self.member.name, self.item.title, self.event.copies
        )
    }
}

/// 返却の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub member: Member,
    pub item: CatalogItem,
    pub event: ItemReturned,
}

impl fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success! Member \"{}\" returned \"{}\". Available copies: {}",
            self.member.name, self.item.title, self.event.copies
        )
    }
}

/// 蔵書を貸し出す
///
/// 判定順と失敗時の扱いは `Library::borrow` に従う。
/// ドメインのエラーは会員名・タイトル入りのエラーに変換する。
pub fn borrow_item(library: &mut Library, cmd: BorrowItem) -> Result<BorrowReceipt> {
    let event = match library.borrow(cmd.member_id, &cmd.item_id, cmd.borrowed_on) {
        Ok(event) => event,
        Err(e) => {
            let err = match e {
                BorrowError::MemberNotFound => LibraryApplicationError::MemberNotFound(cmd.member_id),
                BorrowError::ItemNotFound => LibraryApplicationError::ItemNotFound(cmd.item_id),
                BorrowError::NoCopiesAvailable { available, total } => {
                    LibraryApplicationError::NoCopiesAvailable {
                        title: title_of(library, &cmd.item_id),
                        available,
                        total,
                    }
                }
                BorrowError::AlreadyBorrowed => LibraryApplicationError::AlreadyBorrowed {
                    member: name_of(library, cmd.member_id),
                    title: title_of(library, &cmd.item_id),
                },
            };
            tracing::debug!("Borrow rejected: {}", err);
            return Err(err);
        }
    };

    let (member, item) = participants(library, cmd.member_id, &cmd.item_id)?;
    tracing::info!(
        "Book borrowed: member={}, book={}, due={}",
        member.id,
        item.id,
        event.due_date
    );

    Ok(BorrowReceipt {
        member,
        item,
        event,
    })
}

/// 蔵書を返却する
///
/// 判定順と失敗時の扱いは `Library::return_item` に従う。
pub fn return_item(library: &mut Library, cmd: ReturnItem) -> Result<ReturnReceipt> {
    let event = match library.return_item(cmd.member_id, &cmd.item_id) {
        Ok(event) => event,
        Err(e) => {
            let err = match e {
                ReturnError::MemberNotFound => LibraryApplicationError::MemberNotFound(cmd.member_id),
                ReturnError::ItemNotFound => LibraryApplicationError::ItemNotFound(cmd.item_id),
                ReturnError::NoActiveBorrow => LibraryApplicationError::NoActiveBorrow {
                    member: name_of(library, cmd.member_id),
                    item_id: cmd.item_id,
                },
            };
            tracing::debug!("Return rejected: {}", err);
            return Err(err);
        }
    };

    let (member, item) = participants(library, cmd.member_id, &cmd.item_id)?;
    tracing::info!("Book returned: member={}, book={}", member.id, item.id);

    Ok(ReturnReceipt {
        member,
        item,
        event,
    })
}

fn participants(
    library: &Library,
    member_id: MemberId,
    item_id: &ItemId,
) -> Result<(Member, CatalogItem)> {
    let member = library
        .member(member_id)
        .cloned()
        .ok_or(LibraryApplicationError::MemberNotFound(member_id))?;
    let item = library
        .item(item_id)
        .cloned()
        .ok_or_else(|| LibraryApplicationError::ItemNotFound(item_id.clone()))?;
    Ok((member, item))
}

fn title_of(library: &Library, item_id: &ItemId) -> String {
    library
        .item(item_id)
        .map(|item| item.title.clone())
        .unwrap_or_default()
}

fn name_of(library: &Library, member_id: MemberId) -> String {
    library
        .member(member_id)
        .map(|member| member.name.clone())
        .unwrap_or_default()
}
