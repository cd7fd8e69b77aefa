use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::domain::{ItemId, Library, LoanEntry, LoanStatus, Member, MemberId};

use super::errors::{LibraryApplicationError, Result};

/// 貸出ビュー（表示用）
///
/// 台帳の行に蔵書タイトルと現在のステータスを付けたもの。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanView {
    pub item_id: ItemId,
    pub title: String,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
}

impl LoanView {
    fn build(library: &Library, entry: &LoanEntry, today: NaiveDate) -> Self {
        let title = library
            .item(&entry.item_id)
            .map(|item| item.title.clone())
            .unwrap_or_default();

        Self {
            item_id: entry.item_id.clone(),
            title,
            member_id: entry.member_id,
            borrow_date: entry.borrow_date,
            due_date: entry.due_date,
            status: entry.status(today),
        }
    }
}

impl fmt::Display for LoanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (Borrowed on:{}, Due:{})",
            self.item_id, self.title, self.borrow_date, self.due_date
        )
    }
}

/// 会員ごとの未返却の貸出
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberLoans {
    pub member: Member,
    pub loans: Vec<LoanView>,
}

impl fmt::Display for MemberLoans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Borrowed books of member \"{}\":", self.member.name)?;
        if self.loans.is_empty() {
            return write!(f, "\nNo active borrow records.");
        }
        for (n, loan) in self.loans.iter().enumerate() {
            write!(f, "\n{}) {}", n + 1, loan)?;
        }
        Ok(())
    }
}

/// 会員の未返却の貸出一覧（挿入順）
///
/// # エラー
/// - MemberNotFound: 会員が存在しない
pub fn member_loans(
    library: &Library,
    member_id: MemberId,
    today: NaiveDate,
) -> Result<MemberLoans> {
    let member = library
        .member(member_id)
        .cloned()
        .ok_or(LibraryApplicationError::MemberNotFound(member_id))?;

    let loans = library
        .active_borrows_of(member_id)
        .iter()
        .map(|entry| LoanView::build(library, entry, today))
        .collect();

    Ok(MemberLoans { member, loans })
}

/// 延滞中の貸出一覧（挿入順）
pub fn overdue_loans(library: &Library, today: NaiveDate) -> Vec<LoanView> {
    library
        .overdue_borrows(today)
        .iter()
        .map(|entry| LoanView::build(library, entry, today))
        .collect()
}
