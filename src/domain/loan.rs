use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{ItemId, MemberId};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出台帳の1行 - 1回の貸出
///
/// 蔵書・会員への参照はIDのみ（所有しない）。
/// 参照先は集約のマップを通して解決する。
/// 作成後に変化するのは `returned` だけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEntry {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
}

impl LoanEntry {
    /// 新しい貸出を開始する
    ///
    /// 返却期限は貸出日 + 14日。
    pub fn open(item_id: ItemId, member_id: MemberId, borrowed_on: NaiveDate) -> Self {
        Self {
            item_id,
            member_id,
            borrow_date: borrowed_on,
            due_date: borrowed_on + Duration::days(LOAN_PERIOD_DAYS),
            returned: false,
        }
    }

    /// 永続化データから復元する
    ///
    /// 日付は保存された値をそのまま使う（再計算しない）。
    pub fn restore(
        item_id: ItemId,
        member_id: MemberId,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
        returned: bool,
    ) -> Self {
        Self {
            item_id,
            member_id,
            borrow_date,
            due_date,
            returned,
        }
    }

    /// 未返却か
    pub fn is_active(&self) -> bool {
        !self.returned
    }

    /// 指定した会員・蔵書の組の未返却の貸出か
    pub fn is_active_for(&self, member_id: MemberId, item_id: &ItemId) -> bool {
        self.is_active() && self.member_id == member_id && &self.item_id == item_id
    }

    /// 延滞判定：未返却かつ返却期限を過ぎている
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && today > self.due_date
    }

    pub fn status(&self, today: NaiveDate) -> LoanStatus {
        if self.returned {
            LoanStatus::Returned
        } else if self.is_overdue(today) {
            LoanStatus::Overdue
        } else {
            LoanStatus::Active
        }
    }

    pub(crate) fn mark_returned(&mut self) {
        self.returned = true;
    }
}

/// 貸出ステータス（表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// 貸出中
    Active,
    /// 延滞中
    Overdue,
    /// 返却済み
    Returned,
}
