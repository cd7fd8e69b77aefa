use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Copies, ItemId, MemberId};

/// イベント：蔵書が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBorrowed {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    /// 貸出後の在庫数
    pub copies: Copies,
}

/// イベント：蔵書が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReturned {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    /// 返却後の在庫数
    pub copies: Copies,
}
