use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ItemId, MemberId};

/// 登録する蔵書の形態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewItemFormat {
    Printed { total_copies: u32 },
    Electronic,
}

/// コマンド：蔵書を登録する
///
/// 値は入力そのまま。正規化と検証はアプリケーション層で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub format: NewItemFormat,
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMember {
    pub id: MemberId,
    pub name: String,
}

/// コマンド：蔵書を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowItem {
    pub member_id: MemberId,
    pub item_id: ItemId,
    pub borrowed_on: NaiveDate,
}

/// コマンド：蔵書を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnItem {
    pub member_id: MemberId,
    pub item_id: ItemId,
}
