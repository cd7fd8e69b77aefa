use thiserror::Error;

use super::{ItemId, MemberId};

/// 貸出のエラー
///
/// 判定順：会員 → 蔵書 → 在庫 → 重複貸出。
/// 複数の条件に違反している場合は先に判定したものが返る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowError {
    /// 会員が存在しない
    MemberNotFound,
    /// 蔵書が存在しない
    ItemNotFound,
    /// 貸出可能な在庫がない（印刷本のみ）
    NoCopiesAvailable { available: u32, total: u32 },
    /// 同じ会員が同じ蔵書を返却せずに借りている
    AlreadyBorrowed,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnError {
    /// 会員が存在しない
    MemberNotFound,
    /// 蔵書が存在しない
    ItemNotFound,
    /// 該当する未返却の貸出がない
    NoActiveBorrow,
}

/// 保存データ1行の読み込みエラー
///
/// いずれも致命的ではなく、該当行を読み飛ばして続行する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{kind} line needs at least {expected} fields, found {found}")]
    MissingFields {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("invalid returned flag: {0:?}")]
    InvalidFlag(String),

    #[error("unknown line kind: {0:?}")]
    UnknownKind(String),

    #[error("unknown book kind: {0:?}")]
    UnknownBookKind(String),

    #[error("record references missing book {0}")]
    MissingItem(ItemId),

    #[error("record references missing member {0}")]
    MissingMember(MemberId),
}

/// 保存データへの書き出しエラー
///
/// 区切り文字のエスケープは定義されていないため、
/// 区切り文字を含む値は書き出さずに失敗させる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} {value:?} contains a comma or line break and cannot be stored")]
    DelimiterInField { field: &'static str, value: String },
}
