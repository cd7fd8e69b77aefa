use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::{
    BorrowError, CatalogItem, Copies, ItemBorrowed, ItemId, ItemReturned, LoanEntry, Member, MemberId,
    RecordError, ReturnError,
};

/// Library集約 - 蔵書・会員・貸出台帳の唯一の所有者
///
/// - 蔵書と会員はIDをキーとするマップ（IDの昇順で列挙される）
/// - 貸出台帳は追記専用。行は削除されず、返却済みに切り替わるだけ
/// - 同じ（会員, 蔵書）の組の未返却の行は常に高々1つ
///
/// 並行アクセスは想定しない。複数の呼び出し元がある場合は
/// 集約全体を1つのロックで保護すること。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    items: BTreeMap<ItemId, CatalogItem>,
    members: BTreeMap<MemberId, Member>,
    ledger: Vec<LoanEntry>,
}

impl Library {
    /// 空の集約を作成する
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // 登録と参照
    // ========================================================================

    /// 蔵書を登録する
    ///
    /// 同じIDが既にあれば黙って上書きし、以前の値を返す。
    /// 重複の拒否は呼び出し側（アプリケーション層）の責務。
    pub fn add_item(&mut self, item: CatalogItem) -> Option<CatalogItem> {
        self.items.insert(item.id.clone(), item)
    }

    /// 会員を登録する（上書きの扱いは `add_item` と同じ）
    pub fn add_member(&mut self, member: Member) -> Option<Member> {
        self.members.insert(member.id, member)
    }

    pub fn has_item(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn has_member(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn item(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// 全蔵書のスナップショット（ID昇順）
    pub fn list_items(&self) -> Vec<CatalogItem> {
        self.items.values().cloned().collect()
    }

    /// 全会員のスナップショット（ID昇順）
    pub fn list_members(&self) -> Vec<Member> {
        self.members.values().cloned().collect()
    }

    /// 貸出台帳（挿入順 = 時系列順）
    pub fn ledger(&self) -> &[LoanEntry] {
        &self.ledger
    }

    // ========================================================================
    // 状態遷移
    // ========================================================================

    /// 蔵書を貸し出す
    ///
    /// ビジネスルール（この順で判定）：
    /// 1. 会員が存在すること
    /// 2. 蔵書が存在すること
    /// 3. 貸出可能な在庫があること
    /// 4. 同じ会員が同じ蔵書を未返却で借りていないこと
    ///
    /// 成功時は在庫を1減らし、台帳に新しい行を追加する。
    /// 失敗時は状態を一切変更しない。
    pub fn borrow(
        &mut self,
        member_id: MemberId,
        item_id: &ItemId,
        today: NaiveDate,
    ) -> Result<ItemBorrowed, BorrowError> {
        if !self.members.contains_key(&member_id) {
            return Err(BorrowError::MemberNotFound);
        }

        let item = self.items.get(item_id).ok_or(BorrowError::ItemNotFound)?;

        if !item.can_borrow() {
            let (available, total) = match item.copies() {
                Copies::Limited { available, total } => (available, total),
                Copies::Unlimited => (0, 0),
            };
            return Err(BorrowError::NoCopiesAvailable { available, total });
        }

        if self.find_active(member_id, item_id).is_some() {
            return Err(BorrowError::AlreadyBorrowed);
        }

        let item = self
            .items
            .get_mut(item_id)
            .ok_or(BorrowError::ItemNotFound)?;
        item.borrow_one();
        let copies = item.copies();

        let entry = LoanEntry::open(item_id.clone(), member_id, today);
        let event = ItemBorrowed {
            item_id: entry.item_id.clone(),
            member_id,
            borrow_date: entry.borrow_date,
            due_date: entry.due_date,
            copies,
        };
        self.ledger.push(entry);

        Ok(event)
    }

    /// 蔵書を返却する
    ///
    /// ビジネスルール（この順で判定）：
    /// 1. 会員が存在すること
    /// 2. 蔵書が存在すること
    /// 3. 該当する未返却の行があること（複数あれば最初に追加された行）
    pub fn return_item(
        &mut self,
        member_id: MemberId,
        item_id: &ItemId,
    ) -> Result<ItemReturned, ReturnError> {
        if !self.members.contains_key(&member_id) {
            return Err(ReturnError::MemberNotFound);
        }

        let item = self
            .items
            .get_mut(item_id)
            .ok_or(ReturnError::ItemNotFound)?;

        let index = self
            .ledger
            .iter()
            .position(|entry| entry.is_active_for(member_id, item_id))
            .ok_or(ReturnError::NoActiveBorrow)?;

        let entry = &mut self.ledger[index];
        entry.mark_returned();
        item.return_one();

        Ok(ItemReturned {
            item_id: item_id.clone(),
            member_id,
            borrow_date: entry.borrow_date,
            copies: item.copies(),
        })
    }

    /// 永続化された台帳の行を復元する
    ///
    /// 参照先の蔵書・会員が存在しない行は拒否する。
    /// 未返却の行は在庫に反映する（貸出の再生）。
    pub(crate) fn restore_entry(&mut self, entry: LoanEntry) -> Result<(), RecordError> {
        if !self.members.contains_key(&entry.member_id) {
            return Err(RecordError::MissingMember(entry.member_id));
        }
        let item = self
            .items
            .get_mut(&entry.item_id)
            .ok_or_else(|| RecordError::MissingItem(entry.item_id.clone()))?;

        if entry.is_active() {
            item.borrow_one();
        }
        self.ledger.push(entry);
        Ok(())
    }

    fn find_active(&self, member_id: MemberId, item_id: &ItemId) -> Option<&LoanEntry> {
        self.ledger
            .iter()
            .find(|entry| entry.is_active_for(member_id, item_id))
    }

    // ========================================================================
    // 検索と統計
    // ========================================================================

    /// タイトルの部分一致検索（大文字小文字を区別しない）
    ///
    /// 該当なしは空のVec（エラーではない）。
    pub fn search_by_title(&self, keyword: &str) -> Vec<CatalogItem> {
        self.items
            .values()
            .filter(|item| item.matches_title(keyword))
            .cloned()
            .collect()
    }

    /// タイトル昇順（安定ソート。同じタイトルはID順のまま）
    pub fn sorted_by_title(&self) -> Vec<CatalogItem> {
        let mut items = self.list_items();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        items
    }

    /// 著者昇順（安定ソート。同じ著者はID順のまま）
    pub fn sorted_by_author(&self) -> Vec<CatalogItem> {
        let mut items = self.list_items();
        items.sort_by(|a, b| a.author.cmp(&b.author));
        items
    }

    /// 会員の未返却の貸出（挿入順）
    pub fn active_borrows_of(&self, member_id: MemberId) -> Vec<LoanEntry> {
        self.ledger
            .iter()
            .filter(|entry| entry.member_id == member_id && entry.is_active())
            .cloned()
            .collect()
    }

    /// 蔵書の累計貸出回数（返却済みを含む）
    pub fn borrow_count_of(&self, item_id: &ItemId) -> usize {
        self.ledger
            .iter()
            .filter(|entry| &entry.item_id == item_id)
            .count()
    }

    /// 未返却の貸出が最も多い会員
    ///
    /// 同数の場合は、台帳上で最初の未返却の行が早い会員を選ぶ。
    /// 未返却の貸出がなければ `None`。
    pub fn most_active_borrower(&self) -> Option<Member> {
        // (会員, 件数) を初出順に保持する
        let mut counts: Vec<(MemberId, usize)> = Vec::new();
        for entry in self.ledger.iter().filter(|entry| entry.is_active()) {
            match counts.iter_mut().find(|(id, _)| *id == entry.member_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.member_id, 1)),
            }
        }

        counts
            .into_iter()
            .fold(None, |best: Option<(MemberId, usize)>, (id, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((id, count)),
            })
            .and_then(|(id, _)| self.members.get(&id).cloned())
    }

    /// 延滞中の貸出（挿入順）
    pub fn overdue_borrows(&self, today: NaiveDate) -> Vec<LoanEntry> {
        self.ledger
            .iter()
            .filter(|entry| entry.is_overdue(today))
            .cloned()
            .collect()
    }
}
