//! プレゼンス registry：誰がどのユーザー名でオンラインか
//!
//! ユーザー名は自己申告です。registry は後勝ちのポリシーを取ります。
//! 別の接続に結び付いたユーザー名を登録すると結び付けは新しい接続に移り、
//! 古い接続は未登録になります。二つのマップは常に同じ (接続, ユーザー名) の組を表します。

use std::collections::HashMap;

use super::value_object::{ConnectionId, Username};

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    by_connection: HashMap<ConnectionId, Username>,
    by_username: HashMap<Username, ConnectionId>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `username` を `connection` に結び付ける
    ///
    /// 以前 `username` を保持していた別の接続があれば、その接続を返す。
    pub fn register(
        &mut self,
        connection: ConnectionId,
        username: Username,
    ) -> Option<ConnectionId> {
        if let Some(previous_name) = self.by_connection.remove(&connection) {
            if self.by_username.get(&previous_name) == Some(&connection) {
                self.by_username.remove(&previous_name);
            }
        }

        let displaced = self
            .by_username
            .insert(username.clone(), connection)
            .filter(|previous| *previous != connection);
        if let Some(previous) = displaced {
            self.by_connection.remove(&previous);
        }

        self.by_connection.insert(connection, username);
        displaced
    }

    /// `connection` の結び付けを削除する。未登録なら何もしない
    pub fn unregister(&mut self, connection: &ConnectionId) -> Option<Username> {
        let username = self.by_connection.remove(connection)?;
        if self.by_username.get(&username) == Some(connection) {
            self.by_username.remove(&username);
        }
        Some(username)
    }

    /// オンラインユーザー名のスナップショット（ソート済み）
    pub fn list_online(&self) -> Vec<Username> {
        let mut usernames: Vec<Username> = self.by_username.keys().cloned().collect();
        usernames.sort();
        usernames
    }

    pub fn resolve(&self, username: &Username) -> Option<ConnectionId> {
        self.by_username.get(username).copied()
    }

    pub fn username_of(&self, connection: &ConnectionId) -> Option<&Username> {
        self.by_connection.get(connection)
    }

    pub fn len(&self) -> usize {
        self.by_connection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_connection.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn assert_consistent(registry: &PresenceRegistry) {
        assert_eq!(registry.by_connection.len(), registry.by_username.len());
        for (connection, username) in &registry.by_connection {
            assert_eq!(registry.by_username.get(username), Some(connection));
        }
    }

    #[test]
    fn test_register_and_resolve() {
        // テスト項目: 登録したユーザー名から接続を引ける
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let alice = ConnectionId::generate();

        // when (操作):
        registry.register(alice, user("alice"));

        // then (期待する結果):
        assert_eq!(registry.resolve(&user("alice")), Some(alice));
        assert_eq!(registry.username_of(&alice), Some(&user("alice")));
        assert_eq!(registry.list_online(), vec![user("alice")]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_register_same_username_last_writer_wins() {
        // テスト項目: 同じユーザー名を別接続で登録すると後勝ちになり、旧接続は未登録になる
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        registry.register(first, user("alice"));

        // when (操作):
        let displaced = registry.register(second, user("alice"));

        // then (期待する結果):
        assert_eq!(displaced, Some(first));
        assert_eq!(registry.resolve(&user("alice")), Some(second));
        assert_eq!(registry.username_of(&first), None);
        assert_eq!(registry.list_online(), vec![user("alice")]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_reregister_connection_replaces_username() {
        // テスト項目: 同じ接続で再登録すると旧ユーザー名は消える
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let connection = ConnectionId::generate();
        registry.register(connection, user("alice"));

        // when (操作):
        let displaced = registry.register(connection, user("alicia"));

        // then (期待する結果):
        assert_eq!(displaced, None);
        assert_eq!(registry.resolve(&user("alice")), None);
        assert_eq!(registry.list_online(), vec![user("alicia")]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_unregister_does_not_touch_reclaimed_username() {
        // テスト項目: 別接続に奪われたユーザー名は旧接続の登録解除で消えない
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        registry.register(first, user("alice"));
        registry.register(second, user("alice"));

        // when (操作):
        let removed = registry.unregister(&first);

        // then (期待する結果):
        assert_eq!(removed, None);
        assert_eq!(registry.resolve(&user("alice")), Some(second));
        assert_consistent(&registry);
    }

    #[test]
    fn test_unregister_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続の登録解除は何もしない
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        registry.register(ConnectionId::generate(), user("bob"));

        // when (操作):
        let removed = registry.unregister(&ConnectionId::generate());

        // then (期待する結果):
        assert_eq!(removed, None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_online_is_sorted_snapshot() {
        // テスト項目: オンライン一覧はソート済みのスナップショットである
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        registry.register(ConnectionId::generate(), user("charlie"));
        registry.register(ConnectionId::generate(), user("alice"));
        let bob = ConnectionId::generate();
        registry.register(bob, user("bob"));

        // when (操作):
        let snapshot = registry.list_online();
        registry.unregister(&bob);

        // then (期待する結果):
        assert_eq!(snapshot, vec![user("alice"), user("bob"), user("charlie")]);
        assert_eq!(registry.list_online(), vec![user("alice"), user("charlie")]);
        assert_consistent(&registry);
    }
}
