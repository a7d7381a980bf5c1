//! UseCase: プライベートメッセージ送信処理
//!
//! プライベートメッセージは保存しません。宛先がオフラインの場合は破棄されます。

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PresenceRepository, Timestamp, Username,
    ValueObjectError,
};

use super::{error::CommandError, resolve_sender};

/// プライベートメッセージ送信のユースケース
pub struct SendPrivateMessageUseCase {
    presence: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendPrivateMessageUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence,
            message_pusher,
            clock,
        }
    }

    /// `to` を現在保持している接続にだけ `message` を届ける
    pub async fn execute(
        &self,
        connection: ConnectionId,
        from: Option<Username>,
        to: Username,
        message: String,
    ) -> Result<ConnectionId, CommandError> {
        let from = resolve_sender(self.presence.as_ref(), &connection, from)
            .await
            .ok_or(ValueObjectError::Missing("from"))?;
        let target = self
            .presence
            .resolve(&to)
            .await
            .ok_or_else(|| CommandError::NotFound(format!("user '{}' is offline", to)))?;

        let notification = Notification::PrivateMessage {
            from,
            to,
            message,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        self.message_pusher.push_to(&target, &notification).await?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;
    use crate::infrastructure::dto::websocket::{PrivateMessagePayload, ServerEvent};
    use crate::usecase::test_support::{Harness, NOW, drain, user};
    use roomcast_shared::time::{FixedClock, timestamp_to_rfc3339};

    #[tokio::test]
    async fn test_private_message_reaches_only_target() {
        // テスト項目: オンラインの宛先にだけプライベートメッセージが一件届く
        // given (前提条件):
        let harness = Harness::new();
        let (alice, mut alice_rx) = harness.connect().await;
        let (bob, mut bob_rx) = harness.connect().await;
        let (carol, mut carol_rx) = harness.connect().await;
        let presence = &harness.repositories.presence;
        presence.register(alice, user("alice")).await;
        presence.register(bob, user("bob")).await;
        presence.register(carol, user("carol")).await;
        let usecase = SendPrivateMessageUseCase::new(
            presence.clone(),
            harness.pusher.clone(),
            harness.clock.clone(),
        );

        // when (操作):
        let target = usecase
            .execute(alice, None, user("bob"), "psst".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(target, bob);
        assert_eq!(
            drain(&mut bob_rx),
            vec![ServerEvent::PrivateMessage(PrivateMessagePayload {
                from: "alice".to_string(),
                to: "bob".to_string(),
                message: "psst".to_string(),
                timestamp: timestamp_to_rfc3339(NOW),
            })]
        );
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut carol_rx).is_empty());
    }

    #[tokio::test]
    async fn test_offline_target_pushes_nothing() {
        // テスト項目: オフラインの宛先へのメッセージは誰にも送信されない
        // given (前提条件):
        let harness = Harness::new();
        let alice = ConnectionId::generate();
        harness.repositories.presence.register(alice, user("alice")).await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().never();
        pusher.expect_broadcast().never();
        let usecase = SendPrivateMessageUseCase::new(
            harness.repositories.presence.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let result = usecase
            .execute(alice, None, user("ghost"), "hello?".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(CommandError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_declared_sender_used_before_join() {
        // テスト項目: join 前の接続は自己申告の from で送信できる
        // given (前提条件):
        let harness = Harness::new();
        let bob = ConnectionId::generate();
        harness.repositories.presence.register(bob, user("bob")).await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(move |target, notification| {
                *target == bob
                    && matches!(
                        notification,
                        Notification::PrivateMessage { from, .. } if from.as_str() == "eve"
                    )
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = SendPrivateMessageUseCase::new(
            harness.repositories.presence.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let result = usecase
            .execute(ConnectionId::generate(), Some(user("eve")), user("bob"), "hi".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(bob));
    }
}
