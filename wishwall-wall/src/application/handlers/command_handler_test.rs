#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use wishwall_core::config::WallConfig;
    use wishwall_core::error::WallError;
    use wishwall_core::model::MessageKind;

    use crate::application::commands::SubmitMessageCommand;
    use crate::application::handlers::command_handler::{RevealAction, WallCommandHandler};
    use crate::domain::composer::{ComposerForm, ComposerState};
    use crate::domain::repository::{MessageRepository, MessageRepositoryRef};
    use crate::domain::reveal::RevealCell;
    use crate::domain::service::WallService;
    use crate::infrastructure::persistence::MemoryMessageStore;

    fn setup() -> (WallCommandHandler, Arc<MemoryMessageStore>) {
        let store = Arc::new(MemoryMessageStore::default());
        let messages: MessageRepositoryRef = store.clone();
        let service = Arc::new(WallService::new(messages, None));
        let handler = WallCommandHandler::new(service, &WallConfig::default());
        (handler, store)
    }

    #[tokio::test]
    async fn composer_submission_reaches_success_and_store() {
        let (handler, store) = setup();
        let mut form = ComposerForm::new();
        form.open();
        form.set_body("Happy Bday!");
        form.set_author("");

        let id = handler.drive_composer(&mut form).await.unwrap();
        assert_eq!(form.state(), ComposerState::Success);
        assert_eq!(handler.success_confirmation(), Duration::from_millis(1500));

        let mut subscription = store.subscribe().await;
        let snapshot = subscription.recv().await.unwrap();
        let message = snapshot.get(&id).unwrap();
        assert_eq!(message.content, "Happy Bday!");
        assert_eq!(message.author, "Anonymous");
        assert!(!message.revealed);
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_create() {
        let (handler, store) = setup();
        let mut form = ComposerForm::new();
        form.open();
        form.set_body("   ");

        let error = handler.drive_composer(&mut form).await.unwrap_err();
        assert!(error.is_validation());
        assert_eq!(form.state(), ComposerState::Editing);

        let mut subscription = store.subscribe().await;
        let snapshot = subscription.recv().await.unwrap();
        assert_eq!(snapshot.total_count(), 0);
    }

    #[tokio::test]
    async fn image_submission_without_object_store_stays_editing() {
        let (handler, _store) = setup();
        let mut form = ComposerForm::new();
        form.open();
        form.set_kind(MessageKind::Image);
        form.attach_image(crate::domain::composer::ImageAttachment {
            file_name: "cake.png".to_string(),
            mime_type: "image/png".to_string(),
            payload: bytes::Bytes::from_static(b"png"),
        });

        let error = handler.drive_composer(&mut form).await.unwrap_err();
        assert!(matches!(error, WallError::Upload(_)));
        // 失败不展示成功确认，表单退回编辑态
        assert_eq!(form.state(), ComposerState::Editing);
    }

    #[tokio::test]
    async fn first_reveal_click_writes_and_schedules_open() {
        let (handler, store) = setup();
        let id = handler
            .handle_submit(SubmitMessageCommand::text("surprise", "Kim"))
            .await
            .unwrap();

        let mut subscription = store.subscribe().await;
        let snapshot = subscription.recv().await.unwrap();
        let mut cell = RevealCell::from_message(
            snapshot.get(&id).unwrap(),
            Duration::from_millis(800),
        );

        match handler.handle_reveal(&mut cell).await {
            RevealAction::Revealed { open_after, write } => {
                assert_eq!(open_after, Duration::from_millis(800));
                assert!(write.is_ok());
            }
            RevealAction::Opened { .. } => panic!("expected first reveal"),
        }

        let updated = subscription.recv().await.unwrap();
        assert!(updated.get(&id).unwrap().revealed);
        assert_eq!(updated.revealed_count(), 1);
    }

    #[tokio::test]
    async fn failed_reveal_write_is_observable_and_retried() {
        let (handler, _store) = setup();
        let orphan = wishwall_core::model::Message {
            id: "gone".to_string(),
            kind: MessageKind::Text,
            content: "vanished".to_string(),
            caption: None,
            author: "Anonymous".to_string(),
            revealed: false,
            created_at: None,
        };
        let mut cell = RevealCell::from_message(&orphan, Duration::from_millis(800));

        match handler.handle_reveal(&mut cell).await {
            RevealAction::Revealed { write, .. } => assert!(write.is_err()),
            RevealAction::Opened { .. } => panic!("expected first reveal"),
        }
        // 本地保持乐观翻转
        assert!(cell.is_revealed());

        // 下一次点击补发写，仍失败且仍可观测
        match handler.handle_reveal(&mut cell).await {
            RevealAction::Opened { write } => assert!(write.unwrap().is_err()),
            RevealAction::Revealed { .. } => panic!("expected reopen"),
        }
    }
}
