//! Tests for the generation proxy.

mod test_utils;

use storybarn_core::{DraftConfig, JobStatus, NewImage};
use storybarn_error::{
    ProviderErrorKind, RetryableError, StorageErrorKind, StorybarnErrorKind,
};
use storybarn_generation::RetryPolicy;
use storybarn_models::ImaginePrompt;
use storybarn_repository::{ImageRepository, StoryRepository};
use test_utils::{
    analysis_reply, complete_config, story_reply, MockImageDriver, MockReply, MockTextDriver, Rig,
};

fn rate_limited() -> ProviderErrorKind {
    ProviderErrorKind::RateLimited {
        retry_after_secs: Some(20),
    }
}

#[tokio::test]
async fn incomplete_config_is_rejected_without_a_provider_call() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let mut config = complete_config();
    config.theme = String::new();

    let err = weaver.generate_story(&config).await.unwrap_err();
    assert!(matches!(err.kind(), StorybarnErrorKind::Validation(_)));
    assert_eq!(rig.text.call_count(), 0);
    assert_eq!(rig.stories.list().await.unwrap().len(), 0);
}

#[tokio::test]
async fn every_required_field_is_enforced() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let breakages: Vec<fn(&mut DraftConfig)> = vec![
        |c| c.protagonist.personality = String::new(),
        |c| c.antagonist.kind = String::new(),
        |c| c.theme = String::new(),
        |c| c.art_style.style = String::new(),
    ];

    for breakage in breakages {
        let mut config = complete_config();
        breakage(&mut config);
        let err = weaver.generate_story(&config).await.unwrap_err();
        assert!(matches!(err.kind(), StorybarnErrorKind::Validation(_)));
    }
    assert_eq!(rig.text.call_count(), 0);
}

#[tokio::test]
async fn generated_story_carries_stub_output_and_echoes_config() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let story = weaver.generate_story(&complete_config()).await.unwrap();

    assert!(story.id >= 1);
    assert_eq!(story.title, "Biscuit Saves the Barn");
    assert!(story.content.starts_with("Chapter 1."));
    assert_eq!(story.theme, "friendship");
    assert_eq!(story.art_style.style, "whimsical");
    assert_eq!(story.metadata.word_count, 480);
    assert_eq!(story.metadata.protagonist.name, "Biscuit");

    // Persisted, not just returned.
    let fetched = rig.stories.get(story.id).await.unwrap().unwrap();
    assert_eq!(fetched, story);
}

#[tokio::test]
async fn story_prompt_reaches_the_driver_with_the_brief() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    weaver.generate_story(&complete_config()).await.unwrap();

    let requests = rig.text.captured();
    assert_eq!(requests.len(), 1);
    let system = requests[0].messages[0].content[0].as_text().unwrap();
    assert!(system.contains("Maplewood Farm"));
    let user = requests[0].messages[1].content[0].as_text().unwrap();
    assert!(user.contains("squirrel-gang"));
    assert!(user.contains("friendship"));
}

#[tokio::test(start_paused = true)]
async fn transient_failure_every_time_uses_exactly_three_attempts() {
    let rig = Rig::new(
        MockTextDriver::new_error(rate_limited()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();
    let start = tokio::time::Instant::now();

    let err = weaver.generate_story(&complete_config()).await.unwrap_err();

    assert_eq!(rig.text.call_count(), 3);
    // Linear ladder: 1s after the first failure, 2s after the second.
    assert!(start.elapsed() >= std::time::Duration::from_secs(3));
    assert!(err.is_retryable());
    assert_eq!(err.retry_after_secs(), Some(20));
    // Nothing persisted on failure.
    assert_eq!(rig.stories.list().await.unwrap().len(), 0);
}

#[tokio::test(start_paused = true)]
async fn auth_failure_is_not_retried() {
    let rig = Rig::new(
        MockTextDriver::new_error(ProviderErrorKind::Auth("bad key".to_string())),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let err = weaver.generate_story(&complete_config()).await.unwrap_err();
    assert_eq!(rig.text.call_count(), 1);
    assert!(!err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn malformed_response_is_retried_then_succeeds() {
    let rig = Rig::new(
        MockTextDriver::new_sequence(vec![
            MockReply::Success("no json here at all".to_string()),
            MockReply::Success(story_reply()),
        ]),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let story = weaver.generate_story(&complete_config()).await.unwrap();
    assert_eq!(rig.text.call_count(), 2);
    assert_eq!(story.title, "Biscuit Saves the Barn");
}

#[tokio::test]
async fn illustration_is_stored_and_recorded() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let image = weaver
        .generate_illustration(&complete_config(), Some("book-7"))
        .await
        .unwrap();

    assert_eq!(image.book_id, "book-7");
    assert_eq!(image.order, 1);
    assert!(!image.analyzed);

    // Bytes landed under the book directory with a fresh name.
    let bytes = rig.store.read(&image.path).await.unwrap();
    assert_eq!(bytes, b"png-bytes");

    // A second illustration gets the next order slot.
    let second = weaver
        .generate_illustration(&complete_config(), Some("book-7"))
        .await
        .unwrap();
    assert_eq!(second.order, 2);
    assert_ne!(second.path, image.path);
}

#[tokio::test]
async fn midjourney_job_is_recorded_pending() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let image = weaver
        .generate_midjourney(
            &ImaginePrompt {
                description: "a pup by the pond".to_string(),
                characteristics: None,
                setting: None,
                art_style: Some("whimsical".to_string()),
            },
            None,
        )
        .await
        .unwrap();

    let job = image.midjourney.unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.prompt.contains("a pup by the pond"));
    // No image-driver call happens for the disabled transport.
    assert_eq!(rig.image.call_count(), 0);
    assert_eq!(rig.journal.snapshot_for("midjourney").len(), 1);
}

#[tokio::test]
async fn analyze_twice_calls_the_provider_once() {
    let rig = Rig::new(
        MockTextDriver::new_success(&analysis_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let stored = weaver
        .generate_illustration(&complete_config(), Some("book-1"))
        .await
        .unwrap();

    let first = weaver.analyze_image(stored.id).await.unwrap();
    assert!(first.analyzed);
    assert_eq!(rig.text.call_count(), 1);

    let second = weaver.analyze_image(stored.id).await.unwrap();
    assert_eq!(rig.text.call_count(), 1, "second analysis must be a cache hit");
    assert_eq!(first.analysis, second.analysis);

    let analysis = second.analysis.unwrap();
    assert_eq!(analysis.character_profile.name, "Biscuit");
}

#[tokio::test]
async fn analyze_unknown_id_is_repository_not_found() {
    let rig = Rig::new(
        MockTextDriver::new_success(&analysis_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let err = weaver.analyze_image(999).await.unwrap_err();
    assert!(matches!(err.kind(), StorybarnErrorKind::Repository(_)));
    assert_eq!(rig.text.call_count(), 0);
}

#[tokio::test]
async fn analyze_with_missing_file_is_a_distinct_error() {
    let rig = Rig::new(
        MockTextDriver::new_success(&analysis_reply()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    // Record exists but its path points nowhere.
    let orphan = rig
        .images
        .create(NewImage {
            book_id: "book-1".to_string(),
            path: "book-1/vanished.png".to_string(),
            ..NewImage::default()
        })
        .await
        .unwrap();

    let err = weaver.analyze_image(orphan.id).await.unwrap_err();
    match err.kind() {
        StorybarnErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::FileMissing(_)));
        }
        other => panic!("expected storage error, got {}", other),
    }
    assert_eq!(rig.text.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn image_provider_failures_use_the_same_retry_ladder() {
    let rig = Rig::new(
        MockTextDriver::new_success(&story_reply()),
        MockImageDriver::new_error(ProviderErrorKind::Upstream {
            status_code: 503,
            message: "overloaded".to_string(),
        }),
    );
    let weaver = rig.weaver();

    let err = weaver
        .generate_illustration(&complete_config(), None)
        .await
        .unwrap_err();

    assert_eq!(rig.image.call_count(), 3);
    assert!(err.is_retryable());
    assert_eq!(rig.images.list().await.unwrap().len(), 0);
}

#[tokio::test]
async fn no_retry_policy_attempts_once() {
    let rig = Rig::new(
        MockTextDriver::new_error(rate_limited()),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver().with_retry_policy(RetryPolicy::no_retry());

    let _ = weaver.generate_story(&complete_config()).await.unwrap_err();
    assert_eq!(rig.text.call_count(), 1);
}

#[tokio::test]
async fn journal_captures_request_and_error_events() {
    let rig = Rig::new(
        MockTextDriver::new_error(ProviderErrorKind::Auth("bad key".to_string())),
        MockImageDriver::new_success("png-bytes"),
    );
    let weaver = rig.weaver();

    let _ = weaver.generate_story(&complete_config()).await.unwrap_err();

    let events: Vec<_> = rig
        .journal
        .snapshot_for("openai")
        .into_iter()
        .map(|e| e.event)
        .collect();
    assert_eq!(events, vec!["request", "error"]);
}
