//! Command flows end to end against a fake engine and a recording gateway

mod common;

use common::{command, tap, FakeEngine, Harness, Sent, CHAT};
use soul_core::RawTrackAttrs;
use soul_remote::gateway::Button;

const CHOICE_INVALID: &str = "That choice is no longer valid.";

fn lofi_engine() -> FakeEngine {
    FakeEngine::with_tracks(&[
        ("lofi/beats.flac", "Lo-Fi Beats"),
        ("lofi/dreams.flac", "Lofi Dreams"),
    ])
}

/// Button data of the most recent choice keyboard, row-major
fn choice_data(harness: &Harness) -> Vec<String> {
    let (_, keyboard) = harness.gateway.last_keyboard().unwrap();
    keyboard
        .into_iter()
        .flatten()
        .map(|button| button.data)
        .collect()
}

fn answers(harness: &Harness) -> Vec<Option<String>> {
    harness
        .gateway
        .sent()
        .into_iter()
        .filter_map(|s| match s {
            Sent::Answer { notice, .. } => Some(notice),
            _ => None,
        })
        .collect()
}

fn enqueued(harness: &Harness) -> Vec<String> {
    harness
        .engine
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("enqueue_and_play"))
        .collect()
}

// ============================================================================
// Search and choose
// ============================================================================

mod search_and_choose {
    use super::*;

    #[tokio::test]
    async fn lofi_scenario() {
        let harness = Harness::new(lofi_engine());

        harness.send(command("play", "lofi")).await;

        let (text, keyboard) = harness.gateway.last_keyboard().unwrap();
        assert_eq!(text, "1. Lo-Fi Beats\n2. Lofi Dreams");
        assert_eq!(keyboard.len(), 1);
        let labels: Vec<&str> = keyboard[0].iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2"]);
        assert!(keyboard[0].iter().all(|b| b.data.starts_with("choice:")));

        let second = keyboard[0][1].data.clone();
        harness.send(tap(&second)).await;

        assert_eq!(enqueued(&harness), vec!["enqueue_and_play lofi/dreams.flac"]);
        assert!(harness
            .gateway
            .texts()
            .contains(&"Now playing Lofi Dreams".to_string()));
        assert_eq!(answers(&harness), vec![None]);
    }

    #[tokio::test]
    async fn results_wrap_into_rows() {
        let titles: Vec<(String, String)> = (0..12)
            .map(|i| (format!("jazz/{i}.flac"), format!("Jazz Standard {i}")))
            .collect();
        let tracks: Vec<(&str, &str)> = titles
            .iter()
            .map(|(file, title)| (file.as_str(), title.as_str()))
            .collect();
        let harness = Harness::new(FakeEngine::with_tracks(&tracks));

        harness.send(command("play", "jazz")).await;

        // max_results caps the list at 10, max_row_width wraps at 5
        let (text, keyboard) = harness.gateway.last_keyboard().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[9].starts_with("10. Jazz Standard"));
        assert_eq!(
            lines[10],
            "Showing 10 of 12 matches. Refine your search to see more."
        );
        let sizes: Vec<usize> = keyboard.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 5]);
        assert_eq!(keyboard[1][4].label, "10");
    }

    #[tokio::test]
    async fn no_match_reports_no_music() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("play", "polka")).await;

        assert_eq!(harness.gateway.texts(), vec!["No music found."]);
        assert!(harness.gateway.last_keyboard().is_none());
    }

    #[tokio::test]
    async fn artist_is_shown_when_known() {
        let engine = FakeEngine::default();
        let attrs: RawTrackAttrs = [
            ("file", "miles/so_what.flac"),
            ("Title", "So What"),
            ("Artist", "Miles Davis"),
        ]
        .into_iter()
        .collect();
        engine.tracks.lock().unwrap().push(attrs);
        let harness = Harness::new(engine);

        harness.send(command("play", "miles")).await;
        let (text, _) = harness.gateway.last_keyboard().unwrap();
        assert_eq!(text, "1. So What - Miles Davis");
    }
}

// ============================================================================
// Stale choices
// ============================================================================

mod stale_choices {
    use super::*;

    #[tokio::test]
    async fn duplicate_tap_plays_once() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("play", "lofi")).await;
        let data = choice_data(&harness);

        harness.send(tap(&data[0])).await;
        harness.send(tap(&data[0])).await;
        harness.send(tap(&data[1])).await;

        assert_eq!(enqueued(&harness), vec!["enqueue_and_play lofi/beats.flac"]);
        assert_eq!(
            answers(&harness),
            vec![
                None,
                Some(CHOICE_INVALID.to_string()),
                Some(CHOICE_INVALID.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn newer_search_invalidates_older_buttons() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("play", "lofi")).await;
        let old = choice_data(&harness);

        harness.send(command("play", "dreams")).await;
        harness.send(tap(&old[0])).await;

        assert!(enqueued(&harness).is_empty());
        assert_eq!(answers(&harness), vec![Some(CHOICE_INVALID.to_string())]);
    }

    #[tokio::test]
    async fn empty_search_also_invalidates_older_buttons() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("play", "lofi")).await;
        let old = choice_data(&harness);

        harness.send(command("play", "polka")).await;
        harness.send(tap(&old[1])).await;

        assert!(enqueued(&harness).is_empty());
        assert_eq!(answers(&harness), vec![Some(CHOICE_INVALID.to_string())]);
    }

    #[tokio::test]
    async fn rebuilt_library_invalidates_choices() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("play", "lofi")).await;
        let data = choice_data(&harness);

        // Same positions now name different files
        harness.engine.tracks.lock().unwrap().reverse();
        harness.reindex();

        harness.send(tap(&data[1])).await;
        assert!(enqueued(&harness).is_empty());
        assert_eq!(answers(&harness), vec![Some(CHOICE_INVALID.to_string())]);
    }

    #[tokio::test]
    async fn forged_token_is_invalid() {
        let harness = Harness::new(lofi_engine());
        harness.send(tap("choice:not-a-token")).await;
        assert_eq!(answers(&harness), vec![Some(CHOICE_INVALID.to_string())]);
    }
}

// ============================================================================
// Transport
// ============================================================================

mod transport {
    use super::*;

    #[tokio::test]
    async fn play_without_payload_resumes_and_reports() {
        let harness = Harness::new(lofi_engine());
        let current = harness.engine.tracks.lock().unwrap()[1].clone();
        *harness.engine.current.lock().unwrap() = Some(current);

        harness.send(command("play", "")).await;

        assert_eq!(
            harness.engine.calls(),
            vec!["set_playing true", "currentsong"]
        );
        assert_eq!(harness.gateway.texts(), vec!["Now playing Lofi Dreams"]);
    }

    #[tokio::test]
    async fn play_with_empty_queue_stays_quiet() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("play", "   ")).await;
        assert!(harness.gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn pause_confirms() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("pause", "")).await;

        assert_eq!(harness.engine.calls(), vec!["set_playing false"]);
        assert_eq!(harness.gateway.texts(), vec!["Paused."]);
    }

    #[tokio::test]
    async fn next_and_prev_report_the_new_song() {
        let harness = Harness::new(lofi_engine());
        let current = harness.engine.tracks.lock().unwrap()[0].clone();
        *harness.engine.current.lock().unwrap() = Some(current);

        harness.send(command("next", "")).await;
        harness.send(command("prev", "")).await;

        assert_eq!(
            harness.engine.calls(),
            vec!["next", "currentsong", "previous", "currentsong"]
        );
        assert_eq!(
            harness.gateway.texts(),
            vec!["Now playing Lo-Fi Beats", "Now playing Lo-Fi Beats"]
        );
    }
}

// ============================================================================
// Volume
// ============================================================================

mod volume {
    use super::*;

    #[tokio::test]
    async fn show_volume_with_buttons() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("volume", "")).await;

        let (text, keyboard) = harness.gateway.last_keyboard().unwrap();
        assert_eq!(text, "Current volume is: 50");
        assert_eq!(
            keyboard,
            vec![vec![
                Button::new("UP", "volume:up"),
                Button::new("DOWN", "volume:down"),
            ]]
        );
    }

    #[tokio::test]
    async fn set_absolute_volume() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("volume", "70")).await;

        assert_eq!(harness.engine.calls(), vec!["set_volume 70"]);
        assert_eq!(harness.gateway.texts(), vec!["Current volume is: 70"]);
    }

    #[tokio::test]
    async fn out_of_range_volume_never_reaches_the_engine() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("volume", "150")).await;
        harness.send(command("volume", "-1")).await;

        assert!(harness.engine.calls().is_empty());
        assert_eq!(
            harness.gateway.texts(),
            vec![
                "The volume should be between 0 and 100.",
                "The volume should be between 0 and 100.",
            ]
        );
    }

    #[tokio::test]
    async fn non_numeric_volume() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("volume", "loud")).await;

        assert!(harness.engine.calls().is_empty());
        assert_eq!(harness.gateway.texts(), vec!["The volume should be a number."]);
    }

    #[tokio::test]
    async fn up_tap_edits_the_message_in_place() {
        let harness = Harness::new(lofi_engine());
        harness.send(tap("volume:up")).await;

        let sent = harness.gateway.sent();
        assert!(matches!(
            &sent[0],
            Sent::Edit { text, keyboard: Some(_), .. } if text == "Current volume is: 52"
        ));
        assert!(matches!(&sent[1], Sent::Answer { notice: None, .. }));
        assert_eq!(*harness.engine.volume.lock().unwrap(), Some(52));
    }

    #[tokio::test]
    async fn taps_saturate_at_the_bounds() {
        let harness = Harness::new(lofi_engine());
        *harness.engine.volume.lock().unwrap() = Some(99);
        harness.send(tap("volume:up")).await;
        assert_eq!(*harness.engine.volume.lock().unwrap(), Some(100));

        *harness.engine.volume.lock().unwrap() = Some(1);
        harness.send(tap("volume:down")).await;
        assert_eq!(*harness.engine.volume.lock().unwrap(), Some(0));
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn unreachable_engine_gets_a_generic_reply() {
        let harness = Harness::new(lofi_engine());
        harness.engine.set_unreachable(true);

        harness.send(command("pause", "")).await;
        assert_eq!(
            harness.gateway.texts(),
            vec!["The music player is not reachable right now. Please try again later."]
        );
    }

    #[tokio::test]
    async fn search_before_first_build() {
        let harness = Harness::unindexed(lofi_engine());
        harness.send(command("play", "lofi")).await;
        assert_eq!(
            harness.gateway.texts(),
            vec!["The music library is not ready yet. Please try again later."]
        );
    }

    #[tokio::test]
    async fn missing_mixer_is_a_generic_failure() {
        let harness = Harness::new(lofi_engine());
        *harness.engine.volume.lock().unwrap() = None;

        harness.send(command("volume", "")).await;
        assert_eq!(
            harness.gateway.texts(),
            vec![soul_remote::error::GENERIC_FAILURE]
        );
    }

    #[tokio::test]
    async fn failed_tap_is_still_answered() {
        let harness = Harness::new(lofi_engine());
        harness.engine.set_unreachable(true);

        harness.send(tap("volume:down")).await;
        assert_eq!(
            harness.gateway.sent(),
            vec![Sent::Answer {
                tap_id: "tap-1".to_string(),
                notice: Some(
                    "The music player is not reachable right now. Please try again later."
                        .to_string()
                ),
            }]
        );
    }
}

// ============================================================================
// Misc commands
// ============================================================================

mod misc {
    use super::*;

    #[tokio::test]
    async fn help_lists_commands() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("help", "")).await;

        let texts = harness.gateway.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("/play"));
        assert!(texts[0].contains("/volume"));
    }

    #[tokio::test]
    async fn unknown_commands_are_ignored() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("shuffle", "")).await;
        harness.send(tap("mystery")).await;

        assert!(harness.engine.calls().is_empty());
        assert_eq!(
            harness.gateway.sent(),
            vec![Sent::Answer {
                tap_id: "tap-1".to_string(),
                notice: None
            }]
        );
    }

    #[tokio::test]
    async fn replies_go_to_the_originating_chat() {
        let harness = Harness::new(lofi_engine());
        harness.send(command("pause", "")).await;
        assert!(matches!(
            &harness.gateway.sent()[0],
            Sent::Text { chat, .. } if *chat == CHAT
        ));
    }
}
