// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rc_core::Payload;
use yare::parameterized;

#[parameterized(
    off = {"off", MediaKey::Next},
    on_no_value = {"on", MediaKey::Prev},
    pause = {"pause", MediaKey::PlayPause},
    on_33 = {"on#33", MediaKey::Next},
    on_66 = {"on#66", MediaKey::PlayPause},
    on_67 = {"on#67", MediaKey::Prev},
    on_0 = {"on#0", MediaKey::Next},
    on_100 = {"on#100", MediaKey::Prev},
)]
fn resolve_media_key_matches_mapping_table(raw: &str, expected: MediaKey) {
    let payload = Payload::parse(raw).unwrap();
    assert_eq!(resolve_media_key(&payload), expected);
}

#[tokio::test]
async fn fake_media_adapter_records_calls() {
    let adapter = FakeMediaAdapter::new();
    adapter.send_media_key(MediaKey::Next).await;
    adapter.send_media_key(MediaKey::PlayPause).await;
    assert_eq!(adapter.calls(), vec![MediaKey::Next, MediaKey::PlayPause]);
}
