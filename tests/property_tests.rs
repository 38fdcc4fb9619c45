//! Property-based tests for core domain types and codecs.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use ci_refs::core::config::{InputSnapshot, Inputs, UploadMode};
use ci_refs::core::types::{Oid, Ref};
use ci_refs::git::quote::decode;
use ci_refs::process::TailBuffer;

/// Strategy for strings that look like refs some of the time.
fn ref_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "refs/heads/[a-z/._-]{0,20}",
        "refs/tags/[a-z0-9.]{0,10}",
        "refs/pull/[0-9]{0,6}/(merge|head|other)",
        ".{0,30}",
    ]
}

/// Quote `s` the way git does for paths with special characters.
fn git_quote(s: &str) -> String {
    let mut out = String::from("\"");
    for c in s.chars() {
        match c {
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{0C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

proptest! {
    #[test]
    fn ref_display_round_trips(s in ref_like()) {
        prop_assert_eq!(Ref::parse(&s).to_string(), s);
    }

    #[test]
    fn pull_merge_head_share_number(n in 0u64..1_000_000) {
        let merge = Ref::parse(&format!("refs/pull/{n}/merge"));
        prop_assert_eq!(&merge, &Ref::PullMerge(n));
        let head = merge.to_head().unwrap();
        prop_assert_eq!(head.to_string(), format!("refs/pull/{n}/head"));
        prop_assert_eq!(
            merge.remote_tracking(),
            Some(format!("refs/remotes/pull/{n}/merge"))
        );
    }

    #[test]
    fn oid_accepts_any_case_hex(s in "[0-9a-fA-F]{40}") {
        let oid = Oid::new(s.clone()).unwrap();
        prop_assert_eq!(oid.as_str(), s.to_ascii_lowercase());
    }

    #[test]
    fn oid_rejects_wrong_length(s in "[0-9a-f]{0,39}|[0-9a-f]{41,50}") {
        prop_assert!(Oid::new(s).is_err());
    }

    #[test]
    fn unquoted_text_is_unchanged(s in "[^\"].{0,40}") {
        prop_assert_eq!(decode(&s), s);
    }

    #[test]
    fn quoted_ascii_decodes_to_original(s in "[\\x00-\\x7f]{0,40}") {
        prop_assert_eq!(decode(&git_quote(&s)), s);
    }

    #[test]
    fn tail_keeps_newest_bytes(chunks in prop::collection::vec(
        prop::collection::vec(b'a'..=b'z', 0..40), 0..20
    )) {
        let cap = 64;
        let mut tail = TailBuffer::new(cap);
        let mut all = Vec::new();
        for chunk in &chunks {
            tail.push(chunk);
            all.extend_from_slice(chunk);
        }

        prop_assert!(tail.len() <= cap);
        prop_assert_eq!(tail.truncated(), all.len() > tail.len());
        let kept = tail.into_string();
        prop_assert!(String::from_utf8(all).unwrap().ends_with(&kept));
    }

    #[test]
    fn snapshot_restores_inputs(
        git_ref in proptest::option::of("refs/heads/[a-z]{1,10}"),
        sha in proptest::option::of("[0-9a-f]{40}"),
        upload in proptest::option::of("always|never|failure-only"),
    ) {
        let inputs = Inputs { git_ref, sha, upload, ..Inputs::default() };
        let json = InputSnapshot::capture(&inputs).to_json().unwrap();

        let mut restored = Inputs::default();
        InputSnapshot::from_json(&json).unwrap().apply_to(&mut restored);
        prop_assert_eq!(restored, inputs);
    }

    #[test]
    fn unrecognized_upload_defaults_to_always(s in "[A-Z]{1,10}") {
        prop_assert_eq!(UploadMode::parse(Some(s.as_str())), UploadMode::Always);
    }
}
