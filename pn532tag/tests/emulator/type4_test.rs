#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{read_binary, select_cc, select_file, select_ndef, update_binary};
use pn532tag::ndef::{capability_container, ndef_file_for_uri};
use pn532tag::{ResponseOutcome, SelectedFile, Type4Tag};

fn nothing() -> Option<Vec<u8>> {
    None
}

#[test]
fn capability_container_read() {
    let mut tag = Type4Tag::default();
    assert_eq!(tag.dispatch(&select_cc(), nothing).to_bytes(), vec![0x90, 0x00]);

    let r = tag.dispatch(&read_binary(0, 15), nothing).to_bytes();
    let cc = capability_container(255);
    assert_eq!(&r[..15], &cc[..]);
    assert_eq!(&r[15..], &[0x90, 0x00]);
}

#[test]
fn ndef_length_prefix_matches_message() {
    let file = ndef_file_for_uri(common::fixtures::BASE_URL).unwrap();
    let mut tag = Type4Tag::default();
    tag.dispatch(&select_ndef(), nothing);

    let r = tag.dispatch(&read_binary(0, 2), || Some(file.clone()));
    let nlen = u16::from_be_bytes([r.data()[0], r.data()[1]]) as usize;
    assert_eq!(nlen, file.len() - 2);
    assert_eq!(r.status_word(), [0x90, 0x00]);
}

#[test]
fn unknown_file_id() {
    let mut tag = Type4Tag::default();
    let r = tag.dispatch(&select_file([0xE1, 0x05]), nothing);
    assert_eq!(r.to_bytes(), vec![0x6A, 0x82]);
}

#[test]
fn update_binary_is_refused_in_range() {
    let mut tag = Type4Tag::default();
    tag.dispatch(&select_ndef(), nothing);
    for offset in [0u16, 1, 100, 255] {
        let r = tag.dispatch(&update_binary(offset, &[0x00, 0x10]), nothing);
        assert_eq!(r.to_bytes(), vec![0x6A, 0x81]);
    }
    assert!(!tag.is_writable());
}

#[test]
fn read_past_end_of_file_for_any_selected_file() {
    let mut tag = Type4Tag::default();
    for select in [select_cc(), select_ndef()] {
        tag.dispatch(&select, nothing);
        let r = tag.dispatch(&read_binary(256, 1), || Some(vec![0; 8]));
        assert_eq!(r, ResponseOutcome::EndOfFileBeforeLe);
        assert_eq!(r.to_bytes(), vec![0x62, 0x82]);
    }
}

#[test]
fn missing_selection_wins_over_offset_bound() {
    let mut tag = Type4Tag::default();
    let r = tag.dispatch(&read_binary(256, 1), || Some(vec![0; 8]));
    assert_eq!(r, ResponseOutcome::TagNotFound);
    assert_eq!(r.to_bytes(), vec![0x6A, 0x82]);

    // A select that fails keeps the tag unselected
    tag.dispatch(&select_file([0xE1, 0x05]), nothing);
    let r = tag.dispatch(&read_binary(0x0FFF, 2), nothing);
    assert_eq!(r.to_bytes(), vec![0x6A, 0x82]);
}

#[test]
fn full_reader_sequence() {
    let file = ndef_file_for_uri("ecotrip.meblabs.dev/abc123").unwrap();
    let mut tag = Type4Tag::default();
    let serve = || Some(file.clone());

    assert_eq!(
        tag.dispatch(&common::fixtures::select_ndef_application(), serve),
        ResponseOutcome::complete()
    );
    tag.dispatch(&select_cc(), serve);
    assert_eq!(tag.selected(), SelectedFile::CapabilityContainer);
    tag.dispatch(&read_binary(0, 15), serve);
    tag.dispatch(&select_ndef(), serve);
    assert_eq!(tag.selected(), SelectedFile::NdefFile);

    let len = tag.dispatch(&read_binary(0, 2), serve);
    let nlen = u16::from_be_bytes([len.data()[0], len.data()[1]]);
    let body = tag.dispatch(&read_binary(2, nlen as u8), serve);
    assert_eq!(body.data(), &file[2..]);
}
