//! Tests for result-code classification

use crate::codes::{classify_read, classify_status, open_is_fatal, ReadReaction, StatusReaction};

#[test]
fn test_positive_length_is_a_record() {
    assert_eq!(classify_read(555), ReadReaction::Record);
    assert_eq!(classify_read(1), ReadReaction::Record);
}

#[test]
fn test_zero_is_end_of_stream() {
    assert_eq!(classify_read(0), ReadReaction::Done);
}

#[test]
fn test_minus_one_is_a_file_boundary() {
    assert_eq!(classify_read(-1), ReadReaction::FileSwitch);
}

#[test]
fn test_minus_three_continues() {
    assert_eq!(classify_read(-3), ReadReaction::Continue);
}

#[test]
fn test_damaged_files_delete_and_continue() {
    assert_eq!(classify_read(-402), ReadReaction::DeleteFile);
    assert_eq!(classify_read(-403), ReadReaction::DeleteFile);
}

#[test]
fn test_transport_codes_reopen() {
    assert_eq!(classify_read(-203), ReadReaction::Reopen);
    assert_eq!(classify_read(-502), ReadReaction::Reopen);
    assert_eq!(classify_read(-503), ReadReaction::Reopen);
}

#[test]
fn test_unknown_negative_codes_are_fatal() {
    assert_eq!(classify_read(-999), ReadReaction::Fatal);
    assert_eq!(classify_read(-100), ReadReaction::Fatal);
}

#[test]
fn test_status_classification() {
    assert_eq!(classify_status(0), StatusReaction::Complete);
    assert_eq!(classify_status(7), StatusReaction::InProgress(7));
    assert_eq!(classify_status(-421), StatusReaction::RateLimit);
    assert_eq!(classify_status(-502), StatusReaction::Reopen);
    assert_eq!(classify_status(-503), StatusReaction::Reopen);
    assert_eq!(classify_status(-301), StatusReaction::Fatal);
}

#[test]
fn test_open_fatal_codes() {
    assert!(open_is_fatal(-100));
    assert!(open_is_fatal(-301));
    assert!(open_is_fatal(-116));
    assert!(!open_is_fatal(-502));
    assert!(!open_is_fatal(0));
}
