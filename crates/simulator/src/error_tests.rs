// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn reference_missing_formats_the_message() {
    let err = SimError::ReferenceMissing("agt-unknown".to_string());
    assert!(err.to_string().contains("agt-unknown"));
}

#[test]
fn batch_missing_has_a_stable_message() {
    assert_eq!(SimError::BatchMissing.to_string(), "pop_batch called on an empty event queue");
}
