// ABOUTME: Hand-written descriptors for the deployed SecureStride contract ABI
// ABOUTME: Computes keccak-256 selectors, encodes calldata, and decodes view-call returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! # Contract ABI Layer
//!
//! The SecureStride contract is an external, already-deployed collaborator;
//! its ABI is fixed and reproduced here as hand-written constants rather
//! than generated bindings. This module owns the wire format only:
//!
//! - 4-byte function selectors (keccak-256 of the canonical signature)
//! - standard head/tail ABI encoding for `bytes`, `string`, and `uint256`
//! - decoding of the `getWorkoutSessionInfo` return tuple
//! - event descriptors with their `topic0` hashes
//!
//! Callers never assemble calldata themselves; the submitter passes typed
//! [`Token`]s and receives opaque calldata for the wallet capability.

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::WorkoutSession;

/// Size of one ABI word in bytes
const WORD: usize = 32;

/// Argument kinds accepted by the contract's functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Dynamic `bytes`
    Bytes,
    /// Dynamic `string`
    String,
    /// Static `uint256`
    Uint256,
}

/// A typed argument value for calldata encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Dynamic `bytes` payload
    Bytes(Vec<u8>),
    /// Dynamic `string` payload
    Str(String),
    /// Static 256-bit unsigned integer
    Uint(U256),
}

impl Token {
    const fn kind(&self) -> ParamKind {
        match self {
            Self::Bytes(_) => ParamKind::Bytes,
            Self::Str(_) => ParamKind::String,
            Self::Uint(_) => ParamKind::Uint256,
        }
    }
}

/// A callable function of the deployed contract
#[derive(Debug, Clone, Copy)]
pub struct Function {
    /// Function name as declared in the contract
    pub name: &'static str,
    /// Canonical signature hashed for the selector
    pub signature: &'static str,
    /// Expected argument kinds, in declaration order
    pub inputs: &'static [ParamKind],
}

impl Function {
    /// 4-byte dispatch selector: the first bytes of `keccak256(signature)`
    #[must_use]
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Encode a call to this function into contract calldata.
    ///
    /// Arguments must match the declared inputs in arity and kind; a
    /// mismatch is an internal error, not user input, since argument lists
    /// are assembled by the submitter.
    pub fn encode_call(&self, args: &[Token]) -> AppResult<Vec<u8>> {
        if args.len() != self.inputs.len() {
            return Err(AppError::internal(format!(
                "{} expects {} arguments, got {}",
                self.name,
                self.inputs.len(),
                args.len()
            )));
        }
        for (arg, expected) in args.iter().zip(self.inputs) {
            if arg.kind() != *expected {
                return Err(AppError::internal(format!(
                    "{}: argument kind mismatch, expected {expected:?}, got {:?}",
                    self.name,
                    arg.kind()
                )));
            }
        }

        // Standard head/tail layout: static values and dynamic offsets in
        // the head, length-prefixed padded payloads in the tail.
        let head_len = WORD * args.len();
        let mut head = Vec::with_capacity(head_len);
        let mut tail = Vec::new();

        for arg in args {
            match arg {
                Token::Uint(value) => head.extend_from_slice(&value.to_be_bytes::<WORD>()),
                Token::Bytes(data) => {
                    append_offset(&mut head, head_len + tail.len());
                    append_dynamic(&mut tail, data);
                }
                Token::Str(text) => {
                    append_offset(&mut head, head_len + tail.len());
                    append_dynamic(&mut tail, text.as_bytes());
                }
            }
        }

        let mut calldata = Vec::with_capacity(4 + head.len() + tail.len());
        calldata.extend_from_slice(&self.selector());
        calldata.extend_from_slice(&head);
        calldata.extend_from_slice(&tail);
        Ok(calldata)
    }
}

/// An event emitted by the deployed contract
#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// Event name as declared in the contract
    pub name: &'static str,
    /// Canonical signature hashed for `topic0`
    pub signature: &'static str,
}

impl Event {
    /// The event's `topic0`: `keccak256(signature)`
    #[must_use]
    pub fn topic0(&self) -> B256 {
        keccak256(self.signature.as_bytes())
    }
}

/// `logWorkout(bytes steps, bytes calories, bytes duration, bytes heartRate, string workoutType, bytes inputProof) -> uint256`
pub const LOG_WORKOUT: Function = Function {
    name: "logWorkout",
    signature: "logWorkout(bytes,bytes,bytes,bytes,string,bytes)",
    inputs: &[
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::String,
        ParamKind::Bytes,
    ],
};

/// `createFitnessGoal(bytes targetSteps, bytes targetCalories, bytes targetDuration, string goalType, uint256 duration, bytes inputProof) -> uint256`
pub const CREATE_FITNESS_GOAL: Function = Function {
    name: "createFitnessGoal",
    signature: "createFitnessGoal(bytes,bytes,bytes,string,uint256,bytes)",
    inputs: &[
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::String,
        ParamKind::Uint256,
        ParamKind::Bytes,
    ],
};

/// `updateHealthMetrics(bytes weight, bytes height, bytes age, bytes inputProof)`
pub const UPDATE_HEALTH_METRICS: Function = Function {
    name: "updateHealthMetrics",
    signature: "updateHealthMetrics(bytes,bytes,bytes,bytes)",
    inputs: &[
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::Bytes,
        ParamKind::Bytes,
    ],
};

/// `getWorkoutSessionInfo(uint256 sessionId) -> (string,uint8,uint8,uint8,uint8,bool,address,uint256)`
pub const GET_WORKOUT_SESSION_INFO: Function = Function {
    name: "getWorkoutSessionInfo",
    signature: "getWorkoutSessionInfo(uint256)",
    inputs: &[ParamKind::Uint256],
};

/// `WorkoutLogged(uint256 indexed sessionId, address indexed user, string workoutType)`
pub const WORKOUT_LOGGED: Event = Event {
    name: "WorkoutLogged",
    signature: "WorkoutLogged(uint256,address,string)",
};

/// `GoalCreated(uint256 indexed goalId, address indexed user, string goalType)`
pub const GOAL_CREATED: Event = Event {
    name: "GoalCreated",
    signature: "GoalCreated(uint256,address,string)",
};

fn append_offset(head: &mut Vec<u8>, offset: usize) {
    head.extend_from_slice(&U256::from(offset).to_be_bytes::<WORD>());
}

fn append_dynamic(tail: &mut Vec<u8>, data: &[u8]) {
    tail.extend_from_slice(&U256::from(data.len()).to_be_bytes::<WORD>());
    tail.extend_from_slice(data);
    let padding = data.len().div_ceil(WORD) * WORD - data.len();
    tail.extend(std::iter::repeat_n(0u8, padding));
}

fn word(data: &[u8], index: usize) -> AppResult<&[u8]> {
    data.get(index * WORD..(index + 1) * WORD).ok_or_else(|| {
        AppError::new(
            ErrorCode::ReceiptMalformed,
            format!("return data truncated at word {index}"),
        )
    })
}

fn word_as_usize(data: &[u8], index: usize) -> AppResult<usize> {
    let w = word(data, index)?;
    // Offsets and lengths in honest return data fit far below 2^64.
    if w[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(AppError::new(
            ErrorCode::ReceiptMalformed,
            format!("word {index} out of range"),
        ));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&w[WORD - 8..]);
    Ok(u64::from_be_bytes(buf) as usize)
}

fn word_as_u8(data: &[u8], index: usize) -> AppResult<u8> {
    let w = word(data, index)?;
    Ok(w[WORD - 1])
}

/// Decode the return data of `getWorkoutSessionInfo`.
///
/// Layout: eight head words — string offset, four `uint8` value mirrors,
/// `bool`, `address`, `uint256` timestamp — followed by the string tail.
pub fn decode_session_info(data: &[u8]) -> AppResult<WorkoutSession> {
    let string_offset = word_as_usize(data, 0)?;
    let steps = word_as_u8(data, 1)?;
    let calories = word_as_u8(data, 2)?;
    let duration = word_as_u8(data, 3)?;
    let heart_rate = word_as_u8(data, 4)?;
    let is_completed = word_as_u8(data, 5)? != 0;
    let user = Address::from_slice(&word(data, 6)?[WORD - Address::len_bytes()..]);
    let timestamp = word_as_usize(data, 7)? as u64;

    if string_offset % WORD != 0 {
        return Err(AppError::new(
            ErrorCode::ReceiptMalformed,
            "string offset not word-aligned",
        ));
    }
    let len_index = string_offset / WORD;
    let text_len = word_as_usize(data, len_index)?;
    let text_start = string_offset + WORD;
    let text = data.get(text_start..text_start + text_len).ok_or_else(|| {
        AppError::new(ErrorCode::ReceiptMalformed, "string tail truncated")
    })?;
    let workout_type = String::from_utf8(text.to_vec()).map_err(|err| {
        AppError::new(ErrorCode::ReceiptMalformed, "workout type is not UTF-8").with_source(err)
    })?;

    Ok(WorkoutSession {
        workout_type,
        steps,
        calories,
        duration,
        heart_rate,
        is_completed,
        user,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn selectors_are_four_bytes_and_distinct() {
        let selectors = [
            LOG_WORKOUT.selector(),
            CREATE_FITNESS_GOAL.selector(),
            UPDATE_HEALTH_METRICS.selector(),
            GET_WORKOUT_SESSION_INFO.selector(),
        ];
        for (i, a) in selectors.iter().enumerate() {
            for b in &selectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn event_topics_are_distinct() {
        assert_ne!(WORKOUT_LOGGED.topic0(), GOAL_CREATED.topic0());
    }

    #[test]
    fn encode_call_rejects_arity_mismatch() {
        let err = LOG_WORKOUT.encode_call(&[Token::Uint(U256::ZERO)]).unwrap_err();
        assert!(err.message.contains("expects 6 arguments"));
    }

    #[test]
    fn encode_call_rejects_kind_mismatch() {
        let err = GET_WORKOUT_SESSION_INFO
            .encode_call(&[Token::Str("1".into())])
            .unwrap_err();
        assert!(err.message.contains("kind mismatch"));
    }

    #[test]
    fn uint_argument_is_a_single_padded_word() {
        let calldata = GET_WORKOUT_SESSION_INFO
            .encode_call(&[Token::Uint(U256::from(7u64))])
            .unwrap();
        assert_eq!(calldata.len(), 4 + WORD);
        assert_eq!(calldata[4..4 + WORD - 1], [0u8; WORD - 1]);
        assert_eq!(calldata[4 + WORD - 1], 7);
    }

    #[test]
    fn dynamic_arguments_use_head_tail_layout() {
        let calldata = UPDATE_HEALTH_METRICS
            .encode_call(&[
                Token::Bytes(vec![1u8; 32]),
                Token::Bytes(vec![2u8; 32]),
                Token::Bytes(vec![3u8; 32]),
                Token::Bytes(vec![4u8; 64]),
            ])
            .unwrap();

        let args = &calldata[4..];
        // Head: four offsets pointing past the 4-word head.
        let first_offset = U256::from_be_slice(&args[..WORD]);
        assert_eq!(first_offset, U256::from(4 * WORD));
        // First tail entry: length word then the 32 payload bytes.
        let tail = &args[4 * WORD..];
        assert_eq!(U256::from_be_slice(&tail[..WORD]), U256::from(32u64));
        assert_eq!(&tail[WORD..2 * WORD], &[1u8; 32]);
    }

    #[test]
    fn session_info_roundtrip_decodes() {
        // Hand-assemble return data the way the node would.
        let mut data = Vec::new();
        let head_words = 8;
        data.extend_from_slice(&U256::from(head_words * WORD).to_be_bytes::<WORD>());
        for value in [120u8, 95, 45, 132] {
            let mut w = [0u8; WORD];
            w[WORD - 1] = value;
            data.extend_from_slice(&w);
        }
        let mut completed = [0u8; WORD];
        completed[WORD - 1] = 1;
        data.extend_from_slice(&completed);
        let user = Address::repeat_byte(0x11);
        let mut addr_word = [0u8; WORD];
        addr_word[WORD - Address::len_bytes()..].copy_from_slice(user.as_slice());
        data.extend_from_slice(&addr_word);
        data.extend_from_slice(&U256::from(1_700_000_000u64).to_be_bytes::<WORD>());
        append_dynamic(&mut data, b"Running");

        let session = decode_session_info(&data).unwrap();
        assert_eq!(session.workout_type, "Running");
        assert_eq!(session.steps, 120);
        assert_eq!(session.calories, 95);
        assert_eq!(session.duration, 45);
        assert_eq!(session.heart_rate, 132);
        assert!(session.is_completed);
        assert_eq!(session.user, user);
        assert_eq!(session.timestamp, 1_700_000_000);
    }

    #[test]
    fn truncated_return_data_is_rejected() {
        let err = decode_session_info(&[0u8; 64]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReceiptMalformed);
    }
}
