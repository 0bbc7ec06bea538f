// ABOUTME: Core data models for fitness records submitted to the Secure Stride contract
// ABOUTME: Defines WorkoutRecord, FitnessGoal, HealthMetrics, WorkoutSession, and SubmissionStatus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! # Data Models
//!
//! Core data structures for records submitted on-chain. Records are created
//! by the caller (CLI flags or library construction), validated against their
//! declared field ranges, and immutable once submitted — the external chain
//! is the system of record, nothing is mutated locally after dispatch.
//!
//! ## Core Models
//!
//! - [`WorkoutRecord`]: a single logged workout (encrypted on submission)
//! - [`FitnessGoal`]: a target to reach within a number of days
//! - [`HealthMetrics`]: body metrics kept confidential on-chain
//! - [`WorkoutSession`]: decoded result of the contract's session view call
//! - [`SubmissionStatus`]: derived lifecycle of one outstanding transaction

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use alloy_primitives::Address;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::errors::FieldViolation;

/// Workout intensity, as selected in the logging form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Intensity {
    /// Recovery-pace effort
    Low,
    /// Sustainable aerobic effort
    #[default]
    Medium,
    /// Near-maximal effort
    High,
}

impl Intensity {
    /// Canonical display form, matching the contract-facing vocabulary
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown intensity '{other}' (expected Low, Medium, or High)")),
        }
    }
}

/// A single workout to be logged on-chain.
///
/// Numeric fields are encrypted into opaque payloads at submission time;
/// only `workout_type` travels as plaintext, matching the contract's
/// `logWorkout` signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Workout type label (e.g. "Running", "Yoga")
    pub workout_type: String,
    /// Duration in minutes, at least 1
    pub duration_minutes: u32,
    /// Calories burned, at least 1
    pub calories: u32,
    /// Step count, zero for stationary workouts
    pub steps: u64,
    /// Average heart rate in BPM, within [40, 220]
    pub heart_rate_bpm: u32,
    /// Perceived intensity
    pub intensity: Intensity,
    /// Calendar date of the workout
    pub date: NaiveDate,
}

impl WorkoutRecord {
    /// Start building a record with the form's default values
    #[must_use]
    pub fn builder(workout_type: impl Into<String>) -> WorkoutRecordBuilder {
        WorkoutRecordBuilder::new(workout_type)
    }

    /// Validate every field against its declared range.
    ///
    /// Returns every violated field, not just the first, so callers can
    /// surface a complete correction list in one pass.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.workout_type.trim().is_empty() {
            violations.push(FieldViolation::new("type", "workout type is required"));
        }
        if self.duration_minutes < limits::MIN_DURATION_MINUTES {
            violations.push(FieldViolation::new(
                "duration",
                format!("must be at least {} minute", limits::MIN_DURATION_MINUTES),
            ));
        }
        if self.calories < limits::MIN_CALORIES {
            violations.push(FieldViolation::new(
                "calories",
                format!("must be at least {}", limits::MIN_CALORIES),
            ));
        }
        if self.heart_rate_bpm < limits::HEART_RATE_MIN_BPM
            || self.heart_rate_bpm > limits::HEART_RATE_MAX_BPM
        {
            violations.push(FieldViolation::new(
                "heartRate",
                format!(
                    "must be between {} and {} BPM",
                    limits::HEART_RATE_MIN_BPM,
                    limits::HEART_RATE_MAX_BPM
                ),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Builder for [`WorkoutRecord`] with the logging form's default values
#[derive(Debug, Clone)]
pub struct WorkoutRecordBuilder {
    workout_type: String,
    duration_minutes: u32,
    calories: u32,
    steps: u64,
    heart_rate_bpm: u32,
    intensity: Intensity,
    date: NaiveDate,
}

impl WorkoutRecordBuilder {
    /// Create a builder seeded with the form defaults
    #[must_use]
    pub fn new(workout_type: impl Into<String>) -> Self {
        Self {
            workout_type: workout_type.into(),
            duration_minutes: 30,
            calories: 200,
            steps: 0,
            heart_rate_bpm: 120,
            intensity: Intensity::Medium,
            date: Utc::now().date_naive(),
        }
    }

    /// Set the duration in minutes
    #[must_use]
    pub const fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the calories burned
    #[must_use]
    pub const fn calories(mut self, calories: u32) -> Self {
        self.calories = calories;
        self
    }

    /// Set the step count
    #[must_use]
    pub const fn steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    /// Set the average heart rate
    #[must_use]
    pub const fn heart_rate_bpm(mut self, bpm: u32) -> Self {
        self.heart_rate_bpm = bpm;
        self
    }

    /// Set the perceived intensity
    #[must_use]
    pub const fn intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set the workout date
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Finish building; validation happens at submission time
    #[must_use]
    pub fn build(self) -> WorkoutRecord {
        WorkoutRecord {
            workout_type: self.workout_type,
            duration_minutes: self.duration_minutes,
            calories: self.calories,
            steps: self.steps,
            heart_rate_bpm: self.heart_rate_bpm,
            intensity: self.intensity,
            date: self.date,
        }
    }
}

/// A fitness goal to reach within a fixed number of days.
///
/// Targets are encrypted on submission; the horizon travels as a plain
/// `uint256`, matching `createFitnessGoal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessGoal {
    /// Goal type label (e.g. "Weekly Steps")
    pub goal_type: String,
    /// Target step count
    pub target_steps: u64,
    /// Target calories burned
    pub target_calories: u64,
    /// Target active minutes
    pub target_duration_minutes: u64,
    /// Goal horizon in days
    pub duration_days: u64,
}

impl FitnessGoal {
    /// Validate every field against its declared range
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.goal_type.trim().is_empty() {
            violations.push(FieldViolation::new("goalType", "goal type is required"));
        }
        if self.target_steps < limits::MIN_GOAL_TARGET {
            violations.push(FieldViolation::new("targetSteps", "must be at least 1"));
        }
        if self.target_calories < limits::MIN_GOAL_TARGET {
            violations.push(FieldViolation::new("targetCalories", "must be at least 1"));
        }
        if self.target_duration_minutes < limits::MIN_GOAL_TARGET {
            violations.push(FieldViolation::new("targetDuration", "must be at least 1"));
        }
        if self.duration_days < limits::MIN_GOAL_DURATION_DAYS {
            violations.push(FieldViolation::new("duration", "must be at least 1 day"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Confidential body metrics for `updateHealthMetrics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Body weight in kilograms
    pub weight_kg: u64,
    /// Height in centimeters
    pub height_cm: u64,
    /// Age in years
    pub age_years: u64,
}

impl HealthMetrics {
    /// Validate every field against its declared range
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.weight_kg == 0 {
            violations.push(FieldViolation::new("weight", "must be at least 1 kg"));
        }
        if self.height_cm == 0 {
            violations.push(FieldViolation::new("height", "must be at least 1 cm"));
        }
        if self.age_years == 0 {
            violations.push(FieldViolation::new("age", "must be at least 1 year"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Decoded result of the contract's `getWorkoutSessionInfo` view call.
///
/// The contract exposes `uint8` mirrors of the logged values; they are
/// decoded as-is, without widening or reinterpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Plaintext workout type as logged
    pub workout_type: String,
    /// Truncated step count mirror
    pub steps: u8,
    /// Truncated calories mirror
    pub calories: u8,
    /// Truncated duration mirror
    pub duration: u8,
    /// Truncated heart rate mirror
    pub heart_rate: u8,
    /// Whether the session is marked complete
    pub is_completed: bool,
    /// Account that logged the session
    pub user: Address,
    /// Block timestamp of the log
    pub timestamp: u64,
}

/// Derived lifecycle of a single outstanding transaction.
///
/// Never stored — each status is computed from the wallet capability's
/// asynchronous lifecycle and tied 1:1 to one transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// No transaction in flight
    #[default]
    Idle,
    /// Dispatched to the wallet, awaiting broadcast
    Pending,
    /// Broadcast, polling for a receipt
    Confirming,
    /// Receipt arrived with success status
    Confirmed,
    /// Receipt arrived with revert status, or the wait was exceeded
    Failed(String),
}

impl SubmissionStatus {
    /// Whether this status ends the lifecycle
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed(_))
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Pending => f.write_str("pending"),
            Self::Confirming => f.write_str("confirming"),
            Self::Confirmed => f.write_str("confirmed"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}
