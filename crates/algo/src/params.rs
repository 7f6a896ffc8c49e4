//! Parameter surface and live configuration
//!
//! The host supplies string-keyed parameters at start and on modify
//! requests. `ParamMap` is the typed get-with-default accessor over that
//! map; `ScheduleConfig` holds the validated, applied values. A failed
//! apply leaves the previous configuration untouched.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use tempo_core::{PositionEffect, Price, Quantity, Security, Side, Timestamp};

use crate::error::{AlgoError, Result};
use crate::pricer::Aggression;
use crate::schedule::tilt_from_input;

/// Recognized parameter keys
pub mod keys {
    pub const VALID_SECONDS: &str = "ValidSeconds";
    pub const PRICE: &str = "Price";
    pub const MIN_SIZE: &str = "MinSize";
    pub const MAX_FLOOR: &str = "MaxFloor";
    pub const MAX_POV: &str = "MaxPov";
    pub const AGGRESSION: &str = "Aggression";
    pub const RANDOMIZE: &str = "Randomize";
    pub const TILT: &str = "Tilt";
    pub const INTERNAL_CROSS: &str = "InternalCross";
}

/// A single typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(Decimal),
    Integer(i64),
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<Decimal> for ParamValue {
    fn from(v: Decimal) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

/// String-keyed parameter map with typed accessors
///
/// Accessors return `None` when the key is absent, so callers can
/// distinguish "not supplied" from "supplied with a default-looking value".
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    entries: HashMap<String, ParamValue>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert, convenient in tests
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        match self.entries.get(key)? {
            ParamValue::Number(v) => Some(*v),
            ParamValue::Integer(v) => Some(Decimal::from(*v)),
            ParamValue::Text(_) => None,
        }
    }

    pub fn decimal_or(&self, key: &str, default: Decimal) -> Decimal {
        self.decimal(key).unwrap_or(default)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            ParamValue::Integer(v) => Some(*v),
            ParamValue::Number(v) => v.to_i64(),
            ParamValue::Text(_) => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            ParamValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Published definition of one recognized parameter
#[derive(Debug, Clone, Copy)]
pub struct ParamDef {
    pub name: &'static str,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// The parameter contract this algorithm publishes to the host.
/// Range enforcement is the host framework's job; the defs document it.
pub fn param_defs() -> &'static [ParamDef] {
    const DEFS: &[ParamDef] = &[
        ParamDef {
            name: keys::VALID_SECONDS,
            required: true,
            min: Some(60.0),
            max: None,
        },
        ParamDef {
            name: keys::PRICE,
            required: false,
            min: None,
            max: None,
        },
        ParamDef {
            name: keys::MIN_SIZE,
            required: false,
            min: Some(0.0),
            max: None,
        },
        ParamDef {
            name: keys::MAX_FLOOR,
            required: false,
            min: Some(0.0),
            max: None,
        },
        ParamDef {
            name: keys::MAX_POV,
            required: false,
            min: Some(0.0),
            max: Some(1.0),
        },
        ParamDef {
            name: keys::AGGRESSION,
            required: false,
            min: None,
            max: None,
        },
        ParamDef {
            name: keys::RANDOMIZE,
            required: false,
            min: Some(0.0),
            max: Some(10.0),
        },
        ParamDef {
            name: keys::TILT,
            required: false,
            min: Some(-10.0),
            max: Some(10.0),
        },
        ParamDef {
            name: keys::INTERNAL_CROSS,
            required: false,
            min: None,
            max: None,
        },
    ];
    DEFS
}

/// The parent order this instance works. Immutable after start.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub security: Security,
    pub side: Side,
    pub quantity: Quantity,
    pub sub_account: String,
    pub position_effect: PositionEffect,
    /// Market-data source/venue to subscribe on
    pub source: String,
}

/// Execution window, fixed at start
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Minimum execution window length in seconds
pub const MIN_WINDOW_SECS: i64 = 60;

impl TimeWindow {
    pub fn from_valid_seconds(now: Timestamp, seconds: i64) -> Result<Self> {
        if seconds < MIN_WINDOW_SECS {
            return Err(AlgoError::WindowTooShort { seconds });
        }
        Ok(Self {
            start: now,
            end: now + chrono::Duration::seconds(seconds),
        })
    }

    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn expired(&self, now: Timestamp) -> bool {
        now > self.end
    }
}

/// Live execution parameters, updated through `apply`
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Limit bound for child prices; None = unbounded
    pub limit_price: Option<Price>,
    /// Floor on child order size; ZERO = unset
    pub min_size: Quantity,
    /// Ceiling on child order size; ZERO = disabled
    pub max_floor: Quantity,
    /// Participation-of-volume cap in [0, 1]; ZERO = disabled
    pub max_pov: Decimal,
    pub aggression: Aggression,
    /// Schedule noise amplitude, 0-10, scaled to +/-1% per unit
    pub randomize: f64,
    /// Pacing exponent; 1 = linear schedule
    pub tilt: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            limit_price: None,
            min_size: Decimal::ZERO,
            max_floor: Decimal::ZERO,
            max_pov: Decimal::ZERO,
            aggression: Aggression::Low,
            randomize: 0.0,
            tilt: 1.0,
        }
    }
}

impl ScheduleConfig {
    /// Apply any subset of recognized parameters, returning the updated
    /// configuration. Validates into a copy so the caller's config is
    /// untouched when a parameter is rejected.
    pub fn apply(&self, params: &ParamMap, security: &Security) -> Result<ScheduleConfig> {
        let mut next = self.clone();

        if let Some(price) = params.decimal(keys::PRICE) {
            next.limit_price = (price > Decimal::ZERO).then(|| security.round_price(price));
        }

        if let Some(min_size) = params.decimal(keys::MIN_SIZE) {
            next.min_size = if min_size > Decimal::ZERO {
                security.round_lot_nearest(min_size)
            } else {
                Decimal::ZERO
            };
        }

        if let Some(max_floor) = params.decimal(keys::MAX_FLOOR) {
            next.max_floor = if max_floor > Decimal::ZERO {
                security.round_lot_down(max_floor)
            } else {
                Decimal::ZERO
            };
        }
        // A ceiling below the minimum child size can never bind
        if next.min_size > Decimal::ZERO
            && next.max_floor > Decimal::ZERO
            && next.max_floor < next.min_size
        {
            next.max_floor = Decimal::ZERO;
        }

        if let Some(max_pov) = params.decimal(keys::MAX_POV) {
            next.max_pov = max_pov.clamp(Decimal::ZERO, Decimal::ONE);
        }

        if let Some(token) = params.text(keys::AGGRESSION) {
            next.aggression = token.parse()?;
        }

        if let Some(randomize) = params.decimal(keys::RANDOMIZE) {
            next.randomize = randomize.to_f64().unwrap_or(0.0);
        }

        if let Some(tilt) = params.decimal(keys::TILT) {
            next.tilt = tilt_from_input(tilt.to_f64().unwrap_or(0.0));
        }

        Ok(next)
    }
}
