//! Text record codec.
//!
//! One record per key, fields separated by whitespace, commas or semicolons:
//! - `time value`: automatic key in the implicit mode (`SmoothClamped` by default)
//! - `time value Mode`: automatic key in the named mode; manual names fall
//!   back to the implicit mode
//! - `time value inTangent outTangent`: `ManualDissociated` key
//!
//! A curve loaded from records has auto tangents on if any record left its
//! tangents implicit. Malformed records are logged and skipped.

use crate::config::Config;
use crate::curve::Curve;
use crate::error::RecordError;
use crate::key::{Key, TangentMode};
use crate::scalar::CurveFloat;
use crate::store::sorted_unique;

/// A successfully parsed record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedRecord<F> {
    pub key: Key<F>,
    /// The record carried both tangents (4-field form).
    pub explicit_tangents: bool,
}

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ';'
}

fn number<F: CurveFloat>(fields: &[&str], index: usize) -> Result<F, RecordError> {
    fields[index]
        .parse::<f64>()
        .map(F::from_f64)
        .map_err(|_| RecordError::InvalidNumber {
            index,
            text: fields[index].to_string(),
        })
}

/// Parse one record. `implicit_mode` is used for 2-field records and as the
/// substitute for manual mode names.
pub fn parse_record<F: CurveFloat>(
    record: &str,
    implicit_mode: TangentMode,
) -> Result<ParsedRecord<F>, RecordError> {
    let fields: Vec<&str> = record.split(is_separator).filter(|f| !f.is_empty()).collect();
    if fields.is_empty() {
        return Err(RecordError::Empty);
    }
    if !(2..=4).contains(&fields.len()) {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    }

    let time = number(&fields, 0)?;
    let value = number(&fields, 1)?;
    match fields.len() {
        2 => Ok(ParsedRecord {
            key: Key::with_mode(time, value, implicit_mode),
            explicit_tangents: false,
        }),
        3 => {
            let mode: TangentMode =
                fields[2]
                    .parse()
                    .map_err(|_| RecordError::UnknownTangentMode {
                        name: fields[2].to_string(),
                    })?;
            let mode = if mode.is_manual() { implicit_mode } else { mode };
            Ok(ParsedRecord {
                key: Key::with_mode(time, value, mode),
                explicit_tangents: false,
            })
        }
        _ => Ok(ParsedRecord {
            key: Key::with_tangents(time, value, number(&fields, 2)?, number(&fields, 3)?),
            explicit_tangents: true,
        }),
    }
}

/// Format one key. Automatic keys of an auto-tangent curve drop their
/// tangents, and their mode too when it is the implicit one.
pub fn format_key<F: CurveFloat>(
    key: &Key<F>,
    auto_tangents: bool,
    implicit_mode: TangentMode,
) -> String {
    if auto_tangents && key.tangent_mode.is_automatic() {
        if key.tangent_mode == implicit_mode {
            format!("{} {}", key.time, key.value)
        } else {
            format!("{} {} {}", key.time, key.value, key.tangent_mode)
        }
    } else {
        format!(
            "{} {} {} {}",
            key.time, key.value, key.in_tangent, key.out_tangent
        )
    }
}

impl<F: CurveFloat> Curve<F> {
    /// Build a curve from text records with the default [`Config`].
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_records_with_config(records, &Config::default())
    }

    pub fn from_records_with_config<I, S>(records: I, config: &Config) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys = Vec::with_capacity(config.initial_capacity);
        let mut auto_tangents = false;
        for (index, record) in records.into_iter().enumerate() {
            let record = record.as_ref();
            match parse_record(record, config.implicit_mode) {
                Ok(parsed) => {
                    auto_tangents |= !parsed.explicit_tangents;
                    keys.push(parsed.key);
                }
                Err(err) => log::warn!("skipping curve record {index} '{record}': {err}"),
            }
        }
        let (keys, dropped) = sorted_unique(keys);
        if dropped > 0 {
            log::warn!("dropped {dropped} curve records with duplicate or non-finite times");
        }
        Self::from_sorted(keys, auto_tangents)
    }

    /// One record per line. Blank lines and `//` comments are ignored.
    pub fn from_text(text: &str) -> Self {
        Self::from_records(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with("//")),
        )
    }

    /// Records for every key, in time order, using the default [`Config`].
    pub fn to_records(&self) -> Vec<String> {
        self.to_records_with_config(&Config::default())
    }

    pub fn to_records_with_config(&self, config: &Config) -> Vec<String> {
        self.keys
            .iter()
            .map(|key| format_key(key, self.auto_tangents, config.implicit_mode))
            .collect()
    }

    pub fn to_text(&self) -> String {
        self.to_records().join("\n")
    }
}
