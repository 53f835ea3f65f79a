//! String-to-value conversions shared by the command parsers.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::errors::ParseError;
use crate::ledger::money::MESSAGE_AMOUNT_CONSTRAINTS;
use crate::ledger::Money;
use crate::loan::fields::{
    tag_set, MESSAGE_NAME_CONSTRAINTS, MESSAGE_PHONE_CONSTRAINTS, MESSAGE_TAG_CONSTRAINTS,
};
use crate::loan::{Index, Name, Phone, Tag};

pub const MESSAGE_POSITIVE_AMOUNT: &str = "Amount should be greater than 0.00";
pub const MESSAGE_DATE_CONSTRAINTS: &str = "Dates should be in the format YYYY-MM-DD";

/// Parses a one-based index. Zero, negatives and non-numbers all fail.
pub fn parse_index(input: &str) -> Result<Index, ParseError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

/// Parses the preamble of an index-addressed command. Something that is not a
/// number at all is a format problem; a number out of range is an index problem.
pub fn parse_target_index(preamble: &str, usage: &'static str) -> Result<Index, ParseError> {
    let trimmed = preamble.trim();
    if trimmed.parse::<i64>().is_err() {
        return Err(ParseError::InvalidFormat { usage });
    }
    parse_index(trimmed)
}

pub fn parse_name(input: &str) -> Result<Name, ParseError> {
    Name::parse(input.trim()).ok_or(ParseError::InvalidValue(MESSAGE_NAME_CONSTRAINTS))
}

pub fn parse_phone(input: &str) -> Result<Phone, ParseError> {
    Phone::parse(input.trim()).ok_or(ParseError::InvalidValue(MESSAGE_PHONE_CONSTRAINTS))
}

pub fn parse_amount(input: &str) -> Result<Money, ParseError> {
    Money::parse(input).ok_or(ParseError::InvalidValue(MESSAGE_AMOUNT_CONSTRAINTS))
}

/// Like `parse_amount`, but zero is rejected too.
pub fn parse_positive_amount(input: &str) -> Result<Money, ParseError> {
    let amount = parse_amount(input)?;
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(ParseError::InvalidValue(MESSAGE_POSITIVE_AMOUNT))
    }
}

pub fn parse_tag(input: &str) -> Result<Tag, ParseError> {
    Tag::parse(input).ok_or(ParseError::InvalidValue(MESSAGE_TAG_CONSTRAINTS))
}

pub fn parse_tags<S: AsRef<str>>(inputs: &[S]) -> Result<BTreeSet<Tag>, ParseError> {
    let tags = inputs
        .iter()
        .map(|tag| parse_tag(tag.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tag_set(tags))
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidValue(MESSAGE_DATE_CONSTRAINTS))
}

/// Parses an optional date argument, falling back to today.
pub fn parse_date_or_today(input: Option<&str>) -> Result<NaiveDate, ParseError> {
    match input {
        Some(value) => parse_date(value),
        None => Ok(Local::now().date_naive()),
    }
}
