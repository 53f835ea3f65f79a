//! Field edits: `tag`, `rename`, `phone` and the combined `edit`.

use std::collections::BTreeSet;

use tracing::info;

use crate::errors::{CommandError, ParseError};
use crate::loan::{Index, Loan, Model, Name, Phone, Tag};
use crate::parser::syntax::{PREFIX_NAME, PREFIX_PHONE, PREFIX_TAG};
use crate::parser::{tokenize, values, ArgumentMap, CommandEntry};

use super::{Command, CommandOutcome, CommandResult};

pub const TAG_USAGE: &str = "tag: Replaces the tags of the loan identified by the index number used in the displayed loan list.\n\
An empty t/ removes every tag.\n\
Parameters: INDEX (must be a positive integer) t/TAG [t/TAG]...\n\
Example: tag 1 t/friends t/owesMe";

pub const RENAME_USAGE: &str = "rename: Renames the loan identified by the index number used in the displayed loan list.\n\
Parameters: INDEX (must be a positive integer) n/NAME\n\
Example: rename 1 n/John Doe";

pub const PHONE_USAGE: &str = "phone: Changes the phone number of the loan identified by the index number used in the displayed loan list.\n\
An empty p/ removes the phone number.\n\
Parameters: INDEX (must be a positive integer) p/PHONE\n\
Example: phone 1 p/91234567";

pub const EDIT_USAGE: &str = "edit: Edits the details of the loan identified by the index number used in the displayed loan list.\n\
Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [t/TAG]...\n\
Example: edit 1 p/91234567 t/family";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("tag", "Replace a loan's tags", TAG_USAGE, parse_tag),
        CommandEntry::new("rename", "Rename a loan", RENAME_USAGE, parse_rename),
        CommandEntry::new("phone", "Change a loan's phone number", PHONE_USAGE, parse_phone),
        CommandEntry::new("edit", "Edit several fields at once", EDIT_USAGE, parse_edit)
            .gated("edit"),
    ]
}

/// Fields to overwrite; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLoanDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditLoanDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some() || self.phone.is_some() || self.tags.is_some()
    }

    /// Builds the edited copy of `loan`. Amount and history are never touched.
    pub fn apply(&self, loan: &Loan) -> Loan {
        let mut edited = loan.clone();
        if let Some(name) = &self.name {
            edited = edited.with_name(name.clone());
        }
        if let Some(phone) = &self.phone {
            edited = edited.with_phone(phone.clone());
        }
        if let Some(tags) = &self.tags {
            edited = edited.with_tags(tags.clone());
        }
        edited
    }
}

/// Which command word produced the edit; only the feedback differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Tag,
    Rename,
    Phone,
    Edit,
}

impl EditKind {
    fn feedback(self, loan: &Loan) -> String {
        match self {
            EditKind::Tag => format!("Tags updated: {loan}"),
            EditKind::Rename => format!("Loan renamed: {loan}"),
            EditKind::Phone => format!("Phone number updated: {loan}"),
            EditKind::Edit => format!("Edited Loan: {loan}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    target: Index,
    descriptor: EditLoanDescriptor,
    kind: EditKind,
}

impl EditCommand {
    pub fn new(target: Index, descriptor: EditLoanDescriptor, kind: EditKind) -> Self {
        Self {
            target,
            descriptor,
            kind,
        }
    }

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NotEdited);
        }
        let (id, current) = model.resolve(self.target)?;
        let edited = self.descriptor.apply(current);
        let feedback = self.kind.feedback(&edited);
        model.set_loan(id, edited)?;
        info!(kind = ?self.kind, index = %self.target, "loan edited");
        Ok(CommandOutcome::new(feedback))
    }
}

/// A lone empty `t/` clears the tags; otherwise every value must be a valid tag.
fn parse_tags_for_edit(map: &ArgumentMap) -> Result<Option<BTreeSet<Tag>>, ParseError> {
    match map.all_values(PREFIX_TAG) {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        tags => values::parse_tags(tags).map(Some),
    }
}

fn parse_tag(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_TAG]);
    if !map.is_present(PREFIX_TAG) {
        return Err(ParseError::InvalidFormat { usage: TAG_USAGE });
    }
    let target = values::parse_target_index(map.preamble(), TAG_USAGE)?;
    let descriptor = EditLoanDescriptor {
        tags: parse_tags_for_edit(&map)?,
        ..EditLoanDescriptor::default()
    };
    Ok(Command::Edit(EditCommand::new(target, descriptor, EditKind::Tag)))
}

fn parse_rename(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_NAME]);
    let Some(name) = map.value(PREFIX_NAME) else {
        return Err(ParseError::InvalidFormat { usage: RENAME_USAGE });
    };
    let target = values::parse_target_index(map.preamble(), RENAME_USAGE)?;
    map.verify_no_duplicate_prefixes_for(&[PREFIX_NAME])?;
    let descriptor = EditLoanDescriptor {
        name: Some(values::parse_name(name)?),
        ..EditLoanDescriptor::default()
    };
    Ok(Command::Edit(EditCommand::new(target, descriptor, EditKind::Rename)))
}

fn parse_phone(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_PHONE]);
    let Some(phone) = map.value(PREFIX_PHONE) else {
        return Err(ParseError::InvalidFormat { usage: PHONE_USAGE });
    };
    let target = values::parse_target_index(map.preamble(), PHONE_USAGE)?;
    map.verify_no_duplicate_prefixes_for(&[PREFIX_PHONE])?;
    let descriptor = EditLoanDescriptor {
        phone: Some(values::parse_phone(phone)?),
        ..EditLoanDescriptor::default()
    };
    Ok(Command::Edit(EditCommand::new(target, descriptor, EditKind::Phone)))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_TAG]);
    let target = values::parse_target_index(map.preamble(), EDIT_USAGE)?;
    map.verify_no_duplicate_prefixes_for(&[PREFIX_NAME, PREFIX_PHONE])?;
    let descriptor = EditLoanDescriptor {
        name: map.value(PREFIX_NAME).map(values::parse_name).transpose()?,
        phone: map.value(PREFIX_PHONE).map(values::parse_phone).transpose()?,
        tags: parse_tags_for_edit(&map)?,
    };
    Ok(Command::Edit(EditCommand::new(target, descriptor, EditKind::Edit)))
}
