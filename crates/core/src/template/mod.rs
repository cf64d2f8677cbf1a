//! The school grant budget template.
//!
//! Every tenant's budget for a financial year has exactly one line per slot
//! below. Slots never change meaning, so they double as the stable key that
//! ties a budget line back to its program, activity, and vote code.

pub mod slots;


pub use slots::TEMPLATE;

use serde::Serialize;

/// Number of lines in every budget.
pub const SLOT_COUNT: usize = 42;

/// One fixed line of the budget template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSlot {
    /// Position in the template, 1 through 42.
    pub slot: u16,
    /// Program of work number.
    pub program_no: u16,
    /// Program of work name.
    pub program_name: &'static str,
    /// Sub-activity within the program.
    pub sub_activity: &'static str,
    /// Sub-item description shown on vouchers.
    pub description: &'static str,
    /// Government vote code.
    pub code: &'static str,
}

impl TemplateSlot {
    /// The item key used by credits and debits, e.g. `pow1_row1`.
    #[must_use]
    pub fn item_key(&self) -> String {
        format!("pow{}_row{}", self.program_no, self.slot)
    }
}

/// Looks up a slot by its 1-based number.
#[must_use]
pub fn by_slot(slot: u16) -> Option<&'static TemplateSlot> {
    let index = usize::from(slot).checked_sub(1)?;
    TEMPLATE.get(index)
}

/// Looks up a slot by its item key.
#[must_use]
pub fn by_item_key(key: &str) -> Option<&'static TemplateSlot> {
    let (program, slot) = key.trim().strip_prefix("pow")?.split_once("_row")?;
    let program: u16 = program.parse().ok()?;
    let found = by_slot(slot.parse().ok()?)?;
    (found.program_no == program).then_some(found)
}
