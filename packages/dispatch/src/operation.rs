use std::fmt;
use std::str::FromStr;

use crate::DispatchError;

/// Every operation a dispatcher can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    AddDonation,
    ReadDonation,
    ReadMultipleDonations,
    IsPresent,
    GetHistoryForDonation,
    UpdateDonation,
    RemoveDonation,
    ReadDonationRange,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::AddDonation,
        Operation::ReadDonation,
        Operation::ReadMultipleDonations,
        Operation::IsPresent,
        Operation::GetHistoryForDonation,
        Operation::UpdateDonation,
        Operation::RemoveDonation,
        Operation::ReadDonationRange,
    ];

    /// Function name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Operation::AddDonation => "addDonation",
            Operation::ReadDonation => "readDonation",
            Operation::ReadMultipleDonations => "readMultipleDonations",
            Operation::IsPresent => "isPresent",
            Operation::GetHistoryForDonation => "getHistoryForDonation",
            Operation::UpdateDonation => "updateDonation",
            Operation::RemoveDonation => "removeDonation",
            Operation::ReadDonationRange => "readDonationRange",
        }
    }

    /// Case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Whether the operation may write to the store.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Operation::AddDonation | Operation::UpdateDonation | Operation::RemoveDonation
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DispatchError::MethodNotFound {
            name: s.to_string(),
        })
    }
}
