//! Party list and the single-choice ballot.

use super::ValidationError;

/// Identifier of a party on the ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartyId(pub u32);

/// Display colour of a party's logo badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Party {
    pub id: PartyId,
    pub name: &'static str,
    /// Initials drawn in the logo badge.
    pub logo: &'static str,
    pub color: PartyColor,
    pub manifesto_link: &'static str,
}

pub const PARTIES: &[Party] = &[
    Party { id: PartyId(1), name: "Progressive Party", logo: "P", color: PartyColor::Blue, manifesto_link: "#" },
    Party { id: PartyId(2), name: "Conservative Alliance", logo: "C", color: PartyColor::Red, manifesto_link: "#" },
    Party { id: PartyId(3), name: "Green Future", logo: "G", color: PartyColor::Green, manifesto_link: "#" },
    Party { id: PartyId(4), name: "People's Coalition", logo: "PC", color: PartyColor::Yellow, manifesto_link: "#" },
    Party { id: PartyId(5), name: "Liberty Union", logo: "LU", color: PartyColor::Purple, manifesto_link: "#" },
];

pub fn party(id: PartyId) -> Option<&'static Party> {
    PARTIES.iter().find(|p| p.id == id)
}

/// Single-select ballot. A new selection replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct Ballot {
    selected: Option<PartyId>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a party. Unknown ids are ignored.
    pub fn select(&mut self, id: PartyId) -> bool {
        if party(id).is_none() {
            log::warn!("Ignoring selection of unknown party {id:?}");
            return false;
        }
        if let Some(previous) = self.selected.replace(id) {
            if previous != id {
                log::debug!("Ballot selection changed {previous:?} -> {id:?}");
            }
        }
        true
    }

    pub fn selected(&self) -> Option<PartyId> {
        self.selected
    }

    pub fn selected_party(&self) -> Option<&'static Party> {
        self.selected.and_then(party)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.selected {
            Some(_) => Ok(()),
            None => Err(ValidationError::NoSelection),
        }
    }
}
