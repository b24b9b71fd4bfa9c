//! Read-only review of the voter record and the candidate list.
//!
//! Both are fixed data; eligibility always reads as eligible.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoterProfile {
    pub name: &'static str,
    pub age: u32,
    pub eligible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: u32,
    pub name: &'static str,
    pub age: u32,
    pub party: &'static str,
    pub eligible: bool,
}

pub const VOTER_PROFILE: VoterProfile = VoterProfile {
    name: "Rahul Sharma",
    age: 32,
    eligible: true,
};

pub const CANDIDATES: &[Candidate] = &[
    Candidate { id: 1, name: "Jane Smith", age: 42, party: "Progressive Party", eligible: true },
    Candidate { id: 2, name: "John Reynolds", age: 53, party: "Conservative Alliance", eligible: true },
    Candidate { id: 3, name: "Amira Khan", age: 38, party: "Green Future", eligible: true },
    Candidate { id: 4, name: "Robert Chen", age: 47, party: "People's Coalition", eligible: true },
    Candidate { id: 5, name: "Sarah Johnson", age: 36, party: "Liberty Union", eligible: true },
];

/// The review step has nothing to fill in; its gate is always open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewStep;

impl ReviewStep {
    pub fn voter(&self) -> &'static VoterProfile {
        &VOTER_PROFILE
    }

    pub fn candidates(&self) -> &'static [Candidate] {
        CANDIDATES
    }

    pub fn is_valid(&self) -> bool {
        true
    }
}
