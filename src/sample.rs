//! Static demo dataset.
//!
//! Shown under the news panel at all times so the dashboard still has
//! something to look at when the live feed is unavailable.  Edit the table
//! below to change it.

use ratatui::style::Color;

/// Votes counted for one party in one constituency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstituencyResult {
    pub constituency: &'static str,
    pub party: &'static str,
    pub votes: u64,
}

pub const SAMPLE_RESULTS: [ConstituencyResult; 4] = [
    ConstituencyResult {
        constituency: "Patna Sahib",
        party: "BJP",
        votes: 55_000,
    },
    ConstituencyResult {
        constituency: "Raghopur",
        party: "RJD",
        votes: 63_000,
    },
    ConstituencyResult {
        constituency: "Nalanda",
        party: "JD(U)",
        votes: 58_000,
    },
    ConstituencyResult {
        constituency: "Gaya Town",
        party: "INC",
        votes: 47_000,
    },
];

/// Bar / label colour for a party.
pub fn party_color(party: &str) -> Color {
    match party {
        "BJP" => Color::LightRed,
        "RJD" => Color::Green,
        "JD(U)" => Color::LightBlue,
        "INC" => Color::Cyan,
        _ => Color::Gray,
    }
}

/// The row with the most votes.
pub fn leader(results: &[ConstituencyResult]) -> Option<&ConstituencyResult> {
    results.iter().max_by_key(|r| r.votes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_is_highest_vote_count() {
        let top = leader(&SAMPLE_RESULTS).unwrap();
        assert_eq!(top.constituency, "Raghopur");
        assert_eq!(top.votes, 63_000);
    }

    #[test]
    fn leader_of_nothing_is_none() {
        assert!(leader(&[]).is_none());
    }

    #[test]
    fn known_parties_have_distinct_colours() {
        let colours: Vec<Color> = SAMPLE_RESULTS.iter().map(|r| party_color(r.party)).collect();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(party_color("IND"), Color::Gray);
    }
}
