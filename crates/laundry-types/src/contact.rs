//! Contact candidates produced by the intake flow.
//!
//! A candidate is not an order: it is the transient (name, phones) pair the
//! intake screen resolves from free-text entry or an address-book source
//! before submitting an order to the store.

use serde::{Deserialize, Serialize};

/// A potential customer resolved from an address-book source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCandidate {
	/// Display name of the contact.
	pub name: String,
	/// Zero or more phone numbers; the first one is offered to intake.
	#[serde(default)]
	pub phones: Vec<String>,
}

impl ContactCandidate {
	/// Returns the contact's first phone number, if it has any.
	pub fn primary_phone(&self) -> Option<&str> {
		self.phones.first().map(String::as_str)
	}
}

/// Filters candidates whose name contains `query`, case-insensitively.
///
/// An empty query matches everything, which is how the picker shows the full
/// list before the user types.
pub fn search_candidates<'a>(
	candidates: &'a [ContactCandidate],
	query: &str,
) -> Vec<&'a ContactCandidate> {
	let needle = query.to_lowercase();
	candidates
		.iter()
		.filter(|c| c.name.to_lowercase().contains(&needle))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidates() -> Vec<ContactCandidate> {
		vec![
			ContactCandidate {
				name: "Asha Rao".into(),
				phones: vec!["+911111111111".into()],
			},
			ContactCandidate {
				name: "Bharath".into(),
				phones: vec![],
			},
			ContactCandidate {
				name: "rashmi".into(),
				phones: vec!["+912222222222".into(), "+913333333333".into()],
			},
		]
	}

	#[test]
	fn search_is_case_insensitive_substring() {
		let all = candidates();
		let hits = search_candidates(&all, "RA");
		let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, vec!["Asha Rao", "Bharath", "rashmi"]);

		let hits = search_candidates(&all, "ash");
		let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, vec!["Asha Rao", "rashmi"]);
	}

	#[test]
	fn empty_query_matches_everything() {
		let all = candidates();
		assert_eq!(search_candidates(&all, "").len(), 3);
	}

	#[test]
	fn primary_phone_is_first_or_none() {
		let all = candidates();
		assert_eq!(all[0].primary_phone(), Some("+911111111111"));
		assert_eq!(all[1].primary_phone(), None);
		assert_eq!(all[2].primary_phone(), Some("+912222222222"));
	}
}
