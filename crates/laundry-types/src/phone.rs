//! Phone number normalization at the order-creation boundary.
//!
//! The client-side convention prepends a fixed country-code prefix when the
//! entered number does not already start with it. This runs only when an
//! order is created; transition requests reuse the phone exactly as the
//! client last saw it.

/// Prepends `prefix` to `raw` unless the number already starts with it.
///
/// A number entered with a different country code is left untouched, and a
/// bare local number gets the prefix even when it contains separators. This
/// mirrors the intake convention, warts included.
pub fn normalize_phone(prefix: &str, raw: &str) -> String {
	if raw.starts_with(prefix) {
		raw.to_string()
	} else {
		format!("{}{}", prefix, raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bare_number_gets_prefix() {
		assert_eq!(normalize_phone("+91", "9876543210"), "+919876543210");
	}

	#[test]
	fn prefixed_number_is_untouched() {
		assert_eq!(normalize_phone("+91", "+919876543210"), "+919876543210");
	}

	#[test]
	fn foreign_prefix_is_stacked_not_replaced() {
		// Known edge case of the convention: a number with a different
		// country code still gets the fixed prefix prepended.
		assert_eq!(normalize_phone("+91", "+449876543210"), "+91+449876543210");
	}

	#[test]
	fn separators_are_preserved() {
		assert_eq!(normalize_phone("+91", "98765 43210"), "+9198765 43210");
	}
}
