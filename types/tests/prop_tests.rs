use proptest::prelude::*;

use moo_types::{AccountAddress, TxHash};

proptest! {
    /// Display output always parses back to the same address.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let addr = AccountAddress::new(bytes);
        let parsed: AccountAddress = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Stripping leading zero digits never changes the parsed address.
    #[test]
    fn address_short_form_is_equivalent(bytes in prop::array::uniform32(0u8..)) {
        let addr = AccountAddress::new(bytes);
        let full = addr.to_string();
        let trimmed = full.trim_start_matches("0x").trim_start_matches('0');
        let short = if trimmed.is_empty() { "0x0".to_string() } else { format!("0x{trimmed}") };
        let parsed: AccountAddress = short.parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Arbitrary strings never panic the parser.
    #[test]
    fn address_parser_total(s in ".{0,80}") {
        let _ = s.parse::<AccountAddress>();
    }

    /// Transaction hashes keep their full width through text form.
    #[test]
    fn tx_hash_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let parsed: TxHash = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }
}
