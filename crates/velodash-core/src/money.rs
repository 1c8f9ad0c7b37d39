//! Currency formatting helpers.
//!
//! All amounts are whole CFA francs: integer grouping with a space
//! separator (French convention), no decimals, literal "FCFA" suffix.

/// Group an integer amount with thousands separators: `18000` → `"18 000"`.
pub fn format_grouped(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }

    out
}

/// Full currency rendering: `500` → `"500 FCFA"`.
pub fn format_fcfa(amount: u64) -> String {
    format!("{} FCFA", format_grouped(amount))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(500), "500");
        assert_eq!(format_grouped(1_000), "1 000");
        assert_eq!(format_grouped(18_000), "18 000");
        assert_eq!(format_grouped(1_234_567), "1 234 567");
    }

    #[test]
    fn appends_currency_suffix() {
        assert_eq!(format_fcfa(500), "500 FCFA");
        assert_eq!(format_fcfa(60_000), "60 000 FCFA");
    }
}
