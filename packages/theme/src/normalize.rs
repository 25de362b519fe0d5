//! Locality name normalization.
//!
//! Applied symmetrically to locality rows and boundary features before any
//! comparison, so that "SÃO PAULO", "São Paulo", and " são paulo " all
//! produce the same join key.

/// Normalizes a locality name into a join key.
///
/// Trims surrounding whitespace and lowercases using Unicode case mapping,
/// which does not depend on the process locale. Accented letters keep their
/// accents ("Ã" becomes "ã", never "a").
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii() {
        assert_eq!(normalize("CAMPINAS"), "campinas");
    }

    #[test]
    fn folds_accented_uppercase() {
        assert_eq!(normalize("SÃO PAULO"), "são paulo");
        assert_eq!(normalize("São Paulo"), "são paulo");
        assert_eq!(normalize("RIBEIRÃO PRETO"), "ribeirão preto");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("  são paulo \t"), "são paulo");
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(normalize("Mogi  das Cruzes"), "mogi  das cruzes");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
