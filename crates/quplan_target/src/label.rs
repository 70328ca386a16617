//! Target label grammar
//!
//! Gantree: L4_Target → Label
//!
//! | Kind          | Form                 | Example  |
//! |---------------|----------------------|----------|
//! | GE            | `<Qubit>`            | `Q08`    |
//! | EF            | `<Qubit>-ef`         | `Q08-ef` |
//! | CR (self)     | `<Qubit>-CR`         | `Q08-CR` |
//! | CR (paired)   | `<Control>-<Target>` | `Q08-Q09`|
//! | Readout       | `R<Qubit>`           | `RQ08`   |
//!
//! Any `<Qubit>` followed by `-` or `_` and an alphanumeric suffix is also
//! accepted when parsing.

use once_cell::sync::Lazy;
use quplan_core::{QuplanError, QuplanResult};
use regex::Regex;

/// Forms tried in order; capture group 1 is the qubit label
static LABEL_PATTERNS: Lazy<[Regex; 6]> = Lazy::new(|| {
    [
        r"^R(Q\d+)$",
        r"^(Q\d+)$",
        r"^(Q\d+)-ef$",
        r"^(Q\d+)-CR$",
        r"^(Q\d+)-(Q\d+)$",
        r"^(Q\d+)(-|_)[a-zA-Z0-9]+$",
    ]
    .map(|pattern| Regex::new(pattern).expect("label pattern is valid"))
});

/// Extract the qubit label from any target label
/// Gantree: qubit_label(label) -> String // 큐비트 추출
///
/// For a paired CR label the control qubit is returned.
pub fn qubit_label(label: &str) -> QuplanResult<String> {
    LABEL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(label))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| QuplanError::InvalidLabel(label.to_string()))
}

/// GE target label of the qubit named by `label`
pub fn ge_label(label: &str) -> QuplanResult<String> {
    qubit_label(label)
}

/// EF target label of the qubit named by `label`
pub fn ef_label(label: &str) -> QuplanResult<String> {
    Ok(format!("{}-ef", qubit_label(label)?))
}

/// Self-CR target label of the qubit named by `label`
pub fn cr_label(label: &str) -> QuplanResult<String> {
    Ok(format!("{}-CR", qubit_label(label)?))
}

/// Readout target label of the qubit named by `label`
pub fn read_label(label: &str) -> QuplanResult<String> {
    Ok(format!("R{}", qubit_label(label)?))
}

/// Paired CR label `<Control>-<Target>`
pub fn cr_pair_label(control: &str, target: &str) -> QuplanResult<String> {
    Ok(format!("{}-{}", qubit_label(control)?, qubit_label(target)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_form_round_trips() {
        for produce in [ge_label, ef_label, cr_label, read_label] {
            let label = produce("Q08").unwrap();
            assert_eq!(qubit_label(&label).unwrap(), "Q08", "{}", label);
        }
        assert_eq!(qubit_label(&cr_pair_label("Q08", "Q09").unwrap()).unwrap(), "Q08");
    }

    #[test]
    fn test_produced_forms() {
        assert_eq!(ge_label("RQ08").unwrap(), "Q08");
        assert_eq!(ef_label("Q08").unwrap(), "Q08-ef");
        assert_eq!(cr_label("Q08-ef").unwrap(), "Q08-CR");
        assert_eq!(read_label("Q08-CR").unwrap(), "RQ08");
        assert_eq!(cr_pair_label("Q08", "RQ09").unwrap(), "Q08-Q09");
    }

    #[test]
    fn test_generic_suffix() {
        assert_eq!(qubit_label("Q12-drag").unwrap(), "Q12");
        assert_eq!(qubit_label("Q12_hpi").unwrap(), "Q12");
    }

    #[test]
    fn test_invalid_labels() {
        for label in ["", "q08", "Q", "RQ", "Q08-", "Q08 ", "XQ08", "Q08-ef-x", "R08"] {
            let err = qubit_label(label).unwrap_err();
            assert_eq!(err, QuplanError::InvalidLabel(label.to_string()));
        }
    }
}
