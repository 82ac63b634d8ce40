// ============================================================
// Layer 3 — Label Binarization
// ============================================================
// The transfer task asks a yes/no question of every digit:
// "is it greater than 5?". Digits 6..=9 become class 1,
// digits 0..=5 become class 0.

/// Threshold above which a digit counts as class 1
pub const THRESHOLD: u8 = 5;

/// 1 if `label > 5`, else 0.
pub fn greater_than_five(label: u8) -> u8 {
    u8::from(label > THRESHOLD)
}

/// Apply [`greater_than_five`] to every label of one sequence.
pub fn binarize_labels(labels: &[u8]) -> Vec<u8> {
    labels.iter().copied().map(greater_than_five).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_examples() {
        assert_eq!(binarize_labels(&[0, 1, 5, 6, 9]), vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_every_label_value() {
        for label in 0..=u8::MAX {
            let expected = if label > 5 { 1 } else { 0 };
            assert_eq!(greater_than_five(label), expected, "label {label}");
        }
    }

    #[test]
    fn test_sequences_are_independent() {
        let train = binarize_labels(&[9, 2]);
        let valid = binarize_labels(&[]);
        let test  = binarize_labels(&[6, 6, 5]);
        assert_eq!(train, vec![1, 0]);
        assert!(valid.is_empty());
        assert_eq!(test, vec![1, 1, 0]);
    }
}
