//! Small helpers shared by the plot builders.

/// Axis/row label of a component: `PC1`, `PC2`, ...
pub fn component_label(index: usize) -> String {
    format!("PC{}", index + 1)
}

/// Label with the explained variance percentage, e.g. `PC1 (42.5%)`.
pub(crate) fn component_axis_label(index: usize, ratio: f64) -> String {
    format!("{} ({:.1}%)", component_label(index), ratio * 100.0)
}

/// Indices of `values` sorted by value, largest first. Ties keep index order.
pub(crate) fn rank_descending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labels() {
        assert_eq!(component_label(0), "PC1");
        assert_eq!(component_axis_label(1, 0.2049), "PC2 (20.5%)");
    }

    #[test]
    fn test_rank_is_stable() {
        assert_eq!(rank_descending(&[1.0, 3.0, 1.0, 3.0]), vec![1, 3, 0, 2]);
        assert!(rank_descending(&[]).is_empty());
    }
}
