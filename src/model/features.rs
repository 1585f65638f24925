use crate::models::SensorReadings;

/// Expands the eight operator readings into the full vector the model
/// expects, in `expected_columns` order.
///
/// Every column starts at 0.0. A column picks up a reading's value when its
/// name contains the reading key as a substring, so `Iron_Feed` also fills
/// derived columns like `Iron_Feed_Rolling_Mean`. Columns matching no key
/// stay at zero; that is the logging/training convention, not an error.
/// When keys overlap the last assignment wins, with readings visited in
/// their declared order and columns in artifact order.
pub fn build_feature_vector(readings: &SensorReadings, expected_columns: &[String]) -> Vec<f64> {
    let mut vector = vec![0.0; expected_columns.len()];

    for (key, value) in readings.named_values() {
        for (slot, column) in vector.iter_mut().zip(expected_columns) {
            if column.contains(key) {
                *slot = value;
            }
        }
    }

    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn preserves_column_count_and_order() {
        let cols = columns(&["Silica_Feed", "Iron_Feed", "Flotation_Column_01_Air_Flow"]);
        let vector = build_feature_vector(&SensorReadings::default(), &cols);

        assert_eq!(vector.len(), 3);
        assert_eq!(vector[0], 15.0);
        assert_eq!(vector[1], 55.0);
        assert_eq!(vector[2], 0.0);
    }

    #[test]
    fn unmatched_columns_default_to_zero() {
        let cols = columns(&["Flotation_Column_01_Level", "date_hour"]);
        let vector = build_feature_vector(&SensorReadings::default(), &cols);
        assert_eq!(vector, vec![0.0, 0.0]);
    }

    #[test]
    fn key_fans_out_to_derived_columns() {
        let cols = columns(&["Iron_Feed", "Iron_Feed_Rolling_Mean", "Iron_Feed_Lag_1"]);
        let vector = build_feature_vector(&SensorReadings::default(), &cols);
        assert_eq!(vector, vec![55.0, 55.0, 55.0]);
    }

    #[test]
    fn overlapping_keys_resolve_last_write_wins() {
        // Both Iron_Feed and Silica_Feed are substrings of this column.
        // Iron_Feed (55.0) is assigned first; Silica_Feed (15.0) comes
        // later in declared order and overwrites it.
        let cols = columns(&["Iron_Feed_vs_Silica_Feed_Ratio"]);
        let vector = build_feature_vector(&SensorReadings::default(), &cols);
        assert_eq!(vector, vec![15.0]);
    }

    #[test]
    fn empty_column_set_yields_empty_vector() {
        let vector = build_feature_vector(&SensorReadings::default(), &[]);
        assert!(vector.is_empty());
    }
}
