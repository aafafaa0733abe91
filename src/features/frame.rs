// ============================================================================
// FeatureFrame: retained, fully-defined feature rows for one request
// ============================================================================

/// Column-oriented frame of assembled feature rows.
///
/// Only rows with every field finite survive assembly, so all columns here
/// are dense. Column order is the assembler's canonical order; the predictor
/// re-orders by the model's feature-name list at extraction time.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    pub ticker: String,
    pub timestamps_ms: Vec<i64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl FeatureFrame {
    pub fn new(ticker: String, column_names: &[&str]) -> Self {
        FeatureFrame {
            ticker,
            timestamps_ms: Vec::new(),
            close: Vec::new(),
            volume: Vec::new(),
            columns: column_names
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Append one fully-defined row. `features` must follow the column order
    /// this frame was created with.
    pub fn push_row(&mut self, timestamp_ms: i64, close: f64, volume: f64, features: &[f64]) {
        debug_assert_eq!(features.len(), self.columns.len());
        self.timestamps_ms.push(timestamp_ms);
        self.close.push(close);
        self.volume.push(volume);
        for (column, value) in self.columns.iter_mut().zip(features) {
            column.1.push(*value);
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps_ms.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(col_name, _)| col_name == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }
}
