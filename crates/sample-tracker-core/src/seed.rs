//! Initial data for the dashboard.

use thiserror::Error;

use crate::models::Sample;

const MOCK_SAMPLES: &str = include_str!("../data/mock_samples.json");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON array of samples.
pub fn samples_from_json(json: &str) -> Result<Vec<Sample>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// The bundled mock dataset.
pub fn mock_samples() -> Result<Vec<Sample>, SeedError> {
    samples_from_json(MOCK_SAMPLES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleStore;

    #[test]
    fn test_mock_samples_parse_and_seed() {
        let samples = mock_samples().unwrap();
        assert_eq!(samples.len(), 12);

        let store = SampleStore::from_seed(samples).unwrap();
        assert_eq!(store.all()[0].id, "SMP-001");
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let samples = samples_from_json(
            r#"[{"id":"X","sampleName":"n","sampleType":"Urine","collectedOn":"2024-01-02","status":"Pending"}]"#,
        )
        .unwrap();
        assert_eq!(samples[0].description, "");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = samples_from_json(
            r#"[{"id":"X","sampleName":"n","sampleType":"Urine","collectedOn":"2024-01-02","status":"Lost"}]"#,
        );
        assert!(result.is_err());
    }
}
