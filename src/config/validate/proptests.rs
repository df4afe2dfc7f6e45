//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::EngineConfig;
use crate::scaling::{LossModelParameters, SliderConfig, ZoneThresholds};
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = EngineConfig> {
    (
        1.0f64..1000.0,  // a
        1.0f64..1000.0,  // b
        0.05f64..1.0,    // alpha
        0.05f64..1.0,    // beta
        0.0f64..3.0,     // irreducible
        2usize..5000,    // sample_count
        0.1f64..0.99,    // low_factor
        1.01f64..5.0,    // high_factor
        1.0f64..20.0,    // min_ratio
        20.0f64..1000.0, // max_ratio
    )
        .prop_map(|(a, b, alpha, beta, irreducible, samples, low, high, min_ratio, max_ratio)| {
            EngineConfig {
                model: LossModelParameters { a, b, alpha, beta, irreducible },
                zones: ZoneThresholds { low_factor: low, high_factor: high },
                slider: SliderConfig { min_ratio, max_ratio },
                ..Default::default()
            }
            .with_samples(samples)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_non_positive_scale_fails(config in arb_valid_config(), a in -1000.0f64..=0.0) {
        let mut config = config;
        config.model.a = a;
        prop_assert!(matches!(validate_config(&config), Err(ValidationError::Model(_))));
    }

    #[test]
    fn prop_low_factor_at_or_above_one_fails(config in arb_valid_config(), low in 1.0f64..10.0) {
        let mut config = config;
        config.zones.low_factor = low;
        prop_assert!(matches!(validate_config(&config), Err(ValidationError::Zones(_))));
    }

    #[test]
    fn prop_too_few_samples_fails(config in arb_valid_config(), samples in 0usize..2) {
        let config = config.with_samples(samples);
        prop_assert!(matches!(validate_config(&config), Err(ValidationError::Search(_))));
    }
}
