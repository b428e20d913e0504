//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::{validate_config, SUPPORTED_OPTIMIZERS};
use crate::config::schema::*;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_valid_spec() -> impl Strategy<Value = TrainSpec> {
    (
        proptest::sample::select(SUPPORTED_OPTIMIZERS.to_vec()), // optimizer
        1e-6f32..1.0,                                            // base_lr
        1i64..100_000,                                           // steps
        proptest::option::of(0.1f32..10.0),                      // clip_norm
        proptest::option::of((1i64..1000, 0.01f32..=1.0)),       // warmup
    )
        .prop_map(|(name, base_lr, steps, clip_norm, warmup)| TrainSpec {
            optimizer: OptimSpec { name: name.to_string(), params: HashMap::new() },
            lr_scheduler: SchedulerSpec {
                decay: DecaySpec::Cosine { base_lr, steps, alpha: 0.0 },
                warmup: warmup.map(|(steps, start_multiplier)| WarmupSpec::Linear {
                    steps,
                    start_multiplier,
                }),
            },
            grad_clipping: clip_norm.map(|clip_norm| ClipSpec::GlobalNorm { clip_norm }),
            loss_scale_factor: None,
            train_step_lbn: None,
        })
}

fn arb_ascending_boundaries() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::btree_set(0i64..100_000, 1..8).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_non_positive_lr_fails(spec in arb_valid_spec(), lr in -1.0f32..=0.0) {
        let mut spec = spec;
        spec.lr_scheduler.decay = DecaySpec::Cosine { base_lr: lr, steps: 10, alpha: 0.0 };
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn prop_non_positive_clip_fails(spec in arb_valid_spec(), clip_norm in -10.0f32..=0.0) {
        let mut spec = spec;
        spec.grad_clipping = Some(ClipSpec::GlobalNorm { clip_norm });
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidGradClip(_))
        ));
    }

    #[test]
    fn prop_warmup_multiplier_above_one_fails(spec in arb_valid_spec(), m in 1.0001f32..100.0) {
        let mut spec = spec;
        spec.lr_scheduler.warmup = Some(WarmupSpec::Constant { steps: 10, multiplier: m });
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidWarmupMultiplier(_))
        ));
    }

    #[test]
    fn prop_ascending_boundaries_pass(boundaries in arb_ascending_boundaries()) {
        let mut spec = TrainSpec {
            optimizer: OptimSpec { name: "sgd".to_string(), params: HashMap::new() },
            lr_scheduler: SchedulerSpec {
                decay: DecaySpec::Cosine { base_lr: 0.1, steps: 10, alpha: 0.0 },
                warmup: None,
            },
            grad_clipping: None,
            loss_scale_factor: None,
            train_step_lbn: None,
        };
        spec.lr_scheduler.decay = DecaySpec::PiecewiseScaling {
            base_lr: 0.1,
            boundaries: boundaries.clone(),
            scale: ScaleSpec::Scalar(0.5),
        };
        prop_assert!(validate_config(&spec).is_ok());

        if boundaries.len() > 1 {
            let mut reversed = boundaries;
            reversed.reverse();
            spec.lr_scheduler.decay = DecaySpec::PiecewiseScaling {
                base_lr: 0.1,
                boundaries: reversed,
                scale: ScaleSpec::Scalar(0.5),
            };
            prop_assert!(matches!(
                validate_config(&spec),
                Err(ValidationError::UnsortedBoundaries(_))
            ));
        }
    }
}
