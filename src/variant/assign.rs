//! Variant assignment.

use rand::Rng;

use super::Variant;

/// Where an assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentSource {
    /// Forced through the override query parameter.
    Override,
    /// Read back from the visitor's cookie.
    Cookie,
    /// Fresh coin flip.
    Random,
}

impl AssignmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentSource::Override => "override",
            AssignmentSource::Cookie => "cookie",
            AssignmentSource::Random => "random",
        }
    }
}

/// The variant chosen for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub variant: Variant,
    pub source: AssignmentSource,
}

/// Pick the variant for a homepage request.
///
/// A forced variant beats the stored one, and the stored one beats a fresh
/// draw. The draw is uniform over A and B.
pub fn assign<R: Rng + ?Sized>(
    forced: Option<Variant>,
    stored: Option<Variant>,
    rng: &mut R,
) -> Assignment {
    if let Some(variant) = forced {
        return Assignment {
            variant,
            source: AssignmentSource::Override,
        };
    }

    if let Some(variant) = stored {
        return Assignment {
            variant,
            source: AssignmentSource::Cookie,
        };
    }

    let variant = if rng.gen_bool(0.5) { Variant::A } else { Variant::B };
    Assignment {
        variant,
        source: AssignmentSource::Random,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_forced_beats_cookie() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = assign(Some(Variant::B), Some(Variant::A), &mut rng);
        assert_eq!(a.variant, Variant::B);
        assert_eq!(a.source, AssignmentSource::Override);
    }

    #[test]
    fn test_cookie_is_stable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let a = assign(None, Some(Variant::B), &mut rng);
            assert_eq!(a.variant, Variant::B);
            assert_eq!(a.source, AssignmentSource::Cookie);
        }
    }

    #[test]
    fn test_random_split_hits_both_variants() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut a_count = 0;
        let mut b_count = 0;
        for _ in 0..1000 {
            let a = assign(None, None, &mut rng);
            assert_eq!(a.source, AssignmentSource::Random);
            match a.variant {
                Variant::A => a_count += 1,
                Variant::B => b_count += 1,
            }
        }
        // Loose bounds: a fair coin over 1000 draws lands well inside these.
        assert!((400..=600).contains(&a_count), "A drawn {a_count} times");
        assert_eq!(a_count + b_count, 1000);
    }
}
